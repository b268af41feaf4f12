// Rotary selector: a spinning disc the user can grab and fling, whose needle
// picks one of a few fixed on-screen targets.
//
// The selector is a plain value driven from outside:
// - pointer callbacks call `on_pointer_down` / `on_pointer_move` / `on_pointer_up`,
//   which only record angles and flags
// - the frame loop calls `tick(delta_frames)` once per display frame and then
//   `detect(center, targets)` for live highlighting
//
// Angles are in degrees, screen coordinates (y grows downwards). The rotation
// accumulates without bound; only trigonometric consumers ever read it.

use super::constants::{
    DIAL_DRAG_GAIN, DIAL_FRICTION_PER_FRAME, DIAL_MIN_SPIN_PER_FRAME,
    DIAL_POINTER_REST_OFFSET_DEG, DIAL_TARGET_TOLERANCE_DEG, NARROW_VIEWPORT_MAX_PX,
};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialMode {
    /// Free rotation with friction, settling into a slow perpetual creep.
    Spinning,
    /// Following the pointer.
    Dragging,
    /// Released over a target; physics frozen until the next grab.
    Locked,
}

/// Snapshot of the dial's kinematic state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationState {
    pub angle_deg: f64,
    /// Degrees per reference frame.
    pub angular_velocity: f32,
    /// +1.0 or -1.0: direction of the last nonzero spin.
    pub last_nonzero_sign: f32,
    pub is_dragging: bool,
    pub is_locked: bool,
}

/// Physics and detection parameters. All rates are per reference frame.
#[derive(Clone, Debug)]
pub struct DialConfig {
    pub friction_per_frame: f32,
    pub min_spin_per_frame: f32,
    pub drag_gain: f32,
    pub target_tolerance_deg: f32,
    pub pointer_rest_offset_deg: f32,
    /// When set, a lock releases itself after this many reference frames.
    pub auto_unlock_after_frames: Option<f32>,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            friction_per_frame: DIAL_FRICTION_PER_FRAME,
            min_spin_per_frame: DIAL_MIN_SPIN_PER_FRAME,
            drag_gain: DIAL_DRAG_GAIN,
            target_tolerance_deg: DIAL_TARGET_TOLERANCE_DEG,
            pointer_rest_offset_deg: DIAL_POINTER_REST_OFFSET_DEG,
            auto_unlock_after_frames: None,
        }
    }
}

/// A candidate target: opaque identity plus its live screen centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionTarget<T> {
    pub id: T,
    pub position: Vec2,
}

/// Angle of `point` around `center`, in (-180, 180].
#[inline]
pub fn pointer_angle_deg(point: Vec2, center: Vec2) -> f32 {
    let d = point - center;
    d.y.atan2(d.x).to_degrees()
}

/// Signed difference `to - from` taking the short way round.
///
/// Inputs come from `atan2`, so a single ±360 correction is enough.
#[inline]
pub fn shortest_delta_deg(from: f32, to: f32) -> f32 {
    let delta = to - from;
    if delta > 180.0 {
        delta - 360.0
    } else if delta < -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

/// Unit vector the needle points along for a given dial rotation.
#[inline]
pub fn needle_direction(angle_deg: f64, rest_offset_deg: f32) -> Vec2 {
    let rad = ((angle_deg - rest_offset_deg as f64).rem_euclid(360.0) as f32).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Target the needle currently points at, if any lies within `tolerance_deg`.
///
/// Among candidates in tolerance the one with the largest dot product wins.
/// Targets sitting exactly on the centre have no direction and are skipped.
pub fn detect_target<T: Copy>(
    angle_deg: f64,
    center: Vec2,
    targets: &[SelectionTarget<T>],
    tolerance_deg: f32,
    rest_offset_deg: f32,
) -> Option<T> {
    let needle = needle_direction(angle_deg, rest_offset_deg);
    let mut best: Option<(T, f32)> = None;
    for target in targets {
        let Some(dir) = (target.position - center).try_normalize() else {
            continue;
        };
        let dot = needle.dot(dir).clamp(-1.0, 1.0);
        if dot.acos().to_degrees() > tolerance_deg {
            continue;
        }
        match best {
            Some((_, best_dot)) if dot <= best_dot => {}
            _ => best = Some((target.id, dot)),
        }
    }
    best.map(|(id, _)| id)
}

/// Whether a viewport of this CSS width drags the dial at all.
#[inline]
pub fn dragging_enabled(viewport_width_px: f64) -> bool {
    viewport_width_px > NARROW_VIEWPORT_MAX_PX
}

pub struct RotarySelector {
    pub config: DialConfig,
    mode: DialMode,
    angle_deg: f64,
    velocity: f32,
    last_sign: f32,
    paused: bool,
    last_pointer_deg: f32,
    pending_delta_deg: f32,
    moved_this_frame: bool,
    locked_frames: f32,
}

impl Default for RotarySelector {
    fn default() -> Self {
        Self::new(DialConfig::default())
    }
}

impl RotarySelector {
    pub fn new(config: DialConfig) -> Self {
        Self {
            config,
            mode: DialMode::Spinning,
            angle_deg: 0.0,
            velocity: 0.0,
            last_sign: 1.0,
            paused: false,
            last_pointer_deg: 0.0,
            pending_delta_deg: 0.0,
            moved_this_frame: false,
            locked_frames: 0.0,
        }
    }

    pub fn mode(&self) -> DialMode {
        self.mode
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn is_locked(&self) -> bool {
        self.mode == DialMode::Locked
    }

    pub fn is_dragging(&self) -> bool {
        self.mode == DialMode::Dragging
    }

    pub fn state(&self) -> RotationState {
        RotationState {
            angle_deg: self.angle_deg,
            angular_velocity: self.velocity,
            last_nonzero_sign: self.last_sign,
            is_dragging: self.is_dragging(),
            is_locked: self.is_locked(),
        }
    }

    /// Set the rotation directly, e.g. to restore a saved orientation.
    pub fn set_angle(&mut self, angle_deg: f64) {
        self.angle_deg = angle_deg;
    }

    /// Give the dial a spin of `velocity` degrees per reference frame.
    pub fn fling(&mut self, velocity: f32) {
        self.velocity = velocity;
        self.note_direction();
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or resume the physics; returns the new paused flag.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Grab the dial. Always releases a lock.
    pub fn on_pointer_down(&mut self, point: Vec2, center: Vec2) {
        if self.mode == DialMode::Locked {
            log::debug!("[dial] unlocked by grab at {:.1}deg", self.angle_deg);
        }
        self.mode = DialMode::Dragging;
        self.last_pointer_deg = pointer_angle_deg(point, center);
        self.pending_delta_deg = 0.0;
        self.moved_this_frame = false;
        self.locked_frames = 0.0;
    }

    /// Record pointer travel around the centre; ignored unless dragging.
    pub fn on_pointer_move(&mut self, point: Vec2, center: Vec2) {
        if self.mode != DialMode::Dragging {
            return;
        }
        let angle = pointer_angle_deg(point, center);
        self.pending_delta_deg += shortest_delta_deg(self.last_pointer_deg, angle);
        self.last_pointer_deg = angle;
        self.moved_this_frame = true;
    }

    /// Release the dial. Returns the selected target when the needle is
    /// aligned with one, which also locks the dial. Without a drag in
    /// progress this is a no-op.
    pub fn on_pointer_up<T: Copy>(
        &mut self,
        center: Vec2,
        targets: &[SelectionTarget<T>],
    ) -> Option<T> {
        if self.mode != DialMode::Dragging {
            return None;
        }
        match self.detect(center, targets) {
            Some(id) => {
                self.mode = DialMode::Locked;
                self.locked_frames = 0.0;
                Some(id)
            }
            None => {
                self.mode = DialMode::Spinning;
                None
            }
        }
    }

    /// Target the needle points at right now.
    pub fn detect<T: Copy>(&self, center: Vec2, targets: &[SelectionTarget<T>]) -> Option<T> {
        detect_target(
            self.angle_deg,
            center,
            targets,
            self.config.target_tolerance_deg,
            self.config.pointer_rest_offset_deg,
        )
    }

    /// Advance the simulation by `delta_frames` reference frames.
    pub fn tick(&mut self, delta_frames: f32) {
        let dt = delta_frames.max(0.0);
        match self.mode {
            DialMode::Locked => self.step_lock(dt),
            _ if self.paused => {}
            DialMode::Dragging => self.step_drag(dt),
            DialMode::Spinning => self.step_spin(dt),
        }
        self.moved_this_frame = false;
        self.pending_delta_deg = 0.0;
    }

    fn step_drag(&mut self, dt: f32) {
        if !self.moved_this_frame {
            // a stale velocity must not keep turning a held dial
            self.velocity = 0.0;
            return;
        }
        let turned = self.pending_delta_deg * self.config.drag_gain;
        self.velocity = if dt > 0.0 { turned / dt } else { turned };
        self.angle_deg += turned as f64;
        self.note_direction();
    }

    fn step_spin(&mut self, dt: f32) {
        let min_spin = self.config.min_spin_per_frame;
        if self.velocity.abs() <= min_spin {
            self.velocity = self.last_sign * min_spin;
            self.angle_deg += (self.velocity * dt) as f64;
            return;
        }
        // closed form of `v *= f; angle += v` repeated over `dt` frames
        let friction = self.config.friction_per_frame;
        let decay = friction.powf(dt);
        let travelled = if (1.0 - friction).abs() > f32::EPSILON {
            self.velocity * friction * (1.0 - decay) / (1.0 - friction)
        } else {
            self.velocity * dt
        };
        self.velocity *= decay;
        self.angle_deg += travelled as f64;
        self.note_direction();
    }

    fn step_lock(&mut self, dt: f32) {
        let Some(limit) = self.config.auto_unlock_after_frames else {
            return;
        };
        self.locked_frames += dt;
        if self.locked_frames >= limit {
            log::debug!("[dial] lock expired after {:.0} frames", self.locked_frames);
            self.mode = DialMode::Spinning;
            self.locked_frames = 0.0;
        }
    }

    fn note_direction(&mut self) {
        if self.velocity != 0.0 {
            self.last_sign = self.velocity.signum();
        }
    }
}

/// Change in the highlighted target between two frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightChange<T> {
    pub previous: Option<T>,
    pub current: Option<T>,
}

/// Tracks which target is highlighted. While the dial is locked the
/// highlight stays on whatever it was.
#[derive(Clone, Debug)]
pub struct Highlight<T> {
    active: Option<T>,
}

impl<T> Default for Highlight<T> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<T: Copy + PartialEq> Highlight<T> {
    pub fn active(&self) -> Option<T> {
        self.active
    }

    /// Feed this frame's detection result; returns the change to render, if any.
    pub fn update(&mut self, found: Option<T>, locked: bool) -> Option<HighlightChange<T>> {
        if locked || found == self.active {
            return None;
        }
        let previous = std::mem::replace(&mut self.active, found);
        Some(HighlightChange {
            previous,
            current: found,
        })
    }
}
