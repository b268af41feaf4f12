use crate::audio::MicState;
use crate::core::{
    dragging_enabled, Highlight, PitchTracker, RotarySelector, TunerDisplay, MAX_FRAME_DELTA,
    REFERENCE_FRAME_RATE,
};
use crate::disc::{ButtonIndex, DiscView};
use crate::dom;
use crate::tuner::TunerView;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub selector: Rc<RefCell<RotarySelector>>,
    pub disc: Rc<DiscView>,
    pub highlight: Highlight<ButtonIndex>,

    pub mic: Rc<RefCell<MicState>>,
    pub tracker: Rc<RefCell<PitchTracker>>,
    pub tuner: Rc<RefCell<TunerView>>,

    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let delta_frames = frame_delta(dt.as_secs_f32());

        self.step_dial(delta_frames);
        self.step_tuner(delta_frames);
    }

    fn step_dial(&mut self, delta_frames: f32) {
        let (angle, locked, found) = {
            let mut selector = self.selector.borrow_mut();
            selector.tick(delta_frames);
            let found = if dragging_enabled(dom::viewport_width()) {
                selector.detect(self.disc.center(), &self.disc.targets())
            } else {
                None
            };
            (selector.angle_deg(), selector.is_locked(), found)
        };
        self.disc.set_rotation(angle);
        if let Some(change) = self.highlight.update(found, locked) {
            self.disc.apply_highlight(change);
        }
    }

    fn step_tuner(&mut self, delta_frames: f32) {
        let mut mic = self.mic.borrow_mut();
        let Some(capture) = mic.capture_mut() else {
            return;
        };
        let sample_rate = capture.sample_rate();
        let frame = capture.read_frame();
        let reading = self
            .tracker
            .borrow_mut()
            .estimate_pitch_dt(frame, sample_rate, delta_frames);
        self.tuner
            .borrow_mut()
            .render(&TunerDisplay::from_reading(&reading));
    }
}

/// Elapsed wall time in reference frames, capped after long stalls.
#[inline]
fn frame_delta(dt_sec: f32) -> f32 {
    (dt_sec * REFERENCE_FRAME_RATE).clamp(0.0, MAX_FRAME_DELTA)
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
