use crate::constants::{
    DISC_ID, HIGHLIGHT_COLOR, LOCKED_CLASS, RESTING_COLOR, ROTATION_PROPERTY, TARGET_SELECTOR,
};
use crate::core::{HighlightChange, SelectionTarget};
use crate::dom;
use crate::nav::Section;
use glam::Vec2;
use smallvec::SmallVec;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Index into `DiscView::buttons`; what the rotary selector hands back.
pub type ButtonIndex = usize;

pub type TargetGeometry = SmallVec<[SelectionTarget<ButtonIndex>; 8]>;

/// DOM side of the spinning disc: the disc element and its target buttons.
/// Geometry is always read fresh, never cached.
pub struct DiscView {
    pub disc: web::HtmlElement,
    pub buttons: Vec<(web::Element, Option<Section>)>,
}

impl DiscView {
    pub fn attach(document: &web::Document) -> anyhow::Result<Self> {
        let disc = document
            .get_element_by_id(DISC_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", DISC_ID))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let buttons: Vec<_> = dom::query_all(document, TARGET_SELECTOR)
            .into_iter()
            .map(|b| {
                let section = Section::for_button(&b);
                (b, section)
            })
            .collect();
        log::info!("[dial] attached with {} targets", buttons.len());
        Ok(Self { disc, buttons })
    }

    pub fn center(&self) -> Vec2 {
        dom::element_center(&self.disc)
    }

    /// Live screen centres of every target button.
    pub fn targets(&self) -> TargetGeometry {
        self.buttons
            .iter()
            .enumerate()
            .map(|(i, (button, _))| SelectionTarget {
                id: i,
                position: dom::element_center(button),
            })
            .collect()
    }

    pub fn section_of(&self, index: ButtonIndex) -> Option<Section> {
        self.buttons.get(index).and_then(|(_, s)| *s)
    }

    pub fn set_rotation(&self, angle_deg: f64) {
        _ = self
            .disc
            .style()
            .set_property(ROTATION_PROPERTY, &format!("{:.3}deg", angle_deg));
    }

    pub fn set_cursor(&self, grabbing: bool) {
        _ = self
            .disc
            .style()
            .set_property("cursor", if grabbing { "grabbing" } else { "grab" });
    }

    pub fn apply_highlight(&self, change: HighlightChange<ButtonIndex>) {
        if let Some((button, _)) = change.previous.and_then(|i| self.buttons.get(i)) {
            dom::set_background(button, RESTING_COLOR);
            _ = button.class_list().remove_1(LOCKED_CLASS);
        }
        if let Some((button, _)) = change.current.and_then(|i| self.buttons.get(i)) {
            dom::set_background(button, HIGHLIGHT_COLOR);
        }
    }

    pub fn mark_locked(&self, index: ButtonIndex) {
        if let Some((button, _)) = self.buttons.get(index) {
            _ = button.class_list().add_1(LOCKED_CLASS);
        }
    }
}
