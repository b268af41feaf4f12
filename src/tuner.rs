use crate::constants::{
    CENTER_MARKER_CLASS, MARKER_CLASS, TUNER_ARC_ID, TUNER_CENTS_ID, TUNER_NOTE_ID,
};
use crate::core::{TunerDisplay, TUNER_CENTER_MARKER, TUNER_MARKER_COUNT};
use crate::dom;
use web_sys as web;

/// DOM side of the tuner: note label, cents readout and the marker arc.
pub struct TunerView {
    note: Option<web::Element>,
    cents: Option<web::Element>,
    markers: Vec<web::Element>,
    shown: Option<TunerDisplay>,
}

impl TunerView {
    /// Look up the tuner elements and (re)build the marker row.
    pub fn attach(document: &web::Document) -> Self {
        let markers = match document.get_element_by_id(TUNER_ARC_ID) {
            Some(arc) => build_markers(document, &arc),
            None => Vec::new(),
        };
        let mut view = Self {
            note: document.get_element_by_id(TUNER_NOTE_ID),
            cents: document.get_element_by_id(TUNER_CENTS_ID),
            markers,
            shown: None,
        };
        view.render(&TunerDisplay::idle());
        view
    }

    /// Apply a display state; unchanged states skip the DOM writes.
    pub fn render(&mut self, display: &TunerDisplay) {
        if self.shown.as_ref() == Some(display) {
            return;
        }
        if let Some(note) = &self.note {
            note.set_text_content(Some(&display.label));
        }
        if let (Some(cents), Some(text)) = (&self.cents, &display.cents_text) {
            cents.set_text_content(Some(text));
        }
        for (marker, shade) in self.markers.iter().zip(display.markers.iter()) {
            dom::set_background(marker, shade.css_color());
        }
        self.shown = Some(display.clone());
    }

    pub fn reset(&mut self) {
        self.render(&TunerDisplay::idle());
    }

    /// Put a short message in the note label, e.g. when the mic is unavailable.
    pub fn show_message(&mut self, message: &str) {
        if let Some(note) = &self.note {
            note.set_text_content(Some(message));
        }
        self.shown = None;
    }
}

fn build_markers(document: &web::Document, arc: &web::Element) -> Vec<web::Element> {
    arc.set_inner_html("");
    let mut markers = Vec::with_capacity(TUNER_MARKER_COUNT);
    for i in 0..TUNER_MARKER_COUNT {
        let Ok(marker) = document.create_element("div") else {
            log::error!("[tuner] failed to create marker {}", i);
            continue;
        };
        let cl = marker.class_list();
        _ = cl.add_1(MARKER_CLASS);
        if i == TUNER_CENTER_MARKER {
            _ = cl.add_1(CENTER_MARKER_CLASS);
        }
        _ = arc.append_child(&marker);
        markers.push(marker);
    }
    markers
}
