use crate::audio::{MicCapture, MicState};
use crate::constants::{
    MIC_ICON_ID, MIC_OFF_ICON, MIC_ON_ICON, MIC_TOGGLE_ID, MIC_UNAVAILABLE_TEXT, PAUSED_CLASS,
    TONEARM_SELECTOR,
};
use crate::core::{dragging_enabled, PitchTracker, RotarySelector};
use crate::disc::DiscView;
use crate::dom;
use crate::nav;
use crate::tuner::TunerView;
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[derive(Clone)]
pub struct TunerWiring {
    pub mic: Rc<RefCell<MicState>>,
    pub tracker: Rc<RefCell<PitchTracker>>,
    pub view: Rc<RefCell<TunerView>>,
}

fn set_mic_icon(document: &web::Document, on: bool) {
    if let Some(icon) = document
        .get_element_by_id(MIC_ICON_ID)
        .and_then(|el| el.dyn_into::<web::HtmlImageElement>().ok())
    {
        icon.set_src(if on { MIC_ON_ICON } else { MIC_OFF_ICON });
    }
}

/// Mic button: first click opens the microphone, the next one releases it.
pub fn wire_mic_toggle(document: &web::Document, w: TunerWiring) {
    let doc = document.clone();
    dom::add_click_listener_by_id(document, MIC_TOGGLE_ID, move || {
        let current = mem::replace(&mut *w.mic.borrow_mut(), MicState::Starting);
        match current {
            MicState::Running(capture) => {
                capture.close();
                *w.mic.borrow_mut() = MicState::Off;
                w.tracker.borrow_mut().reset();
                w.view.borrow_mut().reset();
                set_mic_icon(&doc, false);
            }
            MicState::Starting => {
                log::debug!("[mic] still starting, toggle ignored");
            }
            MicState::Off => {
                set_mic_icon(&doc, true);
                start_capture(doc.clone(), w.clone());
            }
        }
    });
}

fn start_capture(document: web::Document, w: TunerWiring) {
    spawn_local(async move {
        match MicCapture::open().await {
            Ok(capture) => {
                *w.mic.borrow_mut() = MicState::Running(capture);
            }
            Err(e) => {
                log::error!("[mic] {}", e);
                *w.mic.borrow_mut() = MicState::Off;
                w.view.borrow_mut().show_message(MIC_UNAVAILABLE_TEXT);
                set_mic_icon(&document, false);
            }
        }
    });
}

/// Tonearm click lifts or drops the needle: the dial freezes while lifted.
pub fn wire_tonearm(document: &web::Document, selector: Rc<RefCell<RotarySelector>>) {
    let Ok(Some(tonearm)) = document.query_selector(TONEARM_SELECTOR) else {
        return;
    };
    let tonearm_for_click = tonearm.clone();
    dom::add_click_listener(&tonearm, move || {
        let paused = selector.borrow_mut().toggle_pause();
        let cl = tonearm_for_click.class_list();
        if paused {
            _ = cl.add_1(PAUSED_CLASS);
        } else {
            _ = cl.remove_1(PAUSED_CLASS);
        }
        log::info!("[dial] {}", if paused { "paused" } else { "resumed" });
    });
}

/// On narrow viewports the dial cannot be dragged, so target buttons
/// navigate on a plain click.
pub fn wire_target_clicks(disc: &Rc<DiscView>) {
    for (button, section) in disc.buttons.iter() {
        let Some(section) = *section else {
            continue;
        };
        dom::add_click_listener(button, move || {
            if !dragging_enabled(dom::viewport_width()) {
                nav::go_to_section(section);
            }
        });
    }
}
