#![cfg(target_arch = "wasm32")]
use crate::audio::MicState;
use crate::core::{DialConfig, Highlight, PitchTracker, RotarySelector, TrackerConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod disc;
mod dom;
mod events;
mod frame;
mod nav;
mod tuner;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("disc-tuner starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    // ---------------- Rotary selector ----------------
    let disc = Rc::new(disc::DiscView::attach(&document)?);
    let selector = Rc::new(RefCell::new(RotarySelector::new(DialConfig::default())));

    events::wire_dial_handlers(events::DialWiring {
        selector: selector.clone(),
        disc: disc.clone(),
    });
    events::wire_tonearm(&document, selector.clone());
    events::wire_target_clicks(&disc);
    nav::wire_tab_buttons(&document);

    // ---------------- Pitch tracker ----------------
    let mic = Rc::new(RefCell::new(MicState::Off));
    let tracker = Rc::new(RefCell::new(PitchTracker::new(TrackerConfig::default())));
    let tuner_view = Rc::new(RefCell::new(tuner::TunerView::attach(&document)));

    events::wire_mic_toggle(
        &document,
        events::TunerWiring {
            mic: mic.clone(),
            tracker: tracker.clone(),
            view: tuner_view.clone(),
        },
    );

    // Both loops share one requestAnimationFrame callback
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        selector,
        disc,
        highlight: Highlight::default(),
        mic,
        tracker,
        tuner: tuner_view,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
