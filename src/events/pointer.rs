use crate::core::{dragging_enabled, RotarySelector};
use crate::disc::DiscView;
use crate::dom;
use crate::nav;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct DialWiring {
    pub selector: Rc<RefCell<RotarySelector>>,
    pub disc: Rc<DiscView>,
}

pub fn wire_dial_handlers(w: DialWiring) {
    wire_mousedown(&w);
    wire_mousemove(&w);
    wire_mouseup(&w);
}

#[inline]
fn client_point(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

fn wire_mousedown(w: &DialWiring) {
    let w = w.clone();
    let disc_for_listener = w.disc.disc.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !dragging_enabled(dom::viewport_width()) {
            return;
        }
        let center = w.disc.center();
        w.selector
            .borrow_mut()
            .on_pointer_down(client_point(&ev), center);
        w.disc.set_cursor(true);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = disc_for_listener
        .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_mousemove(w: &DialWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !w.selector.borrow().is_dragging() {
            return;
        }
        let center = w.disc.center();
        w.selector
            .borrow_mut()
            .on_pointer_move(client_point(&ev), center);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_mouseup(w: &DialWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        if !w.selector.borrow().is_dragging() {
            return;
        }
        w.disc.set_cursor(false);
        let center = w.disc.center();
        let targets = w.disc.targets();
        let selected = w.selector.borrow_mut().on_pointer_up(center, &targets);
        let Some(index) = selected else {
            log::debug!("[dial] released with no target in range");
            return;
        };
        w.disc.mark_locked(index);
        match w.disc.section_of(index) {
            Some(section) => {
                log::info!("[dial] locked on target {} ({:?})", index, section);
                nav::go_to_section(section);
            }
            None => log::warn!("[dial] target {} has no section", index),
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
