//! Browser bindings: the DOM-backed surface and scheduler, capability
//! detection, and the functions exported to JavaScript.

mod exports;
mod frames;
mod surface;

pub use exports::{mount_all, FxHandle, FxMounts};
pub use frames::RafScheduler;
pub use surface::WebSurface;

use crate::platform::{Capabilities, Environment};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

thread_local! {
    static FRAMES: Rc<RafScheduler> = Rc::new(RafScheduler::new());
}

/// Reads the touch and reduced-motion signals. Called once per attach.
pub fn capabilities() -> Capabilities {
    let Some(window) = web::window() else {
        return Capabilities::default();
    };
    let touch = js_sys::Reflect::has(&window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || window.navigator().max_touch_points() > 0;
    let reduced_motion = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    Capabilities {
        touch,
        reduced_motion,
    }
}

pub(crate) fn dom_root() -> Option<web::Element> {
    web::window()?.document()?.document_element()
}

/// Capabilities as of now, plus the page-wide frame scheduler.
pub fn environment() -> Environment {
    let frames = FRAMES.with(Rc::clone);
    Environment::new(capabilities(), frames)
}
