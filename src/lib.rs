//! Pointer-driven micro-interactions for marketing pages: magnetic hover,
//! 3D tilt, touch ripple and scroll reveal.
//!
//! The behaviors are written against the small platform traits in
//! [`platform`], so everything but the `web` bindings also builds and tests on
//! the host.

pub mod behavior;
pub mod constants;
pub mod css;
pub mod frame;
pub mod magnetic;
pub mod options;
pub mod platform;
pub mod reveal;
pub mod ripple;
pub mod tilt;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use behavior::{attach, parse_kinds, Attachment, BehaviorKind, Mounts};
pub use frame::{FramePolicy, FrameSlot};
pub use magnetic::Magnetic;
pub use options::{OptionError, OptionsPatch, RevealDirection};
pub use platform::{Capabilities, Environment, FrameScheduler, Surface};
pub use reveal::{Reveal, RevealState};
pub use ripple::Ripple;
pub use tilt::Tilt;

#[cfg(target_arch = "wasm32")]
mod start {
    use crate::constants::{AUTO_MOUNT_ATTR, LOG_LEVEL_ATTR};
    use crate::web;
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;

    thread_local! {
        // mounts made at startup live for the page
        static AUTO_MOUNTS: RefCell<Option<web::FxMounts>> = const { RefCell::new(None) };
    }

    fn log_level() -> log::Level {
        web::dom_root()
            .and_then(|root| root.get_attribute(LOG_LEVEL_ATTR))
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::Level::Info)
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log_level()).ok();
        log::info!("site-fx starting");

        if let Err(e) = init() {
            log::error!("init error: {:?}", e);
        }
        Ok(())
    }

    fn init() -> anyhow::Result<()> {
        let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| anyhow::anyhow!("no document element"))?;

        if !root.has_attribute(AUTO_MOUNT_ATTR) {
            return Ok(());
        }
        let mounts = web::mount_all(Some(root));
        AUTO_MOUNTS.with(|slot| *slot.borrow_mut() = Some(mounts));
        Ok(())
    }
}
