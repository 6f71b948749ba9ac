use crate::platform::{FrameScheduler, FrameToken};
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameClosure = Closure<dyn FnMut()>;

/// `requestAnimationFrame`-backed scheduler.
///
/// Each pending closure is owned here until it fires or is cancelled. A fired
/// closure cannot drop itself, so it is parked in `spent` and released at the
/// start of the next fired frame.
#[derive(Default)]
pub struct RafScheduler {
    next: Cell<u64>,
    pending: Rc<RefCell<FnvHashMap<u64, (i32, FrameClosure)>>>,
    spent: Rc<RefCell<Vec<FrameClosure>>>,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&self, callback: Box<dyn FnOnce()>) -> Option<FrameToken> {
        let id = self.next.get();
        self.next.set(id.wrapping_add(1));

        let window = web::window()?;

        let pending = Rc::clone(&self.pending);
        let spent = Rc::clone(&self.spent);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            spent.borrow_mut().clear();
            let own = pending.borrow_mut().remove(&id);
            if let Some((_, own)) = own {
                spent.borrow_mut().push(own);
            }
            if let Some(callback) = callback.take() {
                callback();
            }
        }) as Box<dyn FnMut()>);

        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => {
                self.pending.borrow_mut().insert(id, (handle, closure));
                Some(FrameToken(id))
            }
            Err(e) => {
                log::warn!("[frames] requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&self, token: FrameToken) {
        let entry = self.pending.borrow_mut().remove(&token.0);
        if let Some((handle, closure)) = entry {
            if let Some(window) = web::window() {
                _ = window.cancel_animation_frame(handle);
            }
            drop(closure);
        }
    }
}
