//! Touch ripple: a short-lived circle spawned under the finger on press.
//!
//! Mouse presses are ignored on purpose; the ripple is a touch affordance.
//! Each ripple removes itself when its CSS animation ends, so the behavior
//! keeps no reference to it and `detach` leaves running ripples alone.

use crate::behavior::{bind, release, Attachment, Listeners};
use crate::constants::*;
use crate::css;
use crate::options::{finite, OptionsPatch};
use crate::platform::{Environment, PointerEventKind, PointerKind, PointerSample, Rect, Surface};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Ripple box in surface-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleGeometry {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// Diameter covers the surface from any press point; the circle is centered
/// on the press.
pub fn ripple_geometry(rect: &Rect, client_x: f64, client_y: f64) -> RippleGeometry {
    let size = rect.width.max(rect.height) * RIPPLE_COVERAGE;
    RippleGeometry {
        size,
        left: client_x - rect.left - size / 2.0,
        top: client_y - rect.top - size / 2.0,
    }
}

struct RippleState {
    surface: Rc<dyn Surface>,
    color: RefCell<String>,
    duration_ms: Cell<f64>,
    listeners: Listeners,
    detached: Cell<bool>,
}

impl RippleState {
    fn on_down(self: &Rc<Self>, sample: &PointerSample) {
        if self.detached.get() || !matches!(sample.kind, PointerKind::Touch | PointerKind::Pen) {
            return;
        }
        let rect = self.surface.bounds();
        if rect.is_empty() {
            return;
        }
        let g = ripple_geometry(&rect, sample.client_x, sample.client_y);
        let styles = [
            ("width", css::px(g.size)),
            ("height", css::px(g.size)),
            ("left", css::px(g.left)),
            ("top", css::px(g.top)),
            ("background", self.color.borrow().clone()),
            ("animation-duration", css::ms(self.duration_ms.get())),
        ];
        self.surface.spawn_transient(RIPPLE_CLASS, &styles);
    }
}

pub struct Ripple {
    state: Option<Rc<RippleState>>,
}

impl Ripple {
    pub fn attach(surface: Rc<dyn Surface>, env: &Environment, options: &OptionsPatch) -> Self {
        if env.capabilities.reduced_motion {
            log::debug!("[ripple] reduced motion preferred; inert");
            return Self { state: None };
        }

        // the surface has to clip its ripples; this is not undone on detach
        if surface.style(POSITION).is_empty() {
            surface.set_style(POSITION, "relative");
        }
        surface.set_style(OVERFLOW, "hidden");

        let state = Rc::new(RippleState {
            surface,
            color: RefCell::new(
                options
                    .color
                    .clone()
                    .unwrap_or_else(|| RIPPLE_COLOR_DEFAULT.to_string()),
            ),
            duration_ms: Cell::new(
                options
                    .duration_ms
                    .and_then(finite)
                    .unwrap_or(RIPPLE_DURATION_MS_DEFAULT),
            ),
            listeners: Default::default(),
            detached: Cell::new(false),
        });
        let id = bind(
            state.surface.as_ref(),
            PointerEventKind::Down,
            &state,
            RippleState::on_down,
        );
        state.listeners.borrow_mut().push(id);

        log::debug!("[ripple] attached");
        Self { state: Some(state) }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }
}

impl Attachment for Ripple {
    /// Color and duration apply from the next press on.
    fn update(&self, patch: &OptionsPatch) {
        let Some(state) = &self.state else { return };
        if let Some(color) = &patch.color {
            *state.color.borrow_mut() = color.clone();
        }
        if let Some(duration) = patch.duration_ms.and_then(finite) {
            state.duration_ms.set(duration);
        }
    }

    fn detach(&self) {
        let Some(state) = &self.state else { return };
        if state.detached.replace(true) {
            return;
        }
        release(state.surface.as_ref(), &state.listeners);
        log::debug!("[ripple] detached");
    }
}
