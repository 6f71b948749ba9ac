//! 3D tilt toward the pointer, with a small hover scale.
//!
//! Rotation is written as one `transform` per frame (latest sample wins) and
//! smoothed by a CSS transition installed at attach time. The two angles are
//! also exposed as `--tilt-x`/`--tilt-y` so overlays (gloss, shine) can follow.

use crate::behavior::{bind, release, Attachment, Listeners};
use crate::constants::*;
use crate::css;
use crate::frame::{FramePolicy, FrameSlot};
use crate::options::{finite, OptionsPatch};
use crate::platform::{Environment, PointerEventKind, PointerSample, Surface};
use std::cell::Cell;
use std::rc::Rc;

/// `[rotateX, rotateY]` in degrees for a pointer at `rel` (box-relative, 0..1).
#[inline]
pub fn tilt_angles(max_tilt: f64, rel: [f64; 2]) -> [f64; 2] {
    let [rel_x, rel_y] = rel;
    let x = max_tilt / 2.0 - rel_y * max_tilt;
    let y = (rel_x * max_tilt - max_tilt / 2.0) * TILT_Y_DAMPING;
    [x, y]
}

struct TiltState {
    surface: Rc<dyn Surface>,
    max_tilt: Cell<f64>,
    scale: f64,
    hover_scale: f64,
    hovering: Cell<bool>,
    slot: FrameSlot,
    listeners: Listeners,
    detached: Cell<bool>,
}

impl TiltState {
    fn on_move(self: &Rc<Self>, sample: &PointerSample) {
        if self.detached.get() {
            return;
        }
        let rect = self.surface.bounds();
        if rect.is_empty() {
            return;
        }
        let rel = rect.relative(sample.client_x, sample.client_y);
        let [x, y] = tilt_angles(self.max_tilt.get(), rel);
        let (x_text, y_text) = (css::fixed2(x), css::fixed2(y));
        let weak = Rc::downgrade(self);
        self.slot.request(FramePolicy::Replace, move || {
            let Some(state) = weak.upgrade() else { return };
            // the transform uses the same two-decimal values the properties carry
            let x = x_text.parse::<f64>().unwrap_or(0.0);
            let y = y_text.parse::<f64>().unwrap_or(0.0);
            let surface = &state.surface;
            surface.set_style(TRANSFORM, &css::tilt_transform(x, y, state.hover_scale));
            surface.set_style(TILT_X_PROPERTY, &x_text);
            surface.set_style(TILT_Y_PROPERTY, &y_text);
            log::trace!("[tilt] rotate x={} y={}", x_text, y_text);
        });
    }

    fn on_enter(self: &Rc<Self>, _sample: &PointerSample) {
        self.hovering.set(true);
    }

    fn on_leave(self: &Rc<Self>, _sample: &PointerSample) {
        self.hovering.set(false);
        if self.detached.get() {
            return;
        }
        let weak = Rc::downgrade(self);
        self.slot.request(FramePolicy::Replace, move || {
            let Some(state) = weak.upgrade() else { return };
            let surface = &state.surface;
            surface.set_style(TRANSFORM, &css::tilt_transform(0.0, 0.0, state.scale));
            surface.remove_style(TILT_X_PROPERTY);
            surface.remove_style(TILT_Y_PROPERTY);
        });
    }
}

pub struct Tilt {
    state: Option<Rc<TiltState>>,
}

impl Tilt {
    pub fn attach(surface: Rc<dyn Surface>, env: &Environment, options: &OptionsPatch) -> Self {
        if env.capabilities.reduced_motion {
            log::debug!("[tilt] reduced motion preferred; inert");
            return Self { state: None };
        }

        let state = Rc::new(TiltState {
            surface,
            max_tilt: Cell::new(options.max_tilt.and_then(finite).unwrap_or(TILT_MAX_DEG_DEFAULT)),
            scale: options.scale.and_then(finite).unwrap_or(TILT_SCALE_DEFAULT),
            hover_scale: options
                .hover_scale
                .and_then(finite)
                .unwrap_or(TILT_HOVER_SCALE_DEFAULT),
            hovering: Cell::new(false),
            slot: FrameSlot::new(Rc::clone(&env.frames)),
            listeners: Default::default(),
            detached: Cell::new(false),
        });

        let surface = state.surface.as_ref();
        surface.set_style(TRANSITION, TILT_TRANSITION);
        surface.set_style(TRANSFORM_STYLE, "preserve-3d");

        let ids = [
            bind(surface, PointerEventKind::Move, &state, TiltState::on_move),
            // a press tilts immediately, without waiting for a move
            bind(surface, PointerEventKind::Down, &state, TiltState::on_move),
            bind(surface, PointerEventKind::Enter, &state, TiltState::on_enter),
            bind(surface, PointerEventKind::Leave, &state, TiltState::on_leave),
            bind(surface, PointerEventKind::Up, &state, TiltState::on_leave),
        ];
        state.listeners.borrow_mut().extend(ids);

        log::debug!("[tilt] attached max_tilt={}", state.max_tilt.get());
        Self { state: Some(state) }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_hovering(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.hovering.get())
    }

    pub fn max_tilt(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.max_tilt.get())
    }
}

impl Attachment for Tilt {
    fn update(&self, patch: &OptionsPatch) {
        let Some(state) = &self.state else { return };
        if let Some(max_tilt) = patch.max_tilt.and_then(finite) {
            state.max_tilt.set(max_tilt);
        }
    }

    fn detach(&self) {
        let Some(state) = &self.state else { return };
        if state.detached.replace(true) {
            return;
        }
        state.slot.cancel();
        release(state.surface.as_ref(), &state.listeners);
        log::debug!("[tilt] detached");
    }
}
