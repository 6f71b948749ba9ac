//! Magnetic attraction: the element drifts toward the pointer while it moves
//! over it and springs back (via CSS transition) when the pointer leaves.
//!
//! This is a pointer-precision effect. In a touch-primary runtime the behavior
//! stays inert so it never fights touch scrolling.

use crate::behavior::{bind, release, Attachment, Listeners};
use crate::constants::{
    MAGNETIC_GAIN_X_PX, MAGNETIC_GAIN_Y_PX, MAGNETIC_STRENGTH_DEFAULT, TRANSFORM,
};
use crate::css;
use crate::frame::{FramePolicy, FrameSlot};
use crate::options::{finite, OptionsPatch};
use crate::platform::{Environment, PointerEventKind, PointerSample, Rect, Surface};
use std::cell::Cell;
use std::rc::Rc;

/// Pointer position relative to the box center, in [-1, 1] on each axis when
/// the pointer is inside the box.
#[inline]
pub fn magnetic_offset(rect: &Rect, client_x: f64, client_y: f64) -> [f64; 2] {
    let [rx, ry] = rect.relative(client_x, client_y);
    [(rx - 0.5) * 2.0, (ry - 0.5) * 2.0]
}

/// Translation in pixels for a normalized offset.
#[inline]
pub fn magnetic_translation(offset: [f64; 2], strength: f64) -> [f64; 2] {
    [
        offset[0] * strength * MAGNETIC_GAIN_X_PX,
        offset[1] * strength * MAGNETIC_GAIN_Y_PX,
    ]
}

struct MagneticState {
    surface: Rc<dyn Surface>,
    strength: Cell<f64>,
    policy: FramePolicy,
    slot: FrameSlot,
    listeners: Listeners,
    detached: Cell<bool>,
}

impl MagneticState {
    fn on_move(self: &Rc<Self>, sample: &PointerSample) {
        if self.detached.get() {
            return;
        }
        let rect = self.surface.bounds();
        if rect.is_empty() {
            return;
        }
        let offset = magnetic_offset(&rect, sample.client_x, sample.client_y);
        let weak = Rc::downgrade(self);
        self.slot.request(self.policy, move || {
            if let Some(state) = weak.upgrade() {
                // strength is read here so an update() between move and paint applies
                let [x, y] = magnetic_translation(offset, state.strength.get());
                state.surface.set_style(TRANSFORM, &css::translate3d(x, y));
            }
        });
    }

    fn on_release(self: &Rc<Self>, _sample: &PointerSample) {
        if self.detached.get() {
            return;
        }
        let surface = Rc::clone(&self.surface);
        self.slot.request(FramePolicy::Replace, move || {
            surface.remove_style(TRANSFORM);
        });
    }
}

pub struct Magnetic {
    state: Option<Rc<MagneticState>>,
}

impl Magnetic {
    pub fn attach(surface: Rc<dyn Surface>, env: &Environment, options: &OptionsPatch) -> Self {
        if env.capabilities.touch {
            log::debug!("[magnetic] touch-capable runtime; inert");
            return Self { state: None };
        }

        let strength = options
            .strength
            .and_then(finite)
            .unwrap_or(MAGNETIC_STRENGTH_DEFAULT);
        let state = Rc::new(MagneticState {
            surface,
            strength: Cell::new(strength),
            policy: options.policy.unwrap_or_default(),
            slot: FrameSlot::new(Rc::clone(&env.frames)),
            listeners: Default::default(),
            detached: Cell::new(false),
        });

        let surface = state.surface.as_ref();
        let ids = [
            bind(surface, PointerEventKind::Move, &state, MagneticState::on_move),
            bind(surface, PointerEventKind::Leave, &state, MagneticState::on_release),
            bind(surface, PointerEventKind::Up, &state, MagneticState::on_release),
        ];
        state.listeners.borrow_mut().extend(ids);

        log::debug!(
            "[magnetic] attached strength={:.2} policy={}",
            strength,
            state.policy.as_str()
        );
        Self { state: Some(state) }
    }

    /// `false` when the runtime made the behavior inert.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn strength(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.strength.get())
    }

    pub fn policy(&self) -> Option<FramePolicy> {
        self.state.as_ref().map(|s| s.policy)
    }
}

impl Attachment for Magnetic {
    fn update(&self, patch: &OptionsPatch) {
        let Some(state) = &self.state else { return };
        if let Some(strength) = patch.strength.and_then(finite) {
            state.strength.set(strength);
        }
    }

    fn detach(&self) {
        let Some(state) = &self.state else { return };
        if state.detached.replace(true) {
            return;
        }
        state.slot.cancel();
        release(state.surface.as_ref(), &state.listeners);
        log::debug!("[magnetic] detached");
    }
}
