//! Scroll-triggered entrance.
//!
//! The surface is tagged with `reveal` and a direction attribute; CSS owns the
//! animation. When the surface scrolls into view, `is-revealed` is removed and
//! re-added two frames later so the transition restarts. With `once` the
//! observation ends after the first reveal; otherwise leaving the viewport
//! clears the class and the next entry plays it again.

use crate::behavior::Attachment;
use crate::constants::*;
use crate::frame::{FramePolicy, FrameSlot};
use crate::options::{OptionsPatch, RevealDirection};
use crate::platform::{Environment, ObserveOptions, Observation, Surface};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// Not in view yet (or left the view again when repeatable).
    Pending,
    Revealed,
    /// Revealed once and no longer observed.
    Terminal,
}

struct RevealShared {
    surface: Rc<dyn Surface>,
    once: bool,
    state: Cell<RevealState>,
    slot: FrameSlot,
    observation: RefCell<Option<Box<dyn Observation>>>,
    detached: Cell<bool>,
}

impl RevealShared {
    /// Restarts the entrance: drop the class now, add it back two frames later.
    ///
    /// One frame is not enough; the removal has to reach a rendered frame before
    /// the class returns or the transition does not run again.
    fn play(self: &Rc<Self>) {
        self.surface.remove_class(REVEALED_CLASS);
        let outer = Rc::downgrade(self);
        self.slot.request(FramePolicy::Replace, move || {
            let Some(shared) = outer.upgrade() else { return };
            let inner = Rc::downgrade(&shared);
            shared.slot.request(FramePolicy::Replace, move || {
                if let Some(shared) = inner.upgrade() {
                    shared.surface.add_class(REVEALED_CLASS);
                }
            });
        });
    }

    fn on_visibility(self: &Rc<Self>, intersecting: bool) {
        if self.detached.get() || self.state.get() == RevealState::Terminal {
            return;
        }
        if intersecting {
            self.play();
            if self.once {
                self.state.set(RevealState::Terminal);
                if let Some(observation) = self.observation.borrow().as_ref() {
                    observation.stop();
                }
                log::debug!("[reveal] revealed once; observation stopped");
            } else {
                self.state.set(RevealState::Revealed);
            }
        } else if !self.once {
            self.slot.cancel();
            self.surface.remove_class(REVEALED_CLASS);
            self.state.set(RevealState::Pending);
        }
    }
}

pub struct Reveal {
    shared: Rc<RevealShared>,
    /// `false` when the runtime had no visibility observer.
    observed: bool,
}

impl Reveal {
    pub fn attach(surface: Rc<dyn Surface>, env: &Environment, options: &OptionsPatch) -> Self {
        let direction = options.direction.unwrap_or_default();
        let once = options.once.unwrap_or(true);

        surface.add_class(REVEAL_CLASS);
        surface.set_attribute(REVEAL_DIRECTION_ATTR, direction.as_str());

        let shared = Rc::new(RevealShared {
            surface,
            once,
            state: Cell::new(RevealState::Pending),
            slot: FrameSlot::new(Rc::clone(&env.frames)),
            observation: RefCell::new(None),
            detached: Cell::new(false),
        });

        let weak = Rc::downgrade(&shared);
        let observe = ObserveOptions {
            threshold: REVEAL_THRESHOLD,
            root_margin: REVEAL_ROOT_MARGIN.to_string(),
        };
        let observation = shared.surface.observe_visibility(
            &observe,
            Box::new(move |intersecting| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_visibility(intersecting);
                }
            }),
        );

        match observation {
            Some(observation) => {
                if shared.state.get() == RevealState::Terminal {
                    observation.stop();
                }
                *shared.observation.borrow_mut() = Some(observation);
                log::debug!("[reveal] observing direction={} once={}", direction, once);
                Self {
                    shared,
                    observed: true,
                }
            }
            None => {
                log::debug!("[reveal] no visibility observer; revealing now");
                shared.play();
                shared.state.set(RevealState::Terminal);
                Self {
                    shared,
                    observed: false,
                }
            }
        }
    }

    pub fn state(&self) -> RevealState {
        self.shared.state.get()
    }

    pub fn is_observed(&self) -> bool {
        self.observed
    }
}

impl Attachment for Reveal {
    fn update(&self, patch: &OptionsPatch) {
        if !self.observed || self.shared.detached.get() {
            return;
        }
        let Some(direction) = patch.direction else { return };
        let surface = self.shared.surface.as_ref();
        if RevealDirection::of(surface) != Some(direction) {
            surface.set_attribute(REVEAL_DIRECTION_ATTR, direction.as_str());
        }
    }

    fn detach(&self) {
        if self.shared.detached.replace(true) {
            return;
        }
        if let Some(observation) = self.shared.observation.borrow().as_ref() {
            observation.stop();
        }
        self.shared.slot.cancel();
        log::debug!("[reveal] detached");
    }
}

impl RevealDirection {
    /// Reads the direction a surface is currently tagged with.
    pub fn of(surface: &dyn Surface) -> Option<RevealDirection> {
        surface
            .attribute(REVEAL_DIRECTION_ATTR)
            .and_then(|value| value.parse().ok())
    }
}
