use crate::magnetic::Magnetic;
use crate::options::{OptionError, OptionsPatch};
use crate::platform::{Environment, ListenerId, PointerEventKind, PointerSample, Surface};
use crate::reveal::Reveal;
use crate::ripple::Ripple;
use crate::tilt::Tilt;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::str::FromStr;

/// The handle a host keeps for one behavior bound to one surface.
///
/// `update` may be called any number of times before `detach`. After `detach`
/// returns no listener or scheduled frame of the behavior is left, and a
/// second `detach` does nothing.
pub trait Attachment {
    fn update(&self, patch: &OptionsPatch);
    fn detach(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorKind {
    Magnetic,
    Tilt,
    Ripple,
    Reveal,
}

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 4] = [
        BehaviorKind::Magnetic,
        BehaviorKind::Tilt,
        BehaviorKind::Ripple,
        BehaviorKind::Reveal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BehaviorKind::Magnetic => "magnetic",
            BehaviorKind::Tilt => "tilt",
            BehaviorKind::Ripple => "ripple",
            BehaviorKind::Reveal => "reveal",
        }
    }
}

impl FromStr for BehaviorKind {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BehaviorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| OptionError::UnknownBehavior(s.to_string()))
    }
}

/// Parses a `data-fx` value such as `"tilt ripple"`.
///
/// Unknown names are logged and skipped; repeated names attach once.
pub fn parse_kinds(value: &str) -> Vec<BehaviorKind> {
    let mut kinds = Vec::new();
    for name in value.split_whitespace() {
        match name.parse::<BehaviorKind>() {
            Ok(kind) if !kinds.contains(&kind) => kinds.push(kind),
            Ok(_) => {}
            Err(e) => log::warn!("[mounts] {}", e),
        }
    }
    kinds
}

pub fn attach(
    kind: BehaviorKind,
    surface: Rc<dyn Surface>,
    env: &Environment,
    options: &OptionsPatch,
) -> Box<dyn Attachment> {
    match kind {
        BehaviorKind::Magnetic => Box::new(Magnetic::attach(surface, env, options)),
        BehaviorKind::Tilt => Box::new(Tilt::attach(surface, env, options)),
        BehaviorKind::Ripple => Box::new(Ripple::attach(surface, env, options)),
        BehaviorKind::Reveal => Box::new(Reveal::attach(surface, env, options)),
    }
}

/// Attachments owned by a host for a whole page region.
#[derive(Default)]
pub struct Mounts {
    entries: Vec<(BehaviorKind, Box<dyn Attachment>)>,
}

impl Mounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: BehaviorKind, attachment: Box<dyn Attachment>) {
        self.entries.push((kind, attachment));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: BehaviorKind) -> usize {
        self.entries.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Detaches everything and empties the collection.
    pub fn detach_all(&mut self) {
        let n = self.entries.len();
        for (_, attachment) in self.entries.drain(..) {
            attachment.detach();
        }
        if n > 0 {
            log::debug!("[mounts] detached {}", n);
        }
    }
}

impl Drop for Mounts {
    fn drop(&mut self) {
        self.detach_all();
    }
}

// ---------------- Listener bookkeeping shared by the behaviors ----------------

pub(crate) type Listeners = RefCell<SmallVec<[ListenerId; 5]>>;

/// Registers `handler` for `kind`, holding the behavior state weakly so the
/// surface never keeps a dropped behavior alive.
pub(crate) fn bind<S: 'static>(
    surface: &dyn Surface,
    kind: PointerEventKind,
    state: &Rc<S>,
    handler: fn(&Rc<S>, &PointerSample),
) -> ListenerId {
    let weak: Weak<S> = Rc::downgrade(state);
    surface.listen(
        kind,
        Rc::new(move |sample: &PointerSample| {
            if let Some(state) = weak.upgrade() {
                handler(&state, sample);
            }
        }),
    )
}

pub(crate) fn release(surface: &dyn Surface, listeners: &Listeners) {
    let ids: SmallVec<[ListenerId; 5]> = listeners.borrow_mut().drain(..).collect();
    for id in ids {
        surface.unlisten(id);
    }
}
