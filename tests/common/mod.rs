// Instrumented stand-ins for the DOM: a surface that records every mutation
// and registration, a frame scheduler driven by hand, and a visibility
// observer the test fires directly.

#![allow(dead_code)]

use site_fx::platform::{
    Capabilities, Environment, FrameScheduler, FrameToken, ListenerId, ObserveOptions,
    Observation, PointerEventKind, PointerHandler, PointerKind, PointerSample, Rect, Surface,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

// ---------------- Frames ----------------

#[derive(Default)]
pub struct FakeFrames {
    next: Cell<u64>,
    pending: RefCell<Vec<(FrameToken, Box<dyn FnOnce()>)>>,
    pub scheduled: Cell<usize>,
    pub cancelled: Cell<usize>,
    /// When set, `schedule` fails the way a missing `requestAnimationFrame` does.
    pub refuse: Cell<bool>,
}

impl FakeFrames {
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Runs the callbacks that were pending when the frame started.
    /// Anything they schedule waits for the next frame.
    pub fn run_frame(&self) -> usize {
        let tokens: Vec<FrameToken> = self.pending.borrow().iter().map(|(t, _)| *t).collect();
        let mut ran = 0;
        for token in tokens {
            let entry = {
                let mut pending = self.pending.borrow_mut();
                pending
                    .iter()
                    .position(|(t, _)| *t == token)
                    .map(|i| pending.remove(i))
            };
            if let Some((_, callback)) = entry {
                callback();
                ran += 1;
            }
        }
        ran
    }
}

impl FrameScheduler for FakeFrames {
    fn schedule(&self, callback: Box<dyn FnOnce()>) -> Option<FrameToken> {
        if self.refuse.get() {
            return None;
        }
        let token = FrameToken(self.next.get());
        self.next.set(token.0 + 1);
        self.scheduled.set(self.scheduled.get() + 1);
        self.pending.borrow_mut().push((token, callback));
        Some(token)
    }

    fn cancel(&self, token: FrameToken) {
        self.cancelled.set(self.cancelled.get() + 1);
        self.pending.borrow_mut().retain(|(t, _)| *t != token);
    }
}

// ---------------- Surface ----------------

#[derive(Clone, Debug, PartialEq)]
pub struct Transient {
    pub class: String,
    pub styles: BTreeMap<String, String>,
}

struct FakeObservation {
    active: Rc<Cell<bool>>,
    stops: Rc<Cell<usize>>,
}

impl Observation for FakeObservation {
    fn stop(&self) {
        if self.active.replace(false) {
            self.stops.set(self.stops.get() + 1);
        }
    }
}

type VisibilityCallback = Box<dyn FnMut(bool)>;

pub struct FakeSurface {
    rect: Cell<Rect>,
    styles: RefCell<BTreeMap<String, String>>,
    classes: RefCell<BTreeSet<String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    next: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, PointerEventKind, PointerHandler)>>,
    transients: RefCell<Vec<Transient>>,
    observer_supported: bool,
    observer_active: Rc<Cell<bool>>,
    observer_callback: RefCell<Option<VisibilityCallback>>,
    pub observe_options: RefCell<Option<ObserveOptions>>,
    pub observer_stops: Rc<Cell<usize>>,
    pub unlisten_calls: Cell<usize>,
    pub class_changes: Cell<usize>,
}

impl FakeSurface {
    pub fn new(rect: Rect) -> Rc<Self> {
        Self::build(rect, true)
    }

    /// A surface in a runtime without a visibility observer.
    pub fn without_observer(rect: Rect) -> Rc<Self> {
        Self::build(rect, false)
    }

    fn build(rect: Rect, observer_supported: bool) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(rect),
            styles: RefCell::default(),
            classes: RefCell::default(),
            attributes: RefCell::default(),
            next: Cell::new(0),
            listeners: RefCell::default(),
            transients: RefCell::default(),
            observer_supported,
            observer_active: Rc::new(Cell::new(false)),
            observer_callback: RefCell::new(None),
            observe_options: RefCell::new(None),
            observer_stops: Rc::new(Cell::new(0)),
            unlisten_calls: Cell::new(0),
            class_changes: Cell::new(0),
        })
    }

    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    pub fn style_of(&self, name: &str) -> Option<String> {
        self.styles.borrow().get(name).cloned()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listeners_for(&self, kind: PointerEventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    pub fn transients(&self) -> Vec<Transient> {
        self.transients.borrow().clone()
    }

    /// Plays the `animationend` of every live transient.
    pub fn end_animations(&self) {
        self.transients.borrow_mut().clear();
    }

    pub fn is_observed(&self) -> bool {
        self.observer_active.get()
    }

    /// Delivers a pointer event to every listener registered for `kind`.
    pub fn dispatch(&self, kind: PointerEventKind, x: f64, y: f64, pointer: PointerKind) {
        let handlers: Vec<PointerHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();
        let sample = PointerSample::new(x, y, pointer);
        for handler in handlers {
            handler(&sample);
        }
    }

    pub fn mouse(&self, kind: PointerEventKind, x: f64, y: f64) {
        self.dispatch(kind, x, y, PointerKind::Mouse);
    }

    /// Delivers a viewport crossing if the observation is still active.
    pub fn cross(&self, intersecting: bool) {
        if !self.observer_active.get() {
            return;
        }
        let callback = self.observer_callback.borrow_mut().take();
        if let Some(mut callback) = callback {
            callback(intersecting);
            *self.observer_callback.borrow_mut() = Some(callback);
        }
    }
}

impl Surface for FakeSurface {
    fn bounds(&self) -> Rect {
        self.rect.get()
    }

    fn style(&self, name: &str) -> String {
        self.style_of(name).unwrap_or_default()
    }

    fn set_style(&self, name: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_style(&self, name: &str) {
        self.styles.borrow_mut().remove(name);
    }

    fn add_class(&self, class: &str) {
        self.class_changes.set(self.class_changes.get() + 1);
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.class_changes.set(self.class_changes.get() + 1);
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn listen(&self, kind: PointerEventKind, handler: PointerHandler) -> ListenerId {
        let id = ListenerId(self.next.get());
        self.next.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, kind, handler));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.unlisten_calls.set(self.unlisten_calls.get() + 1);
        self.listeners.borrow_mut().retain(|(i, _, _)| *i != id);
    }

    fn spawn_transient(&self, class: &str, styles: &[(&str, String)]) {
        self.transients.borrow_mut().push(Transient {
            class: class.to_string(),
            styles: styles
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });
    }

    fn observe_visibility(
        &self,
        options: &ObserveOptions,
        on_change: Box<dyn FnMut(bool)>,
    ) -> Option<Box<dyn Observation>> {
        if !self.observer_supported {
            return None;
        }
        *self.observe_options.borrow_mut() = Some(options.clone());
        *self.observer_callback.borrow_mut() = Some(on_change);
        self.observer_active.set(true);
        Some(Box::new(FakeObservation {
            active: Rc::clone(&self.observer_active),
            stops: Rc::clone(&self.observer_stops),
        }))
    }
}

// ---------------- Environment ----------------

pub struct Rig {
    pub frames: Rc<FakeFrames>,
    pub env: Environment,
}

pub fn rig(capabilities: Capabilities) -> Rig {
    let frames = Rc::new(FakeFrames::default());
    let env = Environment::new(capabilities, frames.clone());
    Rig { frames, env }
}

pub fn desktop() -> Rig {
    rig(Capabilities::default())
}

pub fn as_surface(surface: &Rc<FakeSurface>) -> Rc<dyn Surface> {
    surface.clone()
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
