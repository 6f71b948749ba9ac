//! The platform services a behavior consumes.
//!
//! Behaviors never touch `web_sys` directly. They talk to a [`Surface`] (the
//! element they are bound to) and a [`FrameScheduler`] (the per-frame callback
//! facility). The browser implementations live in `web`; host-side tests plug
//! in instrumented fakes.

use std::rc::Rc;

/// Bounding box in client (viewport) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Position of a client-space point relative to the box, in [0, 1] when inside.
    #[inline]
    pub fn relative(&self, client_x: f64, client_y: f64) -> [f64; 2] {
        let x = (client_x - self.left) / self.width;
        let y = (client_y - self.top) / self.height;
        [x, y]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
    Unknown,
}

impl PointerKind {
    /// Maps a DOM `pointerType` string.
    pub fn from_dom(pointer_type: &str) -> Self {
        match pointer_type {
            "mouse" => PointerKind::Mouse,
            "pen" => PointerKind::Pen,
            "touch" => PointerKind::Touch,
            _ => PointerKind::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    pub kind: PointerKind,
}

impl PointerSample {
    pub const fn new(client_x: f64, client_y: f64, kind: PointerKind) -> Self {
        Self {
            client_x,
            client_y,
            kind,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Move,
    Down,
    Up,
    Enter,
    Leave,
}

impl PointerEventKind {
    pub const fn dom_name(self) -> &'static str {
        match self {
            PointerEventKind::Move => "pointermove",
            PointerEventKind::Down => "pointerdown",
            PointerEventKind::Up => "pointerup",
            PointerEventKind::Enter => "pointerenter",
            PointerEventKind::Leave => "pointerleave",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct ObserveOptions {
    pub threshold: f64,
    pub root_margin: String,
}

pub type PointerHandler = Rc<dyn Fn(&PointerSample)>;

/// A visibility subscription for one surface.
pub trait Observation {
    /// Stops delivering visibility changes. Calling it again does nothing.
    fn stop(&self);
}

/// The element a behavior is bound to.
///
/// All methods take `&self`; implementations use interior mutability the same
/// way the DOM does.
pub trait Surface {
    fn bounds(&self) -> Rect;

    fn style(&self, name: &str) -> String;
    fn set_style(&self, name: &str, value: &str);
    fn remove_style(&self, name: &str);

    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    fn listen(&self, kind: PointerEventKind, handler: PointerHandler) -> ListenerId;
    fn unlisten(&self, id: ListenerId);

    /// Appends a child carrying `class` and `styles` that removes itself once
    /// its animation ends. Nothing is handed back: the child owns its lifetime.
    fn spawn_transient(&self, class: &str, styles: &[(&str, String)]);

    /// Subscribes `on_change(is_intersecting)` to viewport crossings.
    ///
    /// Returns `None` when the runtime has no visibility observer.
    fn observe_visibility(
        &self,
        options: &ObserveOptions,
        on_change: Box<dyn FnMut(bool)>,
    ) -> Option<Box<dyn Observation>>;
}

/// Per-frame callback facility (`requestAnimationFrame` in the browser).
///
/// Each scheduled callback runs at most once, before the next paint. A
/// cancelled callback never runs. `schedule` returns `None` when the frame
/// could not be requested; the callback is then dropped unrun.
pub trait FrameScheduler {
    fn schedule(&self, callback: Box<dyn FnOnce()>) -> Option<FrameToken>;
    fn cancel(&self, token: FrameToken);
}

/// Capability signals read once at attach time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub touch: bool,
    pub reduced_motion: bool,
}

/// What a behavior needs from its host besides the surface itself.
#[derive(Clone)]
pub struct Environment {
    pub capabilities: Capabilities,
    pub frames: Rc<dyn FrameScheduler>,
}

impl Environment {
    pub fn new(capabilities: Capabilities, frames: Rc<dyn FrameScheduler>) -> Self {
        Self {
            capabilities,
            frames,
        }
    }
}
