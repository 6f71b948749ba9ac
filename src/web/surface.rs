use crate::platform::{
    ListenerId, ObserveOptions, Observation, PointerEventKind, PointerHandler, PointerKind,
    PointerSample, Rect, Surface,
};
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

type PointerClosure = Closure<dyn FnMut(web::PointerEvent)>;
type VisibilityClosure = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

/// A [`Surface`] over a live DOM element.
///
/// Each attach wraps the element in its own `WebSurface`, so the listener
/// table only ever holds one behavior's registrations.
pub struct WebSurface {
    element: web::HtmlElement,
    next: Cell<u64>,
    listeners: RefCell<FnvHashMap<u64, (&'static str, PointerClosure)>>,
    // removed listeners may still be on the stack; freed by the next `listen`,
    // which never runs inside a pointer handler
    retired: RefCell<Vec<PointerClosure>>,
}

impl WebSurface {
    pub fn new(element: web::HtmlElement) -> Self {
        Self {
            element,
            next: Cell::new(0),
            listeners: RefCell::new(FnvHashMap::default()),
            retired: RefCell::new(Vec::new()),
        }
    }

    pub fn element(&self) -> &web::HtmlElement {
        &self.element
    }
}

impl Drop for WebSurface {
    fn drop(&mut self) {
        for (_, (event, closure)) in self.listeners.borrow_mut().drain() {
            _ = self
                .element
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

impl Surface for WebSurface {
    fn bounds(&self) -> Rect {
        let r = self.element.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn style(&self, name: &str) -> String {
        self.element
            .style()
            .get_property_value(name)
            .unwrap_or_default()
    }

    fn set_style(&self, name: &str, value: &str) {
        _ = self.element.style().set_property(name, value);
    }

    fn remove_style(&self, name: &str) {
        _ = self.element.style().remove_property(name);
    }

    fn add_class(&self, class: &str) {
        _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        _ = self.element.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        _ = self.element.set_attribute(name, value);
    }

    fn listen(&self, kind: PointerEventKind, handler: PointerHandler) -> ListenerId {
        self.retired.borrow_mut().clear();

        let id = self.next.get();
        self.next.set(id + 1);

        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let sample = PointerSample::new(
                ev.client_x() as f64,
                ev.client_y() as f64,
                PointerKind::from_dom(&ev.pointer_type()),
            );
            handler(&sample);
        }) as Box<dyn FnMut(_)>);

        let event = kind.dom_name();
        _ = self
            .element
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        self.listeners.borrow_mut().insert(id, (event, closure));
        ListenerId(id)
    }

    fn unlisten(&self, id: ListenerId) {
        let entry = self.listeners.borrow_mut().remove(&id.0);
        if let Some((event, closure)) = entry {
            _ = self
                .element
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            self.retired.borrow_mut().push(closure);
        }
    }

    fn spawn_transient(&self, class: &str, styles: &[(&str, String)]) {
        let Some(document) = self.element.owner_document() else {
            return;
        };
        let child = match document.create_element("span") {
            Ok(el) => el,
            Err(e) => {
                log::warn!("[surface] create_element failed: {:?}", e);
                return;
            }
        };
        child.set_class_name(class);
        if let Some(html) = child.dyn_ref::<web::HtmlElement>() {
            let style = html.style();
            for (name, value) in styles {
                _ = style.set_property(name, value);
            }
        }
        _ = self.element.append_child(&child);

        // the closure frees itself after its single call
        let node = child.clone();
        let on_end = Closure::once_into_js(move || node.remove());
        _ = child.add_event_listener_with_callback("animationend", on_end.unchecked_ref());
    }

    fn observe_visibility(
        &self,
        options: &ObserveOptions,
        mut on_change: Box<dyn FnMut(bool)>,
    ) -> Option<Box<dyn Observation>> {
        let window = web::window()?;
        let supported = js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false);
        if !supported {
            return None;
        }

        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                        on_change(entry.is_intersecting());
                    }
                }
            },
        ) as Box<dyn FnMut(_, _)>);

        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer = match web::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        ) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("[surface] IntersectionObserver failed: {:?}", e);
                return None;
            }
        };
        let element: web::Element = self.element.clone().into();
        observer.observe(&element);

        Some(Box::new(WebObservation {
            observer,
            element,
            stopped: Cell::new(false),
            _callback: callback,
        }))
    }
}

struct WebObservation {
    observer: web::IntersectionObserver,
    element: web::Element,
    stopped: Cell<bool>,
    _callback: VisibilityClosure,
}

impl Observation for WebObservation {
    fn stop(&self) {
        if !self.stopped.replace(true) {
            self.observer.unobserve(&self.element);
        }
    }
}

impl Drop for WebObservation {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
