use crate::behavior::{self, parse_kinds, Attachment, BehaviorKind, Mounts};
use crate::constants::DATA_BEHAVIORS_ATTR;
use crate::options::{finite, OptionsPatch};
use crate::platform::Surface;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use super::{dom_root, environment, WebSurface};

/// Handle returned to JavaScript for one attached behavior.
///
/// `update`/`destroy` match the shape of a Svelte action return value, so a
/// handle can be returned from an action as-is.
#[wasm_bindgen]
pub struct FxHandle {
    kind: BehaviorKind,
    inner: Box<dyn Attachment>,
}

#[wasm_bindgen]
impl FxHandle {
    pub fn update(&self, options: JsValue) {
        self.inner.update(&patch_from_js(&options));
    }

    pub fn detach(&self) {
        self.inner.detach();
    }

    pub fn destroy(&self) {
        self.detach();
    }

    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.kind.as_str().to_string()
    }
}

fn attach_js(kind: BehaviorKind, node: web::HtmlElement, options: &JsValue) -> FxHandle {
    let surface: Rc<dyn Surface> = Rc::new(WebSurface::new(node));
    let inner = behavior::attach(kind, surface, &environment(), &patch_from_js(options));
    FxHandle { kind, inner }
}

#[wasm_bindgen]
pub fn magnetic(node: web::HtmlElement, options: JsValue) -> FxHandle {
    attach_js(BehaviorKind::Magnetic, node, &options)
}

#[wasm_bindgen]
pub fn tilt(node: web::HtmlElement, options: JsValue) -> FxHandle {
    attach_js(BehaviorKind::Tilt, node, &options)
}

#[wasm_bindgen]
pub fn ripple(node: web::HtmlElement, options: JsValue) -> FxHandle {
    attach_js(BehaviorKind::Ripple, node, &options)
}

#[wasm_bindgen]
pub fn reveal(node: web::HtmlElement, options: JsValue) -> FxHandle {
    attach_js(BehaviorKind::Reveal, node, &options)
}

/// Every behavior mounted by one [`mount_all`] call.
#[wasm_bindgen]
pub struct FxMounts {
    mounts: Mounts,
}

#[wasm_bindgen]
impl FxMounts {
    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    #[wasm_bindgen(js_name = detachAll)]
    pub fn detach_all(&mut self) {
        self.mounts.detach_all();
    }
}

/// Attaches behaviors declared with `data-fx` under `root` (the whole
/// document when absent).
#[wasm_bindgen(js_name = mountAll)]
pub fn mount_all(root: Option<web::Element>) -> FxMounts {
    let mut mounts = Mounts::new();
    let root = match root.or_else(dom_root) {
        Some(root) => root,
        None => return FxMounts { mounts },
    };
    let selector = format!("[{}]", DATA_BEHAVIORS_ATTR);
    let nodes = match root.query_selector_all(&selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::warn!("[mounts] query failed: {:?}", e);
            return FxMounts { mounts };
        }
    };

    let env = environment();
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let Ok(element) = node.dyn_into::<web::HtmlElement>() else {
            continue;
        };
        let kinds = parse_kinds(&element.get_attribute(DATA_BEHAVIORS_ATTR).unwrap_or_default());
        if kinds.is_empty() {
            continue;
        }
        let patch = patch_from_attributes(&element);
        for kind in kinds {
            let surface: Rc<dyn Surface> = Rc::new(WebSurface::new(element.clone()));
            mounts.push(kind, behavior::attach(kind, surface, &env, &patch));
        }
    }
    log::info!("[mounts] mounted {} behaviors", mounts.len());
    FxMounts { mounts }
}

fn patch_from_attributes(element: &web::Element) -> OptionsPatch {
    let attributes: Vec<(String, String)> = element
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| element.get_attribute(&name).map(|value| (name, value)))
        .collect();
    OptionsPatch::from_data_attributes(attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// Reads a JS options object. Fields of the wrong type are ignored.
fn patch_from_js(options: &JsValue) -> OptionsPatch {
    if !options.is_object() {
        return OptionsPatch::default();
    }
    let field = |key: &str| js_sys::Reflect::get(options, &JsValue::from_str(key)).ok();
    let number = |key: &str| field(key).and_then(|v| v.as_f64()).and_then(finite);
    let text = |key: &str| field(key).and_then(|v| v.as_string());

    OptionsPatch {
        strength: number("strength"),
        max_tilt: number("maxTilt"),
        scale: number("scale"),
        hover_scale: number("hoverScale"),
        color: text("color"),
        duration_ms: number("duration"),
        direction: text("direction").and_then(|s| s.parse().ok()),
        once: field("once").and_then(|v| v.as_bool()),
        policy: text("policy").and_then(|s| s.parse().ok()),
    }
}
