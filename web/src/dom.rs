//! `Dom` over the live browser document.

use sitechrome::Dom;
use sitechrome::contract::Query;
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, NodeList, Window};

/// The page's window and document.
#[derive(Debug, Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    /// Current window and document; `None` outside a browser page.
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// The window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn elements(list: Result<NodeList, JsValue>, css: &str) -> Vec<Element> {
    match list {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(err) => {
            warn!(selector = css, error = ?err, "Selector rejected");
            Vec::new()
        }
    }
}

fn log_failure(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        debug!(op, error = ?err, "DOM update failed");
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn find_all(&self, query: Query<'_>) -> Vec<Element> {
        let css = query.to_css();
        elements(self.document.query_selector_all(&css), &css)
    }

    fn find_within(&self, root: &Element, query: Query<'_>) -> Vec<Element> {
        let css = query.to_css();
        elements(root.query_selector_all(&css), &css)
    }

    fn closest(&self, node: &Element, query: Query<'_>) -> Option<Element> {
        node.closest(&query.to_css()).ok().flatten()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&self, node: &Element, class: &str, on: bool) {
        let list = node.class_list();
        let result = if on {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        log_failure("class", result);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        log_failure("set_attribute", node.set_attribute(name, value));
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        log_failure("remove_attribute", node.remove_attribute(name));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            log_failure("style", element.style().set_property(property, value));
        }
    }

    fn scroll_height(&self, node: &Element) -> f64 {
        f64::from(node.scroll_height())
    }

    fn value(&self, node: &Element) -> String {
        node.dyn_ref::<HtmlInputElement>()
            .map(HtmlInputElement::value)
            .unwrap_or_default()
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn notify(&self, message: &str) {
        log_failure("alert", self.window.alert_with_message(message));
    }
}
