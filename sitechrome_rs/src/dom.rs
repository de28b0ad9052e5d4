//! Document abstraction.
//!
//! The controller never touches a browser type directly. Every lookup and
//! mutation goes through [`Dom`], so lookups that find nothing simply return
//! `None` or an empty `Vec` and the caller no-ops.

use crate::contract::Query;

/// Operations the loader and controller need from a live document.
///
/// All methods take `&self`; implementations are handles onto a document that
/// is mutated in place (web-sys elements, or `RefCell` state in the fake).
pub trait Dom {
    /// Element handle. Cheap to clone and comparable by identity.
    type Node: Clone + PartialEq + std::fmt::Debug + 'static;

    /// First element matching `query` anywhere in the document.
    fn find(&self, query: Query<'_>) -> Option<Self::Node> {
        self.find_all(query).into_iter().next()
    }
    /// Every element matching `query`, in document order.
    fn find_all(&self, query: Query<'_>) -> Vec<Self::Node>;
    /// Descendants of `root` matching `query`, in document order.
    fn find_within(&self, root: &Self::Node, query: Query<'_>) -> Vec<Self::Node>;
    /// `node` itself or its nearest ancestor matching `query`.
    fn closest(&self, node: &Self::Node, query: Query<'_>) -> Option<Self::Node>;
    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
    /// The `<body>` element, if any.
    fn body(&self) -> Option<Self::Node>;

    /// Replace the children of `node` with parsed `html`.
    fn set_inner_html(&self, node: &Self::Node, html: &str);

    /// Whether `node` carries `class`.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// Add or remove `class` depending on `on`.
    fn set_class(&self, node: &Self::Node, class: &str, on: bool);

    /// Attribute value, if present.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    /// Set an attribute.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    /// Remove an attribute if present.
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// Set one inline style property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    /// Natural content height of `node` in pixels.
    fn scroll_height(&self, node: &Self::Node) -> f64;

    /// Current value of a form field.
    fn value(&self, node: &Self::Node) -> String;
    /// Replace the value of a form field.
    fn set_value(&self, node: &Self::Node, value: &str);

    /// Vertical scroll offset of the viewport.
    fn scroll_y(&self) -> f64;
    /// Viewport width in CSS pixels.
    fn viewport_width(&self) -> f64;
    /// Path component of the current location, e.g. `/pages/products.html`.
    fn pathname(&self) -> String;

    /// Show a message to the user.
    fn notify(&self, message: &str);
}
