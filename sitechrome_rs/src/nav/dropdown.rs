//! Desktop dropdowns. At most one is open at a time.

use crate::contract::{ARIA_EXPANDED, DROPDOWN_ATTR, DROPDOWN_TRIGGER_ATTR, OPEN_CLASS, Query};
use crate::dom::Dom;

pub(super) fn all<D: Dom>(dom: &D) -> Vec<D::Node> {
    dom.find_all(Query::Attr(DROPDOWN_ATTR))
}

pub(super) fn trigger_of<D: Dom>(dom: &D, dropdown: &D::Node) -> Option<D::Node> {
    dom.find_within(dropdown, Query::Attr(DROPDOWN_TRIGGER_ATTR))
        .into_iter()
        .next()
}

/// The dropdown containing `node`, if any.
pub(super) fn enclosing<D: Dom>(dom: &D, node: &D::Node) -> Option<D::Node> {
    dom.closest(node, Query::Attr(DROPDOWN_ATTR))
}

fn set_open<D: Dom>(dom: &D, dropdown: &D::Node, open: bool) {
    dom.set_class(dropdown, OPEN_CLASS, open);
    if let Some(trigger) = trigger_of(dom, dropdown) {
        dom.set_attribute(&trigger, ARIA_EXPANDED, if open { "true" } else { "false" });
    }
}

pub(super) fn toggle_exclusive<D: Dom>(dom: &D, target: &D::Node) {
    let open = !dom.has_class(target, OPEN_CLASS);
    for dropdown in all(dom) {
        if &dropdown != target && dom.has_class(&dropdown, OPEN_CLASS) {
            set_open(dom, &dropdown, false);
        }
    }
    set_open(dom, target, open);
}

pub(super) fn close_all<D: Dom>(dom: &D) {
    for dropdown in all(dom) {
        set_open(dom, &dropdown, false);
    }
}
