//! Single-open FAQ accordion.

use crate::contract::{ARIA_EXPANDED, FAQ_ITEM_CLASS, FAQ_QUESTION_CLASS, OPEN_CLASS, Query};
use crate::dom::Dom;
use crate::nav::{Action, Binding, EventKind};

/// One click binding per question that sits inside an item.
pub fn bindings<D: Dom>(dom: &D) -> Vec<Binding<D::Node>> {
    dom.find_all(Query::Class(FAQ_QUESTION_CLASS))
        .into_iter()
        .filter_map(|question| {
            let item = dom.closest(&question, Query::Class(FAQ_ITEM_CLASS))?;
            Some(Binding::element(
                question,
                EventKind::Click,
                Action::ToggleFaq(item),
            ))
        })
        .collect()
}

fn set_open<D: Dom>(dom: &D, item: &D::Node, open: bool) {
    dom.set_class(item, OPEN_CLASS, open);
    for question in dom.find_within(item, Query::Class(FAQ_QUESTION_CLASS)) {
        dom.set_attribute(&question, ARIA_EXPANDED, if open { "true" } else { "false" });
    }
}

/// Toggle `item` and close every other item.
pub fn toggle<D: Dom>(dom: &D, item: &D::Node) {
    let open = !dom.has_class(item, OPEN_CLASS);
    for other in dom.find_all(Query::Class(FAQ_ITEM_CLASS)) {
        if &other != item && dom.has_class(&other, OPEN_CLASS) {
            set_open(dom, &other, false);
        }
    }
    set_open(dom, item, open);
}
