//! Mobile accordion dropdowns under the mobile menu.
//!
//! Opening shows the panel at its natural height. Closing animates the
//! height to zero and hides the panel once the transition delay has passed;
//! the hide is handed back to the host as a [`Deferred`] action.

use std::time::Duration;

use super::{Action, Deferred};
use crate::contract::{
    ARIA_EXPANDED, MOBILE_DROPDOWN_ATTR, MOBILE_DROPDOWN_PANEL_CLASS, MOBILE_DROPDOWN_TOGGLE_ATTR,
    OPEN_CLASS, Query,
};
use crate::dom::Dom;

pub(super) fn all<D: Dom>(dom: &D) -> Vec<D::Node> {
    dom.find_all(Query::Attr(MOBILE_DROPDOWN_ATTR))
}

pub(super) fn toggle_of<D: Dom>(dom: &D, item: &D::Node) -> Option<D::Node> {
    dom.find_within(item, Query::Attr(MOBILE_DROPDOWN_TOGGLE_ATTR))
        .into_iter()
        .next()
}

fn panel_of<D: Dom>(dom: &D, item: &D::Node) -> Option<D::Node> {
    dom.find_within(item, Query::Class(MOBILE_DROPDOWN_PANEL_CLASS))
        .into_iter()
        .next()
}

fn set_expanded<D: Dom>(dom: &D, item: &D::Node, open: bool) {
    dom.set_class(item, OPEN_CLASS, open);
    if let Some(toggle) = toggle_of(dom, item) {
        dom.set_attribute(&toggle, ARIA_EXPANDED, if open { "true" } else { "false" });
    }
}

fn expand<D: Dom>(dom: &D, item: &D::Node) {
    set_expanded(dom, item, true);
    if let Some(panel) = panel_of(dom, item) {
        // Must be displayed before its height can be measured.
        dom.set_style(&panel, "display", "block");
        let height = dom.scroll_height(&panel);
        dom.set_style(&panel, "height", &format!("{height}px"));
    }
}

fn collapse<D: Dom>(dom: &D, item: &D::Node, delay: Duration) -> Deferred<D::Node> {
    set_expanded(dom, item, false);
    if let Some(panel) = panel_of(dom, item) {
        dom.set_style(&panel, "height", "0px");
    }
    Deferred {
        delay,
        action: Action::FinishCollapse(item.clone()),
    }
}

pub(super) fn toggle<D: Dom>(
    dom: &D,
    item: &D::Node,
    exclusive: bool,
    delay: Duration,
) -> Vec<Deferred<D::Node>> {
    if dom.has_class(item, OPEN_CLASS) {
        return vec![collapse(dom, item, delay)];
    }

    let mut deferred = Vec::new();
    if exclusive {
        for other in all(dom) {
            if &other != item && dom.has_class(&other, OPEN_CLASS) {
                deferred.push(collapse(dom, &other, delay));
            }
        }
    }
    expand(dom, item);
    deferred
}

/// Hide the panel unless the item was reopened during the transition.
pub(super) fn finish_collapse<D: Dom>(dom: &D, item: &D::Node) {
    if dom.has_class(item, OPEN_CLASS) {
        return;
    }
    if let Some(panel) = panel_of(dom, item) {
        dom.set_style(&panel, "display", "none");
    }
}
