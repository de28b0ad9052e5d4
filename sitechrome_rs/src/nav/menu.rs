//! Mobile menu state.
//!
//! Open state is mirrored in three places that must always agree: the menu's
//! open class, the toggle's `aria-expanded`, and the body class.

use tracing::debug;

use crate::contract::{
    ARIA_EXPANDED, BODY_MENU_OPEN_CLASS, MOBILE_MENU_ID, NAV_TOGGLE_ID, OPEN_CLASS, Query,
};
use crate::dom::Dom;

pub(super) fn is_open<D: Dom>(dom: &D) -> bool {
    if let Some(menu) = dom.find(Query::Id(MOBILE_MENU_ID)) {
        return dom.has_class(&menu, OPEN_CLASS);
    }
    dom.find(Query::Id(NAV_TOGGLE_ID))
        .and_then(|toggle| dom.attribute(&toggle, ARIA_EXPANDED))
        .is_some_and(|expanded| expanded == "true")
}

pub(super) fn set_open<D: Dom>(dom: &D, open: bool) {
    if let Some(menu) = dom.find(Query::Id(MOBILE_MENU_ID)) {
        dom.set_class(&menu, OPEN_CLASS, open);
    }
    if let Some(toggle) = dom.find(Query::Id(NAV_TOGGLE_ID)) {
        dom.set_attribute(&toggle, ARIA_EXPANDED, if open { "true" } else { "false" });
    }
    if let Some(body) = dom.body() {
        dom.set_class(&body, BODY_MENU_OPEN_CLASS, open);
    }
}

/// Flip the menu; returns the new state.
pub(super) fn toggle<D: Dom>(dom: &D) -> bool {
    let open = !is_open(dom);
    set_open(dom, open);
    debug!(open, "Mobile menu toggled");
    open
}

/// Close the menu. A body class left over from replaced markup is cleared
/// even when the menu itself already reads as closed.
pub(super) fn close<D: Dom>(dom: &D) {
    if is_open(dom) {
        set_open(dom, false);
    } else if let Some(body) = dom.body() {
        dom.set_class(&body, BODY_MENU_OPEN_CLASS, false);
    }
}

/// Force every mirror of the menu state to closed.
pub(super) fn reset<D: Dom>(dom: &D) {
    set_open(dom, false);
}
