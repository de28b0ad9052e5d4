//! Newsletter form interception.
//!
//! Any form with autocomplete disabled is a subscription form. Submissions
//! never leave the page: the default submit is prevented, a confirmation is
//! shown and the email field is cleared. Wiring a real subscription backend
//! means replacing [`submit`].

use tracing::{debug, info};

use crate::contract::{EMAIL_INPUT, SUBSCRIBE_FORM};
use crate::dom::Dom;
use crate::nav::{Action, Binding, EventKind};

/// One submit binding per subscription form.
pub fn bindings<D: Dom>(dom: &D) -> Vec<Binding<D::Node>> {
    dom.find_all(SUBSCRIBE_FORM)
        .into_iter()
        .map(|form| Binding::element(form.clone(), EventKind::Submit, Action::Subscribe(form)))
        .collect()
}

/// Submit bindings for subscription forms below `root`.
pub fn bindings_within<D: Dom>(dom: &D, root: &D::Node) -> Vec<Binding<D::Node>> {
    dom.find_within(root, SUBSCRIBE_FORM)
        .into_iter()
        .map(|form| Binding::element(form.clone(), EventKind::Submit, Action::Subscribe(form)))
        .collect()
}

/// Handle a submission. Returns `true` when an address was accepted.
pub fn submit<D: Dom>(dom: &D, form: &D::Node, confirmation: &str) -> bool {
    let Some(input) = dom.find_within(form, EMAIL_INPUT).into_iter().next() else {
        debug!("Subscription form has no email field");
        return false;
    };
    if dom.value(&input).trim().is_empty() {
        debug!("Empty subscription submitted, ignoring");
        return false;
    }
    dom.notify(confirmation);
    dom.set_value(&input, "");
    info!("Newsletter subscription accepted");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDom, el};

    fn page() -> (FakeDom, <FakeDom as Dom>::Node) {
        let dom = FakeDom::new();
        let body = dom.body_node();
        let form = dom.append(
            &body,
            el("form")
                .attr("autocomplete", "off")
                .child(el("input").attr("type", "email")),
        );
        dom.append(&body, el("form").child(el("input").attr("type", "email")));
        (dom, form)
    }

    #[test]
    fn only_autocomplete_off_forms_bind() {
        let (dom, form) = page();
        let bindings = bindings(&dom);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].action, Action::Subscribe(form));
        assert_eq!(bindings[0].event, EventKind::Submit);
    }

    #[test]
    fn non_empty_email_confirms_and_clears() {
        let (dom, form) = page();
        let input = dom.find_within(&form, EMAIL_INPUT).remove(0);
        dom.set_value(&input, "ada@example.com");

        assert!(submit(&dom, &form, "Thanks!"));
        assert_eq!(dom.value(&input), "");
        assert_eq!(dom.notifications(), vec!["Thanks!".to_string()]);
    }

    #[test]
    fn scoped_bindings_stay_inside_root() {
        let dom = FakeDom::new();
        let body = dom.body_node();
        let slot = dom.append(
            &body,
            el("div").id("footer").child(
                el("form")
                    .attr("autocomplete", "off")
                    .child(el("input").attr("type", "email")),
            ),
        );
        dom.append(&body, el("form").attr("autocomplete", "off"));

        let scoped = bindings_within(&dom, &slot);
        assert_eq!(scoped.len(), 1);
        assert_eq!(bindings(&dom).len(), 2);
    }

    #[test]
    fn blank_email_is_ignored() {
        let (dom, form) = page();
        let input = dom.find_within(&form, EMAIL_INPUT).remove(0);
        dom.set_value(&input, "   ");

        assert!(!submit(&dom, &form, "Thanks!"));
        assert!(dom.notifications().is_empty());
    }
}
