//! Rendered fragments driven through the loader and controller.

use pretty_assertions::assert_eq;
use sitechrome::contract::{
    ACTIVE_CLASS, CURRENT_CLASS, DROPDOWN_ATTR, DROPDOWN_TRIGGER_ATTR, MOBILE_DROPDOWN_ATTR,
    MOBILE_DROPDOWN_TOGGLE_ATTR, NAV_TOGGLE_ID, OPEN_CLASS, Query,
};
use sitechrome::testing::{FakeDom, FakeHost, ScriptedFetcher};
use sitechrome::{Dom, FragmentLoader, NavController, SiteConfig, SlotState};
use sitechrome_fragments::types::SiteModel;
use sitechrome_fragments::{default_catalog, render_footer};

const PAGE: &str = r#"<div id="navbar"></div><main><h1>Integration</h1></main><div id="footer"></div>"#;

async fn boot(dom: &FakeDom, fetcher: &ScriptedFetcher) -> (FakeHost, SlotState) {
    let config = SiteConfig::default();
    let catalog = default_catalog(&SiteModel::default());
    let report = FragmentLoader::new(dom, fetcher, &catalog)
        .load_all(&config.slot_specs())
        .await;
    let footer = report.state("footer").unwrap_or(SlotState::Empty);

    let mut controller = NavController::new(dom.clone(), config);
    let bindings = controller.attach(&report);
    let mut host = FakeHost::new(controller);
    host.bind(bindings);
    (host, footer)
}

#[tokio::test]
async fn missing_footer_falls_back_to_copyright() {
    let dom = FakeDom::from_body_html(PAGE);
    let fetcher = ScriptedFetcher::new().respond("footer.html", 404, "Not Found");

    let (host, footer) = boot(&dom, &fetcher).await;

    assert_eq!(footer, SlotState::FallbackFilled);
    let html = dom.inner_html_of("footer");
    assert!(html.contains("© 2025 Example Co. All rights reserved."), "{html}");
    assert!(host.controller.is_attached());
}

#[tokio::test]
async fn served_footer_is_injected_verbatim() {
    let model = SiteModel::default();
    let dom = FakeDom::from_body_html(PAGE);
    let fetcher = ScriptedFetcher::new().respond("footer.html", 200, &render_footer(&model));

    let (_host, footer) = boot(&dom, &fetcher).await;

    assert_eq!(footer, SlotState::Filled);
    assert!(dom.inner_html_of("footer").contains("footer-columns"));
    assert!(!dom.inner_html_of("footer").contains("footer-fallback"));
}

#[tokio::test]
async fn rendered_navbar_is_fully_wired() {
    let dom = FakeDom::from_body_html(PAGE);
    dom.set_pathname("/site/Integration.html");
    let fetcher = ScriptedFetcher::new().respond("footer.html", 200, "<footer></footer>");

    let (mut host, _) = boot(&dom, &fetcher).await;

    // Every trigger and accordion toggle got a click binding.
    let element_clicks = host
        .bindings()
        .iter()
        .filter(|b| matches!(b.target, sitechrome::ListenTarget::Element(_)))
        .count();
    let triggers = dom.find_all(Query::Attr(DROPDOWN_TRIGGER_ATTR)).len();
    let toggles = dom.find_all(Query::Attr(MOBILE_DROPDOWN_TOGGLE_ATTR)).len();
    let menu_links = dom
        .find(Query::Id(sitechrome::contract::MOBILE_MENU_ID))
        .map(|menu| dom.find_within(&menu, Query::Tag("a")).len())
        .unwrap_or_default();
    assert_eq!(element_clicks, triggers + toggles + menu_links + 1);

    // Solutions page highlighting.
    let solutions = dom
        .find(Query::AttrEq(DROPDOWN_ATTR, "solutions"))
        .expect("solutions dropdown");
    assert!(dom.has_class(&solutions, CURRENT_CLASS));
    let active: Vec<String> = dom
        .find_all(Query::Class(ACTIVE_CLASS))
        .iter()
        .filter_map(|a| dom.attribute(a, "href"))
        .collect();
    assert_eq!(active, vec!["Integration.html", "Integration.html"]);

    // Open a dropdown, then the menu toggle dismisses it as an outside click.
    let trigger = dom
        .find_within(&solutions, Query::Attr(DROPDOWN_TRIGGER_ATTR))
        .remove(0);
    host.click(&trigger);
    assert!(dom.has_class(&solutions, OPEN_CLASS));
    let toggle = dom.find(Query::Id(NAV_TOGGLE_ID)).expect("toggle");
    host.click(&toggle);
    assert!(!dom.has_class(&solutions, OPEN_CLASS));

    // Mobile accordion collapses after its timer.
    let item = dom.find(Query::Attr(MOBILE_DROPDOWN_ATTR)).expect("accordion");
    let item_toggle = dom
        .find_within(&item, Query::Attr(MOBILE_DROPDOWN_TOGGLE_ATTR))
        .remove(0);
    host.click(&item_toggle);
    assert!(dom.has_class(&item, OPEN_CLASS));
    host.click(&item_toggle);
    assert_eq!(host.pending_timers(), 1);
    host.run_timers();
    let panel = dom
        .find_within(&item, Query::Class(sitechrome::contract::MOBILE_DROPDOWN_PANEL_CLASS))
        .remove(0);
    assert_eq!(dom.style(&panel, "display").as_deref(), Some("none"));
}
