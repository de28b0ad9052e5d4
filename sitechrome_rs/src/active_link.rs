//! Active-link highlighting.
//!
//! Compares the current page's file name with the file name each navigation
//! link points at. Links inside the navigation region, the mobile menu and the
//! navbar slot (which may hold fallback markup) are all considered.

use tracing::debug;

use crate::config::SolutionsConfig;
use crate::contract::{
    ACTIVE_CLASS, ARIA_CURRENT, CURRENT_CLASS, DROPDOWN_ATTR, GLOBAL_NAV_ID, LINK, MOBILE_MENU_ID,
    NAVBAR_SLOT, Query,
};
use crate::dom::Dom;

const INDEX_PAGE: &str = "index.html";

/// File name of the page at `pathname`; directory paths map to `index.html`.
pub fn current_page(pathname: &str) -> String {
    let path = pathname.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => INDEX_PAGE.to_string(),
    }
}

/// File name an `href` points at, or `None` for external, in-page and
/// non-HTTP links.
pub fn link_target(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("//") {
        return None;
    }
    let has_scheme = href.split_once(':').is_some_and(|(scheme, _)| {
        scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });
    if has_scheme {
        return None;
    }
    Some(current_page(href))
}

/// Mark links to the current page active and flag the solutions dropdown.
/// Returns the number of links marked.
pub fn highlight<D: Dom>(dom: &D, solutions: &SolutionsConfig) -> usize {
    let page = current_page(&dom.pathname());

    let mut links: Vec<D::Node> = Vec::new();
    for id in [GLOBAL_NAV_ID, MOBILE_MENU_ID, NAVBAR_SLOT] {
        if let Some(root) = dom.find(Query::Id(id)) {
            for link in dom.find_within(&root, LINK) {
                if !links.contains(&link) {
                    links.push(link);
                }
            }
        }
    }

    let mut marked = 0;
    for link in &links {
        let is_current = dom
            .attribute(link, "href")
            .and_then(|href| link_target(&href))
            .is_some_and(|target| target == page);
        dom.set_class(link, ACTIVE_CLASS, is_current);
        if is_current {
            dom.set_attribute(link, ARIA_CURRENT, "page");
            marked += 1;
        } else {
            dom.remove_attribute(link, ARIA_CURRENT);
        }
    }

    if let Some(group) = dom.find(Query::AttrEq(DROPDOWN_ATTR, &solutions.dropdown)) {
        let in_group = solutions.pages.iter().any(|p| *p == page);
        dom.set_class(&group, CURRENT_CLASS, in_group);
    }

    debug!(%page, marked, "Active links highlighted");
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDom, el};

    #[test]
    fn current_page_from_path() {
        assert_eq!(current_page("/products.html"), "products.html");
        assert_eq!(current_page("/site/pages/Integration.html"), "Integration.html");
        assert_eq!(current_page("/"), "index.html");
        assert_eq!(current_page(""), "index.html");
        assert_eq!(current_page("/blog/"), "index.html");
    }

    #[test]
    fn link_targets() {
        assert_eq!(link_target("products.html").as_deref(), Some("products.html"));
        assert_eq!(link_target("./products.html#pricing").as_deref(), Some("products.html"));
        assert_eq!(link_target("/about.html?ref=nav").as_deref(), Some("about.html"));
        assert_eq!(link_target("/").as_deref(), Some("index.html"));
        assert_eq!(link_target("#faq"), None);
        assert_eq!(link_target("https://example.com/products.html"), None);
        assert_eq!(link_target("//cdn.example.com/products.html"), None);
        assert_eq!(link_target("mailto:hi@example.com"), None);
        assert_eq!(link_target(""), None);
    }

    fn nav_page(path: &str) -> FakeDom {
        let dom = FakeDom::new();
        dom.set_pathname(path);
        let body = dom.body_node();
        dom.append(
            &body,
            el("nav")
                .id("global-nav")
                .child(el("a").attr("href", "index.html").text("Home"))
                .child(el("a").attr("href", "products.html").text("Products"))
                .child(el("a").attr("href", "pricing.html").text("Pricing"))
                .child(
                    el("div")
                        .attr("data-dropdown", "solutions")
                        .child(el("a").attr("href", "Integration.html").text("Integration")),
                ),
        );
        dom.append(
            &body,
            el("div")
                .id("mobile-menu")
                .child(el("a").attr("href", "products.html").text("Products"))
                .child(el("a").attr("href", "https://example.com/products.html").text("Ext")),
        );
        dom
    }

    #[test]
    fn marks_exactly_the_matching_links() {
        let dom = nav_page("/products.html");
        let marked = highlight(&dom, &SolutionsConfig::default());

        assert_eq!(marked, 2);
        for link in dom.find_all(LINK) {
            let href = dom.attribute(&link, "href").unwrap_or_default();
            let expect = href == "products.html";
            assert_eq!(dom.has_class(&link, ACTIVE_CLASS), expect, "{href}");
            assert_eq!(dom.attribute(&link, ARIA_CURRENT).is_some(), expect, "{href}");
        }
        let group = dom.find(Query::AttrEq(DROPDOWN_ATTR, "solutions")).unwrap();
        assert!(!dom.has_class(&group, CURRENT_CLASS));
    }

    #[test]
    fn rerun_moves_the_marking() {
        let dom = nav_page("/products.html");
        highlight(&dom, &SolutionsConfig::default());
        dom.set_pathname("/pricing.html");
        assert_eq!(highlight(&dom, &SolutionsConfig::default()), 1);

        let active: Vec<_> = dom
            .find_all(LINK)
            .into_iter()
            .filter(|l| dom.has_class(l, ACTIVE_CLASS))
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(dom.attribute(&active[0], "href").as_deref(), Some("pricing.html"));
    }

    #[test]
    fn solutions_page_flags_dropdown() {
        let dom = nav_page("/Integration.html");
        highlight(&dom, &SolutionsConfig::default());
        let group = dom.find(Query::AttrEq(DROPDOWN_ATTR, "solutions")).unwrap();
        assert!(dom.has_class(&group, CURRENT_CLASS));
    }

    #[test]
    fn root_path_marks_index() {
        let dom = nav_page("/");
        assert_eq!(highlight(&dom, &SolutionsConfig::default()), 1);
    }

    #[test]
    fn no_nav_is_a_noop() {
        let dom = FakeDom::new();
        assert_eq!(highlight(&dom, &SolutionsConfig::default()), 0);
    }
}
