//! Fragment loading.
//!
//! Slots load concurrently. Each slot settles on its own: a failure is logged
//! and replaced by the slot's fallback markup, never propagated to siblings.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::contract::{NAVBAR_SLOT, Query};
use crate::dom::Dom;
use crate::error::LoadError;
use crate::slot::{FragmentSource, SlotSpec, SlotState};

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// Status code
    pub status: u16,
    /// Body decoded as text
    pub body: String,
}

impl FetchResponse {
    /// 2xx response with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of fragment bodies.
///
/// Transport failures (no response at all, unreadable body) are errors;
/// a response with any status is `Ok`.
pub trait Fetcher {
    /// Fetch `url` relative to the current page.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse, LoadError>>;
}

/// Inline and fallback fragments, keyed by slot name.
#[derive(Debug, Clone, Default)]
pub struct FragmentCatalog {
    inline: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl FragmentCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the inline fragment for `slot`.
    pub fn with_inline(mut self, slot: impl Into<String>, html: impl Into<String>) -> Self {
        self.inline.insert(slot.into(), html.into());
        self
    }

    /// Register the fallback fragment for `slot`.
    pub fn with_fallback(mut self, slot: impl Into<String>, html: impl Into<String>) -> Self {
        self.fallback.insert(slot.into(), html.into());
        self
    }

    /// Inline fragment for `slot`.
    pub fn inline(&self, slot: &str) -> Option<&str> {
        self.inline.get(slot).map(String::as_str)
    }

    /// Fallback fragment for `slot`.
    pub fn fallback(&self, slot: &str) -> Option<&str> {
        self.fallback.get(slot).map(String::as_str)
    }
}

/// Final state of every slot requested in one `load_all` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    slots: Vec<(String, SlotState)>,
}

impl LoadReport {
    /// State of `slot`, if it was requested.
    pub fn state(&self, slot: &str) -> Option<SlotState> {
        self.slots
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, state)| *state)
    }

    /// Slots that received real content.
    pub fn filled(&self) -> Vec<&str> {
        self.with_state(SlotState::Filled)
    }

    /// Slots that received fallback content.
    pub fn fallbacks(&self) -> Vec<&str> {
        self.with_state(SlotState::FallbackFilled)
    }

    /// False only when the navbar slot degraded to its fallback markup.
    ///
    /// A page without a navbar slot (inline navigation) counts as
    /// interactive; the controller still checks for the markup itself.
    pub fn navbar_is_interactive(&self) -> bool {
        self.state(NAVBAR_SLOT) != Some(SlotState::FallbackFilled)
    }

    /// Every requested slot with its state, in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SlotState)> {
        self.slots.iter().map(|(name, state)| (name.as_str(), *state))
    }

    fn with_state(&self, wanted: SlotState) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|(_, state)| *state == wanted)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Fills placeholder slots with fetched or inline fragments.
///
/// One loader per page view; each slot is filled at most once.
pub struct FragmentLoader<'a, D: Dom, F: Fetcher> {
    dom: &'a D,
    fetcher: &'a F,
    catalog: &'a FragmentCatalog,
    states: RefCell<HashMap<String, SlotState>>,
}

impl<'a, D: Dom, F: Fetcher> FragmentLoader<'a, D, F> {
    /// Loader over `dom`, fetching through `fetcher`.
    pub fn new(dom: &'a D, fetcher: &'a F, catalog: &'a FragmentCatalog) -> Self {
        Self {
            dom,
            fetcher,
            catalog,
            states: RefCell::new(HashMap::new()),
        }
    }

    /// Current state of `slot`.
    pub fn state(&self, slot: &str) -> SlotState {
        self.states
            .borrow()
            .get(slot)
            .copied()
            .unwrap_or(SlotState::Empty)
    }

    /// Load every slot concurrently and wait for all of them.
    pub async fn load_all(&self, slots: &[SlotSpec]) -> LoadReport {
        join_all(slots.iter().map(|spec| self.load_one(spec))).await;

        let mut report = LoadReport::default();
        for spec in slots {
            if report.state(&spec.name).is_none() {
                report.slots.push((spec.name.clone(), self.state(&spec.name)));
            }
        }
        info!(
            filled = report.filled().len(),
            fallbacks = report.fallbacks().len(),
            "Fragment slots settled"
        );
        report
    }

    /// Load a single slot. Never fails; the returned state says what happened.
    pub async fn load_one(&self, spec: &SlotSpec) -> SlotState {
        let current = self.state(&spec.name);
        if current != SlotState::Empty {
            debug!(slot = %spec.name, state = %current, "Slot already handled, skipping");
            return current;
        }

        let Some(placeholder) = self.dom.find(Query::Id(&spec.name)) else {
            warn!(slot = %spec.name, "No placeholder element on this page");
            self.set_state(&spec.name, SlotState::Missing);
            return SlotState::Missing;
        };

        self.set_state(&spec.name, SlotState::Loading);

        let state = match self.resolve(spec).await {
            Ok(html) => {
                self.dom.set_inner_html(&placeholder, &html);
                info!(slot = %spec.name, "Fragment injected");
                SlotState::Filled
            }
            Err(e) => {
                warn!(slot = %spec.name, error = %e, "Fragment failed, using fallback");
                let fallback = self.catalog.fallback(&spec.name).unwrap_or_default();
                self.dom.set_inner_html(&placeholder, fallback);
                SlotState::FallbackFilled
            }
        };
        self.set_state(&spec.name, state);
        state
    }

    async fn resolve(&self, spec: &SlotSpec) -> Result<String, LoadError> {
        match &spec.source {
            FragmentSource::Inline => self
                .catalog
                .inline(&spec.name)
                .map(str::to_owned)
                .ok_or_else(|| LoadError::NoInline {
                    slot: spec.name.clone(),
                }),
            FragmentSource::Url(url) => {
                debug!(slot = %spec.name, %url, "Fetching fragment");
                let response = self.fetcher.fetch(url).await?;
                if !response.is_success() {
                    return Err(LoadError::Http {
                        url: url.clone(),
                        status: response.status,
                    });
                }
                Ok(response.body)
            }
        }
    }

    fn set_state(&self, slot: &str, state: SlotState) {
        self.states.borrow_mut().insert(slot.to_string(), state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDom, ScriptedFetcher, el};

    fn page_with_slots() -> FakeDom {
        let dom = FakeDom::new();
        let body = dom.body_node();
        dom.append(&body, el("div").id("navbar"));
        dom.append(&body, el("div").id("footer"));
        dom
    }

    fn catalog() -> FragmentCatalog {
        FragmentCatalog::new()
            .with_inline("navbar", r#"<nav id="global-nav"><a href="index.html">Home</a></nav>"#)
            .with_fallback("navbar", r#"<nav class="fallback"><a href="index.html">Home</a></nav>"#)
            .with_fallback("footer", "<footer><p>&copy; Fallback Co.</p></footer>")
    }

    #[tokio::test]
    async fn inline_and_fetched_slots_fill() {
        let dom = page_with_slots();
        let fetcher = ScriptedFetcher::new().respond("footer.html", 200, "<footer>Real</footer>");
        let catalog = catalog();
        let loader = FragmentLoader::new(&dom, &fetcher, &catalog);

        let report = loader
            .load_all(&[SlotSpec::inline("navbar"), SlotSpec::url("footer", "footer.html")])
            .await;

        assert_eq!(report.state("navbar"), Some(SlotState::Filled));
        assert_eq!(report.state("footer"), Some(SlotState::Filled));
        assert!(dom.inner_html_of("footer").contains("Real"));
        assert!(dom.find(Query::Id("global-nav")).is_some());
        assert!(report.navbar_is_interactive());
    }

    #[tokio::test]
    async fn http_failure_uses_fallback_without_touching_siblings() {
        let dom = page_with_slots();
        let fetcher = ScriptedFetcher::new().respond("footer.html", 404, "Not Found");
        let catalog = catalog();
        let loader = FragmentLoader::new(&dom, &fetcher, &catalog);

        let report = loader
            .load_all(&[SlotSpec::inline("navbar"), SlotSpec::url("footer", "footer.html")])
            .await;

        assert_eq!(report.state("footer"), Some(SlotState::FallbackFilled));
        assert_eq!(report.state("navbar"), Some(SlotState::Filled));
        assert!(dom.inner_html_of("footer").contains("Fallback Co."));
        assert_eq!(report.fallbacks(), vec!["footer"]);
    }

    #[tokio::test]
    async fn network_failure_uses_fallback() {
        let dom = page_with_slots();
        let fetcher = ScriptedFetcher::new().fail("navbar.html", "connection refused");
        let catalog = catalog();
        let loader = FragmentLoader::new(&dom, &fetcher, &catalog);

        let state = loader.load_one(&SlotSpec::url("navbar", "navbar.html")).await;

        assert_eq!(state, SlotState::FallbackFilled);
        assert!(dom.find(Query::Class("fallback")).is_some());
        assert!(dom.find(Query::Id("global-nav")).is_none());
    }

    #[tokio::test]
    async fn missing_placeholder_is_skipped() {
        let dom = FakeDom::new();
        let fetcher = ScriptedFetcher::new();
        let catalog = catalog();
        let loader = FragmentLoader::new(&dom, &fetcher, &catalog);

        let report = loader.load_all(&[SlotSpec::url("footer", "footer.html")]).await;

        assert_eq!(report.state("footer"), Some(SlotState::Missing));
        assert_eq!(fetcher.requests(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn inline_without_catalog_entry_falls_back() {
        let dom = page_with_slots();
        let fetcher = ScriptedFetcher::new();
        let catalog = FragmentCatalog::new().with_fallback("footer", "<p>fallback</p>");
        let loader = FragmentLoader::new(&dom, &fetcher, &catalog);

        let state = loader.load_one(&SlotSpec::inline("footer")).await;

        assert_eq!(state, SlotState::FallbackFilled);
        assert!(dom.inner_html_of("footer").contains("fallback"));
    }

    #[tokio::test]
    async fn slot_fills_once() {
        let dom = page_with_slots();
        let fetcher = ScriptedFetcher::new().respond("footer.html", 200, "<p>first</p>");
        let catalog = catalog();
        let loader = FragmentLoader::new(&dom, &fetcher, &catalog);

        loader.load_one(&SlotSpec::url("footer", "footer.html")).await;
        let again = loader.load_one(&SlotSpec::url("footer", "footer.html")).await;

        assert_eq!(again, SlotState::Filled);
        assert_eq!(fetcher.requests(), vec!["footer.html".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_slot_in_one_batch_loads_once() {
        let dom = page_with_slots();
        let fetcher = ScriptedFetcher::new().respond("footer.html", 200, "<p>only</p>");
        let catalog = catalog();
        let loader = FragmentLoader::new(&dom, &fetcher, &catalog);

        let report = loader
            .load_all(&[
                SlotSpec::url("footer", "footer.html"),
                SlotSpec::url("footer", "footer.html"),
            ])
            .await;

        assert_eq!(report.iter().count(), 1);
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[test]
    fn success_range() {
        assert!(FetchResponse::ok("x").is_success());
        assert!(FetchResponse { status: 204, body: String::new() }.is_success());
        assert!(!FetchResponse { status: 304, body: String::new() }.is_success());
        assert!(!FetchResponse { status: 500, body: String::new() }.is_success());
    }
}
