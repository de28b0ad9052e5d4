//! Navigation controller.
//!
//! [`NavController`] owns no DOM references between events; it re-reads the
//! document on every action, so the document stays the single owner of UI
//! state and missing elements are no-ops rather than errors.
//!
//! The controller never registers listeners itself. It hands out
//! [`Binding`]s (target + event + action) and the host turns each one into a
//! real listener that calls [`NavController::handle`].

mod accordion;
mod dropdown;
mod menu;

use std::time::Duration;

use tracing::{debug, info};

use crate::active_link;
use crate::config::SiteConfig;
use crate::contract::{GLOBAL_NAV_ID, LINK, MOBILE_MENU_ID, NAV_TOGGLE_ID, Query, STICKY_CLASS};
use crate::dom::Dom;
use crate::faq;
use crate::loader::LoadReport;
use crate::newsletter;
use crate::slot::SlotState;

/// DOM event kinds the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Viewport scrolled
    Scroll,
    /// Viewport resized
    Resize,
    /// Pointer click
    Click,
    /// Key pressed
    KeyDown,
    /// Form submitted
    Submit,
}

impl EventKind {
    /// DOM event type string.
    pub fn as_event_name(&self) -> &'static str {
        match self {
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::Submit => "submit",
        }
    }
}

/// Where a listener is registered.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget<N> {
    /// The window
    Window,
    /// The document
    Document,
    /// A specific element
    Element(N),
}

/// What the controller does when a bound event fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<N> {
    /// Recompute the sticky header state
    UpdateSticky,
    /// Flip the mobile menu
    ToggleMobileMenu,
    /// Close the mobile menu (link inside it clicked)
    CloseMobileMenu,
    /// Close the mobile menu if the viewport is now desktop-sized
    ViewportResized,
    /// Toggle one desktop dropdown, closing the rest
    ToggleDropdown(N),
    /// Toggle one mobile accordion item
    ToggleMobileDropdown(N),
    /// Hide a collapsed mobile panel after its transition
    FinishCollapse(N),
    /// Dismiss menus when clicking outside them
    DocumentClick,
    /// Escape-key dismissal
    KeyDown,
    /// Intercept a newsletter form submission
    Subscribe(N),
    /// Toggle one FAQ item, closing the rest
    ToggleFaq(N),
}

/// One listener the host should register.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<N> {
    /// Listener target
    pub target: ListenTarget<N>,
    /// Event kind
    pub event: EventKind,
    /// Action to dispatch
    pub action: Action<N>,
}

impl<N> Binding<N> {
    fn new(target: ListenTarget<N>, event: EventKind, action: Action<N>) -> Self {
        Self {
            target,
            event,
            action,
        }
    }

    pub(crate) fn element(node: N, event: EventKind, action: Action<N>) -> Self {
        Self::new(ListenTarget::Element(node), event, action)
    }
}

/// Event details the host forwards with an action.
#[derive(Debug, Clone, PartialEq)]
pub struct EventContext<N> {
    /// Element the event originated from
    pub target: Option<N>,
    /// `KeyboardEvent.key`
    pub key: Option<String>,
}

impl<N> EventContext<N> {
    /// Event without details (scroll, resize, timers).
    pub fn none() -> Self {
        Self {
            target: None,
            key: None,
        }
    }

    /// Event originating at `target`.
    pub fn at(target: N) -> Self {
        Self {
            target: Some(target),
            key: None,
        }
    }

    /// Key press.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            target: None,
            key: Some(key.into()),
        }
    }
}

/// Follow-up action the host must run after `delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred<N> {
    /// Delay before dispatch
    pub delay: Duration,
    /// Action to dispatch through [`NavController::handle`]
    pub action: Action<N>,
}

/// What the host must do after an action ran.
#[derive(Debug, Clone, PartialEq)]
pub struct Effects<N> {
    /// Call `preventDefault()` on the event
    pub prevent_default: bool,
    /// Timers to schedule
    pub deferred: Vec<Deferred<N>>,
}

impl<N> Default for Effects<N> {
    fn default() -> Self {
        Self {
            prevent_default: false,
            deferred: Vec::new(),
        }
    }
}

/// Interactive behavior for one page view.
pub struct NavController<D: Dom> {
    dom: D,
    config: SiteConfig,
    attached: bool,
}

impl<D: Dom> NavController<D> {
    /// Controller over `dom`. Nothing happens until bindings are requested.
    pub fn new(dom: D, config: SiteConfig) -> Self {
        Self {
            dom,
            config,
            attached: false,
        }
    }

    /// The document this controller drives.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Active configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Whether navigation bindings have been handed out.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Bindings that do not depend on fragments: newsletter forms and FAQ.
    ///
    /// Forms inside configured slot placeholders are left to
    /// [`fragment_bindings`](Self::fragment_bindings), so calling both never
    /// binds a form twice.
    pub fn page_bindings(&self) -> Vec<Binding<D::Node>> {
        let slots: Vec<D::Node> = self
            .config
            .slots
            .iter()
            .filter_map(|slot| self.dom.find(Query::Id(&slot.name)))
            .collect();
        let mut bindings: Vec<_> = newsletter::bindings(&self.dom)
            .into_iter()
            .filter(|binding| match &binding.target {
                ListenTarget::Element(form) => {
                    !slots.iter().any(|slot| self.dom.contains(slot, form))
                }
                _ => true,
            })
            .collect();
        bindings.extend(faq::bindings(&self.dom));
        debug!(count = bindings.len(), "Page bindings collected");
        bindings
    }

    /// Navigation bindings, once all slots have settled.
    ///
    /// Returns nothing when already attached, when the navbar degraded to its
    /// fallback, or when no navigation element is present. Active links are
    /// highlighted in every case.
    pub fn attach(&mut self, report: &LoadReport) -> Vec<Binding<D::Node>> {
        active_link::highlight(&self.dom, &self.config.nav.solutions);

        if self.attached {
            debug!("Navigation already attached");
            return Vec::new();
        }
        if !report.navbar_is_interactive() {
            info!("Navbar is showing fallback markup, skipping navigation wiring");
            return Vec::new();
        }

        let nav = self.dom.find(Query::Id(GLOBAL_NAV_ID));
        let toggle = self.dom.find(Query::Id(NAV_TOGGLE_ID));
        if nav.is_none() && toggle.is_none() {
            debug!("No navigation markup on this page");
            return Vec::new();
        }

        self.attached = true;
        self.update_sticky();

        let mut bindings = Vec::new();
        if nav.is_some() {
            bindings.push(Binding::new(
                ListenTarget::Window,
                EventKind::Scroll,
                Action::UpdateSticky,
            ));
        }
        if let Some(toggle) = toggle {
            bindings.push(Binding::element(
                toggle,
                EventKind::Click,
                Action::ToggleMobileMenu,
            ));
        }
        if let Some(menu) = self.dom.find(Query::Id(MOBILE_MENU_ID)) {
            if self.config.nav.close_menu_on_link_click {
                for link in self.dom.find_within(&menu, LINK) {
                    bindings.push(Binding::element(
                        link,
                        EventKind::Click,
                        Action::CloseMobileMenu,
                    ));
                }
            }
            bindings.push(Binding::new(
                ListenTarget::Window,
                EventKind::Resize,
                Action::ViewportResized,
            ));
        }
        for dropdown in dropdown::all(&self.dom) {
            if let Some(trigger) = dropdown::trigger_of(&self.dom, &dropdown) {
                bindings.push(Binding::element(
                    trigger,
                    EventKind::Click,
                    Action::ToggleDropdown(dropdown),
                ));
            }
        }
        for item in accordion::all(&self.dom) {
            if let Some(toggle) = accordion::toggle_of(&self.dom, &item) {
                bindings.push(Binding::element(
                    toggle,
                    EventKind::Click,
                    Action::ToggleMobileDropdown(item),
                ));
            }
        }
        bindings.push(Binding::new(
            ListenTarget::Document,
            EventKind::Click,
            Action::DocumentClick,
        ));
        bindings.push(Binding::new(
            ListenTarget::Document,
            EventKind::KeyDown,
            Action::KeyDown,
        ));

        info!(count = bindings.len(), "Navigation attached");
        bindings
    }

    /// Forget the attachment so navigation can be wired again, e.g. after
    /// fragments are reloaded. The host drops the old subscriptions.
    ///
    /// The mobile menu is closed first, since replaced markup comes back
    /// closed and the body class must follow it.
    pub fn detach(&mut self) {
        menu::reset(&self.dom);
        dropdown::close_all(&self.dom);
        self.attached = false;
    }

    /// Subscription-form bindings for forms that arrived inside filled
    /// slots.
    pub fn fragment_bindings(&self, report: &LoadReport) -> Vec<Binding<D::Node>> {
        let bindings: Vec<_> = report
            .iter()
            .filter(|(_, state)| matches!(state, SlotState::Filled | SlotState::FallbackFilled))
            .filter_map(|(slot, _)| self.dom.find(Query::Id(slot)))
            .flat_map(|placeholder| newsletter::bindings_within(&self.dom, &placeholder))
            .collect();
        debug!(count = bindings.len(), "Fragment form bindings collected");
        bindings
    }

    /// Run `action` for an event.
    pub fn handle(
        &mut self,
        action: &Action<D::Node>,
        event: &EventContext<D::Node>,
    ) -> Effects<D::Node> {
        let mut effects = Effects::default();
        let nav = &self.config.nav;

        match action {
            Action::UpdateSticky => self.update_sticky(),
            Action::ToggleMobileMenu => {
                menu::toggle(&self.dom);
            }
            Action::CloseMobileMenu => menu::close(&self.dom),
            Action::ViewportResized => {
                if self.dom.viewport_width() >= nav.desktop_breakpoint_px
                    && menu::is_open(&self.dom)
                {
                    debug!("Desktop width reached, closing mobile menu");
                    menu::close(&self.dom);
                }
            }
            Action::ToggleDropdown(target) => dropdown::toggle_exclusive(&self.dom, target),
            Action::ToggleMobileDropdown(item) => {
                let delay = Duration::from_millis(u64::from(nav.collapse_delay_ms));
                effects.deferred = accordion::toggle(
                    &self.dom,
                    item,
                    nav.exclusive_mobile_dropdowns,
                    delay,
                );
            }
            Action::FinishCollapse(item) => accordion::finish_collapse(&self.dom, item),
            Action::DocumentClick => {
                if let Some(target) = &event.target {
                    self.dismiss_outside(target);
                }
            }
            Action::KeyDown => {
                if matches!(event.key.as_deref(), Some("Escape" | "Esc")) {
                    dropdown::close_all(&self.dom);
                    menu::close(&self.dom);
                }
            }
            Action::Subscribe(form) => {
                effects.prevent_default = true;
                newsletter::submit(&self.dom, form, &self.config.newsletter.confirmation);
            }
            Action::ToggleFaq(item) => faq::toggle(&self.dom, item),
        }
        effects
    }

    fn update_sticky(&self) {
        if let Some(nav) = self.dom.find(Query::Id(GLOBAL_NAV_ID)) {
            let sticky = self.dom.scroll_y() > self.config.nav.sticky_threshold_px;
            self.dom.set_class(&nav, STICKY_CLASS, sticky);
        }
    }

    fn dismiss_outside(&self, target: &D::Node) {
        if dropdown::enclosing(&self.dom, target).is_none() {
            dropdown::close_all(&self.dom);
        }

        if !menu::is_open(&self.dom) {
            return;
        }
        let inside = [GLOBAL_NAV_ID, NAV_TOGGLE_ID, MOBILE_MENU_ID]
            .into_iter()
            .filter_map(|id| self.dom.find(Query::Id(id)))
            .any(|region| self.dom.contains(&region, target));
        if !inside {
            menu::close(&self.dom);
        }
    }
}
