//! Markup contract between fragment renderers and the controller.
//!
//! These identifiers are the only integration points. Any markup that uses
//! them correctly receives full interactive behavior; anything else is
//! ignored. Renderers (see `sitechrome-fragments`) must emit exactly these
//! names.

/// Bumped whenever an id, attribute or state class below changes meaning.
pub const CONTRACT_VERSION: u32 = 1;

// Placeholder slots
/// Placeholder id for the navbar slot.
pub const NAVBAR_SLOT: &str = "navbar";
/// Placeholder id for the footer slot.
pub const FOOTER_SLOT: &str = "footer";

// Navigation structure
/// Id of the navigation region.
pub const GLOBAL_NAV_ID: &str = "global-nav";
/// Id of the mobile menu toggle button.
pub const NAV_TOGGLE_ID: &str = "nav-toggle";
/// Id of the mobile menu container.
pub const MOBILE_MENU_ID: &str = "mobile-menu";
/// Marks a desktop dropdown container; the value names the dropdown.
pub const DROPDOWN_ATTR: &str = "data-dropdown";
/// Marks the button that opens its enclosing dropdown.
pub const DROPDOWN_TRIGGER_ATTR: &str = "data-dropdown-trigger";
/// Marks a mobile accordion item.
pub const MOBILE_DROPDOWN_ATTR: &str = "data-mobile-dropdown";
/// Marks the button that toggles its enclosing mobile accordion item.
pub const MOBILE_DROPDOWN_TOGGLE_ATTR: &str = "data-mobile-dropdown-toggle";
/// Collapsible panel inside a mobile accordion item.
pub const MOBILE_DROPDOWN_PANEL_CLASS: &str = "mobile-dropdown-panel";

// FAQ
/// One question/answer pair.
pub const FAQ_ITEM_CLASS: &str = "faq-item";
/// Clickable question inside a FAQ item.
pub const FAQ_QUESTION_CLASS: &str = "faq-question";

// State classes and attributes
/// Set on the navigation region once scrolled past the threshold.
pub const STICKY_CLASS: &str = "is-sticky";
/// Open state of menus, dropdowns and FAQ items.
pub const OPEN_CLASS: &str = "is-open";
/// Set on `<body>` while the mobile menu is open.
pub const BODY_MENU_OPEN_CLASS: &str = "menu-open";
/// Set on navigation links pointing at the current page.
pub const ACTIVE_CLASS: &str = "active";
/// Set on the solutions dropdown when the current page belongs to it.
pub const CURRENT_CLASS: &str = "current";
/// Accessible expanded state on toggles and triggers.
pub const ARIA_EXPANDED: &str = "aria-expanded";
/// Accessible current-page marker on active links.
pub const ARIA_CURRENT: &str = "aria-current";

/// A selector restricted to the shapes the contract needs.
///
/// Hosts with a real selector engine use [`Query::to_css`]; the fake DOM
/// matches these directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'a> {
    /// `#id`
    Id(&'a str),
    /// `.class`
    Class(&'a str),
    /// `[attr]`
    Attr(&'a str),
    /// `[attr="value"]`
    AttrEq(&'a str, &'a str),
    /// `tag`
    Tag(&'a str),
    /// `tag[attr="value"]`
    TagAttrEq(&'a str, &'a str, &'a str),
}

impl Query<'_> {
    /// Render as a CSS selector.
    pub fn to_css(&self) -> String {
        match self {
            Query::Id(id) => format!("#{id}"),
            Query::Class(class) => format!(".{class}"),
            Query::Attr(attr) => format!("[{attr}]"),
            Query::AttrEq(attr, value) => format!("[{attr}=\"{value}\"]"),
            Query::Tag(tag) => (*tag).to_string(),
            Query::TagAttrEq(tag, attr, value) => format!("{tag}[{attr}=\"{value}\"]"),
        }
    }
}

/// Links inside navigation regions.
pub const LINK: Query<'static> = Query::Tag("a");
/// Forms treated as newsletter subscriptions.
pub const SUBSCRIBE_FORM: Query<'static> = Query::TagAttrEq("form", "autocomplete", "off");
/// Email field inside a subscription form.
pub const EMAIL_INPUT: Query<'static> = Query::TagAttrEq("input", "type", "email");
