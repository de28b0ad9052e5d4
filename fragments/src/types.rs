//! Site content model the fragments are rendered from.
//!
//! Every struct is `#[serde(default)]`, so a partial JSON document fills in
//! the rest from [`SiteModel::default`].
//!
//! # Example
//!
//! ```rust
//! use sitechrome_fragments::types::{NavEntry, NavLink, SiteModel};
//!
//! let model = SiteModel {
//!     nav: vec![NavEntry::Link(NavLink::new("Pricing", "pricing.html"))],
//!     ..Default::default()
//! };
//! assert_eq!(model.nav.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use sitechrome::ConfigError;

/// A labelled link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavLink {
    /// Link text
    pub label: String,
    /// Target, usually a sibling page such as `products.html`
    pub href: String,
}

impl NavLink {
    /// Link with `label` pointing at `href`.
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// A dropdown: desktop menu plus its mobile accordion counterpart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavGroup {
    /// Value of `data-dropdown`; `solutions` is the group flagged current
    /// on solution pages
    pub key: String,
    /// Trigger text
    pub label: String,
    /// Links inside the dropdown
    pub links: Vec<NavLink>,
}

/// One top-level navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavEntry {
    /// Plain link
    Link(NavLink),
    /// Dropdown group
    Group(NavGroup),
}

impl NavEntry {
    /// All links of this entry, flattened.
    pub fn links(&self) -> Vec<&NavLink> {
        match self {
            NavEntry::Link(link) => vec![link],
            NavEntry::Group(group) => group.links.iter().collect(),
        }
    }
}

/// Brand block at the start of the navbar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    /// Site name
    pub name: String,
    /// Home link
    pub href: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: "Example Co.".into(),
            href: "index.html".into(),
        }
    }
}

/// A titled column of footer links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterColumn {
    /// Column heading
    pub title: String,
    /// Column links
    pub links: Vec<NavLink>,
}

/// Footer content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterModel {
    /// Short line under the brand
    pub tagline: String,
    /// Link columns
    pub columns: Vec<FooterColumn>,
    /// Copyright notice; also the whole content of the fallback footer
    pub copyright: String,
}

impl Default for FooterModel {
    fn default() -> Self {
        Self {
            tagline: "Software for teams that ship.".into(),
            columns: vec![
                FooterColumn {
                    title: "Product".into(),
                    links: vec![
                        NavLink::new("Overview", "products.html"),
                        NavLink::new("Integration", "Integration.html"),
                    ],
                },
                FooterColumn {
                    title: "Company".into(),
                    links: vec![
                        NavLink::new("About", "about.html"),
                        NavLink::new("Contact", "contact.html"),
                    ],
                },
            ],
            copyright: "© 2025 Example Co. All rights reserved.".into(),
        }
    }
}

/// Everything the navbar and footer are built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteModel {
    /// Brand block
    pub brand: Brand,
    /// Top-level navigation, in display order
    pub nav: Vec<NavEntry>,
    /// Call-to-action link at the end of the navbar
    pub cta: Option<NavLink>,
    /// Footer content
    pub footer: FooterModel,
}

impl Default for SiteModel {
    fn default() -> Self {
        Self {
            brand: Brand::default(),
            nav: vec![
                NavEntry::Link(NavLink::new("Home", "index.html")),
                NavEntry::Link(NavLink::new("Products", "products.html")),
                NavEntry::Group(NavGroup {
                    key: "solutions".into(),
                    label: "Solutions".into(),
                    links: vec![
                        NavLink::new("All solutions", "solutions.html"),
                        NavLink::new("Integration", "Integration.html"),
                    ],
                }),
                NavEntry::Group(NavGroup {
                    key: "company".into(),
                    label: "Company".into(),
                    links: vec![
                        NavLink::new("About", "about.html"),
                        NavLink::new("Careers", "careers.html"),
                    ],
                }),
            ],
            cta: Some(NavLink::new("Contact", "contact.html")),
            footer: FooterModel::default(),
        }
    }
}

impl SiteModel {
    /// Parse a model from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every link the full navbar renders, in order, including the CTA.
    pub fn all_links(&self) -> Vec<&NavLink> {
        self.nav
            .iter()
            .flat_map(NavEntry::links)
            .chain(self.cta.as_ref())
            .collect()
    }
}
