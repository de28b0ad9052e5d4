//! Configuration support for sitechrome.
//!
//! Pages may embed a JSON block (the browser host reads
//! `<script type="application/json" id="sitechrome-config">`). Every field is
//! optional; missing or invalid config yields the defaults below.

use serde::Deserialize;
use tracing::warn;

use crate::contract::{FOOTER_SLOT, NAVBAR_SLOT};
use crate::error::ConfigError;
use crate::slot::{FragmentSource, SlotSpec};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Minimum log level: trace, debug, info, warn, error
    pub log_level: String,
    /// Slots to fill on page load
    pub slots: Vec<SlotConfig>,
    /// Navigation behavior
    pub nav: NavConfig,
    /// Newsletter form behavior
    pub newsletter: NewsletterConfig,
}

/// One placeholder slot. A missing `source` means inline content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlotConfig {
    /// Placeholder element id
    pub name: String,
    /// Relative URL of the fragment
    #[serde(default)]
    pub source: Option<String>,
}

/// Navigation controller tuning
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Scroll offset (px) past which the header turns sticky
    pub sticky_threshold_px: f64,
    /// Viewport width (px) at which the mobile menu is force-closed
    pub desktop_breakpoint_px: f64,
    /// Delay before a collapsed mobile panel is hidden
    pub collapse_delay_ms: u32,
    /// Allow only one mobile accordion item open at a time
    pub exclusive_mobile_dropdowns: bool,
    /// Close the mobile menu when one of its links is clicked
    pub close_menu_on_link_click: bool,
    /// Pages grouped under the solutions dropdown
    pub solutions: SolutionsConfig,
}

/// The solutions page group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SolutionsConfig {
    /// `data-dropdown` value of the solutions container
    pub dropdown: String,
    /// File names that belong to the group
    pub pages: Vec<String>,
}

/// Newsletter form behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    /// Message shown after a non-empty submission
    pub confirmation: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            slots: vec![
                SlotConfig {
                    name: NAVBAR_SLOT.into(),
                    source: None,
                },
                SlotConfig {
                    name: FOOTER_SLOT.into(),
                    source: Some("footer.html".into()),
                },
            ],
            nav: NavConfig::default(),
            newsletter: NewsletterConfig::default(),
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            sticky_threshold_px: 12.0,
            desktop_breakpoint_px: 1024.0,
            collapse_delay_ms: 300,
            exclusive_mobile_dropdowns: false,
            close_menu_on_link_click: true,
            solutions: SolutionsConfig::default(),
        }
    }
}

impl Default for SolutionsConfig {
    fn default() -> Self {
        Self {
            dropdown: "solutions".into(),
            pages: vec!["solutions.html".into(), "Integration.html".into()],
        }
    }
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            confirmation: "Thanks for subscribing! We'll be in touch.".into(),
        }
    }
}

impl SiteConfig {
    /// Parse config, surfacing errors.
    pub fn try_from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse config. Returns defaults if the JSON is invalid.
    pub fn from_json(json: &str) -> Self {
        match Self::try_from_json(json) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to parse site config: {}", e);
                Self::default()
            }
        }
    }

    /// Slot specs in load order.
    pub fn slot_specs(&self) -> Vec<SlotSpec> {
        self.slots
            .iter()
            .map(|slot| SlotSpec {
                name: slot.name.clone(),
                source: match &slot.source {
                    Some(url) if !url.trim().is_empty() => FragmentSource::Url(url.clone()),
                    _ => FragmentSource::Inline,
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.nav.sticky_threshold_px, 12.0);
        assert_eq!(config.nav.desktop_breakpoint_px, 1024.0);
        assert_eq!(config.nav.collapse_delay_ms, 300);
        assert!(!config.nav.exclusive_mobile_dropdowns);
        assert!(config.nav.close_menu_on_link_click);
    }

    #[test]
    fn test_default_slots() {
        let specs = SiteConfig::default().slot_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "navbar");
        assert_eq!(specs[0].source, FragmentSource::Inline);
        assert_eq!(specs[1].name, "footer");
        assert_eq!(specs[1].source, FragmentSource::Url("footer.html".into()));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = SiteConfig::from_json(r#"{ "nav": { "sticky_threshold_px": 40 } }"#);
        assert_eq!(config.nav.sticky_threshold_px, 40.0);
        assert_eq!(config.nav.desktop_breakpoint_px, 1024.0);
        assert_eq!(config.slots.len(), 2);
    }

    #[test]
    fn test_slots_override() {
        let config = SiteConfig::from_json(
            r#"{ "slots": [
                { "name": "navbar", "source": "navbar.html" },
                { "name": "footer", "source": "" }
            ] }"#,
        );
        let specs = config.slot_specs();
        assert_eq!(specs[0].source, FragmentSource::Url("navbar.html".into()));
        assert_eq!(specs[1].source, FragmentSource::Inline);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        assert!(SiteConfig::try_from_json("{ not json").is_err());
        let config = SiteConfig::from_json("{ not json");
        assert_eq!(config.nav.collapse_delay_ms, 300);
    }

    #[test]
    fn test_solutions_group() {
        let config = SiteConfig::from_json(
            r#"{ "nav": { "solutions": { "pages": ["retail.html"] } } }"#,
        );
        assert_eq!(config.nav.solutions.dropdown, "solutions");
        assert_eq!(config.nav.solutions.pages, vec!["retail.html".to_string()]);
    }
}
