//! # sitechrome-fragments
//!
//! Leptos SSR renderer for the shared page fragments: the interactive navbar,
//! the footer, and the minimal fallbacks shown when a fragment cannot be
//! loaded.
//!
//! Markup follows the `sitechrome::contract` vocabulary, so whatever is
//! rendered here is exactly what `NavController` knows how to wire.
//!
//! ## Quick Start
//!
//! ```rust
//! use sitechrome_fragments::{default_catalog, render_navbar, types::SiteModel};
//!
//! let model = SiteModel::default();
//! let html = render_navbar(&model);
//! assert!(html.contains(r#"id="global-nav""#));
//!
//! let catalog = default_catalog(&model);
//! assert!(catalog.fallback("footer").is_some());
//! ```
//!
//! ## Leptos 0.8 SSR
//!
//! Fragments are plain HTML strings produced with `RenderHtml::to_html`. No
//! reactive runtime or hydration is involved.
//!
//! ---
//!
//! Developed with 💀 by The Sitechrome Team (c)2025

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod components;
pub mod types;

use components::{FallbackFooter, FallbackNavbar, Footer, Navbar};
use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;
use sitechrome::FragmentCatalog;
use sitechrome::contract::{FOOTER_SLOT, NAVBAR_SLOT};
use types::SiteModel;

/// Render the interactive navbar.
pub fn render_navbar(model: &SiteModel) -> String {
    view! {
        <Navbar brand=model.brand.clone() entries=model.nav.clone() cta=model.cta.clone() />
    }
    .to_html()
}

/// Render the fallback navbar: brand plus every link flattened, no dropdowns
/// and no menu toggle.
pub fn render_fallback_navbar(model: &SiteModel) -> String {
    let links = model.all_links().into_iter().cloned().collect::<Vec<_>>();
    view! { <FallbackNavbar brand=model.brand.clone() links=links /> }.to_html()
}

/// Render the full footer.
pub fn render_footer(model: &SiteModel) -> String {
    view! { <Footer brand=model.brand.clone() footer=model.footer.clone() /> }.to_html()
}

/// Render the fallback footer, which carries only the copyright notice.
pub fn render_fallback_footer(model: &SiteModel) -> String {
    view! { <FallbackFooter copyright=model.footer.copyright.clone() /> }.to_html()
}

/// Catalog for the standard `navbar` and `footer` slots: inline markup for
/// both (used when a slot has no URL) and a fallback for each.
pub fn default_catalog(model: &SiteModel) -> FragmentCatalog {
    FragmentCatalog::new()
        .with_inline(NAVBAR_SLOT, render_navbar(model))
        .with_inline(FOOTER_SLOT, render_footer(model))
        .with_fallback(NAVBAR_SLOT, render_fallback_navbar(model))
        .with_fallback(FOOTER_SLOT, render_fallback_footer(model))
}
