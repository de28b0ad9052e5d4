//! # sitechrome
//!
//! Page furniture for static marketing sites: shared navbar/footer fragments
//! injected into placeholder slots, and a navigation controller that wires
//! sticky headers, dropdowns, the mobile menu, FAQ accordions and newsletter
//! forms against the injected markup.
//!
//! The crate is platform-neutral. Everything that touches a document goes
//! through the [`dom::Dom`] trait, and every fetch goes through
//! [`loader::Fetcher`], so the same state machine runs in the browser (see the
//! `sitechrome-web` crate) and against the in-memory [`testing::FakeDom`].
//!
//! ## Pipeline
//!
//! ```text
//! page load
//!   ├── NavController::page_bindings()     forms, FAQ (fragment independent)
//!   ├── FragmentLoader::load_all(slots)    navbar + footer, concurrently
//!   └── NavController::attach(&report)     sticky, menus, dropdowns, escape
//! events
//!   └── NavController::handle(action, event) -> Effects
//! ```
//!
//! ## Architecture
//!
//! - [`contract`] - ids, attributes and classes shared with the markup
//! - [`dom`] - the document abstraction
//! - [`slot`] - slot specs and lifecycle states
//! - [`loader`] - concurrent fragment loading with fallbacks
//! - [`nav`] - the navigation controller
//! - [`subscription`] - listener teardown handles
//! - [`config`] - JSON configuration
//!
//! ---
//!
//! Developed with 💀 by The Sitechrome Team (c)2025

#![warn(missing_docs)]

pub mod active_link;
pub mod config;
pub mod contract;
pub mod dom;
pub mod error;
pub mod faq;
pub mod loader;
pub mod nav;
pub mod newsletter;
pub mod slot;
pub mod subscription;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{NavConfig, SiteConfig};
pub use dom::Dom;
pub use error::{ConfigError, LoadError};
pub use loader::{FetchResponse, Fetcher, FragmentCatalog, FragmentLoader, LoadReport};
pub use nav::{Action, Binding, EventContext, EventKind, Effects, ListenTarget, NavController};
pub use slot::{FragmentSource, SlotSpec, SlotState};
pub use subscription::{Subscription, SubscriptionSet};
