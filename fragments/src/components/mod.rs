//! Leptos components for the page fragments.
//!
//! ```text
//! Navbar
//! ├── nav#global-nav
//! │   ├── brand, plain links
//! │   ├── DesktopDropdown ([data-dropdown] > [data-dropdown-trigger])
//! │   └── button#nav-toggle
//! └── div#mobile-menu
//!     └── MobileDropdown ([data-mobile-dropdown] > toggle + .mobile-dropdown-panel)
//! FallbackNavbar
//! Footer
//! FallbackFooter
//! ```
//!
//! Components are normally rendered through the `render_*` functions in the
//! crate root.

mod footer;
mod navbar;

pub use footer::{FallbackFooter, Footer};
pub use navbar::{FallbackNavbar, Navbar};
