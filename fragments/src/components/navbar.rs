//! Full navbar: brand, desktop dropdowns, menu toggle and the mobile menu.

use leptos::prelude::*;
use sitechrome::contract::{GLOBAL_NAV_ID, MOBILE_DROPDOWN_PANEL_CLASS, MOBILE_MENU_ID, NAV_TOGGLE_ID};

use crate::types::{Brand, NavEntry, NavGroup, NavLink};

/// Desktop dropdown with its trigger.
#[component]
fn DesktopDropdown(group: NavGroup) -> impl IntoView {
    view! {
        <div class="nav-dropdown" data-dropdown=group.key>
            <button
                class="nav-dropdown-trigger"
                type="button"
                data-dropdown-trigger=""
                aria-haspopup="true"
                aria-expanded="false"
            >
                {group.label}
            </button>
            <div class="nav-dropdown-menu">
                {group.links.into_iter().map(|link| {
                    view! { <a class="nav-dropdown-link" href=link.href>{link.label}</a> }
                }).collect::<Vec<_>>()}
            </div>
        </div>
    }
}

/// Mobile accordion item. The panel starts collapsed.
#[component]
fn MobileDropdown(group: NavGroup) -> impl IntoView {
    view! {
        <div class="mobile-dropdown" data-mobile-dropdown=group.key>
            <button
                class="mobile-dropdown-toggle"
                type="button"
                data-mobile-dropdown-toggle=""
                aria-expanded="false"
            >
                {group.label}
            </button>
            <div class=MOBILE_DROPDOWN_PANEL_CLASS>
                {group.links.into_iter().map(|link| {
                    view! { <a class="mobile-link" href=link.href>{link.label}</a> }
                }).collect::<Vec<_>>()}
            </div>
        </div>
    }
}

/// The interactive navbar the controller wires up.
#[component]
pub fn Navbar(brand: Brand, entries: Vec<NavEntry>, cta: Option<NavLink>) -> impl IntoView {
    let desktop = entries
        .iter()
        .cloned()
        .map(|entry| match entry {
            NavEntry::Link(link) => {
                view! { <a class="nav-link" href=link.href>{link.label}</a> }.into_any()
            }
            NavEntry::Group(group) => view! { <DesktopDropdown group=group /> }.into_any(),
        })
        .collect::<Vec<_>>();

    let mobile = entries
        .into_iter()
        .map(|entry| match entry {
            NavEntry::Link(link) => {
                view! { <a class="mobile-link" href=link.href>{link.label}</a> }.into_any()
            }
            NavEntry::Group(group) => view! { <MobileDropdown group=group /> }.into_any(),
        })
        .collect::<Vec<_>>();

    let desktop_cta = cta.clone().map(|link| {
        view! { <a class="nav-cta" href=link.href>{link.label}</a> }
    });
    let mobile_cta = cta.map(|link| {
        view! { <a class="mobile-link mobile-cta" href=link.href>{link.label}</a> }
    });

    view! {
        <nav id=GLOBAL_NAV_ID class="global-nav" aria-label="Main">
            <a class="brand" href=brand.href>{brand.name}</a>
            <div class="nav-links">{desktop}</div>
            {desktop_cta}
            <button
                id=NAV_TOGGLE_ID
                class="nav-toggle"
                type="button"
                aria-controls=MOBILE_MENU_ID
                aria-expanded="false"
                aria-label="Toggle menu"
            >
                <span class="nav-toggle-bar"></span>
                <span class="nav-toggle-bar"></span>
                <span class="nav-toggle-bar"></span>
            </button>
        </nav>
        <div id=MOBILE_MENU_ID class="mobile-menu">
            {mobile}
            {mobile_cta}
        </div>
    }
}

/// Minimal navbar shown when the real one fails to load: brand and plain
/// links only, nothing the controller would wire.
#[component]
pub fn FallbackNavbar(brand: Brand, links: Vec<NavLink>) -> impl IntoView {
    view! {
        <nav class="global-nav nav-fallback" aria-label="Main">
            <a class="brand" href=brand.href>{brand.name}</a>
            {links.into_iter().map(|link| {
                view! { <a class="nav-link" href=link.href>{link.label}</a> }
            }).collect::<Vec<_>>()}
        </nav>
    }
}
