//! Site footer and its fallback.

use leptos::prelude::*;

use crate::types::{Brand, FooterModel};

/// Full footer with link columns.
#[component]
pub fn Footer(brand: Brand, footer: FooterModel) -> impl IntoView {
    view! {
        <footer class="site-footer">
            <div class="footer-brand">
                <a class="brand" href=brand.href>{brand.name}</a>
                <p class="footer-tagline">{footer.tagline}</p>
            </div>
            <div class="footer-columns">
                {footer.columns.into_iter().map(|column| {
                    view! {
                        <div class="footer-column">
                            <h4>{column.title}</h4>
                            <ul>
                                {column.links.into_iter().map(|link| {
                                    view! { <li><a href=link.href>{link.label}</a></li> }
                                }).collect::<Vec<_>>()}
                            </ul>
                        </div>
                    }
                }).collect::<Vec<_>>()}
            </div>
            <p class="footer-copyright">{footer.copyright}</p>
        </footer>
    }
}

/// Footer shown when `footer.html` cannot be fetched.
#[component]
pub fn FallbackFooter(copyright: String) -> impl IntoView {
    view! {
        <footer class="site-footer footer-fallback">
            <p class="footer-copyright">{copyright}</p>
        </footer>
    }
}
