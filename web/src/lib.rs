//! Browser host for sitechrome.
//!
//! Loaded as a wasm module on every page. On start it reads the optional
//! JSON blocks
//!
//! - `<script type="application/json" id="sitechrome-config">` ([`SiteConfig`])
//! - `<script type="application/json" id="sitechrome-site">` ([`SiteModel`])
//!
//! binds forms and FAQ items, loads the navbar and footer slots, and wires the
//! navigation once every slot has settled. `reloadFragments()` repeats the
//! loading and wiring without doubling any listener.
//!
//! Developed with 💀 by The Sitechrome Team (c)2025

pub mod dom;
pub mod fetch;
pub mod host;
pub mod logging;

use std::cell::RefCell;
use std::rc::Rc;

use sitechrome::SiteConfig;
use sitechrome_fragments::default_catalog;
use sitechrome_fragments::types::SiteModel;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub use dom::WebDom;
pub use fetch::BrowserFetcher;
pub use host::Host;

/// Id of the configuration block.
pub const CONFIG_SCRIPT_ID: &str = "sitechrome-config";
/// Id of the site model block.
pub const SITE_SCRIPT_ID: &str = "sitechrome-site";

thread_local! {
    static HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

fn script_json(dom: &WebDom, id: &str) -> Option<String> {
    dom.document()
        .get_element_by_id(id)
        .and_then(|script| script.text_content())
        .filter(|text| !text.trim().is_empty())
}

/// Configuration from the page, or defaults.
pub fn read_config(dom: &WebDom) -> SiteConfig {
    script_json(dom, CONFIG_SCRIPT_ID)
        .map(|json| SiteConfig::from_json(&json))
        .unwrap_or_default()
}

/// Site model from the page, or defaults.
pub fn read_site_model(dom: &WebDom) -> SiteModel {
    let Some(json) = script_json(dom, SITE_SCRIPT_ID) else {
        return SiteModel::default();
    };
    SiteModel::from_json(&json).unwrap_or_else(|err| {
        warn!(error = %err, "Invalid site model, using defaults");
        SiteModel::default()
    })
}

fn boot(dom: WebDom, config: SiteConfig) {
    let catalog = default_catalog(&read_site_model(&dom));
    let host = Rc::new(Host::new(dom, config, catalog));
    HOST.with(|slot| *slot.borrow_mut() = Some(host.clone()));
    spawn_local(async move { host.boot().await });
}

/// Module entry point: panic hook, logging, then boot once the document is
/// parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let dom = WebDom::new().ok_or_else(|| JsValue::from_str("sitechrome: no document"))?;
    let config = read_config(&dom);
    logging::init(&config.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "sitechrome starting");

    if dom.document().ready_state() != "loading" {
        boot(dom, config);
        return Ok(());
    }

    let document = dom.document().clone();
    let on_ready = Closure::once_into_js(move || boot(dom, config));
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

/// Reload every fragment slot and rewire navigation.
#[wasm_bindgen(js_name = reloadFragments)]
pub async fn reload_fragments() -> Result<(), JsValue> {
    let host = HOST
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("sitechrome: not started"))?;
    host.reload().await;
    Ok(())
}

/// Live listener counts as `[page, navigation]`.
#[wasm_bindgen(js_name = listenerCounts)]
pub fn listener_counts() -> Vec<u32> {
    HOST.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|host| {
                let (page, nav) = host.listener_counts();
                vec![
                    u32::try_from(page).unwrap_or(u32::MAX),
                    u32::try_from(nav).unwrap_or(u32::MAX),
                ]
            })
            .unwrap_or_default()
    })
}
