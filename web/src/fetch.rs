//! `Fetcher` over `window.fetch`.

use std::future::Future;

use sitechrome::{FetchResponse, Fetcher, LoadError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

/// Same-origin fetches through the page's window.
#[derive(Debug, Clone)]
pub struct BrowserFetcher {
    window: Window,
}

impl BrowserFetcher {
    /// Fetcher bound to `window`.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

/// Readable message from a rejected promise.
pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

async fn fetch_text(window: Window, url: String) -> Result<FetchResponse, LoadError> {
    let network = |err: JsValue| LoadError::Network {
        url: url.clone(),
        message: js_message(&err),
    };

    let response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(network)?;
    let response: Response = response.dyn_into().map_err(|_| LoadError::Malformed {
        url: url.clone(),
        message: "fetch did not resolve to a Response".into(),
    })?;

    let status = response.status();
    let text = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    let body = text.as_string().ok_or_else(|| LoadError::Malformed {
        url: url.clone(),
        message: "response body is not text".into(),
    })?;

    Ok(FetchResponse { status, body })
}

impl Fetcher for BrowserFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchResponse, LoadError>> {
        fetch_text(self.window.clone(), url.to_string())
    }
}
