//! GraphQL over `fetch`
//!
//! Browser transport for the tracker client: every request is a JSON POST to
//! the configured endpoint.

use async_trait::async_trait;
use serde_json::Value;
use taskboard_core::{ClientError, ClientResult, TrackerClient, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub type ApiClient = TrackerClient<FetchTransport>;

#[derive(Debug, Clone)]
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, payload: Value) -> ClientResult<Value> {
        let body = serde_json::to_string(&payload)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&self.endpoint, &init).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let window = web_sys::window().ok_or_else(|| ClientError::Network("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        if !response.ok() {
            return Err(ClientError::Http { status: response.status() });
        }

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();
        Ok(serde_json::from_str(&text)?)
    }
}

fn js_error(err: JsValue) -> ClientError {
    ClientError::Network(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
