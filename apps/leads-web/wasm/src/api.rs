//! Detail lookup against `GET /api/leads/{id}`

use leads_core::{Lead, LeadsError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::dom::describe;

/// Fetch and decode one lead. Non-2xx statuses are errors; nothing is retried.
pub async fn fetch_lead(url: &str) -> Result<Lead, LeadsError> {
    let window = web_sys::window().ok_or_else(|| LeadsError::Transport("No window".into()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| LeadsError::Transport(describe(&e)))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| LeadsError::Transport(describe(&e)))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| LeadsError::Transport(describe(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| LeadsError::Transport(describe(&e)))?;

    if !response.ok() {
        return Err(LeadsError::Http {
            status: response.status(),
        });
    }

    let text = response
        .text()
        .map_err(|e| LeadsError::Decode(describe(&e)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| LeadsError::Transport(describe(&e)))?;
    let body = body
        .as_string()
        .ok_or_else(|| LeadsError::Decode("Response body is not text".to_string()))?;

    Lead::from_json(&body)
}
