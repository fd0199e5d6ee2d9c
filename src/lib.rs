pub mod card;
pub mod card_schema;
pub mod html;
pub mod link;
pub mod measure;
pub mod request;
pub mod resolve;
pub mod value;

use wasm_bindgen::prelude::*;

use html::HtmlRenderer;
use request::CardRequest;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Project a card request to its view-model JSON
#[wasm_bindgen(js_name = "projectCard")]
pub fn project_card(request: &str) -> Result<String, String> {
    let card = CardRequest::from_json(request)
        .and_then(|req| req.project())
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&card).map_err(|e| e.to_string())
}

/// Render a card request to HTML
#[wasm_bindgen(js_name = "renderCard")]
pub fn render_card(request: &str) -> Result<String, String> {
    let request = CardRequest::from_json(request).map_err(|e| e.to_string())?;
    request
        .render(&HtmlRenderer::default())
        .map_err(|e| e.to_string())
}

/// Classify a bare link value: `{"displayUrl": ..., "target": "self" | "blank"}`
#[wasm_bindgen(js_name = "classifyLink")]
pub fn classify_link(value: &str) -> Result<String, String> {
    let link = link::classify(value, None, None).map_err(|e| e.to_string())?;
    serde_json::to_string(&link).map_err(|e| e.to_string())
}
