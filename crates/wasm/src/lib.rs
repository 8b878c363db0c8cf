mod app;
mod dom;
mod logging;
mod observers;
mod timers;
mod utils;

pub use utils::{animate_value, debounce, throttle};

use gloo::events::EventListener;
use portfolio_fx_core::PageConfig;
use wasm_bindgen::prelude::*;

/// Module entry point: installs logging and fault reporting, then boots the
/// page effects once the document has been parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let (config, config_error) = app::load_config(&document);
    logging::init(config.log_level);
    if let Some(err) = config_error {
        tracing::warn!(%err, "ignoring invalid page config, using defaults");
    }
    app::install_fault_reporting(&window);

    if document.ready_state() == "loading" {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| {
            app::boot(window, document, &config);
        })
        .forget();
    } else {
        app::boot(window, document, &config);
    }
    Ok(())
}

/// The built-in configuration as JSON, a starting point for the
/// `#portfolio-fx-config` block.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<String, JsError> {
    serde_json::to_string_pretty(&PageConfig::default()).map_err(|e| JsError::new(&e.to_string()))
}
