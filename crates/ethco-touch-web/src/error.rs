//! Errors raised while binding the overlay to the page.

use ethco_touch_core::ConfigError;
use thiserror::Error;

/// Binding errors. Only raised at attach time; event handlers never fail.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("No browser window or document available")]
    MissingWindow,
    #[error("Element not found: #{0}")]
    MissingElement(String),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(target_arch = "wasm32")]
impl From<BindingError> for wasm_bindgen::JsValue {
    fn from(error: BindingError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for BindingError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        BindingError::Js(format!("{:?}", value))
    }
}
