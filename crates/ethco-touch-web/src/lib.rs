//! Ethco touch overlay for the browser.
//!
//! Binds the platform-agnostic overlay to a Monaco editor instance and the
//! page's handle, toolbar and toast elements.

mod error;
mod options;

pub use error::BindingError;
pub use options::{AttachOptions, DomIds};

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod monaco;
#[cfg(target_arch = "wasm32")]
mod platform;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{TouchOverlay, attach};
