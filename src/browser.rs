//! Browser entry points (`hydrate` only).
//!
//! Wires the facade with `localStorage` persistence, `window.alert` notices
//! and `location.href` navigation, and routes `tracing` output to the console.

use std::rc::Rc;

use crate::api::Api;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::net::notify::{AlertNotifier, LocationNavigator};
use crate::net::transport::GlooTransport;
use crate::session::token::LocalStorageTokenStore;

/// Install the panic hook and forward `tracing` events to the browser console.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        tracing::warn!(error = %e, "console logger already installed");
    }
}

/// Build the facade for the browser.
///
/// # Errors
///
/// Returns [`ApiError::Request`] if the pipeline cannot be assembled.
pub fn api(config: ClientConfig) -> Result<Api, ApiError> {
    let tokens = Rc::new(LocalStorageTokenStore::new(&config.token_key));
    let transport = GlooTransport::new(&config);
    Api::builder(config)
        .transport(transport)
        .token_store(tokens)
        .notifier(Rc::new(AlertNotifier))
        .navigator(Rc::new(LocationNavigator))
        .build()
}
