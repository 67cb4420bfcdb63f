//! Global reaction to failed exchanges.
//!
//! DESIGN
//! ======
//! This is the only place with user-visible global effects. Each failed
//! exchange passes through [`ResponseClassifier::observe`] exactly once, which
//! runs the side effects for its [`ErrorKind`] and hands the original error
//! back for the caller to re-raise. Nothing is absorbed or retried here.
//!
//! Concurrent `Unauthorized` failures each run the full sequence; the token
//! clear is idempotent but notices, redirects and hook calls repeat.

#[cfg(test)]
#[path = "classifier_test.rs"]
mod classifier_test;

use std::rc::Rc;

use super::notify::{Navigator, Notifier};
use crate::error::{ApiError, ErrorKind};
use crate::session::hooks::LogoutHooks;
use crate::session::token::TokenStore;

pub struct ResponseClassifier {
    tokens: Rc<dyn TokenStore>,
    hooks: Rc<LogoutHooks>,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
    login_route: String,
}

impl ResponseClassifier {
    pub fn new(
        tokens: Rc<dyn TokenStore>,
        hooks: Rc<LogoutHooks>,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
        login_route: &str,
    ) -> Self {
        Self { tokens, hooks, notifier, navigator, login_route: login_route.to_owned() }
    }

    /// Run the side effects for `error` and return it unchanged.
    pub fn observe(&self, error: ApiError) -> ApiError {
        match error.kind() {
            ErrorKind::Unauthorized => self.end_session(),
            ErrorKind::Timeout => {
                tracing::warn!(error = %error, "request timed out");
                self.notifier.notify_timeout();
                log_diagnostic(&error);
            }
            ErrorKind::ServerError | ErrorKind::ClientError | ErrorKind::Network | ErrorKind::Unknown => {
                log_diagnostic(&error);
            }
        }
        error
    }

    fn end_session(&self) {
        tracing::warn!(route = %self.login_route, "session rejected by backend; signing out");
        self.tokens.clear();
        self.notifier.notify_session_expired();
        self.navigator.navigate_to(&self.login_route);
        self.hooks.invoke();
    }
}

fn log_diagnostic(error: &ApiError) {
    match error {
        ApiError::Status { status, body } => {
            tracing::error!(status, payload = %body, "API error");
        }
        ApiError::Transport { message, .. } => {
            tracing::error!(%message, "network error");
        }
        ApiError::Request { message } | ApiError::Decode { message } => {
            tracing::error!(%message, "request error");
        }
    }
}
