//! User-facing side channels driven by the classifier.
//!
//! The browser implementations block on `window.alert` and hard-navigate via
//! `location.href`; native ones write to stderr and the log. Tests substitute
//! recording fakes.

pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired or you are not logged in. Please log in to continue.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please check your connection or log in again.";

/// Interrupting notices shown to the user.
pub trait Notifier {
    fn notify_session_expired(&self);
    fn notify_timeout(&self);
}

/// Moves the user to another destination.
pub trait Navigator {
    fn navigate_to(&self, route: &str);
}

// =============================================================================
// NATIVE
// =============================================================================

/// Prints notices to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify_session_expired(&self) {
        eprintln!("{SESSION_EXPIRED_MESSAGE}");
    }

    fn notify_timeout(&self) {
        eprintln!("{TIMEOUT_MESSAGE}");
    }
}

/// Records the destination in the log; there is nothing to navigate natively.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to(&self, route: &str) {
        tracing::info!(route, "navigation to login requested");
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// Blocking `window.alert` notices.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertNotifier;

#[cfg(feature = "hydrate")]
impl AlertNotifier {
    fn alert(message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.alert_with_message(message) {
            tracing::warn!(?err, "alert failed");
        }
    }
}

#[cfg(feature = "hydrate")]
impl Notifier for AlertNotifier {
    fn notify_session_expired(&self) {
        Self::alert(SESSION_EXPIRED_MESSAGE);
    }

    fn notify_timeout(&self) {
        Self::alert(TIMEOUT_MESSAGE);
    }
}

/// Hard navigation through `window.location.href`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for LocationNavigator {
    fn navigate_to(&self, route: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.location().set_href(route) {
            tracing::warn!(?err, route, "navigation failed");
        }
    }
}
