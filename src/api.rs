//! Typed backend operations built on the HTTP pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! One method per backend capability. Each issues exactly one request and
//! either resolves with the backend payload or returns the already-classified
//! failure untouched. Signup and login additionally store the issued token.
//!
//! Session state is derived from the token store:
//! `Unauthenticated -> Authenticated` on a login/signup response carrying a
//! token, `Authenticated -> Unauthenticated` on a 401 or [`Api::sign_out`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::net::authenticator::RequestAuthenticator;
use crate::net::classifier::ResponseClassifier;
use crate::net::client::HttpClient;
use crate::net::notify::{Navigator, Notifier};
use crate::net::transport::{HttpRequest, Transport};
use crate::session::hooks::LogoutHooks;
use crate::session::token::{MemoryTokenStore, TokenStore};
use crate::types::{AiReplyRequest, AuthResponse, Credentials, SaveConversation};

pub mod endpoints {
    pub const SIGNUP: &str = "/auth/signup";
    pub const LOGIN: &str = "/auth/login";
    pub const PING: &str = "/ping";
    pub const CONVERSATIONS: &str = "/conversations";
    pub const AI_RESPONSE: &str = "/ai/response";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

pub struct Api {
    client: HttpClient,
    tokens: Rc<dyn TokenStore>,
    hooks: Rc<LogoutHooks>,
}

impl Api {
    pub fn builder(config: ClientConfig) -> ApiBuilder {
        ApiBuilder::new(config)
    }

    /// Create an account via `POST /auth/signup`; stores the issued token.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] if the request fails.
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.authenticate(endpoints::SIGNUP, email, password).await
    }

    /// Sign in via `POST /auth/login`; stores the issued token.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] if the request fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.authenticate(endpoints::LOGIN, email, password).await
    }

    /// Backend liveness check via `GET /ping`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] if the request fails.
    pub async fn ping(&self) -> Result<Value, ApiError> {
        self.client.execute(HttpRequest::get(endpoints::PING)).await
    }

    /// List saved conversations via `GET /conversations`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] if the request fails.
    pub async fn get_conversations(&self) -> Result<Value, ApiError> {
        self.client.execute(HttpRequest::get(endpoints::CONVERSATIONS)).await
    }

    /// Save a conversation via `POST /conversations`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] if the request fails.
    pub async fn save_conversation(&self, conversation: &SaveConversation) -> Result<Value, ApiError> {
        let body = encode(conversation)?;
        self.client.execute(HttpRequest::post(endpoints::CONVERSATIONS, body)).await
    }

    /// Request an AI reply for a conversation via `POST /ai/response`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] if the request fails.
    pub async fn ask_ai(&self, conversation_id: &str) -> Result<Value, ApiError> {
        let body = encode(&AiReplyRequest { conversation_id: conversation_id.to_owned() })?;
        self.client.execute(HttpRequest::post(endpoints::AI_RESPONSE, body)).await
    }

    /// End the session locally. Does not notify the logout hook.
    pub fn sign_out(&self) {
        self.tokens.clear();
    }

    pub fn session_state(&self) -> SessionState {
        match self.tokens.get() {
            Some(token) if !token.is_empty() => SessionState::Authenticated,
            _ => SessionState::Unauthenticated,
        }
    }

    pub fn token_store(&self) -> Rc<dyn TokenStore> {
        Rc::clone(&self.tokens)
    }

    pub fn logout_hooks(&self) -> Rc<LogoutHooks> {
        Rc::clone(&self.hooks)
    }

    async fn authenticate(&self, path: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = encode(&Credentials { email: email.to_owned(), password: password.to_owned() })?;
        let payload: Value = self.client.execute(HttpRequest::post(path, body)).await?;
        let response = AuthResponse::from_payload(payload);
        if let Some(token) = response.issued_token() {
            self.tokens.set(token);
            tracing::info!(path, "session established");
        }
        Ok(response)
    }
}

fn encode<T: serde::Serialize>(body: &T) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Request { message: e.to_string() })
}

/// Wires the pipeline. Unset capabilities fall back to the platform defaults.
pub struct ApiBuilder {
    config: ClientConfig,
    transport: Option<Box<dyn Transport>>,
    tokens: Option<Rc<dyn TokenStore>>,
    hooks: Option<Rc<LogoutHooks>>,
    notifier: Option<Rc<dyn Notifier>>,
    navigator: Option<Rc<dyn Navigator>>,
}

impl ApiBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, transport: None, tokens: None, hooks: None, notifier: None, navigator: None }
    }

    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    #[must_use]
    pub fn token_store(mut self, tokens: Rc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    #[must_use]
    pub fn logout_hooks(mut self, hooks: Rc<LogoutHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Rc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Assemble the facade.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] if the default transport cannot be built
    /// or none is available for this build.
    pub fn build(self) -> Result<Api, ApiError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(&self.config)?,
        };
        let tokens = self.tokens.unwrap_or_else(|| Rc::new(MemoryTokenStore::new()));
        let hooks = self.hooks.unwrap_or_default();
        let notifier = self.notifier.unwrap_or_else(default_notifier);
        let navigator = self.navigator.unwrap_or_else(default_navigator);

        let classifier = ResponseClassifier::new(
            Rc::clone(&tokens),
            Rc::clone(&hooks),
            notifier,
            navigator,
            self.config.login_destination(),
        );
        let client = HttpClient::new(transport, RequestAuthenticator::new(Rc::clone(&tokens)), classifier);
        Ok(Api { client, tokens, hooks })
    }
}

#[cfg(feature = "hydrate")]
fn default_transport(config: &ClientConfig) -> Result<Box<dyn Transport>, ApiError> {
    Ok(Box::new(crate::net::transport::GlooTransport::new(config)))
}

#[cfg(all(feature = "native", not(feature = "hydrate")))]
fn default_transport(config: &ClientConfig) -> Result<Box<dyn Transport>, ApiError> {
    Ok(Box::new(crate::net::transport::ReqwestTransport::new(config)?))
}

#[cfg(not(any(feature = "native", feature = "hydrate")))]
fn default_transport(_config: &ClientConfig) -> Result<Box<dyn Transport>, ApiError> {
    Err(ApiError::Request { message: "no HTTP transport enabled; build with `native` or `hydrate`".to_owned() })
}

#[cfg(feature = "hydrate")]
fn default_notifier() -> Rc<dyn Notifier> {
    Rc::new(crate::net::notify::AlertNotifier)
}

#[cfg(not(feature = "hydrate"))]
fn default_notifier() -> Rc<dyn Notifier> {
    Rc::new(crate::net::notify::StderrNotifier)
}

#[cfg(feature = "hydrate")]
fn default_navigator() -> Rc<dyn Navigator> {
    Rc::new(crate::net::notify::LocationNavigator)
}

#[cfg(not(feature = "hydrate"))]
fn default_navigator() -> Rc<dyn Navigator> {
    Rc::new(crate::net::notify::LogNavigator)
}
