//! Stamps the bearer credential onto outgoing requests.

#[cfg(test)]
#[path = "authenticator_test.rs"]
mod authenticator_test;

use std::rc::Rc;

use super::transport::{AUTHORIZATION, HttpRequest};
use crate::session::token::TokenStore;

pub struct RequestAuthenticator {
    tokens: Rc<dyn TokenStore>,
}

impl RequestAuthenticator {
    pub fn new(tokens: Rc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    /// Attach `Authorization: Bearer <token>` when a token is stored.
    ///
    /// Without a token the request goes out unauthenticated; the backend
    /// decides whether that is acceptable.
    pub fn authorize(&self, mut request: HttpRequest) -> HttpRequest {
        if let Some(token) = self.tokens.get().filter(|token| !token.is_empty()) {
            request.set_header(AUTHORIZATION, bearer(&token));
        }
        request
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
