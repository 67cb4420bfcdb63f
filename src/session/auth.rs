//! Authentication context for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Navigation and route guards read `{ user, logout() }` from here. The
//! context registers itself with [`LogoutHooks`] during setup so a 401 seen by
//! the pipeline clears the user without the pipeline knowing this type.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::rc::Rc;

use super::hooks::LogoutHooks;
use super::token::TokenStore;
use crate::api::Api;
use crate::error::ApiError;
use crate::types::{AuthResponse, User};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

pub struct AuthContext {
    state: Rc<RefCell<AuthState>>,
    tokens: Rc<dyn TokenStore>,
}

impl AuthContext {
    /// Create the context and register its logout hook.
    pub fn install(hooks: &LogoutHooks, tokens: Rc<dyn TokenStore>) -> Self {
        let state = Rc::new(RefCell::new(AuthState::default()));
        let weak = Rc::downgrade(&state);
        hooks.register(move || {
            if let Some(state) = weak.upgrade() {
                let mut state = state.borrow_mut();
                state.user = None;
                state.loading = false;
            }
        });
        Self { state, tokens }
    }

    /// Create the context on top of an [`Api`]'s token store and hook registry.
    pub fn for_api(api: &Api) -> Self {
        Self::install(&api.logout_hooks(), api.token_store())
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    pub fn set_user(&self, user: Option<User>) {
        self.state.borrow_mut().user = user;
    }

    /// Sign in through `api` and record the returned user.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] if the login request fails.
    pub async fn login(&self, api: &Api, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.state.borrow_mut().loading = true;
        let result = api.login(email, password).await;
        self.finish(result)
    }

    /// Create an account through `api` and record the returned user.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] if the signup request fails.
    pub async fn signup(&self, api: &Api, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.state.borrow_mut().loading = true;
        let result = api.signup(email, password).await;
        self.finish(result)
    }

    /// Sign out. Safe to call when already signed out.
    pub fn logout(&self) {
        self.tokens.clear();
        let mut state = self.state.borrow_mut();
        state.user = None;
        state.loading = false;
    }

    fn finish(&self, result: Result<AuthResponse, ApiError>) -> Result<AuthResponse, ApiError> {
        let mut state = self.state.borrow_mut();
        state.loading = false;
        if let Ok(response) = &result {
            if response.issued_token().is_some() {
                state.user = Some(response.user.clone().unwrap_or_default());
            }
        }
        result
    }
}
