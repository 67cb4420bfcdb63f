//! # parley
//!
//! HTTP session and error-interceptor layer for the Parley browser client.
//!
//! Every outbound request goes through one pipeline: the bearer token is
//! stamped on by [`net::authenticator`], the request is sent by a
//! [`net::transport::Transport`], and every failure is classified and reacted
//! to by [`net::classifier`] before it reaches the caller. The [`api`] facade
//! exposes the backend operations on top of that pipeline.
//!
//! Browser builds enable the `hydrate` feature (`gloo-net` + `web-sys`);
//! native builds use the default `native` feature (`reqwest`).

pub mod api;
#[cfg(feature = "hydrate")]
pub mod browser;
pub mod config;
pub mod error;
pub mod net;
pub mod session;
pub mod types;

#[cfg(test)]
mod test_helpers;

pub use api::{Api, ApiBuilder, SessionState};
pub use config::ClientConfig;
pub use error::{ApiError, ErrorKind};
