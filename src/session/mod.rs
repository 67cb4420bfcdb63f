//! Session state shared by every pipeline stage.
//!
//! SYSTEM CONTEXT
//! ==============
//! `token` holds the durable bearer credential, `hooks` lets the
//! authentication context learn about layer-initiated logouts, and `auth` is
//! that context: the `{ user, logout() }` surface the navigation UI reads.
//! All of it is single-threaded state shared through `Rc`.

pub mod auth;
pub mod hooks;
pub mod token;
