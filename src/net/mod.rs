//! The HTTP pipeline every backend call goes through.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` wires the stages: `authenticator` stamps credentials, a
//! `transport` puts the request on the wire, and `classifier` reacts to every
//! failure before it is handed back. `notify` holds the user-facing side
//! channels the classifier drives.

pub mod authenticator;
pub mod classifier;
pub mod client;
pub mod notify;
pub mod transport;
