//! Console server
//!
//! Drives a line-oriented session against the credential service.

pub mod session;

pub use session::Server;
