//! # Keyset Client
//!
//! Async client for the Keyset server and the session that drives
//! [`keyset_engine::ReorderEngine`] against it.
//!
//! A [`ReorderSession`] applies each drag gesture optimistically, submits the
//! full ordering in one batch, and settles the result:
//!
//! - success adopts the server's canonical list
//! - any failure re-fetches the authoritative list and sends exactly one
//!   [`FailureNotice`](keyset_engine::FailureNotice) to the notification channel
//!
//! Only one reorder is in flight per session; a second drop while one is
//! pending fails with [`keyset_engine::Error::ReorderInFlight`].

pub mod api;
pub mod config;
pub mod error;
pub mod session;

pub use api::{HotkeyApi, HttpApi};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use session::ReorderSession;
