//! # API Module
//!
//! HTTP endpoints served by the short-lived redirect listener in
//! [`crate::server`].
//!
//! - [`callback`] - receives the provider's redirect at the end of the consent
//!   page, checks the `state` nonce, exchanges the authorization code for a
//!   token and hands the outcome back to the waiting handshake.
//!
//! Built on [Axum](https://docs.rs/axum). The handshake state reaches the
//! handler through an `Extension` layer.

mod callback;

pub use callback::{CallbackParams, callback};
