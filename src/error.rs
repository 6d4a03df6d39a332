//! Error types for configuration, the authorization handshake and the track
//! request.
//!
//! None of these are fatal to the flow. An [`AuthError`] sends the controller
//! back to `Unauthenticated`, a [`FetchFailure`] leaves it `Authenticated`
//! without a collection. Only the binary turns a [`ConfigError`] into an exit.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("cannot load environment file: {0}")]
    Env(String),
}

/// Outcome of a handshake that did not yield a credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The user dismissed the consent page or denied access.
    #[error("authorization cancelled: {0}")]
    Cancelled(String),

    /// The listener, the provider or the token exchange failed.
    #[error("authorization failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("no bearer credential to send")]
    MissingCredential,

    #[error("track request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("track request rejected with status {0}")]
    Status(StatusCode),

    #[error("track response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
