//! # Spotify Integration Module
//!
//! The two pieces of Spotify the client talks to:
//!
//! - [`auth`] - the interactive OAuth 2.0 PKCE handshake. A local listener on
//!   the redirect URI receives the provider's answer, the authorization code is
//!   exchanged for an access token, and the token becomes a
//!   [`Credential`](crate::types::Credential).
//! - [`tracks`] - one authenticated read of either the user's top tracks
//!   (`GET /me/top/tracks`) or a fixed album (`GET /albums/{id}`), normalized
//!   into a [`TrackCollection`](crate::types::TrackCollection).
//!
//! Both sit behind small traits ([`auth::Authorizer`], [`tracks::TrackSource`])
//! so the controller in [`crate::management`] can be driven without a browser
//! or a network.
//!
//! ## Error Types
//!
//! - [`AuthError`](crate::error::AuthError) - cancelled or failed handshake
//! - [`FetchFailure`](crate::error::FetchFailure) - transport, status or decode
//!   failure of the track read
//!
//! Neither retries. A failed step is reported once and the caller decides.

pub mod auth;
pub mod tracks;
