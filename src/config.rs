//! Configuration management for the Spotify top tracks client.
//!
//! All settings live in one [`AuthConfig`] value that is handed to the auth flow
//! controller when it is built. Values are read from the process environment,
//! which [`load_env`] first fills from a `.env` file in the local data
//! directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Defaults for everything except the client id and redirect URI

use std::{env, io::ErrorKind, path::PathBuf};

use reqwest::Url;

use crate::{
    error::ConfigError,
    spotify::tracks::{FetchMode, TimeRange},
    utils,
};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-top-read";
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 50;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up at:
/// - Linux: `~/.local/share/toptracks/.env`
/// - macOS: `~/Library/Application Support/toptracks/.env`
/// - Windows: `%LOCALAPPDATA%/toptracks/.env`
///
/// A missing file is fine, since every setting can also come from the
/// environment directly. A file that exists but cannot be parsed is an error.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::Env(e.to_string()))?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::Env(e.to_string())),
    }
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("toptracks/.env");
    path
}

/// Everything the auth flow controller needs, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub client_id: String,
    pub redirect_uri: Url,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub use_fixed_album: bool,
    pub album_id: Option<String>,
    pub time_range: TimeRange,
    pub limit: u32,
}

impl AuthConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let client_id = get("SPOTIFY_API_AUTH_CLIENT_ID")
            .ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))?;

        let redirect_uri = get("SPOTIFY_API_REDIRECT_URI")
            .ok_or(ConfigError::Missing("SPOTIFY_API_REDIRECT_URI"))?;
        let redirect_uri = parse_redirect_uri(&redirect_uri)?;

        let scopes = utils::parse_scopes(
            &get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
        );

        let use_fixed_album = match get("SPOTIFY_USE_FIXED_ALBUM") {
            Some(raw) => utils::parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "SPOTIFY_USE_FIXED_ALBUM",
                reason: format!("expected true or false, got '{raw}'"),
            })?,
            None => false,
        };

        let time_range = match get("SPOTIFY_TOP_TRACKS_TIME_RANGE") {
            Some(raw) => raw
                .parse::<TimeRange>()
                .map_err(|reason| ConfigError::Invalid {
                    var: "SPOTIFY_TOP_TRACKS_TIME_RANGE",
                    reason,
                })?,
            None => TimeRange::default(),
        };

        let limit = match get("SPOTIFY_TOP_TRACKS_LIMIT") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| ConfigError::Invalid {
                var: "SPOTIFY_TOP_TRACKS_LIMIT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_LIMIT,
        };

        let config = Self {
            client_id,
            redirect_uri,
            scopes,
            auth_url: get("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            api_url: get("SPOTIFY_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            use_fixed_album,
            album_id: get("SPOTIFY_ALBUM_ID"),
            time_range,
            limit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field rules. Call again after applying overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_fixed_album && self.album_id.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::Missing("SPOTIFY_ALBUM_ID"));
        }
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(ConfigError::Invalid {
                var: "SPOTIFY_TOP_TRACKS_LIMIT",
                reason: format!("must be between 1 and {MAX_LIMIT}, got {}", self.limit),
            });
        }
        Ok(())
    }

    /// Switches to album mode for the given album.
    pub fn with_fixed_album(mut self, album_id: impl Into<String>) -> Self {
        self.use_fixed_album = true;
        self.album_id = Some(album_id.into());
        self
    }

    pub fn fetch_mode(&self) -> FetchMode {
        match (&self.album_id, self.use_fixed_album) {
            (Some(album_id), true) => FetchMode::Album {
                album_id: album_id.clone(),
            },
            _ => FetchMode::TopTracks {
                time_range: self.time_range,
                limit: self.limit,
            },
        }
    }
}

fn parse_redirect_uri(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "SPOTIFY_API_REDIRECT_URI",
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "http" {
        return Err(invalid(format!(
            "the local listener only speaks http, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if !utils::is_literal_route(url.path()) {
        return Err(invalid(format!(
            "path '{}' cannot be served by the local listener",
            url.path()
        )));
    }
    Ok(url)
}
