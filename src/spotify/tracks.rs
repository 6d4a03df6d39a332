use std::{fmt, future::Future, str::FromStr};

use clap::ValueEnum;
use reqwest::Client;

use crate::{
    config::AuthConfig,
    error::FetchFailure,
    types::{
        AlbumResponse, Credential, Image, ProviderAlbum, ProviderTrack, TopTracksResponse,
        TrackCollection, TrackRecord,
    },
};

/// Period the top-tracks ranking is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TimeRange {
    /// Roughly the last four weeks
    ShortTerm,
    /// Roughly the last six months
    #[default]
    MediumTerm,
    /// Roughly the last year
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "short_term" | "short" => Ok(TimeRange::ShortTerm),
            "medium_term" | "medium" => Ok(TimeRange::MediumTerm),
            "long_term" | "long" => Ok(TimeRange::LongTerm),
            other => Err(format!(
                "expected short_term, medium_term or long_term, got '{other}'"
            )),
        }
    }
}

/// Which collection a fetch reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMode {
    TopTracks { time_range: TimeRange, limit: u32 },
    Album { album_id: String },
}

/// Anything that turns a credential into a track collection.
///
/// The controller only talks to this trait, so tests can count or fail reads
/// without a network.
pub trait TrackSource: Send + Sync {
    fn fetch_tracks(
        &self,
        credential: &Credential,
    ) -> impl Future<Output = Result<TrackCollection, FetchFailure>> + Send;
}

/// Reads tracks from the Spotify Web API.
///
/// Every call issues exactly one GET. Nothing is cached and nothing is retried.
#[derive(Debug, Clone)]
pub struct TrackFetcher {
    client: Client,
    api_url: String,
    mode: FetchMode,
}

impl TrackFetcher {
    pub fn new(api_url: impl Into<String>, mode: FetchMode) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            mode,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.api_url.clone(), config.fetch_mode())
    }

    /// Fetches and normalizes the configured collection.
    ///
    /// # Errors
    ///
    /// - [`FetchFailure::MissingCredential`] for an empty token, before any request
    /// - [`FetchFailure::Transport`] when the request cannot be sent or read
    /// - [`FetchFailure::Status`] for any non-2xx answer, 401 included
    /// - [`FetchFailure::Decode`] when the body is not the expected JSON document
    pub async fn fetch_tracks(
        &self,
        credential: &Credential,
    ) -> Result<TrackCollection, FetchFailure> {
        if credential.as_str().trim().is_empty() {
            return Err(FetchFailure::MissingCredential);
        }

        let request = match &self.mode {
            FetchMode::TopTracks { time_range, limit } => self
                .client
                .get(format!("{}/me/top/tracks", self.api_url))
                .query(&[
                    ("time_range", time_range.as_str().to_string()),
                    ("limit", limit.to_string()),
                ]),
            FetchMode::Album { album_id } => self
                .client
                .get(format!("{}/albums/{}", self.api_url, album_id)),
        };

        let response = request.bearer_auth(credential.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status));
        }

        let body = response.bytes().await?;
        let collection = match &self.mode {
            FetchMode::TopTracks { .. } => normalize_top_tracks(serde_json::from_slice(&body)?),
            FetchMode::Album { .. } => normalize_album(serde_json::from_slice(&body)?),
        };

        Ok(collection)
    }
}

impl TrackSource for TrackFetcher {
    async fn fetch_tracks(&self, credential: &Credential) -> Result<TrackCollection, FetchFailure> {
        TrackFetcher::fetch_tracks(self, credential).await
    }
}

pub fn normalize_top_tracks(response: TopTracksResponse) -> TrackCollection {
    let records = response
        .items
        .into_iter()
        .flatten()
        .map(|track| to_record(track, None))
        .collect();

    TrackCollection::new(records)
}

/// Album track items carry no album of their own; the parent album fills in
/// name and cover.
pub fn normalize_album(response: AlbumResponse) -> TrackCollection {
    let parent = ProviderAlbum {
        name: response.name,
        images: response.images,
    };

    let records = response
        .tracks
        .map(|page| page.items)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|track| to_record(track, Some(&parent)))
        .collect();

    TrackCollection::new(records)
}

fn to_record(track: ProviderTrack, parent: Option<&ProviderAlbum>) -> TrackRecord {
    let artists = track
        .artists
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(|artist| artist.name)
        .collect();

    let (album, cover_url) = match track.album.as_ref().or(parent) {
        Some(album) => (album.name.clone(), first_image(album.images.as_deref())),
        None => (None, None),
    };

    TrackRecord {
        id: track.id.unwrap_or_default(),
        title: track.name,
        artists,
        album,
        cover_url,
        duration_ms: track.duration_ms.and_then(|ms| u64::try_from(ms).ok()),
    }
}

/// URL of the first usable entry in the image list.
fn first_image(images: Option<&[Option<Image>]>) -> Option<String> {
    images?
        .iter()
        .flatten()
        .find_map(|image| image.url.clone().filter(|url| !url.is_empty()))
}
