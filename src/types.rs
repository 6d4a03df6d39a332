use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// Bearer credential obtained from a completed handshake.
///
/// Held in memory only. `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
    obtained_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            obtained_at: Utc::now(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.access_token
    }

    pub fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

/// Paging envelope used by the top-tracks endpoint and by an album's track list.
///
/// `items` must be present. Individual entries may be `null`; normalization
/// skips them.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<Option<T>>,
}

/// A track as the provider sends it.
///
/// Top-tracks items carry their `album`; album track items do not.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTrack {
    pub id: Option<String>,
    pub name: Option<String>,
    pub artists: Option<Vec<Option<ProviderArtist>>>,
    pub album: Option<ProviderAlbum>,
    pub duration_ms: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderArtist {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderAlbum {
    pub name: Option<String>,
    pub images: Option<Vec<Option<Image>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: Option<String>,
}

pub type TopTracksResponse = Paging<ProviderTrack>;

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumResponse {
    pub name: Option<String>,
    pub images: Option<Vec<Option<Image>>>,
    pub tracks: Option<Paging<ProviderTrack>>,
}

/// Where the rendering surface takes a track's cover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cover<'a> {
    Image(&'a str),
    Placeholder,
}

/// Display-ready track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub title: Option<String>,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub cover_url: Option<String>,
    pub duration_ms: Option<u64>,
}

impl TrackRecord {
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn album_or_empty(&self) -> &str {
        self.album.as_deref().unwrap_or_default()
    }

    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }

    pub fn cover(&self) -> Cover<'_> {
        match self.cover_url.as_deref() {
            Some(url) => Cover::Image(url),
            None => Cover::Placeholder,
        }
    }

    /// `m:ss`, or an empty string when the duration is unknown.
    ///
    /// A known zero-length track renders `0:00`; only a missing duration
    /// leaves the cell empty.
    pub fn duration_label(&self) -> String {
        self.duration_ms
            .map(utils::format_duration)
            .unwrap_or_default()
    }
}

/// Tracks in provider order, each with a unique non-empty id.
///
/// The only way in is [`TrackCollection::new`], which repairs missing and
/// duplicate ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrackCollection {
    records: Vec<TrackRecord>,
}

impl TrackCollection {
    pub fn new(mut records: Vec<TrackRecord>) -> Self {
        utils::assign_unique_ids(&mut records);
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[TrackRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a TrackCollection {
    type Item = &'a TrackRecord;
    type IntoIter = std::slice::Iter<'a, TrackRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "")]
    pub cover: String,
    pub title: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
}
