use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::TrackRecord;

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Nonce echoed back by the provider on the redirect.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

/// Formats milliseconds as `m:ss`, rounded to the nearest second.
pub fn format_duration(duration_ms: u64) -> String {
    let total_seconds = (duration_ms + 500) / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Makes every id non-empty and unique, keeping the record order.
///
/// Blank ids become `track-<position>`; repeats get a `-<n>` suffix.
pub fn assign_unique_ids(records: &mut [TrackRecord]) {
    let mut seen = HashSet::with_capacity(records.len());

    for (index, record) in records.iter_mut().enumerate() {
        let base = match record.id.trim() {
            "" => format!("track-{}", index + 1),
            id => id.to_string(),
        };

        let mut candidate = base.clone();
        let mut suffix = 2;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        record.id = candidate;
    }
}

/// Splits a scope list given either space or comma separated.
pub fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether a URL path can be mounted as a literal axum route.
///
/// Segments starting with `:` or `*`, and any `{` or `}`, would be read as
/// route parameters.
pub fn is_literal_route(path: &str) -> bool {
    path.starts_with('/')
        && path
            .split('/')
            .all(|segment| !segment.starts_with([':', '*']) && !segment.contains(['{', '}']))
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
