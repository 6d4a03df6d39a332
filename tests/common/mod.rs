#![allow(dead_code)]

use std::net::TcpListener as StdTcpListener;

use axum::Router;
use reqwest::Url;
use serde_json::{Value, json};
use toptracks::config::AuthConfig;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A local port that was free a moment ago.
pub fn free_port() -> u16 {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

pub fn test_config(api_url: &str, token_url: &str, redirect_port: u16) -> AuthConfig {
    let redirect_uri = format!("http://127.0.0.1:{redirect_port}/callback");
    AuthConfig::from_lookup(|key| match key {
        "SPOTIFY_API_AUTH_CLIENT_ID" => Some("test-client".to_string()),
        "SPOTIFY_API_REDIRECT_URI" => Some(redirect_uri.clone()),
        "SPOTIFY_API_URL" => Some(api_url.to_string()),
        "SPOTIFY_API_TOKEN_URL" => Some(token_url.to_string()),
        "SPOTIFY_API_AUTH_URL" => Some("https://accounts.example.test/authorize".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Three top-tracks items: one complete, one without artists and images,
/// one with almost nothing.
pub fn three_top_tracks() -> Value {
    json!({
        "items": [
            {
                "id": "t1",
                "name": "First Song",
                "artists": [{ "name": "Alpha" }, { "name": "Beta" }],
                "album": {
                    "name": "Album One",
                    "images": [
                        { "url": "https://img.example/large.jpg", "width": 640, "height": 640 },
                        { "url": "https://img.example/small.jpg", "width": 64, "height": 64 }
                    ]
                },
                "duration_ms": 215000
            },
            {
                "id": "t2",
                "name": "Second Song",
                "album": { "name": "Album Two" },
                "duration_ms": 180500
            },
            {
                "id": "t3"
            }
        ],
        "total": 3,
        "next": null
    })
}

pub fn fixed_album() -> Value {
    json!({
        "id": "alb1",
        "name": "Fixed Album",
        "images": [{ "url": "https://img.example/album.jpg", "width": 300, "height": 300 }],
        "tracks": {
            "items": [
                { "id": "a1", "name": "Opening", "artists": [{ "name": "Gamma" }], "duration_ms": 120000 },
                { "id": "a2", "name": "Closing", "artists": [{ "name": "Gamma" }, { "name": "Delta" }], "duration_ms": 240000 }
            ],
            "total": 2,
            "next": null
        }
    })
}
