use std::collections::HashMap;

use toptracks::config::{AuthConfig, DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_TOKEN_URL};
use toptracks::error::ConfigError;
use toptracks::spotify::tracks::{FetchMode, TimeRange};

// Helper function to build a config from key/value pairs
fn config_from(pairs: &[(&str, &str)]) -> Result<AuthConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AuthConfig::from_lookup(|key| vars.get(key).cloned())
}

const REQUIRED: [(&str, &str); 2] = [
    ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
    ("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback"),
];

fn with_required(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    REQUIRED.iter().chain(extra.iter()).copied().collect()
}

#[test]
fn test_defaults() {
    let config = config_from(&REQUIRED).unwrap();

    assert_eq!(config.client_id, "client");
    assert_eq!(config.redirect_uri.as_str(), "http://127.0.0.1:8888/callback");
    assert_eq!(config.scopes, vec!["user-top-read"]);
    assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert!(!config.use_fixed_album);
    assert_eq!(config.album_id, None);
    assert_eq!(config.time_range, TimeRange::MediumTerm);
    assert_eq!(config.limit, 20);
    assert_eq!(
        config.fetch_mode(),
        FetchMode::TopTracks {
            time_range: TimeRange::MediumTerm,
            limit: 20
        }
    );
}

#[test]
fn test_missing_client_id() {
    let result = config_from(&[("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback")]);
    assert!(matches!(
        result,
        Err(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))
    ));
}

#[test]
fn test_blank_value_counts_as_missing() {
    let result = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
        ("SPOTIFY_API_REDIRECT_URI", "   "),
    ]);
    assert!(matches!(
        result,
        Err(ConfigError::Missing("SPOTIFY_API_REDIRECT_URI"))
    ));
}

#[test]
fn test_redirect_uri_must_be_http_url() {
    for bad in ["not a url", "https://127.0.0.1:8888/callback", "myapp://callback"] {
        let result = config_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
            ("SPOTIFY_API_REDIRECT_URI", bad),
        ]);
        assert!(
            matches!(
                result,
                Err(ConfigError::Invalid {
                    var: "SPOTIFY_API_REDIRECT_URI",
                    ..
                })
            ),
            "accepted {bad}"
        );
    }
}

#[test]
fn test_redirect_uri_path_must_be_routable() {
    for bad in [
        "http://127.0.0.1:8888/:callback",
        "http://127.0.0.1:8888/auth/*rest",
    ] {
        let result = config_from(&[
            ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
            ("SPOTIFY_API_REDIRECT_URI", bad),
        ]);
        assert!(
            matches!(
                result,
                Err(ConfigError::Invalid {
                    var: "SPOTIFY_API_REDIRECT_URI",
                    ..
                })
            ),
            "accepted {bad}"
        );
    }

    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "client"),
        ("SPOTIFY_API_REDIRECT_URI", "http://localhost:8888/auth/spotify/callback"),
    ])
    .unwrap();
    assert_eq!(config.redirect_uri.path(), "/auth/spotify/callback");
}

#[test]
fn test_scopes_and_endpoints_override() {
    let config = config_from(&with_required(&[
        ("SPOTIFY_API_AUTH_SCOPE", "user-top-read,user-read-email"),
        ("SPOTIFY_API_URL", "http://localhost:9000/v1/"),
        ("SPOTIFY_API_TOKEN_URL", "http://localhost:9000/token"),
    ]))
    .unwrap();

    assert_eq!(config.scopes, vec!["user-top-read", "user-read-email"]);
    assert_eq!(config.api_url, "http://localhost:9000/v1");
    assert_eq!(config.token_url, "http://localhost:9000/token");
}

#[test]
fn test_fixed_album_mode() {
    let config = config_from(&with_required(&[
        ("SPOTIFY_USE_FIXED_ALBUM", "true"),
        ("SPOTIFY_ALBUM_ID", "4aawyAB9vmqN3uQ7FjRGTy"),
    ]))
    .unwrap();

    assert_eq!(
        config.fetch_mode(),
        FetchMode::Album {
            album_id: "4aawyAB9vmqN3uQ7FjRGTy".to_string()
        }
    );
}

#[test]
fn test_album_id_ignored_outside_album_mode() {
    let config = config_from(&with_required(&[("SPOTIFY_ALBUM_ID", "4aawyAB9vmqN3uQ7FjRGTy")]))
        .unwrap();
    assert!(matches!(config.fetch_mode(), FetchMode::TopTracks { .. }));
}

#[test]
fn test_fixed_album_requires_album_id() {
    let result = config_from(&with_required(&[("SPOTIFY_USE_FIXED_ALBUM", "yes")]));
    assert!(matches!(result, Err(ConfigError::Missing("SPOTIFY_ALBUM_ID"))));
}

#[test]
fn test_invalid_flag_value() {
    let result = config_from(&with_required(&[("SPOTIFY_USE_FIXED_ALBUM", "sometimes")]));
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            var: "SPOTIFY_USE_FIXED_ALBUM",
            ..
        })
    ));
}

#[test]
fn test_time_range_and_limit() {
    let config = config_from(&with_required(&[
        ("SPOTIFY_TOP_TRACKS_TIME_RANGE", "short_term"),
        ("SPOTIFY_TOP_TRACKS_LIMIT", "50"),
    ]))
    .unwrap();
    assert_eq!(config.time_range, TimeRange::ShortTerm);
    assert_eq!(config.limit, 50);

    let result = config_from(&with_required(&[("SPOTIFY_TOP_TRACKS_TIME_RANGE", "forever")]));
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            var: "SPOTIFY_TOP_TRACKS_TIME_RANGE",
            ..
        })
    ));
}

#[test]
fn test_limit_bounds() {
    for bad in ["0", "51", "-1", "many"] {
        let result = config_from(&with_required(&[("SPOTIFY_TOP_TRACKS_LIMIT", bad)]));
        assert!(
            matches!(
                result,
                Err(ConfigError::Invalid {
                    var: "SPOTIFY_TOP_TRACKS_LIMIT",
                    ..
                })
            ),
            "accepted {bad}"
        );
    }
}

#[test]
fn test_with_fixed_album_override() {
    let config = config_from(&REQUIRED).unwrap().with_fixed_album("alb1");
    assert!(config.validate().is_ok());
    assert_eq!(
        config.fetch_mode(),
        FetchMode::Album {
            album_id: "alb1".to_string()
        }
    );
}

#[test]
fn test_time_range_parsing() {
    assert_eq!("short_term".parse::<TimeRange>(), Ok(TimeRange::ShortTerm));
    assert_eq!("Medium-Term".parse::<TimeRange>(), Ok(TimeRange::MediumTerm));
    assert_eq!("long".parse::<TimeRange>(), Ok(TimeRange::LongTerm));
    assert!("yearly".parse::<TimeRange>().is_err());
    assert_eq!(TimeRange::LongTerm.to_string(), "long_term");
}
