use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::AuthConfig,
    info,
    management::{AuthFlowController, Session, SessionState},
    success,
    types::{Cover, TrackCollection, TrackTableRow},
    warning,
};

/// How the loaded collection is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Output {
    #[default]
    Table,
    Json,
}

/// Triggers one handshake-and-fetch and renders the outcome.
///
/// A spinner follows the controller's state while the handshake or fetch is
/// in flight. Returns the final session so the caller can pick an exit code.
pub async fn tracks(config: AuthConfig, output: Output) -> Session {
    let controller = Arc::new(AuthFlowController::from_config(&config));

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut updates = controller.subscribe();
    let spinner = pb.clone();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().state;
            spinner.set_message(state.label());
        }
    });

    controller.trigger_auth().await;
    watcher.abort();
    pb.finish_and_clear();

    let session = controller.session();
    match (&session.state, &session.tracks) {
        (SessionState::Ready, Some(tracks)) => render(tracks, output),
        (SessionState::Authenticated, _) => {
            warning!("Connected to Spotify, but the tracks could not be loaded.")
        }
        _ => warning!("Not connected to Spotify. Run the command again to retry."),
    }

    session
}

fn render(tracks: &TrackCollection, output: Output) {
    match output {
        Output::Json => match serde_json::to_string_pretty(tracks) {
            Ok(json) => println!("{}", json),
            Err(e) => warning!("Cannot serialize tracks. Err: {}", e),
        },
        Output::Table => {
            if tracks.is_empty() {
                info!("Spotify returned no tracks.");
                return;
            }
            println!("{}", Table::new(table_rows(tracks)));
            success!("Loaded {} tracks", tracks.len());
        }
    }
}

/// One row per record, numbered from 1, with empty cells for missing fields.
pub fn table_rows(tracks: &TrackCollection) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(index, track)| TrackTableRow {
            position: index + 1,
            cover: match track.cover() {
                Cover::Image(_) => "■".to_string(),
                Cover::Placeholder => "□".to_string(),
            },
            title: track.title_or_empty().to_string(),
            artists: track.artist_line(),
            album: track.album_or_empty().to_string(),
            duration: track.duration_label(),
        })
        .collect()
}
