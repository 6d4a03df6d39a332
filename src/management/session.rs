use tokio::sync::watch;

use crate::{
    config::AuthConfig,
    spotify::{
        auth::{Authorizer, BrowserAuthorizer},
        tracks::{TrackFetcher, TrackSource},
    },
    types::{Credential, TrackCollection},
    warning,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authorizing,
    Authenticated,
    Fetching,
    Ready,
}

impl SessionState {
    /// A handshake or a fetch is running; new triggers are ignored.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SessionState::Authorizing | SessionState::Fetching)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "Not connected",
            SessionState::Authorizing => "Waiting for Spotify authorization...",
            SessionState::Authenticated => "Connected",
            SessionState::Fetching => "Fetching tracks...",
            SessionState::Ready => "Tracks loaded",
        }
    }
}

/// Snapshot of what the rendering surface observes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub state: SessionState,
    pub credential: Option<Credential>,
    pub tracks: Option<TrackCollection>,
}

/// Drives handshake then fetch, and publishes every transition.
///
/// ```text
/// Unauthenticated -> Authorizing -> Authenticated -> Fetching -> Ready
///        ^               |                ^             |
///        +---------------+                +-------------+
///     cancelled/failed handshake        failed fetch
/// ```
///
/// Subscribers get a [`watch::Receiver`] of [`Session`] snapshots.
pub struct AuthFlowController<A, S> {
    authorizer: A,
    source: S,
    session: watch::Sender<Session>,
}

impl AuthFlowController<BrowserAuthorizer, TrackFetcher> {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            BrowserAuthorizer::new(config.clone()),
            TrackFetcher::from_config(config),
        )
    }
}

impl<A, S> AuthFlowController<A, S>
where
    A: Authorizer,
    S: TrackSource,
{
    pub fn new(authorizer: A, source: S) -> Self {
        let (session, _) = watch::channel(Session::default());
        Self {
            authorizer,
            source,
            session,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.session.borrow().state
    }

    pub fn credential(&self) -> Option<Credential> {
        self.session.borrow().credential.clone()
    }

    pub fn tracks(&self) -> Option<TrackCollection> {
        self.session.borrow().tracks.clone()
    }

    /// Runs the handshake and, once authenticated, exactly one fetch.
    ///
    /// Ignored while a handshake or fetch is already running. Starting a new
    /// handshake drops the previous credential and collection.
    pub async fn trigger_auth(&self) {
        let started = self.session.send_if_modified(|session| {
            if session.state.is_in_flight() {
                return false;
            }
            *session = Session {
                state: SessionState::Authorizing,
                credential: None,
                tracks: None,
            };
            true
        });
        if !started {
            return;
        }

        let credential = match self.authorizer.authorize().await {
            Ok(credential) => credential,
            Err(e) => {
                warning!("{}", e);
                self.session.send_replace(Session::default());
                return;
            }
        };

        self.session.send_replace(Session {
            state: SessionState::Authenticated,
            credential: Some(credential.clone()),
            tracks: None,
        });

        self.fetch(&credential).await;
    }

    async fn fetch(&self, credential: &Credential) {
        self.session
            .send_modify(|session| session.state = SessionState::Fetching);

        match self.source.fetch_tracks(credential).await {
            Ok(tracks) => self.session.send_modify(|session| {
                session.state = SessionState::Ready;
                session.tracks = Some(tracks);
            }),
            Err(e) => {
                warning!("{}", e);
                self.session.send_modify(|session| {
                    session.state = SessionState::Authenticated;
                    session.tracks = None;
                });
            }
        }
    }
}
