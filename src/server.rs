use std::{net::SocketAddr, time::Duration};

use axum::{Extension, Router, routing::get};
use reqwest::Url;
use tokio::{sync::oneshot, task::JoinHandle};

use crate::{api, error::AuthError, spotify::auth::SharedHandshake, utils, warning};

/// Local listener that lives for exactly one handshake.
///
/// Binds the host and port of the redirect URI and routes its path to
/// [`api::callback`].
pub struct CallbackServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl CallbackServer {
    pub async fn start(redirect_uri: &Url, state: SharedHandshake) -> Result<Self, AuthError> {
        let host = redirect_uri
            .host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
            .ok_or_else(|| AuthError::Transport("redirect URI has no host".to_string()))?;
        let port = redirect_uri
            .port_or_known_default()
            .ok_or_else(|| AuthError::Transport("redirect URI has no port".to_string()))?;

        if !utils::is_literal_route(redirect_uri.path()) {
            return Err(AuthError::Transport(format!(
                "redirect URI path '{}' cannot be routed",
                redirect_uri.path()
            )));
        }

        let app = Router::new()
            .route(redirect_uri.path(), get(api::callback))
            .layer(Extension(state));

        let listener = tokio::net::TcpListener::bind((host.as_str(), port))
            .await
            .map_err(|e| AuthError::Transport(format!("cannot listen on {host}:{port}: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = signal.await;
                })
                .await;
            if let Err(e) = served {
                warning!("Redirect listener stopped: {}", e);
            }
        });

        Ok(Self {
            addr,
            shutdown,
            handle,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting redirects. Gives open connections a moment to drain.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .is_err()
        {
            warning!("Redirect listener did not stop in time");
        }
    }
}
