use axum::{Extension, extract::Query, response::Html};
use serde::Deserialize;

use crate::{error::AuthError, spotify::auth::SharedHandshake, warning};

/// Query parameters the provider appends to the redirect URI.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub state: Option<String>,
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(shared_state): Extension<SharedHandshake>,
) -> Html<&'static str> {
    let pending = {
        let mut slot = shared_state.lock().await;
        match slot.take() {
            Some(pending) if params.state.as_deref() == Some(pending.state.as_str()) => pending,
            Some(pending) => {
                // Leave the handshake in place for the real redirect.
                *slot = Some(pending);
                warning!("Ignoring redirect with an unexpected state parameter");
                return Html("<h4>Authorization state mismatch.</h4>");
            }
            None => return Html("<h4>No authorization in progress.</h4>"),
        }
    };

    let (outcome, page) = match (params.error, params.code) {
        (Some(error), _) if error == "access_denied" => (
            Err(AuthError::Cancelled(error)),
            Html("<h4>Authorization cancelled.</h4><p>Close browser window.</p>"),
        ),
        (Some(error), _) => (
            Err(AuthError::Transport(format!("provider returned '{error}'"))),
            Html("<h4>Login failed.</h4>"),
        ),
        (None, Some(code)) => {
            match pending
                .exchange
                .exchange_code(&code, &pending.code_verifier)
                .await
            {
                Ok(credential) => (
                    Ok(credential),
                    Html("<h2>Authentication successful.</h2><p>Close browser window.</p>"),
                ),
                Err(e) => {
                    warning!("Token exchange failed: {}", e);
                    (Err(e), Html("<h4>Login failed.</h4>"))
                }
            }
        }
        (None, None) => (
            Err(AuthError::Transport(
                "redirect carried neither a code nor an error".to_string(),
            )),
            Html("<h4>Missing authorization code.</h4>"),
        ),
    };

    // The waiting handshake may have gone away; nothing to do then.
    let _ = pending.reply.send(outcome);
    page
}
