use std::{future::Future, io, sync::Arc};

use reqwest::{Client, Url};
use tokio::sync::{Mutex, oneshot};

use crate::{
    config::AuthConfig,
    error::AuthError,
    info,
    server::CallbackServer,
    types::{Credential, TokenErrorResponse, TokenResponse},
    utils, warning,
};

/// Performs the interactive handshake that yields a bearer credential.
pub trait Authorizer: Send + Sync {
    fn authorize(&self) -> impl Future<Output = Result<Credential, AuthError>> + Send;
}

/// Opens the consent page. The default opener is the system browser.
pub type Opener = Arc<dyn Fn(&str) -> io::Result<()> + Send + Sync>;

/// Handshake state shared between [`BrowserAuthorizer::authorize`] and the
/// callback handler. Taken by the first redirect that carries the right `state`.
pub type SharedHandshake = Arc<Mutex<Option<PendingHandshake>>>;

pub struct PendingHandshake {
    pub state: String,
    pub code_verifier: String,
    pub exchange: TokenExchange,
    pub reply: oneshot::Sender<Result<Credential, AuthError>>,
}

/// Token endpoint coordinates for the code-for-token exchange.
#[derive(Debug, Clone)]
pub struct TokenExchange {
    pub client: Client,
    pub token_url: String,
    pub client_id: String,
    pub redirect_uri: String,
}

impl TokenExchange {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            client: Client::new(),
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.to_string(),
        }
    }

    /// Exchanges an authorization code for an access token using PKCE.
    ///
    /// The verifier proves that the client finishing the flow is the one that
    /// started it. The code is single-use and short-lived, so this runs as soon
    /// as the redirect arrives.
    pub async fn exchange_code(&self, code: &str, verifier: &str) -> Result<Credential, AuthError> {
        let res = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("code", code),
                ("code_verifier", verifier),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let detail = match res.json::<TokenErrorResponse>().await {
                Ok(body) => body.error_description.unwrap_or(body.error),
                Err(_) => "no error details".to_string(),
            };
            return Err(AuthError::Transport(format!(
                "token endpoint answered {status}: {detail}"
            )));
        }

        let token: TokenResponse = res
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        if token.access_token.is_empty() {
            return Err(AuthError::Transport(
                "token endpoint returned an empty access token".to_string(),
            ));
        }

        Ok(Credential::new(token.access_token))
    }
}

/// Builds the provider's authorize URL for a PKCE handshake.
pub fn authorize_url(
    config: &AuthConfig,
    code_challenge: &str,
    state: &str,
) -> Result<Url, AuthError> {
    let scope = config.scopes.join(" ");
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("scope", scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| AuthError::Transport(format!("invalid authorize URL: {e}")))
}

/// OAuth 2.0 authorization-code flow with PKCE, driven through the browser.
///
/// Each call to [`authorize`](Authorizer::authorize):
/// 1. generates a code verifier, its S256 challenge and a `state` nonce
/// 2. binds a local listener on the redirect URI's host and port
/// 3. opens the consent page (or prints the URL if no browser can be opened)
/// 4. waits, without a timeout, for the redirect to resolve the handshake
/// 5. shuts the listener down
pub struct BrowserAuthorizer {
    config: AuthConfig,
    opener: Opener,
}

impl BrowserAuthorizer {
    pub fn new(config: AuthConfig) -> Self {
        Self::with_opener(config, Arc::new(|url: &str| webbrowser::open(url)))
    }

    pub fn with_opener(config: AuthConfig, opener: Opener) -> Self {
        Self { config, opener }
    }
}

impl Authorizer for BrowserAuthorizer {
    async fn authorize(&self) -> Result<Credential, AuthError> {
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let state = utils::generate_state();

        let (reply, outcome) = oneshot::channel();
        let shared: SharedHandshake = Arc::new(Mutex::new(Some(PendingHandshake {
            state: state.clone(),
            code_verifier,
            exchange: TokenExchange::from_config(&self.config),
            reply,
        })));

        let server = CallbackServer::start(&self.config.redirect_uri, Arc::clone(&shared)).await?;
        let auth_url = authorize_url(&self.config, &code_challenge, &state)?;

        info!("Waiting for Spotify authorization...");
        if (self.opener)(auth_url.as_str()).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            );
        }

        let result = outcome.await.unwrap_or_else(|_| {
            Err(AuthError::Transport(
                "redirect listener stopped before the handshake finished".to_string(),
            ))
        });

        server.shutdown().await;
        result
    }
}
