//! Demo server wiring the sample pages to the relying-party client.
//!
//! Routing
//! - "/" and "/login" return the welcome page
//! - "/gitkit" echoes the request body into the hosted sign-in widget page
//! - "/info" logs the remote account listing, then serves the widget page
//! - "/upload" registers one fixed demo account, then serves the widget page
//! - everything else is 404
//!
//! The fallible work of each page lives in a plain `Result`-returning
//! function; the axum handler decides whether a failure is surfaced (the
//! login page answers 404 with the error text) or logged and suppressed (the
//! info and upload pages always answer with the widget echo).
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::CookieJar;
use http::StatusCode;
use sha1::{Digest, Sha1};
use tracing::{error, info};

use crate::{
    account::Account,
    config::Config,
    error::Error,
    executer::{Executer, UploadAccountsExe, download_all_accounts},
    template::{self, JAVASCRIPT_ESCAPED_POST_BODY, WELCOME_MESSAGE},
    token::{GitkitToken, TokenRow},
    upload::{UploadAccountsRequest, UploadAccountsResponse},
};

// The one record the demo upload page registers.
static DEMO_LOCAL_ID: &str = "1111";
static DEMO_EMAIL: &str = "new.user@relaydomain.com";
static DEMO_PASSWORD: &str = "trythis";
static DEMO_HASH_ALGORITHM: &str = "SHA1";
static DEMO_SIGNER_KEY: &[u8] = b"hash-key";

static NOT_LOGGED_IN: &str = "You are not logged in";

/// Shared state of the demo server: the relying-party config and the two
/// on-disk page templates.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) config: Config,
    pub(crate) index_template: PathBuf,
    pub(crate) widget_template: PathBuf,
}

impl AppState {
    /// State with the templates at their conventional location.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            index_template: PathBuf::from("templates/index.html"),
            widget_template: PathBuf::from("templates/gitkit-widget.html"),
        }
    }

    /// State with templates at explicit locations.
    pub fn with_templates(config: Config, index_template: &Path, widget_template: &Path) -> Self {
        Self {
            config,
            index_template: index_template.to_path_buf(),
            widget_template: widget_template.to_path_buf(),
        }
    }
}

/// Builds the demo router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(login))
        .route("/login", get(login))
        .route("/gitkit", get(widget).post(widget))
        .route("/info", get(user_info).post(user_info))
        .route("/upload", get(upload_users).post(upload_users))
        .fallback(not_found)
        .with_state(Arc::new(state))
}

/// Picks the identity token out of the configured cookie, if any.
fn token_from_jar(config: &Config, jar: &CookieJar) -> Option<TokenRow> {
    jar.get(config.cookie_name())
        .map(|cookie| TokenRow::new(cookie.value()))
}

async fn login(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let token = token_from_jar(&state.config, &jar);
    match login_page(&state, token.as_ref()) {
        Ok(body) => (StatusCode::OK, Html(body)).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

/// Renders the welcome page. A present token must decode and carry the
/// configured audience; an absent token renders the signed-out line.
fn login_page(state: &AppState, token: Option<&TokenRow>) -> Result<String, Error> {
    let message = match token {
        Some(row) => {
            let token = GitkitToken::decode_with_verify_aud(row, &state.config)?;
            format!(
                "Welcome back!<br><br> Email: {}<br> Id: {}<br> Provider: {}",
                token.email.as_deref().unwrap_or_default(),
                token.user_id,
                token.provider_id.as_deref().unwrap_or_default(),
            )
        }
        None => NOT_LOGGED_IN.to_string(),
    };
    template::render_file(&state.index_template, WELCOME_MESSAGE, &message)
}

async fn widget(State(state): State<Arc<AppState>>, body: String) -> Response {
    widget_response(&state, &body)
}

/// Renders the widget page with the URL-encoded request body substituted in.
fn widget_page(state: &AppState, post_body: &str) -> Result<String, Error> {
    let escaped = urlencoding::encode(post_body);
    template::render_file(&state.widget_template, JAVASCRIPT_ESCAPED_POST_BODY, &escaped)
}

fn widget_response(state: &AppState, post_body: &str) -> Response {
    match widget_page(state, post_body) {
        Ok(body) => (StatusCode::OK, Html(body)).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

async fn user_info(State(state): State<Arc<AppState>>, jar: CookieJar, body: String) -> Response {
    // Diagnostic listing only. Failures never reach the caller.
    let token = token_from_jar(&state.config, &jar);
    match user_listing(&state.config, token.as_ref()).await {
        Ok(accounts) => {
            info!("downloaded {} accounts", accounts.len());
            for account in &accounts {
                info!("account: {:?}", account);
            }
        }
        Err(e) => error!("failed to list accounts: {}", e),
    }

    widget_response(&state, &body)
}

/// Validates the caller's token, then downloads the full remote account
/// listing. The listing is for the log; it is never part of a response.
async fn user_listing(config: &Config, token: Option<&TokenRow>) -> Result<Vec<Account>, Error> {
    let row = token.ok_or(Error::MissingToken)?;
    let token = GitkitToken::decode_with_verify_aud(row, config)?;
    let caller = token.to_account();
    info!(
        "logged in user is {} ({})",
        caller.email,
        caller.display_name.as_deref().unwrap_or_default()
    );

    let accounts = download_all_accounts(config).await?;
    Ok(accounts)
}

async fn upload_users(State(state): State<Arc<AppState>>, body: String) -> Response {
    // Best-effort demo upload. The outcome only reaches the log.
    match upload_demo_account(&state.config).await {
        Ok(res) if res.is_success() => info!("demo account uploaded"),
        Ok(res) => error!("identity server reported upload errors: {}", res.summary()),
        Err(e) => error!("failed to upload demo account: {}", e),
    }

    widget_response(&state, &body)
}

/// The fixed record the upload page registers: id 1111 with the SHA-1 digest
/// of the demo password.
fn demo_account() -> Account {
    let digest = Sha1::digest(DEMO_PASSWORD.as_bytes());
    Account::new(DEMO_LOCAL_ID, DEMO_EMAIL).with_hash(&digest)
}

async fn upload_demo_account(config: &Config) -> Result<UploadAccountsResponse, Error> {
    let req = UploadAccountsRequest::new(
        config,
        DEMO_HASH_ALGORITHM,
        DEMO_SIGNER_KEY,
        vec![demo_account()],
    );
    let res = UploadAccountsExe.execute(&req).await?;
    Ok(res)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};

    use crate::{config::ConfigBuilder, error::Error, token::TokenRow};

    use super::{AppState, demo_account, login_page, widget_page};

    fn state() -> AppState {
        let config = ConfigBuilder::new()
            .client_id("my_client_id")
            .server_api_key("my_server_api_key")
            .cookie_name("gtoken")
            .build();
        AppState::new(config)
    }

    fn signed_in_token() -> TokenRow {
        let payload = r#"{
            "iss": "https://identitytoolkit.google.com/",
            "aud": "my_client_id",
            "iat": 1742189616,
            "exp": 1742193216,
            "user_id": "1234",
            "email": "user@example.com",
            "provider_id": "google.com"
        }"#;
        let mut raw = "header.".to_string();
        raw.push_str(&BASE64_URL_SAFE_NO_PAD.encode(payload));
        raw.push_str(".signature");
        TokenRow::new(&raw)
    }

    #[test]
    fn test_login_page_signed_out() {
        let body = login_page(&state(), None).unwrap();
        assert!(body.contains("You are not logged in"));
    }

    #[test]
    fn test_login_page_signed_in() {
        let token = signed_in_token();
        let body = login_page(&state(), Some(&token)).unwrap();

        assert!(body.contains("Welcome back!"));
        assert!(body.contains("user@example.com"));
        assert!(body.contains("1234"));
        assert!(body.contains("google.com"));
    }

    #[test]
    fn test_login_page_bad_token() {
        let token = TokenRow::new("not-a-token");
        let rendered = login_page(&state(), Some(&token));
        assert!(matches!(rendered, Err(Error::Decode)));
    }

    #[test]
    fn test_widget_page_encodes_body() {
        let body = widget_page(&state(), "hello world").unwrap();
        assert!(body.contains("hello%20world"));
    }

    #[test]
    fn test_widget_page_empty_body() {
        let body = widget_page(&state(), "").unwrap();
        assert!(!body.contains("JAVASCRIPT_ESCAPED_POST_BODY"));
    }

    #[test]
    fn test_widget_page_missing_template() {
        let config = ConfigBuilder::new().client_id("my_client_id").build();
        let state = AppState::with_templates(
            config,
            std::path::Path::new("templates/index.html"),
            std::path::Path::new("templates/no-such-widget.html"),
        );

        let rendered = widget_page(&state, "hello");
        match rendered {
            Err(e @ Error::Template(_)) => {
                assert!(e.to_string().contains("Failed to read template"))
            }
            other => panic!("expected template error, got {:?}", other),
        }
    }

    #[test]
    fn test_demo_account() {
        let account = demo_account();
        assert_eq!(account.local_id, "1111");
        assert_eq!(account.email, "new.user@relaydomain.com");
        // SHA-1 of the demo password, Base64URL-encoded.
        assert_eq!(
            account.password_hash.as_deref(),
            Some("Jo10qd9FGiuE3HMG8Bfe0x-JV9I")
        );
    }
}
