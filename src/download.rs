//! This module handles the account download (user enumeration) operation of
//! the relying-party API.
//!
//! It provides the following key functionalities:
//! - Building a `downloadAccount` request (`DownloadAccountsRequest`).
//! - Parsing the returned page of accounts (`DownloadAccountsResponse`).
//!
//! The remote API returns accounts one page at a time; each page carries a
//! `nextPageToken` to request the following one. The pagination loop lives in
//! [`crate::executer::download_all_accounts`].
//!
//! # Example
//! ```rust,no_run
//! use tiny_gitkit::{config::Config, download::DownloadAccountsRequest};
//!
//! let config = Config::builder()
//!     .api_endpoint("https://www.googleapis.com/identitytoolkit/v3/relyingparty/")
//!     .server_api_key("your-server-api-key")
//!     .build();
//!
//! let first_page = DownloadAccountsRequest::new(&config);
//! let next_page = DownloadAccountsRequest::new(&config).with_page_token("token-from-last-page");
//! ```
use serde::Deserialize;

use crate::{
    account::Account,
    config::{Config, ServerApiKey},
};

/// Page size requested from the remote service.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 50;

/// A request for one page of the remote account listing.
#[derive(Debug, Clone)]
pub struct DownloadAccountsRequest {
    pub(crate) endpoint: String,
    pub(crate) server_api_key: ServerApiKey,
    pub(crate) max_results: u32,
    pub(crate) next_page_token: Option<String>,
}

impl DownloadAccountsRequest {
    /// Creates a request for the first page using parameters from Config.
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: format!("{}downloadAccount", config.api_endpoint.0),
            server_api_key: config.server_api_key.to_owned(),
            max_results: DEFAULT_PAGE_SIZE,
            next_page_token: None,
        }
    }

    /// Turns this into a request for the page that follows `page_token`.
    pub fn with_page_token(mut self, page_token: &str) -> Self {
        self.next_page_token = Some(page_token.to_string());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Wire body of the `downloadAccount` call.
    pub(crate) fn wire_body(&self) -> serde_json::Value {
        match &self.next_page_token {
            Some(token) => serde_json::json!({
                "maxResults": self.max_results,
                "nextPageToken": token,
            }),
            None => serde_json::json!({ "maxResults": self.max_results }),
        }
    }
}

/// One page of the remote account listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadAccountsResponse {
    #[serde(default)]
    users: Vec<Account>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl DownloadAccountsResponse {
    pub fn users(&self) -> &[Account] {
        &self.users
    }

    pub fn into_users(self) -> Vec<Account> {
        self.users
    }

    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    /// The service marks the last page by omitting the token or sending an
    /// empty one.
    pub fn is_last_page(&self) -> bool {
        match &self.next_page_token {
            Some(token) => token.is_empty(),
            None => true,
        }
    }
}
