//! Provides an asynchronous execution framework for sending HTTP requests to
//! the identity service.
//!
//! This module:
//! - Defines the Executer trait, which provides a unified interface for making HTTP requests.
//! - Implements executers for the account download and account upload calls.
//! - Provides `download_all_accounts`, the pagination loop over the download call.

use std::{error::Error, pin::Pin};

use crate::{
    account::Account,
    config::Config,
    download::{DownloadAccountsRequest, DownloadAccountsResponse},
    upload::{UploadAccountsRequest, UploadAccountsResponse},
};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::error;

/// generic asynchronous execution interface for sending HTTP requests.
/// Key Components:
/// - R: The request type that the executer will handle.
/// - Response: The expected response type.
/// - Error: The error type that will be returned on failure.
/// - Future: The asynchronous execution result, returning either Response or Error
pub trait Executer<'a, Req>
where
    Req: Send,
{
    type Response;
    type Error: Error;
    type Future: Future<Output = Result<Self::Response, Self::Error>> + Send + 'a;

    fn execute(&'a self, req: &'a Req) -> Self::Future;
}

/// Defines possible errors that can occur during request execution.
#[derive(Debug, Clone, Error)]
pub enum ExecuteError {
    #[error("Failed to parse data")]
    Parse,
    #[error("Failed to send request")]
    Send,
    #[error("Failed to parse url")]
    URL,
    #[error("Identity server rejected the request")]
    Remote,
}

/// Handles account download (user enumeration) requests.
pub struct DownloadAccountsExe;

/// Request Workflow
/// 1. Parse the download endpoint URL and attach the server API key.
/// 2. Send an HTTP POST request with the page parameters.
/// 3. Parse and return the response as DownloadAccountsResponse.
impl<'a> Executer<'a, DownloadAccountsRequest> for DownloadAccountsExe {
    type Response = DownloadAccountsResponse;
    type Error = ExecuteError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a DownloadAccountsRequest) -> Self::Future {
        Box::pin(async move {
            let mut url = Url::parse(req.endpoint()).map_err(|e| {
                error!("Failed to parse url: {:?}", e);
                ExecuteError::URL
            })?;
            url.query_pairs_mut()
                .append_pair("key", &req.server_api_key.0);

            let client = Client::new();
            let res = client
                .post(url)
                .json(&req.wire_body())
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    ExecuteError::Send
                })?;
            if !res.status().is_success() {
                error!("Account download rejected with status {}", res.status());
                return Err(ExecuteError::Remote);
            }
            let res_json = res.json::<DownloadAccountsResponse>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                ExecuteError::Parse
            })?;
            Ok(res_json)
        })
    }
}

/// Handles bulk account upload requests.
pub struct UploadAccountsExe;

/// Request Workflow
/// 1. Parse the upload endpoint URL and attach the server API key.
/// 2. Send the batch with its hash algorithm and signer key.
/// 3. Parse and return the per-record error list as UploadAccountsResponse.
impl<'a> Executer<'a, UploadAccountsRequest> for UploadAccountsExe {
    type Response = UploadAccountsResponse;
    type Error = ExecuteError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a UploadAccountsRequest) -> Self::Future {
        Box::pin(async move {
            let mut url = Url::parse(req.endpoint()).map_err(|e| {
                error!("Failed to parse url: {:?}", e);
                ExecuteError::URL
            })?;
            url.query_pairs_mut()
                .append_pair("key", &req.server_api_key.0);

            let client = Client::new();
            let res = client
                .post(url)
                .json(&req.wire_body())
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    ExecuteError::Send
                })?;
            if !res.status().is_success() {
                error!("Account upload rejected with status {}", res.status());
                return Err(ExecuteError::Remote);
            }
            let res_json = res.json::<UploadAccountsResponse>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                ExecuteError::Parse
            })?;
            Ok(res_json)
        })
    }
}

/// Walks the remote account listing page by page and returns every account.
/// Stops when the service omits the next-page token.
pub async fn download_all_accounts(config: &Config) -> Result<Vec<Account>, ExecuteError> {
    let mut accounts = Vec::new();
    let mut req = DownloadAccountsRequest::new(config);
    loop {
        let res = DownloadAccountsExe.execute(&req).await?;
        let next_page_token = if res.is_last_page() {
            None
        } else {
            res.next_page_token().map(|t| t.to_string())
        };
        accounts.extend(res.into_users());

        match next_page_token {
            Some(token) => req = DownloadAccountsRequest::new(config).with_page_token(&token),
            None => break,
        }
    }
    Ok(accounts)
}
