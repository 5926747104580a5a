//! This module handles the bulk account upload operation of the relying-party
//! API.
//!
//! A batch of pre-existing accounts, each carrying a precomputed password
//! hash, is registered with the remote identity service in one `uploadAccount`
//! call. The service answers with a per-record error list; an empty list means
//! every account was accepted.
use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    account::Account,
    config::{Config, ServerApiKey},
};

/// A request to register a batch of accounts with the identity service.
///
/// `hash_algorithm` names the algorithm the password hashes were computed
/// with (e.g. `SHA1`); `signer_key` is the key material the service uses with
/// that algorithm, sent Base64URL-encoded.
#[derive(Debug, Clone)]
pub struct UploadAccountsRequest {
    pub(crate) endpoint: String,
    pub(crate) server_api_key: ServerApiKey,
    pub(crate) hash_algorithm: String,
    pub(crate) signer_key: Vec<u8>,
    pub(crate) accounts: Vec<Account>,
}

impl UploadAccountsRequest {
    /// Creates a new request using parameters from Config.
    pub fn new(
        config: &Config,
        hash_algorithm: &str,
        signer_key: &[u8],
        accounts: Vec<Account>,
    ) -> Self {
        Self {
            endpoint: format!("{}uploadAccount", config.api_endpoint.0),
            server_api_key: config.server_api_key.to_owned(),
            hash_algorithm: hash_algorithm.to_string(),
            signer_key: signer_key.to_vec(),
            accounts,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn hash_algorithm(&self) -> &str {
        &self.hash_algorithm
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Wire body of the `uploadAccount` call.
    pub(crate) fn wire_body(&self) -> serde_json::Value {
        serde_json::json!({
            "hashAlgorithm": self.hash_algorithm,
            "signerKey": BASE64_URL_SAFE_NO_PAD.encode(&self.signer_key),
            "users": self.accounts,
        })
    }
}

/// One rejected record in an upload batch.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadError {
    /// Position of the rejected account in the submitted batch.
    pub index: u32,
    pub message: String,
}

/// The identity service's answer to an upload batch.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadAccountsResponse {
    #[serde(default, rename = "error")]
    errors: Vec<UploadError>,
}

impl UploadAccountsResponse {
    /// True when every account in the batch was accepted.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[UploadError] {
        &self.errors
    }

    /// One-line rendering of the per-record errors, for the log.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("#{}: {}", e.index, e.message))
            .join("; ")
    }
}
