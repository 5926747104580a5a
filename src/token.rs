//! Provides the process of extracting and decoding Gitkit identity tokens.
//!
//! This module:
//! TokenRow: The opaque credential exactly as carried by the request cookie.
//! GitkitToken: A data structure representing the decoded payload of an identity token.
//!
//! The hosted widget stores the identity token in a cookie after a successful
//! sign-in; the server reads the cookie, decodes the payload, and checks that
//! the token was minted for this relying party (`aud` claim).
use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{account::Account, config::Config, error::Error};

/// The raw identity token as presented by the browser, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow(String);

impl TokenRow {
    /// Wraps a raw cookie value.
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the raw token as a string reference.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<String> for TokenRow {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Represents the decoded payload of a Gitkit identity token.
/// The token carries the authenticated user's identity and which federated
/// provider signed them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitkitToken {
    pub iss: String,  // Issuer
    pub aud: String,  // Client ID the token was minted for
    pub iat: u32,     // Issued-at timestamp (UNIX time)
    pub exp: u32,     // Expiration timestamp (UNIX time)
    pub user_id: String,  // Unique account id at the identity service
    pub email: Option<String>,  // User's email address
    pub verified: Option<bool>,  // Whether the email is verified
    pub provider_id: Option<String>,  // Federated provider that signed the user in
    pub display_name: Option<String>,  // Full name
}

impl GitkitToken {
    /// Decodes a TokenRow (encoded identity token) into a GitkitToken.
    ///
    /// The signature is NOT verified here; the token should not be forwarded
    /// to other components as proof of identity.
    pub fn decode_from_row(token: &TokenRow) -> Result<Self, Error> {
        let split: Vec<_> = token.0.split(".").collect();
        if split.len() != 3 {
            return Err(Error::Decode);
        }
        let bytes = BASE64_URL_SAFE_NO_PAD.decode(split[1]).map_err(|e| {
            error!("Failed to decode identity token: {}", e);
            Error::Decode
        })?;

        let token = serde_json::from_slice::<GitkitToken>(&bytes).map_err(|e| {
            error!("Failed to deserialize identity token: {}", e);
            Error::Deserialize
        })?;
        Ok(token)
    }

    /// Decodes a TokenRow and requires that the `aud` claim matches the
    /// configured client id. Returns `Error::AudienceNotMatch` otherwise.
    pub fn decode_with_verify_aud(token: &TokenRow, config: &Config) -> Result<Self, Error> {
        let decoded = Self::decode_from_row(token)?;
        if decoded.aud == config.client_id.0 {
            Ok(decoded)
        } else {
            Err(Error::AudienceNotMatch)
        }
    }

    /// Builds the user record the token attests to.
    pub fn to_account(&self) -> Account {
        let mut account = Account::new(&self.user_id, self.email.as_deref().unwrap_or_default());
        if let Some(name) = &self.display_name {
            account = account.with_display_name(name);
        }
        if let Some(provider) = &self.provider_id {
            account = account.with_provider(provider);
        }
        account
    }
}
