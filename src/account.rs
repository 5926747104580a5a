//! User account records exchanged with the Identity Toolkit relying-party API.
//!
//! An [`Account`] is the unit of the download (user enumeration) and upload
//! (bulk registration) operations. It is constructed either from a decoded
//! identity token or by hand when preparing an upload batch.
use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

/// A single user account held by the identity service.
///
/// Serialized field names follow the relying-party wire format (camelCase).
/// The password hash travels Base64URL-encoded; use [`Account::with_hash`] to
/// set it from raw digest bytes.
///
/// # Example
/// ```rust,no_run
/// use tiny_gitkit::account::Account;
///
/// let account = Account::new("1234", "user@example.com")
///     .with_display_name("A User")
///     .with_hash(&[0u8; 20]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub local_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Base64URL-encoded password hash, present only on upload batches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Which federated identity source authenticated the user. Filled in from
    /// a decoded token, never sent on the wire.
    #[serde(skip)]
    pub current_provider: Option<String>,
}

impl Account {
    /// Creates an account with the two required fields.
    pub fn new(local_id: &str, email: &str) -> Self {
        Self {
            local_id: local_id.to_string(),
            email: email.to_string(),
            display_name: None,
            photo_url: None,
            password_hash: None,
            current_provider: None,
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    /// Sets the profile picture URL.
    pub fn with_photo_url(mut self, photo_url: &str) -> Self {
        self.photo_url = Some(photo_url.to_string());
        self
    }

    /// Sets the password hash from raw digest bytes, encoding it for the wire.
    pub fn with_hash(mut self, hash: &[u8]) -> Self {
        self.password_hash = Some(BASE64_URL_SAFE_NO_PAD.encode(hash));
        self
    }

    /// Sets the federated identity source that authenticated the user.
    pub fn with_provider(mut self, provider: &str) -> Self {
        self.current_provider = Some(provider.to_string());
        self
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use super::Account;

    #[test]
    fn test_account_new() {
        let account = Account::new("1234", "user@example.com");
        assert_eq!(account.local_id, "1234");
        assert_eq!(account.email, "user@example.com");
        assert!(account.display_name.is_none());
        assert!(account.password_hash.is_none());
    }

    #[test]
    fn test_account_with_hash_encodes_base64url() {
        let account = Account::new("1234", "user@example.com").with_hash(&[0xffu8, 0xfe, 0x00]);
        // 0xff 0xfe 0x00 is "//4A" in standard base64; URL-safe uses '_' for '/'.
        assert_eq!(account.password_hash.as_deref(), Some("__4A"));
    }

    #[test]
    fn test_account_wire_field_names() {
        let account = Account::new("1234", "user@example.com")
            .with_display_name("A User")
            .with_provider("google.com");
        let wire = serde_json::to_string(&account).unwrap();

        assert!(wire.contains(r#""localId":"1234""#));
        assert!(wire.contains(r#""displayName":"A User""#));
        // Absent optionals and the provider never reach the wire.
        assert!(!wire.contains("passwordHash"));
        assert!(!wire.contains("provider"));
    }

    #[test]
    fn test_account_from_wire() {
        let wire = r#"{
            "localId": "9876",
            "email": "other@example.com",
            "displayName": "Other User",
            "providerUserInfo": [{"providerId": "google.com"}]
        }"#;
        let account = serde_json::from_str::<Account>(wire).unwrap();
        assert_eq!(account.local_id, "9876");
        assert_eq!(account.email, "other@example.com");
        assert_eq!(account.display_name.as_deref(), Some("Other User"));
        assert!(account.photo_url.is_none());
    }
}
