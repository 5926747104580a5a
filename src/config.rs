//! Defines structures and builders related to the Gitkit server configuration.
//!
//! Provides a structured way to handle the credentials and endpoints required
//! to call the Identity Toolkit relying-party API, plus a loader for the JSON
//! server-config document handed out by the Google developer console.
//!
//! ## Structures
//! - `Config`: Stores all the necessary relying-party information.
//! - `ConfigBuilder`: A builder for constructing a `Config` instance.
//!
//! # Example
//! ```rust,no_run
//! use tiny_gitkit::config::Config;
//!
//! let config = Config::builder()
//!     .api_endpoint("https://www.googleapis.com/identitytoolkit/v3/relyingparty/")
//!     .client_id("your-client-id")
//!     .server_api_key("your-server-api-key")
//!     .widget_url("http://localhost:4567/gitkit")
//!     .cookie_name("gtoken")
//!     .build();
//! ```
//!
//! A `Config` can also be read from the standard `gitkit-server-config.json`
//! document with [`Config::from_json_file`].
use serde::Deserialize;
use tracing::error;

use crate::error::Error;

/// Relying-party API base URL used when the config document does not name one.
pub(crate) static DEFAULT_API_ENDPOINT: &str =
    "https://www.googleapis.com/identitytoolkit/v3/relyingparty/";

/// Cookie the hosted widget stores the identity token in by default.
pub(crate) static DEFAULT_COOKIE_NAME: &str = "gtoken";

#[derive(Debug, Clone, Default)]
pub(crate) struct ApiEndPoint(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClientID(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ServerApiKey(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct WidgetURL(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct CookieName(pub String);

/// Holds all relying-party information required to call the Identity Toolkit
/// API and to pick the identity token out of incoming requests.
///
/// It is designed to be immutable once constructed.
///
/// # Fields
/// - `api_endpoint`: The relying-party API base URL.
/// - `client_id`: The client ID obtained from the Google developer console.
/// - `server_api_key`: The server API key used on relying-party calls.
/// - `widget_url`: Where the hosted sign-in widget is served from.
/// - `cookie_name`: The cookie carrying the identity token (`gtoken` by default).
///
/// This struct is primarily built using the `ConfigBuilder` or read from the
/// JSON server-config document.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) api_endpoint: ApiEndPoint,
    pub(crate) client_id: ClientID,
    pub(crate) server_api_key: ServerApiKey,
    pub(crate) widget_url: WidgetURL,
    pub(crate) cookie_name: CookieName,
}

/// Raw shape of `gitkit-server-config.json`. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigDocument {
    client_id: String,
    server_api_key: String,
    #[serde(default)]
    widget_url: Option<String>,
    #[serde(default)]
    cookie_name: Option<String>,
    #[serde(default)]
    api_endpoint: Option<String>,
}

// ==========impl Config==========
impl Config {
    /// Returns a new `ConfigBuilder` instance to create a `Config` object.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reads a `Config` from the JSON server-config document at `path`.
    /// Missing file or malformed JSON is reported as `Error::Config` carrying
    /// the underlying error text.
    pub fn from_json_file(path: &str) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            error!("Failed to read server config {}: {}", path, e);
            Error::Config(e.to_string())
        })?;
        Self::from_json(&raw)
    }

    /// Parses a `Config` from the JSON server-config text.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let doc = serde_json::from_str::<ConfigDocument>(raw).map_err(|e| {
            error!("Failed to parse server config: {}", e);
            Error::Config(e.to_string())
        })?;
        let api_endpoint = doc.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT);
        url::Url::parse(api_endpoint).map_err(|e| {
            error!("Invalid api endpoint in server config: {}", e);
            Error::Config(e.to_string())
        })?;
        Ok(ConfigBuilder::new()
            .api_endpoint(api_endpoint)
            .client_id(&doc.client_id)
            .server_api_key(&doc.server_api_key)
            .widget_url(doc.widget_url.as_deref().unwrap_or_default())
            .cookie_name(doc.cookie_name.as_deref().unwrap_or(DEFAULT_COOKIE_NAME))
            .build())
    }

    /// Returns the URL the hosted sign-in widget is served from.
    pub fn widget_url(&self) -> &str {
        &self.widget_url.0
    }

    /// Returns the name of the cookie carrying the identity token.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name.0
    }
}

/// Provides a convenient way to create a `Config` instance step by step.
/// This ensures that all required fields are set before the `Config`
/// object is constructed.
///
/// # Example
/// ```rust,no_run
/// use tiny_gitkit::config::ConfigBuilder;
///
/// let builder = ConfigBuilder::new()
///     .api_endpoint("https://www.googleapis.com/identitytoolkit/v3/relyingparty/")
///     .client_id("your-client-id")
///     .server_api_key("your-server-api-key")
///     .widget_url("http://localhost:4567/gitkit")
///     .cookie_name("gtoken");
///
/// let config = builder.build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    api_endpoint: ApiEndPoint,
    client_id: ClientID,
    server_api_key: ServerApiKey,
    widget_url: WidgetURL,
    cookie_name: CookieName,
}

// ==========impl ConfigBuilder==========
impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` instance with default values.
    pub fn new() -> Self {
        ConfigBuilder::default()
    }

    /// Sets the relying-party API base URL.
    pub fn api_endpoint(mut self, api_endpoint: &str) -> ConfigBuilder {
        self.api_endpoint = ApiEndPoint(api_endpoint.to_string());
        self
    }

    /// Sets the client ID obtained from the Google developer console.
    pub fn client_id(mut self, client_id: &str) -> Self {
        self.client_id = ClientID(client_id.to_string());
        self
    }

    /// Sets the server API key used on relying-party calls.
    pub fn server_api_key(mut self, server_api_key: &str) -> Self {
        self.server_api_key = ServerApiKey(server_api_key.to_string());
        self
    }

    /// Sets the URL the hosted sign-in widget is served from.
    pub fn widget_url(mut self, widget_url: &str) -> Self {
        self.widget_url = WidgetURL(widget_url.to_string());
        self
    }

    /// Sets the name of the cookie carrying the identity token.
    pub fn cookie_name(mut self, cookie_name: &str) -> Self {
        self.cookie_name = CookieName(cookie_name.to_string());
        self
    }

    /// Constructs a `Config` instance with the provided values.
    pub fn build(self) -> Config {
        Config {
            api_endpoint: self.api_endpoint,
            client_id: self.client_id,
            server_api_key: self.server_api_key,
            widget_url: self.widget_url,
            cookie_name: self.cookie_name,
        }
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use crate::config::Config;

    use super::ConfigBuilder;

    #[test]
    fn test_config_builder() {
        let api_endpoint = "https://identity.example.com/relyingparty/";
        let client_id = "my_client_id";
        let server_api_key = "my_server_api_key";
        let widget_url = "https://widget.example.com/gitkit";
        let cookie_name = "gtoken";

        let config = ConfigBuilder::new()
            .api_endpoint(api_endpoint)
            .client_id(client_id)
            .server_api_key(server_api_key)
            .widget_url(widget_url)
            .cookie_name(cookie_name)
            .build();

        assert_eq!(config.api_endpoint.0, api_endpoint);
        assert_eq!(config.client_id.0, client_id);
        assert_eq!(config.server_api_key.0, server_api_key);
        assert_eq!(config.widget_url.0, widget_url);
        assert_eq!(config.cookie_name.0, cookie_name);
    }

    #[test]
    fn test_config_builder_default() {
        let config_builder = ConfigBuilder::default();

        assert_eq!(config_builder.api_endpoint.0, "");
        assert_eq!(config_builder.client_id.0, "");
        assert_eq!(config_builder.server_api_key.0, "");
        assert_eq!(config_builder.widget_url.0, "");
        assert_eq!(config_builder.cookie_name.0, "");
    }

    #[test]
    fn test_config_from_json() {
        let raw = r#"{
            "clientId": "my_client_id",
            "serverApiKey": "my_server_api_key",
            "widgetUrl": "http://localhost:4567/gitkit",
            "cookieName": "my_cookie"
        }"#;

        let config = Config::from_json(raw).unwrap();
        assert_eq!(config.client_id.0, "my_client_id");
        assert_eq!(config.server_api_key.0, "my_server_api_key");
        assert_eq!(config.widget_url(), "http://localhost:4567/gitkit");
        assert_eq!(config.cookie_name(), "my_cookie");
        assert_eq!(
            config.api_endpoint.0,
            "https://www.googleapis.com/identitytoolkit/v3/relyingparty/"
        );
    }

    #[test]
    fn test_config_from_json_defaults() {
        let raw = r#"{
            "clientId": "my_client_id",
            "serverApiKey": "my_server_api_key"
        }"#;

        let config = Config::from_json(raw).unwrap();
        assert_eq!(config.cookie_name(), "gtoken");
        assert_eq!(config.widget_url(), "");
    }

    #[test]
    fn test_config_from_json_malformed() {
        let config = Config::from_json("not a json document");
        assert!(matches!(config, Err(crate::error::Error::Config(_))));
    }

    #[test]
    fn test_config_from_json_bad_endpoint() {
        let raw = r#"{
            "clientId": "my_client_id",
            "serverApiKey": "my_server_api_key",
            "apiEndpoint": "not a url"
        }"#;

        let config = Config::from_json(raw);
        assert!(matches!(config, Err(crate::error::Error::Config(_))));
    }

    #[test]
    fn test_config_from_json_file_missing() {
        let config = Config::from_json_file("/no/such/gitkit-server-config.json");
        assert!(matches!(config, Err(crate::error::Error::Config(_))));
    }
}
