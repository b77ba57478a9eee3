//! Client configuration and HTTP transport.
//!
//! [`LinkshareClient`] owns the pooled HTTP client, the configuration, and
//! the current access token. Each API call fetches the raw body with a
//! bearer token, inspects the response shape for gateway-level fault
//! markers, and only then hands the body to the sub-service's decoder.
//!
//! No retries happen here; transient failures surface to the caller.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::auth::{self, AccessToken, Grant};
use crate::error::{LinkshareError, Result};
use crate::link_locator::{LinkLocatorRequest, LinkLocatorResult};
use crate::product_search::{ProductSearchQuery, ProductSearchResult};
use crate::xml;

/// Production endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.rakutenmarketing.com";

/// Shared HTTP client with connection pooling.
///
/// A singleton keeps pooling effective across client instances that use
/// the default transport settings.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(16)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("default HTTP client builds")
});

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

/// Client configuration.
///
/// Deserializable from TOML:
///
/// ```toml
/// client_id = "my-consumer-key"
/// client_secret = "my-consumer-secret"
/// username = "publisher"
/// password = "hunter2"
/// scope = "12345"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// OAuth2 client ID (consumer key).
    pub client_id: String,
    /// OAuth2 client secret (consumer secret).
    pub client_secret: String,
    /// Publisher username for the password grant.
    #[serde(default)]
    pub username: Option<String>,
    /// Publisher password for the password grant.
    #[serde(default)]
    pub password: Option<String>,
    /// Grant scope, normally the publisher SID.
    #[serde(default)]
    pub scope: Option<String>,
    /// Request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Endpoint base URL. Overridable for testing.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl ClientConfig {
    /// Configuration with the mandatory credentials and defaults for the
    /// rest.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: None,
            password: None,
            scope: None,
            timeout_secs: None,
            base_url: default_base_url(),
        }
    }

    /// Sets the user credentials for the password grant.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the grant scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Overrides the endpoint base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Checks that the mandatory credential fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`LinkshareError::MissingField`] naming every empty
    /// mandatory field.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.client_id.is_empty() {
            missing.push("client_id");
        }
        if self.client_secret.is_empty() {
            missing.push("client_secret");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LinkshareError::MissingField(missing.join(", ")))
        }
    }
}

/// Client for the LinkShare API.
///
/// Holds at most one access token; [`Self::access_token`] drives the
/// token through its lifecycle (absent, fetched, expired, refreshed).
/// Builders and queries are immutable values, so a single client can
/// serve any number of logical requests without resetting state.
#[derive(Debug)]
pub struct LinkshareClient {
    config: ClientConfig,
    http: Client,
    token: Option<AccessToken>,
}

impl LinkshareClient {
    /// Creates a client with no access token; the first API call will
    /// acquire one via the password grant.
    ///
    /// # Errors
    ///
    /// Returns [`LinkshareError::MissingField`] for incomplete
    /// configuration and [`LinkshareError::Http`] if the transport cannot
    /// be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = match config.timeout_secs {
            Some(secs) => Client::builder()
                .pool_max_idle_per_host(16)
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(secs))
                .build()?,
            None => DEFAULT_HTTP_CLIENT.clone(),
        };

        Ok(Self { config, http, token: None })
    }

    /// Creates a client seeded with a previously persisted token blob.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_token(config: ClientConfig, token: AccessToken) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.token = Some(token);
        Ok(client)
    }

    /// The current token, for callers that persist it between runs.
    #[must_use]
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Returns a usable access token, acquiring or refreshing as needed.
    ///
    /// # Errors
    ///
    /// Returns [`LinkshareError::MissingField`] when the password grant
    /// needs credentials that were not configured, and token/transport
    /// errors from the endpoint.
    pub async fn access_token(&mut self) -> Result<&AccessToken> {
        let token = match self.token.take() {
            Some(token) if !token.has_expired() => token,
            Some(expired) => match expired.refresh_token() {
                Some(refresh_token) => self.refresh_grant(refresh_token).await?,
                // No refresh token issued; fall back to a fresh grant.
                None => self.password_grant().await?,
            },
            None => self.password_grant().await?,
        };
        Ok(self.token.insert(token))
    }

    /// Refreshes the current token if it has expired.
    ///
    /// # Errors
    ///
    /// Returns [`LinkshareError::Token`] when there is no token to
    /// refresh or the expired token carries no refresh token.
    pub async fn refresh_token(&mut self) -> Result<&AccessToken> {
        let Some(token) = self.token.take() else {
            return Err(LinkshareError::Token("cannot refresh absent access token".to_owned()));
        };

        if !token.has_expired() {
            return Ok(self.token.insert(token));
        }

        match token.refresh_token() {
            Some(refresh_token) => {
                let renewed = self.refresh_grant(refresh_token).await?;
                Ok(self.token.insert(renewed))
            }
            None => {
                self.token = Some(token);
                Err(LinkshareError::Token("expired token has no refresh token".to_owned()))
            }
        }
    }

    async fn password_grant(&self) -> Result<AccessToken> {
        let (Some(username), Some(password)) = (&self.config.username, &self.config.password)
        else {
            let mut missing = Vec::new();
            if self.config.username.is_none() {
                missing.push("username");
            }
            if self.config.password.is_none() {
                missing.push("password");
            }
            return Err(LinkshareError::MissingField(missing.join(", ")));
        };

        let grant = Grant::Password {
            username,
            password,
            scope: self.config.scope.as_deref(),
        };

        auth::request_token(
            &self.http,
            &self.config.base_url,
            &self.config.client_id,
            &self.config.client_secret,
            grant,
        )
        .await
    }

    async fn refresh_grant(&self, refresh_token: &str) -> Result<AccessToken> {
        debug!("refreshing expired access token");
        auth::request_token(
            &self.http,
            &self.config.base_url,
            &self.config.client_id,
            &self.config.client_secret,
            Grant::Refresh { refresh_token },
        )
        .await
    }

    /// Runs a LinkLocator operation and decodes the response.
    ///
    /// # Errors
    ///
    /// Token, transport, upstream-rejection, and malformed-body errors. A
    /// business-level [`Fault`](crate::link_locator::Fault) is *not* an
    /// error; check the result's [`has_fault`](LinkLocatorResult::has_fault).
    #[instrument(skip(self), fields(sub_api = request.sub_api()))]
    pub async fn link_locator(
        &mut self,
        request: &LinkLocatorRequest,
    ) -> Result<LinkLocatorResult> {
        info!("issuing link locator request");
        let body = self.fetch(&request.url(&self.config.base_url)).await?;
        LinkLocatorResult::from_xml(&body)
    }

    /// Runs a product search and decodes the response.
    ///
    /// # Errors
    ///
    /// Token, transport, upstream-rejection, and malformed-body errors. A
    /// remote-reported [`SearchError`](crate::product_search::SearchError)
    /// is *not* an error; check the result's
    /// [`has_error`](ProductSearchResult::has_error).
    #[instrument(skip(self, query))]
    pub async fn product_search(
        &mut self,
        query: &ProductSearchQuery,
    ) -> Result<ProductSearchResult> {
        info!("issuing product search request");
        let body = self.fetch(&query.url(&self.config.base_url)).await?;
        ProductSearchResult::from_xml(&body)
    }

    async fn fetch(&mut self, url: &str) -> Result<String> {
        let bearer = self.access_token().await?.secret().to_owned();
        let response = self.http.get(url).bearer_auth(bearer).send().await?;
        let body = response.text().await?;
        inspect_for_fault(&body)?;
        Ok(body)
    }
}

/// Inspects a raw body for gateway-level fault markers before decoding.
///
/// A JSON body carrying a `fault` object means the resource is
/// unavailable; an XML body whose root carries `code`, `message`, and
/// `description` children means authorization failed. Anything else
/// passes through untouched for the sub-service decoder.
fn inspect_for_fault(body: &str) -> Result<()> {
    let trimmed = body.trim_start();

    if trimmed.starts_with('{') {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed)
            && let Some(fault) = value.get("fault")
        {
            let field = |name: &str| {
                fault
                    .get(name)
                    .and_then(|v| v.as_str())
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("\"fault\" object has no \"{name}\""))
            };
            // The gateway has emitted the code both as a number and as a
            // quoted string.
            let code = fault.get("code").map_or(0, |value| match value {
                serde_json::Value::Number(number) => number.as_i64().unwrap_or(0),
                serde_json::Value::String(text) => xml::coerce_int(text),
                _ => 0,
            });
            return Err(LinkshareError::ResourceUnavailable {
                code,
                message: field("message"),
                description: field("description"),
            });
        }
        return Ok(());
    }

    if trimmed.starts_with('<')
        && let Ok(document) = roxmltree::Document::parse(trimmed)
    {
        let root = document.root_element();
        if let (Some(code), Some(message), Some(description)) = (
            xml::text(root, "code"),
            xml::text(root, "message"),
            xml::text(root, "description"),
        ) {
            return Err(LinkshareError::Authorization {
                code: xml::coerce_int(&code),
                message,
                description,
            });
        }
    }

    Ok(())
}
