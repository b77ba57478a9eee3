//! OAuth2 password-grant token lifecycle.
//!
//! The API issues bearer tokens from a single token endpoint via the
//! password grant, and refreshes them with the refresh-token grant. The
//! lifecycle is deliberately small: absent, fetched, expired, refreshed.
//!
//! [`AccessToken`] is serializable so callers can persist the blob between
//! runs and hand it back on startup; this crate never touches the
//! filesystem itself.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{LinkshareError, Result};

/// Token endpoint path under the API base URL.
pub(crate) const TOKEN_PATH: &str = "/token";

/// A bearer token issued by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    access_token: String,
    token_type: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    /// Absolute expiry computed from the endpoint's `expires_in` at
    /// acquisition time. `None` means the endpoint gave no lifetime; such
    /// a token is treated as non-expiring.
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// The bearer secret sent in the `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.access_token
    }

    /// The token type reported by the endpoint, normally `Bearer`.
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// The refresh token, if the endpoint issued one.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// The granted scope, if reported.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Absolute expiry time, if known.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the token's lifetime has elapsed.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        matches!(self.expires_at, Some(at) if at <= Utc::now())
    }
}

/// Wire shape of a token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_token(self, issued_at: DateTime<Utc>) -> AccessToken {
        AccessToken {
            access_token: self.access_token,
            token_type: self.token_type,
            refresh_token: self.refresh_token,
            scope: self.scope,
            expires_at: self.expires_in.map(|secs| issued_at + TimeDelta::seconds(secs)),
        }
    }
}

/// The grant submitted to the token endpoint.
#[derive(Debug)]
pub(crate) enum Grant<'a> {
    /// Scoped password grant used for initial acquisition.
    Password { username: &'a str, password: &'a str, scope: Option<&'a str> },
    /// Refresh grant used once the current token has expired.
    Refresh { refresh_token: &'a str },
}

impl Grant<'_> {
    fn form(&self) -> Vec<(&'static str, &str)> {
        match self {
            Grant::Password { username, password, scope } => {
                let mut form =
                    vec![("grant_type", "password"), ("username", *username), ("password", *password)];
                if let Some(scope) = scope {
                    form.push(("scope", *scope));
                }
                form
            }
            Grant::Refresh { refresh_token } => {
                vec![("grant_type", "refresh_token"), ("refresh_token", *refresh_token)]
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Grant::Password { .. } => "password",
            Grant::Refresh { .. } => "refresh_token",
        }
    }
}

/// Requests a token from the endpoint with client-credential basic auth.
///
/// # Errors
///
/// Returns [`LinkshareError::Token`] when the endpoint rejects the grant,
/// [`LinkshareError::MalformedResponse`] when the response body does not
/// deserialize, and [`LinkshareError::Http`] on transport failure.
#[instrument(skip_all, fields(grant = grant.name()))]
pub(crate) async fn request_token(
    http: &reqwest::Client,
    base_url: &str,
    client_id: &str,
    client_secret: &str,
    grant: Grant<'_>,
) -> Result<AccessToken> {
    let url = format!("{}{TOKEN_PATH}", base_url.trim_end_matches('/'));

    let response = http
        .post(&url)
        .basic_auth(client_id, Some(client_secret))
        .form(&grant.form())
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(LinkshareError::Token(format!(
            "token endpoint returned {status}: {body}"
        )));
    }

    let token_response: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| LinkshareError::MalformedResponse(format!("token response: {e}")))?;

    debug!("access token issued");
    Ok(token_response.into_token(Utc::now()))
}
