//! Error types for the LinkShare client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration errors** ([`LinkshareError::MissingField`],
//!   [`LinkshareError::InvalidParameter`]): bad input before any request is made
//! - **Network errors** ([`LinkshareError::Http`]): HTTP communication failures
//! - **Response-shape errors** ([`LinkshareError::MalformedResponse`]): a body
//!   that could not be parsed where parsing was required
//! - **Upstream rejections** ([`LinkshareError::Authorization`],
//!   [`LinkshareError::ResourceUnavailable`]): the API refused the call
//!
//! Business-level faults reported *inside* a well-formed response body
//! ([`Fault`](crate::link_locator::Fault),
//! [`SearchError`](crate::product_search::SearchError)) are data, not errors;
//! check the aggregate's predicate before trusting payload fields.

use thiserror::Error;

/// Result type alias for client operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, LinkshareError>;

/// Errors that can occur while building requests or issuing API calls.
///
/// No retries are performed anywhere in this crate; every failure is a
/// local construction propagated to the caller.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum LinkshareError {
    /// A required configuration field was not provided.
    ///
    /// Raised by [`ClientConfig::validate`](crate::client::ClientConfig::validate)
    /// when `client_id` or `client_secret` is missing.
    #[error("missing fields: {0}")]
    MissingField(String),

    /// A request parameter failed an enum membership check.
    ///
    /// The message enumerates the accepted values, e.g. parsing a sort
    /// column that is not one of the documented columns.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusals, DNS and
    /// TLS failures. Retrying is the caller's decision.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not in the expected format.
    ///
    /// An XML sub-service returned something that does not parse as XML,
    /// or a token response did not deserialize. This is a hard failure
    /// surfaced immediately; the body is never partially decoded.
    #[error("response body was in an unexpected format: {0}")]
    MalformedResponse(String),

    /// The API rejected the call at the authorization layer.
    ///
    /// Detected by inspecting the response shape for the `code`/`message`/
    /// `description` marker elements the gateway emits. Distinct from a
    /// parsed [`Fault`](crate::link_locator::Fault), which is a
    /// business-level fault inside a successful response.
    #[error("authorization failed ({code}): {message}: {description}")]
    Authorization {
        /// Remote error code.
        code: i64,
        /// Remote error message.
        message: String,
        /// Remote error description.
        description: String,
    },

    /// The API reported the requested resource as unavailable.
    ///
    /// Detected from a JSON body carrying a `fault` object where an XML
    /// payload was expected.
    #[error("resource unavailable ({code}): {message}: {description}")]
    ResourceUnavailable {
        /// Remote fault code.
        code: i64,
        /// Remote fault message.
        message: String,
        /// Remote fault description.
        description: String,
    },

    /// Access-token acquisition or refresh failed.
    #[error("access token error: {0}")]
    Token(String),
}
