//! Client library for the LinkShare (Rakuten Affiliate Marketing) web API.
//!
//! The API is split into sub-services reached under one endpoint base:
//! [`link_locator`] covers advertiser lookup and creative link feeds,
//! [`product_search`] covers keyword search over advertiser product feeds.
//! Requests are immutable values that render their own URLs; responses are
//! tolerantly decoded XML with business-level faults carried as data, not
//! errors.
//!
//! Authentication is OAuth2 password grant; [`LinkshareClient`] acquires
//! and refreshes the bearer token transparently, and exposes it for
//! callers that want to persist it between runs.
//!
//! # Examples
//!
//! ```no_run
//! use linkshare_client::{ClientConfig, LinkshareClient};
//! use linkshare_client::link_locator::LinkLocatorRequest;
//!
//! # async fn run() -> linkshare_client::Result<()> {
//! let config = ClientConfig::new("consumer-key", "consumer-secret")
//!     .with_credentials("publisher", "hunter2")
//!     .with_scope("12345");
//! let mut client = LinkshareClient::new(config)?;
//!
//! let result = client.link_locator(&LinkLocatorRequest::MerchantByCategory(11)).await?;
//! for merchant in result.merchants() {
//!     println!("{merchant}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod link_locator;
pub mod product_search;
pub mod terms;

mod xml;

pub use auth::AccessToken;
pub use client::{ClientConfig, LinkshareClient, DEFAULT_BASE_URL};
pub use error::{LinkshareError, Result};
pub use terms::{parse_commission_terms, CommissionTerms, CommissionTier};
