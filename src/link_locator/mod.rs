//! LinkLocator sub-service: advertiser lookup and creative link feeds.
//!
//! The request side is a closed set of sub-service variants
//! ([`LinkLocatorRequest`]); each variant knows how to render its
//! positional path segments. The response side decodes the XML body into a
//! [`LinkLocatorResult`].
//!
//! # Examples
//!
//! ```
//! use linkshare_client::link_locator::LinkLocatorRequest;
//!
//! let request = LinkLocatorRequest::MerchantByCategory(11);
//! assert_eq!(request.path(), "getMerchByCategory/11");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::LinkshareError;

mod models;

pub use models::{Fault, LinkLocatorResult, Merchant, Offer};

/// API name segment in the endpoint URL.
pub const API_NAME: &str = "linklocator";
/// API version segment in the endpoint URL.
pub const API_VERSION: &str = "1.0";

/// Date format required by the creative-feed filters.
const FEED_DATE_FORMAT: &str = "%m%d%Y";

/// The campaign-id parameter was retired by the service in August 2011;
/// requests must always send `-1` in its position.
const RETIRED_CAMPAIGN_ID: &str = "-1";

/// The status of a publisher's application to an advertiser's program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Approved,
    ApprovalExtended,
    Wait,
    TempRemoved,
    TempRejected,
    PermRemoved,
    PermRejected,
    SelfRemoved,
}

impl ApplicationStatus {
    const ALL: [Self; 8] = [
        Self::Approved,
        Self::ApprovalExtended,
        Self::Wait,
        Self::TempRemoved,
        Self::TempRejected,
        Self::PermRemoved,
        Self::PermRejected,
        Self::SelfRemoved,
    ];

    /// The wire form of the status, as the service spells it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::ApprovalExtended => "approval extended",
            Self::Wait => "wait",
            Self::TempRemoved => "temp removed",
            Self::TempRejected => "temp rejected",
            Self::PermRemoved => "perm removed",
            Self::PermRejected => "perm rejected",
            Self::SelfRemoved => "self removed",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = LinkshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let accepted: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                LinkshareError::InvalidParameter(format!(
                    "application status must be one of ({})",
                    accepted.join(", ")
                ))
            })
    }
}

/// One logical LinkLocator operation with its positional parameters.
///
/// An immutable value: render it as many times as you like, build a new
/// one per logical call. Unset optional date filters render as empty path
/// segments, which is how the service expects omitted positional
/// parameters.
///
/// For the creative feeds, `merchant_id` and `category_id` use `-1` to
/// mean "no filter".
#[derive(Debug, Clone, PartialEq)]
pub enum LinkLocatorRequest {
    /// Download one advertiser's record by LinkShare Advertiser ID.
    MerchantById(u64),
    /// Download one advertiser's record by exact advertiser name.
    MerchantByName(String),
    /// Download advertisers in the given advertiser category.
    MerchantByCategory(u64),
    /// Download advertisers whose application has the given status.
    MerchantByAppStatus(ApplicationStatus),
    /// List the creative categories an advertiser places links into.
    CreativeCategories(u64),
    /// Available text links, optionally filtered.
    TextLinks {
        merchant_id: i64,
        category_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        page: u32,
    },
    /// Available banner links, optionally filtered. `size` is the banner
    /// size code, `-1` for any.
    BannerLinks {
        merchant_id: i64,
        category_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        size: i64,
        page: u32,
    },
    /// Available DRM links, optionally filtered.
    DrmLinks {
        merchant_id: i64,
        category_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        page: u32,
    },
    /// Individual product links for one advertiser and creative category.
    ProductLinks { merchant_id: u64, category_id: u64, page: u32 },
}

impl LinkLocatorRequest {
    /// The sub-service name, as spelled in the request path.
    #[must_use]
    pub fn sub_api(&self) -> &'static str {
        match self {
            Self::MerchantById(_) => "getMerchByID",
            Self::MerchantByName(_) => "getMerchByName",
            Self::MerchantByCategory(_) => "getMerchByCategory",
            Self::MerchantByAppStatus(_) => "getMerchByAppStatus",
            Self::CreativeCategories(_) => "getCreativeCategories",
            Self::TextLinks { .. } => "getTextLinks",
            Self::BannerLinks { .. } => "getBannerLinks",
            Self::DrmLinks { .. } => "getDRMLinks",
            Self::ProductLinks { .. } => "getProductLinks",
        }
    }

    /// Renders the sub-service name and positional segments as a path
    /// fragment, e.g. `getTextLinks/-1/-1///-1/1`.
    #[must_use]
    pub fn path(&self) -> String {
        let segments = self.segments();
        if segments.is_empty() {
            self.sub_api().to_owned()
        } else {
            format!("{}/{}", self.sub_api(), segments.join("/"))
        }
    }

    /// The full request URL under the given endpoint base.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!("{}/{API_NAME}/{API_VERSION}/{}", base.trim_end_matches('/'), self.path())
    }

    fn segments(&self) -> Vec<String> {
        match self {
            Self::MerchantById(id) => vec![id.to_string()],
            Self::MerchantByName(name) => vec![name.clone()],
            Self::MerchantByCategory(category) => vec![category.to_string()],
            Self::MerchantByAppStatus(status) => vec![status.as_str().to_owned()],
            Self::CreativeCategories(merchant_id) => vec![merchant_id.to_string()],
            Self::TextLinks { merchant_id, category_id, start_date, end_date, page }
            | Self::DrmLinks { merchant_id, category_id, start_date, end_date, page } => vec![
                merchant_id.to_string(),
                category_id.to_string(),
                feed_date(*start_date),
                feed_date(*end_date),
                RETIRED_CAMPAIGN_ID.to_owned(),
                page.to_string(),
            ],
            Self::BannerLinks { merchant_id, category_id, start_date, end_date, size, page } => {
                vec![
                    merchant_id.to_string(),
                    category_id.to_string(),
                    feed_date(*start_date),
                    feed_date(*end_date),
                    size.to_string(),
                    RETIRED_CAMPAIGN_ID.to_owned(),
                    page.to_string(),
                ]
            }
            Self::ProductLinks { merchant_id, category_id, page } => vec![
                merchant_id.to_string(),
                category_id.to_string(),
                RETIRED_CAMPAIGN_ID.to_owned(),
                page.to_string(),
            ],
        }
    }
}

/// `MMDDYYYY`, or an empty segment when the filter is unset.
fn feed_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(FEED_DATE_FORMAT).to_string()).unwrap_or_default()
}
