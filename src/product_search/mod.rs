//! ProductSearch sub-service: keyword search over advertiser product feeds.
//!
//! The request side is an immutable [`ProductSearchQuery`] built by
//! consuming chainable setters; each call returns a new value, so a query
//! can be rendered repeatedly and never needs resetting between logical
//! calls. The response side decodes the XML body into a
//! [`ProductSearchResult`].
//!
//! # Examples
//!
//! ```
//! use linkshare_client::product_search::{ProductSearchQuery, SortColumn, SortOrder};
//!
//! let query = ProductSearchQuery::new()
//!     .keyword("shoes")
//!     .max_results(50)
//!     .sort(SortColumn::RetailPrice, SortOrder::Asc);
//!
//! assert_eq!(query.query_string(), "keyword=shoes&max=50&sort=retailprice&sorttype=asc");
//! ```

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::error::LinkshareError;

mod models;

pub use models::{ProductItem, ProductSearchResult, SearchError};

/// API name segment in the endpoint URL.
pub const API_NAME: &str = "productsearch";
/// API version segment in the endpoint URL.
pub const API_VERSION: &str = "1.0";

/// How the keyword parameter is interpreted by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    /// Match any of the keywords.
    Keyword,
    /// Match the exact phrase.
    Exact,
    /// Match at least one keyword.
    One,
    /// Exclude the keywords.
    None,
}

impl SearchMethod {
    const ALL: [Self; 4] = [Self::Keyword, Self::Exact, Self::One, Self::None];

    /// The query-parameter name this method submits the keyword under.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Exact => "exact",
            Self::One => "one",
            Self::None => "none",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMethod {
    type Err = LinkshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| membership_error("search method", &Self::ALL.map(Self::as_str)))
    }
}

/// Column a search result can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    RetailPrice,
    ProductName,
    ShortDescription,
    Category,
    MerchantId,
    Keyword,
}

impl SortColumn {
    const ALL: [Self; 6] = [
        Self::RetailPrice,
        Self::ProductName,
        Self::ShortDescription,
        Self::Category,
        Self::MerchantId,
        Self::Keyword,
    ];

    /// The wire form of the column, as the service spells it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RetailPrice => "retailprice",
            Self::ProductName => "productname",
            Self::ShortDescription => "shortdesp",
            Self::Category => "categoryname",
            Self::MerchantId => "mid",
            Self::Keyword => "keyword",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = LinkshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| membership_error("sort column", &Self::ALL.map(Self::as_str)))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    const ALL: [Self; 2] = [Self::Asc, Self::Desc];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = LinkshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| membership_error("sort type", &Self::ALL.map(Self::as_str)))
    }
}

fn membership_error(what: &str, accepted: &[&str]) -> LinkshareError {
    LinkshareError::InvalidParameter(format!("{what} must be one of ({})", accepted.join(", ")))
}

/// An immutable product-search query.
///
/// Setters consume the query and return a new value, so there is nothing
/// to reset between logical calls; build a fresh query (or clone and
/// amend one) per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSearchQuery {
    keyword: Option<(SearchMethod, String)>,
    category: Option<String>,
    max_results: Option<u32>,
    page_number: Option<u32>,
    merchant_id: Option<u64>,
    sort: Option<(SortColumn, SortOrder)>,
}

impl ProductSearchQuery {
    /// An empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword with the default [`SearchMethod::Keyword`] method.
    #[must_use]
    pub fn keyword(self, keyword: impl Into<String>) -> Self {
        self.keyword_with_method(keyword, SearchMethod::Keyword)
    }

    /// Sets the keyword under a specific search method.
    ///
    /// Only one method is submitted per query; setting a new method
    /// replaces the previous one rather than accumulating parameters.
    #[must_use]
    pub fn keyword_with_method(mut self, keyword: impl Into<String>, method: SearchMethod) -> Self {
        self.keyword = Some((method, keyword.into()));
        self
    }

    /// Restricts the search to a product category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Maximum results per page.
    #[must_use]
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Page number of the results to fetch.
    #[must_use]
    pub fn page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Restricts the search to one advertiser.
    #[must_use]
    pub fn merchant_id(mut self, merchant_id: u64) -> Self {
        self.merchant_id = Some(merchant_id);
        self
    }

    /// Sorts the results on one column.
    #[must_use]
    pub fn sort(mut self, column: SortColumn, order: SortOrder) -> Self {
        self.sort = Some((column, order));
        self
    }

    /// Renders the set parameters as a URL-encoded query string.
    ///
    /// Unset parameters are omitted entirely.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if let Some((method, keyword)) = &self.keyword {
            serializer.append_pair(method.as_str(), keyword);
        }
        if let Some(category) = &self.category {
            serializer.append_pair("category", category);
        }
        if let Some(max_results) = self.max_results {
            serializer.append_pair("max", &max_results.to_string());
        }
        if let Some(page_number) = self.page_number {
            serializer.append_pair("pagenumber", &page_number.to_string());
        }
        if let Some(merchant_id) = self.merchant_id {
            serializer.append_pair("mid", &merchant_id.to_string());
        }
        if let Some((column, order)) = self.sort {
            serializer.append_pair("sort", column.as_str());
            serializer.append_pair("sorttype", order.as_str());
        }

        serializer.finish()
    }

    /// The full request URL under the given endpoint base.
    #[must_use]
    pub fn url(&self, base: &str) -> String {
        format!(
            "{}/{API_NAME}/{API_VERSION}?{}",
            base.trim_end_matches('/'),
            self.query_string()
        )
    }
}
