//! ProductSearch response models.
//!
//! Same decoder contract as the LinkLocator models: absent elements become
//! `None`, list containers default to empty, text is trimmed, numbers use
//! leading-prefix coercion, and decoding is a pure function of the input.

use std::fmt;

use chrono::NaiveDateTime;
use roxmltree::Node;
use serde::Serialize;

use crate::error::Result;
use crate::xml;

const COLUMN: usize = 23;

fn write_field(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "{label:<COLUMN$} {value}")
}

/// Splits a `~~`-delimited list field, trimming each entry.
///
/// An absent container yields an empty list. Entries are kept verbatim
/// after trimming; no further filtering is applied.
fn split_tilde_list(raw: Option<String>) -> Vec<String> {
    match raw {
        Some(raw) => raw.split("~~").map(|entry| entry.trim().to_owned()).collect(),
        None => Vec::new(),
    }
}

/// One product record from a search result `<item>` node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductItem {
    /// The advertiser's LinkShare ID.
    pub merchant_id: Option<i64>,
    /// The advertiser's name.
    pub merchant_name: Option<String>,
    /// The link ID.
    pub link_id: Option<i64>,
    /// When the product record was created (`YYYY-MM-DD/HH:MM:SS`).
    pub created_on: Option<NaiveDateTime>,
    /// The advertiser's SKU for the product.
    pub sku: Option<String>,
    /// The product name.
    pub product_name: Option<String>,
    /// Primary categories, `~~`-delimited in the source.
    pub primary_categories: Vec<String>,
    /// Secondary categories, `~~`-delimited in the source.
    pub secondary_categories: Vec<String>,
    /// The retail price.
    pub retail_price: Option<f64>,
    /// Currency of the retail price, from the `currency` attribute.
    pub retail_price_currency: Option<String>,
    /// The sale price.
    pub sale_price: Option<f64>,
    /// Currency of the sale price, from the `currency` attribute.
    pub sale_price_currency: Option<String>,
    /// The UPC code.
    pub upc_code: Option<String>,
    /// The short description.
    pub short_description: Option<String>,
    /// The long description.
    pub long_description: Option<String>,
    /// Keywords attributed to the product, `~~`-delimited in the source.
    pub keywords: Vec<String>,
    /// The click-through link to the advertiser's page for the product.
    pub link_url: Option<String>,
    /// The product image URL on the advertiser's site.
    pub image_url: Option<String>,
}

impl ProductItem {
    pub(crate) fn decode(node: Node<'_, '_>) -> Self {
        let category = xml::child(node, "category");
        let description = xml::child(node, "description");
        let price = xml::child(node, "price");
        let sale_price = xml::child(node, "saleprice");

        Self {
            merchant_id: xml::int(node, "mid"),
            merchant_name: xml::text(node, "merchantname"),
            link_id: xml::int(node, "linkid"),
            created_on: xml::datetime(node, "createdon"),
            sku: xml::text(node, "sku"),
            product_name: xml::text(node, "productname"),
            primary_categories: split_tilde_list(category.and_then(|c| xml::text(c, "primary"))),
            secondary_categories: split_tilde_list(
                category.and_then(|c| xml::text(c, "secondary")),
            ),
            retail_price: price.map(|p| xml::coerce_float(p.text().unwrap_or("").trim())),
            retail_price_currency: price.and_then(|p| xml::attr(p, "currency")),
            sale_price: sale_price.map(|p| xml::coerce_float(p.text().unwrap_or("").trim())),
            sale_price_currency: sale_price.and_then(|p| xml::attr(p, "currency")),
            upc_code: xml::text(node, "upccode"),
            short_description: description.and_then(|d| xml::text(d, "short")),
            long_description: description.and_then(|d| xml::text(d, "long")),
            keywords: split_tilde_list(xml::text(node, "keywords")),
            link_url: xml::text(node, "linkurl"),
            image_url: xml::text(node, "imageurl"),
        }
    }
}

impl fmt::Display for ProductItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, "Merchant ID", &self.merchant_id.map(|v| v.to_string()).unwrap_or_default())?;
        write_field(f, "Merchant Name", self.merchant_name.as_deref().unwrap_or_default())?;
        write_field(f, "SKU", self.sku.as_deref().unwrap_or_default())?;
        write_field(f, "Product Name", self.product_name.as_deref().unwrap_or_default())?;
        let retail = match (&self.retail_price, &self.retail_price_currency) {
            (Some(price), Some(currency)) => format!("{price} {currency}"),
            (Some(price), None) => price.to_string(),
            _ => String::new(),
        };
        write_field(f, "Retail Price", &retail)?;
        let sale = match (&self.sale_price, &self.sale_price_currency) {
            (Some(price), Some(currency)) => format!("{price} {currency}"),
            (Some(price), None) => price.to_string(),
            _ => String::new(),
        };
        write_field(f, "Sale Price", &sale)?;
        write_field(f, "Link URL", self.link_url.as_deref().unwrap_or_default())
    }
}

/// An error reported by the search API inside the response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchError {
    /// Remote error ID.
    pub id: Option<i64>,
    /// Remote error text.
    pub text: Option<String>,
}

impl SearchError {
    pub(crate) fn decode(node: Node<'_, '_>) -> Self {
        Self { id: xml::int(node, "ErrorID"), text: xml::text(node, "ErrorText") }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, "Error ID", &self.id.map(|v| v.to_string()).unwrap_or_default())?;
        write_field(f, "Error Text", self.text.as_deref().unwrap_or_default())
    }
}

/// Decoded result of a product search: either a [`SearchError`] or paging
/// metadata plus a list of [`ProductItem`], never both.
///
/// Paging notes from the service contract: at most 4,000 records are
/// searchable; `total_matches` is `-1` when matches were dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSearchResult {
    error: Option<SearchError>,
    total_matches: Option<i64>,
    total_pages: Option<i64>,
    page_number: Option<i64>,
    items: Vec<ProductItem>,
}

impl ProductSearchResult {
    /// Decodes a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedResponse`](crate::error::LinkshareError::MalformedResponse)
    /// if the body is not well-formed XML. A remote-reported search error
    /// is data, not an error; check [`has_error`](Self::has_error).
    pub fn from_xml(body: &str) -> Result<Self> {
        let document = xml::parse_document(body)?;
        Ok(Self::decode(document.root_element()))
    }

    /// Error short-circuit: when an `<Errors>` element is present, the
    /// paging fields stay `None` and the item list stays empty.
    pub(crate) fn decode(node: Node<'_, '_>) -> Self {
        if let Some(errors) = xml::child(node, "Errors") {
            return Self {
                error: Some(SearchError::decode(errors)),
                total_matches: None,
                total_pages: None,
                page_number: None,
                items: Vec::new(),
            };
        }

        Self {
            error: None,
            total_matches: xml::int(node, "TotalMatches"),
            total_pages: xml::int(node, "TotalPages"),
            page_number: xml::int(node, "PageNumber"),
            items: xml::children(node, "item").map(ProductItem::decode).collect(),
        }
    }

    /// Whether the API reported an error for this search.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// The remote-reported error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    /// Total results found for the search; `-1` when the 4,000-record cap
    /// dropped matches.
    #[must_use]
    pub fn total_matches(&self) -> Option<i64> {
        self.total_matches
    }

    /// Total pages for this search.
    #[must_use]
    pub fn total_pages(&self) -> Option<i64> {
        self.total_pages
    }

    /// The current page number.
    #[must_use]
    pub fn page_number(&self) -> Option<i64> {
        self.page_number
    }

    /// The decoded items. Empty when the search errored or returned no
    /// `<item>` nodes.
    #[must_use]
    pub fn items(&self) -> &[ProductItem] {
        &self.items
    }
}

impl fmt::Display for ProductSearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return error.fmt(f);
        }
        write_field(
            f,
            "Total Matches",
            &self.total_matches.map(|v| v.to_string()).unwrap_or_default(),
        )?;
        write_field(f, "Total Pages", &self.total_pages.map(|v| v.to_string()).unwrap_or_default())?;
        write_field(f, "Page Number", &self.page_number.map(|v| v.to_string()).unwrap_or_default())?;
        for item in &self.items {
            item.fmt(f)?;
        }
        Ok(())
    }
}
