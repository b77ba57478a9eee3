//! LinkLocator response models.
//!
//! Every decoder here is a one-way, tolerant mapping from an XML node to a
//! value object: absent elements become `None` (or an empty list for
//! list-valued fields), text is trimmed, and numbers follow the coercion
//! rule in [`crate::xml`]. Decoders are pure functions of their input and
//! never validate cross-field consistency.

use std::fmt;

use roxmltree::Node;
use serde::Serialize;

use crate::error::Result;
use crate::terms::{CommissionTerms, parse_commission_terms};
use crate::xml;

/// Column layout shared by the diagnostic renderings.
const COLUMN: usize = 23;

fn write_field(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "{label:<COLUMN$} {value}")
}

/// The advertiser offer you are participating in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offer {
    /// An alternate name for the advertiser, often an abbreviated version.
    pub also_name: Option<String>,
    /// Commission schedules parsed from the pipe-delimited terms field.
    pub commission_terms: CommissionTerms,
    /// The ID number of the offer.
    pub id: Option<i64>,
    /// The name of the offer.
    pub name: Option<String>,
}

impl Offer {
    pub(crate) fn decode(node: Node<'_, '_>) -> Self {
        Self {
            also_name: xml::text(node, "alsoname"),
            commission_terms: xml::text(node, "commissionterms")
                .map(|t| parse_commission_terms(&t))
                .unwrap_or_default(),
            id: xml::int(node, "offerid"),
            name: xml::text(node, "offername"),
        }
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, "Offer ID", &self.id.map(|v| v.to_string()).unwrap_or_default())?;
        write_field(f, "Offer Name", self.name.as_deref().unwrap_or_default())?;
        write_field(f, "Also Name", self.also_name.as_deref().unwrap_or_default())?;
        for (commission_type, tiers) in &self.commission_terms {
            for tier in tiers {
                let band = match tier.upper_bound {
                    Some(upper) => format!("{}-{upper}", tier.lower_bound),
                    None => format!("{} and above", tier.lower_bound),
                };
                let suffix = if tier.is_percentage { "%" } else { "" };
                write_field(
                    f,
                    &format!("Terms ({commission_type})"),
                    &format!("{band} {}{suffix}", tier.amount),
                )?;
            }
        }
        Ok(())
    }
}

/// An advertiser record produced from one `<return>` node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Merchant {
    /// The status of your application to this advertiser's program.
    pub application_status: Option<String>,
    /// The advertiser's category IDs.
    ///
    /// The source field is a space-delimited list; non-numeric tokens are
    /// dropped.
    pub categories: Vec<i64>,
    /// The advertiser's LinkShare ID number.
    pub id: Option<i64>,
    /// The name of the advertiser.
    pub name: Option<String>,
    /// The offer you are participating in, if any.
    pub offer: Option<Offer>,
}

impl Merchant {
    pub(crate) fn decode(node: Node<'_, '_>) -> Self {
        Self {
            application_status: xml::text(node, "applicationstatus"),
            categories: decode_categories(node),
            id: xml::int(node, "mid"),
            name: xml::text(node, "name"),
            offer: xml::child(node, "offer").map(Offer::decode),
        }
    }
}

fn decode_categories(node: Node<'_, '_>) -> Vec<i64> {
    let Some(raw) = xml::text(node, "categories") else {
        return Vec::new();
    };
    raw.split(' ').filter_map(|token| token.parse().ok()).collect()
}

impl fmt::Display for Merchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, "Merchant ID", &self.id.map(|v| v.to_string()).unwrap_or_default())?;
        write_field(f, "Merchant Name", self.name.as_deref().unwrap_or_default())?;
        write_field(f, "Application Status", self.application_status.as_deref().unwrap_or_default())?;
        let categories: Vec<String> = self.categories.iter().map(|c| c.to_string()).collect();
        write_field(f, "Categories", &categories.join(", "))?;
        if let Some(offer) = &self.offer {
            offer.fmt(f)?;
        }
        Ok(())
    }
}

/// A business-level failure reported inside an otherwise well-formed
/// response body.
///
/// Distinct from
/// [`LinkshareError::Authorization`](crate::error::LinkshareError::Authorization),
/// which is a transport-authorization failure detected before decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fault {
    /// The SOAP fault string.
    pub fault_string: Option<String>,
    /// The detail message under `detail/linklocfault/message`.
    pub message: Option<String>,
}

impl Fault {
    pub(crate) fn decode(node: Node<'_, '_>) -> Self {
        let message = xml::child(node, "detail")
            .and_then(|detail| xml::child(detail, "linklocfault"))
            .and_then(|fault| xml::text(fault, "message"));

        Self { fault_string: xml::text(node, "faultstring"), message }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, "Fault", self.fault_string.as_deref().unwrap_or_default())?;
        write_field(f, "Message", self.message.as_deref().unwrap_or_default())
    }
}

/// Decoded result of a LinkLocator call: either a [`Fault`] or a list of
/// [`Merchant`] records, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkLocatorResult {
    fault: Option<Fault>,
    merchants: Vec<Merchant>,
}

impl LinkLocatorResult {
    /// Decodes a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedResponse`](crate::error::LinkshareError::MalformedResponse)
    /// if the body is not well-formed XML. A fault *inside* well-formed XML
    /// is data, not an error; check [`has_fault`](Self::has_fault).
    pub fn from_xml(body: &str) -> Result<Self> {
        let document = xml::parse_document(body)?;
        Ok(Self::decode(document.root_element()))
    }

    /// Fault short-circuit: when both `faultstring` and `detail` are
    /// present the merchant list is left empty, even if `<return>` nodes
    /// also appear in the body.
    pub(crate) fn decode(node: Node<'_, '_>) -> Self {
        if xml::child(node, "faultstring").is_some() && xml::child(node, "detail").is_some() {
            return Self { fault: Some(Fault::decode(node)), merchants: Vec::new() };
        }

        let merchants = xml::children(node, "return").map(Merchant::decode).collect();
        Self { fault: None, merchants }
    }

    /// Whether the call failed at the service level.
    #[must_use]
    pub fn has_fault(&self) -> bool {
        self.fault.is_some()
    }

    /// The fault, if the call failed.
    #[must_use]
    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    /// The decoded merchants. Empty when the call faulted or no `<return>`
    /// nodes were present.
    #[must_use]
    pub fn merchants(&self) -> &[Merchant] {
        &self.merchants
    }
}

impl fmt::Display for LinkLocatorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fault) = &self.fault {
            return fault.fmt(f);
        }
        for merchant in &self.merchants {
            merchant.fmt(f)?;
        }
        Ok(())
    }
}
