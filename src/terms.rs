//! Commission-terms parser.
//!
//! Advertiser offers carry their commission schedule as a free-text,
//! pipe-delimited mini-language inside a single XML field:
//!
//! ```text
//! sale : 0-1000 4% | 1000-2000 5.5% | 2000 and above 6%
//! flat : 0 and above 2.40
//! ```
//!
//! Each term is a priced band, either bounded (`<lower>-<upper>`) or
//! open-ended (`<lower> and above`), with an amount that is a percentage
//! when suffixed with `%` and a flat currency amount otherwise.
//!
//! The parser is deliberately tolerant: a missing type tag yields an empty
//! map, and a term matching neither form contributes no tier. Callers must
//! not assume every term in the source text survives parsing.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// `^(\w+) : ` — the commission type tag that opens the term string.
static TYPE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<offer_type>\w+) : ").expect("type tag pattern is valid"));

/// Combined bounded / open-ended term pattern.
///
/// Numbers follow the upstream convention `([0-9]+)?\.?[0-9]+`, which
/// accepts `100`, `5.5`, and `.5`.
static TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^
          (?P<lower_bound>(?:[0-9]+)?\.?[0-9]+)
          (?:
              -(?P<upper_bound>(?:[0-9]+)?\.?[0-9]+)
            | \ and\ above
          )
          \ (?P<amount>(?:[0-9]+)?\.?[0-9]+)
          (?P<is_percentage>%)?
        $",
    )
    .expect("term pattern is valid")
});

/// One priced band within a commission-terms specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommissionTier {
    /// Inclusive lower bound of the band.
    pub lower_bound: f64,
    /// Upper bound of the band; `None` for an open-ended "and above" tier.
    pub upper_bound: Option<f64>,
    /// Commission amount for the band.
    pub amount: f64,
    /// Whether the amount is a percentage rather than a flat amount.
    pub is_percentage: bool,
}

/// Commission schedules keyed by commission type (e.g. `"sale"`, `"flat"`).
///
/// Tiers are kept in source order; the last tier of a schedule may be
/// open-ended.
pub type CommissionTerms = BTreeMap<String, Vec<CommissionTier>>;

/// Parses a commission-terms string into schedules keyed by type.
///
/// Empty input, input with no recognizable type tag, and terms matching
/// neither the bounded nor the open-ended form all degrade silently:
/// the result is simply missing those entries, never an error.
pub fn parse_commission_terms(source: &str) -> CommissionTerms {
    let mut terms = CommissionTerms::new();

    let Some(captures) = TYPE_TAG.captures(source) else {
        return terms;
    };
    let commission_type = captures["offer_type"].to_owned();

    let tiers: Vec<CommissionTier> = split_terms(source)
        .iter()
        .filter_map(|term| parse_term(term))
        .collect();

    terms.insert(commission_type, tiers);
    terms
}

/// Splits the remainder after the first `:` on `|`, trimming each piece.
fn split_terms(source: &str) -> Vec<&str> {
    let Some(colon) = source.find(':') else {
        return Vec::new();
    };
    source[colon + 1..].trim().split('|').map(str::trim).collect()
}

/// Parses a single term into a tier, or `None` if it matches neither form
/// or a captured number fails to parse.
fn parse_term(term: &str) -> Option<CommissionTier> {
    let captures = TERM.captures(term)?;

    let lower_bound: f64 = captures["lower_bound"].parse().ok()?;
    let upper_bound = match captures.name("upper_bound") {
        Some(upper) => Some(upper.as_str().parse().ok()?),
        None => None,
    };
    let amount: f64 = captures["amount"].parse().ok()?;
    let is_percentage = captures.name("is_percentage").is_some();

    Some(CommissionTier { lower_bound, upper_bound, amount, is_percentage })
}
