//! Category, vendor and free-text filtering over the catalog.
//!
//! Text matching has two tiers. A product is kept when the query is a
//! case-insensitive substring of its name or vendor name, or when the
//! query's characters occur in order (not necessarily adjacent) in its
//! name, description, vendor name or space-joined tags. Filtering keeps
//! catalog order; neither tier ranks results.

use crate::catalog::{Category, Product};
use regex::{Regex, RegexBuilder};
use std::str::FromStr;
use tracing::debug;

/// Sentinel value that disables a category or vendor filter.
pub const ALL: &str = "All";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl FromStr for CategoryFilter {
    type Err = crate::catalog::UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum VendorFilter {
    #[default]
    All,
    Only(String),
}

impl From<Option<&str>> for VendorFilter {
    /// Absent and the "All" sentinel both disable the filter.
    fn from(id: Option<&str>) -> Self {
        match id {
            None | Some(ALL) => Self::All,
            Some(id) => Self::Only(id.to_string()),
        }
    }
}

/// Compiled form of a non-empty, trimmed query.
#[derive(Debug)]
pub struct QueryMatcher {
    lowered: String,
    fuzzy: Option<Regex>,
}

impl QueryMatcher {
    /// `None` when the query is blank, meaning nothing is excluded.
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }

        let fuzzy = match fuzzy_pattern(trimmed) {
            Ok(regex) => Some(regex),
            Err(err) => {
                debug!(error = %err, "fuzzy pattern rejected; matching subsequences directly");
                None
            }
        };

        Some(Self {
            lowered: trimmed.to_lowercase(),
            fuzzy,
        })
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_exact(product) || self.matches_fuzzy(product)
    }

    fn matches_exact(&self, product: &Product) -> bool {
        product.name.to_lowercase().contains(&self.lowered)
            || product.vendor.name.to_lowercase().contains(&self.lowered)
    }

    fn matches_fuzzy(&self, product: &Product) -> bool {
        let tags = product.tags.join(" ");
        let fields = [
            product.name.as_str(),
            product.description.as_str(),
            product.vendor.name.as_str(),
            tags.as_str(),
        ];
        match &self.fuzzy {
            Some(regex) => fields.iter().any(|f| regex.is_match(f)),
            None => fields
                .iter()
                .any(|f| is_subsequence(&self.lowered, &f.to_lowercase())),
        }
    }
}

/// Each query character escaped, joined by a lazy "anything" run.
fn fuzzy_pattern(query: &str) -> Result<Regex, regex::Error> {
    let pattern = query
        .chars()
        .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
        .collect::<Vec<_>>()
        .join(".*?");

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut rest = haystack.chars();
    needle.chars().all(|c| rest.any(|h| h == c))
}

/// Products passing all three filters, in catalog order.
pub fn filter<'a>(
    products: &'a [Product],
    query: &str,
    category: &CategoryFilter,
    vendor: &VendorFilter,
) -> Vec<&'a Product> {
    let matcher = QueryMatcher::new(query);

    products
        .iter()
        .filter(|p| match category {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => p.category == *c,
        })
        .filter(|p| match vendor {
            VendorFilter::All => true,
            VendorFilter::Only(id) => p.vendor.id == *id,
        })
        .filter(|p| matcher.as_ref().is_none_or(|m| m.matches(p)))
        .collect()
}
