//! Structs and complex datatypes that may serve as inputs, filters, or requests
//! for the GraphQL API.

use quickcheck::{Arbitrary, Gen};
use serde::{Deserialize, Serialize};

use crate::{LinkOrderByInput, OrderKey};

/// The arguments of the `feed` query, exactly as the client sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedArgs {
    /// Substring to look for in the description or URL of links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// How many matching links to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i32>,
    /// Upper limit on the number of returned links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<i32>,
    /// Sort keys, most significant first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<Vec<LinkOrderByInput>>,
}

impl FeedArgs {
    pub const FINGERPRINT_PREFIX: &'static str = "main-feed:";

    /// A deterministic identifier for this argument set: the prefix followed
    /// by the JSON encoding of the arguments, with a fixed field order and
    /// absent arguments left out.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        Ok(format!(
            "{}{}",
            Self::FINGERPRINT_PREFIX,
            serde_json::to_string(self)?
        ))
    }
}

impl Arbitrary for FeedArgs {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            filter: Option::arbitrary(g),
            skip: Option::arbitrary(g),
            take: Option::arbitrary(g),
            order_by: Option::arbitrary(g),
        }
    }
}

/// Substring predicate over the description and URL of links.
///
/// An empty search string is the same as no search string: it matches every
/// link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    contains: Option<String>,
}

impl LinkFilter {
    pub fn new(search: Option<&str>) -> Self {
        Self {
            contains: search.filter(|s| !s.is_empty()).map(str::to_owned),
        }
    }

    /// A filter that matches every link.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains(&self) -> Option<&str> {
        self.contains.as_deref()
    }

    /// Whether a link with this description and URL satisfies the predicate.
    pub fn matches(&self, description: &str, url: &str) -> bool {
        match &self.contains {
            Some(needle) => description.contains(needle.as_str()) || url.contains(needle.as_str()),
            None => true,
        }
    }

    /// The SQL `LIKE` pattern for this filter, if it filters anything. `LIKE`
    /// metacharacters in the search string are escaped with `\` so that they
    /// match literally.
    pub fn like_pattern(&self) -> Option<String> {
        let needle = self.contains.as_deref()?;

        let mut pattern = String::with_capacity(needle.len() + 2);
        pattern.push('%');
        for c in needle.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');

        Some(pattern)
    }
}

/// What the store needs to know to produce a page of links: which links
/// match, in which order, and what window of them to return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkQuery {
    pub filter: LinkFilter,
    pub order_by: Vec<OrderKey>,
    /// Number of matching links to skip, `None` for none.
    pub skip: Option<u32>,
    /// Maximum number of links to return, `None` for no limit.
    pub take: Option<u32>,
}
