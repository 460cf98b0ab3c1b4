//! GraphQL API types.
//!
//! The ordering types are shared with the store, which translates them into
//! SQL `ORDER BY` clauses.

pub mod inputs;

use async_graphql::{Enum, InputObject};
use quickcheck::{Arbitrary, Gen};
use serde::{Deserialize, Serialize};

/// Direction of a single sort key.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, strum::Display,
)]
#[graphql(rename_items = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sort {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Arbitrary for Sort {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Sort::Asc
        } else {
            Sort::Desc
        }
    }
}

/// The columns of a link that a feed can be ordered by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LinkField {
    Description,
    Url,
}

/// A single sort key: a column together with its direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OrderKey {
    pub field: LinkField,
    pub direction: Sort,
}

/// One entry of the `orderBy` list of the `feed` query. Entries are applied
/// in list order, the first one being the primary sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, InputObject, Serialize, Deserialize)]
pub struct LinkOrderByInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Sort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Sort>,
}

impl LinkOrderByInput {
    /// The sort key this entry stands for. Entries setting zero or both
    /// fields don't name a single key, so they yield `None`.
    pub fn key(&self) -> Option<OrderKey> {
        match (self.description, self.url) {
            (Some(direction), None) => Some(OrderKey {
                field: LinkField::Description,
                direction,
            }),
            (None, Some(direction)) => Some(OrderKey {
                field: LinkField::Url,
                direction,
            }),
            _ => None,
        }
    }
}

impl From<OrderKey> for LinkOrderByInput {
    fn from(key: OrderKey) -> Self {
        match key.field {
            LinkField::Description => Self {
                description: Some(key.direction),
                url: None,
            },
            LinkField::Url => Self {
                description: None,
                url: Some(key.direction),
            },
        }
    }
}

impl Arbitrary for LinkOrderByInput {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            description: Option::arbitrary(g),
            url: Option::arbitrary(g),
        }
    }
}
