use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use super::schema::*;

pub type IntId = i32;

/// A bookmarked URL, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize)]
#[diesel(table_name = links)]
pub struct Link {
    pub id: IntId,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Insertable, Deserialize)]
#[diesel(table_name = links)]
pub struct NewLink {
    pub description: String,
    pub url: String,
}

impl NewLink {
    pub fn new(description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            url: url.into(),
        }
    }
}
