use async_graphql::{Object, SimpleObject, ID};
use linkfeed_store::models::{self, IntId};

/// A bookmarked URL with a description.
#[derive(Clone, Debug, derive_more::From)]
pub struct Link {
    model: models::Link,
}

impl Link {
    pub fn id(&self) -> IntId {
        self.model.id
    }

    pub fn description(&self) -> &str {
        self.model.description.as_str()
    }

    pub fn url(&self) -> &str {
        self.model.url.as_str()
    }
}

#[Object]
impl Link {
    /// Unique identifier, assigned when the link is posted.
    #[graphql(name = "id")]
    async fn graphql_id(&self) -> IntId {
        self.id()
    }

    #[graphql(name = "description")]
    async fn graphql_description(&self) -> &str {
        self.description()
    }

    /// The bookmarked URL. It is stored as given, without validation.
    #[graphql(name = "url")]
    async fn graphql_url(&self) -> &str {
        self.url()
    }
}

/// A page of links matching a `feed` query.
#[derive(Debug, SimpleObject)]
pub struct Feed {
    /// The links in the requested window, in the requested order.
    pub links: Vec<Link>,
    /// How many links match the filter, regardless of `skip` and `take`.
    pub count: i64,
    /// Deterministic identifier derived from the query arguments. Identical
    /// arguments always produce the same identifier.
    pub id: Option<ID>,
}
