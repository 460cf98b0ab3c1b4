//! Database access (read and write) abstractions for the Linkfeed backend.

mod in_memory;
pub mod models;
mod schema;
mod store;

use async_trait::async_trait;
use linkfeed_common_types::inputs::{LinkFilter, LinkQuery};

pub use self::in_memory::InMemoryStore;
pub use self::store::Store;
use crate::models::{Link, NewLink};

/// A page of links together with the total number of links matching the same
/// filter, regardless of pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    pub links: Vec<Link>,
    pub count: i64,
}

/// Everything the API needs from a data store of links.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Returns the links matching `query.filter`, sorted and paginated
    /// according to the rest of `query`.
    async fn links(&self, query: &LinkQuery) -> anyhow::Result<Vec<Link>>;

    /// Counts all links matching `filter`.
    async fn count_links(&self, filter: &LinkFilter) -> anyhow::Result<i64>;

    /// Persists a new link and returns it, including its newly assigned ID.
    async fn create_link(&self, new_link: NewLink) -> anyhow::Result<Link>;

    /// Runs [`LinkStore::links`] and [`LinkStore::count_links`] with the same
    /// filter. By default the two reads are issued concurrently and may
    /// observe different states of the store.
    async fn feed_page(&self, query: &LinkQuery) -> anyhow::Result<FeedPage> {
        let (links, count) =
            futures::try_join!(self.links(query), self.count_links(&query.filter))?;

        Ok(FeedPage { links, count })
    }
}
