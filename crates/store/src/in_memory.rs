//! In-memory implementation of [`LinkStore`], for tests and for building the
//! API schema without a database.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use async_trait::async_trait;
use linkfeed_common_types::inputs::{LinkFilter, LinkQuery};
use linkfeed_common_types::{LinkField, OrderKey, Sort};

use crate::models::{IntId, Link, NewLink};
use crate::LinkStore;

/// Keeps links in insertion order behind a [`RwLock`]. IDs are assigned
/// sequentially, starting from 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    links: Arc<RwLock<Vec<Link>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matching(&self, filter: &LinkFilter) -> anyhow::Result<Vec<Link>> {
        let links = self
            .links
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(links
            .iter()
            .filter(|link| filter.matches(&link.description, &link.url))
            .cloned()
            .collect())
    }
}

fn compare(a: &Link, b: &Link, order_by: &[OrderKey]) -> Ordering {
    order_by
        .iter()
        .map(|key| {
            let ordering = match key.field {
                LinkField::Description => a.description.cmp(&b.description),
                LinkField::Url => a.url.cmp(&b.url),
            };
            match key.direction {
                Sort::Asc => ordering,
                Sort::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.id.cmp(&b.id))
}

#[async_trait]
impl LinkStore for InMemoryStore {
    async fn links(&self, query: &LinkQuery) -> anyhow::Result<Vec<Link>> {
        let mut links = self.matching(&query.filter)?;
        links.sort_by(|a, b| compare(a, b, &query.order_by));

        let skip = query.skip.map_or(0, |skip| skip as usize);
        let take = query.take.map_or(usize::MAX, |take| take as usize);

        Ok(links.into_iter().skip(skip).take(take).collect())
    }

    async fn count_links(&self, filter: &LinkFilter) -> anyhow::Result<i64> {
        Ok(self.matching(filter)?.len() as i64)
    }

    async fn create_link(&self, new_link: NewLink) -> anyhow::Result<Link> {
        let mut links = self
            .links
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let link = Link {
            id: links.len() as IntId + 1,
            description: new_link.description,
            url: new_link.url,
        };
        links.push(link.clone());

        Ok(link)
    }
}
