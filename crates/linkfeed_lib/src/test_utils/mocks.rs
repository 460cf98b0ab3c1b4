use anyhow::anyhow;
use async_trait::async_trait;
use linkfeed_common_types::inputs::{LinkFilter, LinkQuery};
use linkfeed_store::models::{Link, NewLink};
use linkfeed_store::LinkStore;

/// A [`LinkStore`] whose every operation fails with the same error, as if the
/// database were unreachable.
#[derive(Clone, Debug)]
pub struct FailingStore {
    pub message: String,
}

impl FailingStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl LinkStore for FailingStore {
    async fn links(&self, _query: &LinkQuery) -> anyhow::Result<Vec<Link>> {
        Err(anyhow!("{}", self.message))
    }

    async fn count_links(&self, _filter: &LinkFilter) -> anyhow::Result<i64> {
        Err(anyhow!("{}", self.message))
    }

    async fn create_link(&self, _new_link: NewLink) -> anyhow::Result<Link> {
        Err(anyhow!("{}", self.message))
    }
}
