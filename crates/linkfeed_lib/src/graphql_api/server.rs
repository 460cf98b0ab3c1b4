use async_graphql::{Object, Result};
use linkfeed_common_types::inputs::FeedArgs;
use linkfeed_common_types::LinkOrderByInput;

use super::{api_types, resolvers, ApiSchemaContext};
use crate::metrics;

pub struct QueryRoot {
    ctx: ApiSchemaContext,
}

impl QueryRoot {
    pub fn new(ctx: ApiSchemaContext) -> Self {
        Self { ctx }
    }
}

#[Object]
impl QueryRoot {
    /// Lists posted links, optionally filtered, ordered, and paginated.
    async fn feed(
        &self,
        #[graphql(
            desc = "Only return links whose description or URL contains this string. An empty string matches every link."
        )]
        filter: Option<String>,
        #[graphql(
            validator(minimum = 0),
            desc = "How many matching links to skip before the returned page starts."
        )]
        skip: Option<i32>,
        #[graphql(
            validator(minimum = 0),
            desc = "Upper limit on the number of returned links."
        )]
        take: Option<i32>,
        #[graphql(desc = "Sort keys, most significant first. Each entry must set exactly one field.")]
        order_by: Option<Vec<LinkOrderByInput>>,
    ) -> Result<api_types::Feed> {
        let args = FeedArgs {
            filter,
            skip,
            take,
            order_by,
        };

        let feed = resolvers::feed(self.ctx.store.as_ref(), &self.ctx.feed, args).await;
        metrics().observe("feed", &feed);

        Ok(feed?)
    }
}

pub struct MutationRoot {
    ctx: ApiSchemaContext,
}

impl MutationRoot {
    pub fn new(ctx: ApiSchemaContext) -> Self {
        Self { ctx }
    }
}

#[Object]
impl MutationRoot {
    /// Posts a new link and returns it with its assigned ID.
    async fn post(
        &self,
        #[graphql(validator(min_length = 1))] description: String,
        #[graphql(validator(min_length = 1))] url: String,
    ) -> Result<api_types::Link> {
        let link = resolvers::post(self.ctx.store.as_ref(), description, url).await;
        metrics().observe("post", &link);

        Ok(link?)
    }
}
