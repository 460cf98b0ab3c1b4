pub mod api_types;
pub mod resolvers;
mod server;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema, SchemaBuilder};
use linkfeed_store::{InMemoryStore, LinkStore};

pub use self::server::{MutationRoot, QueryRoot};
use crate::config::FeedConfig;

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The dependencies of the resolver roots. They receive it once, when the
/// schema is built, and pass its parts on to the resolver functions.
#[derive(Clone)]
pub struct ApiSchemaContext {
    pub store: Arc<dyn LinkStore>,
    pub feed: FeedConfig,
}

impl ApiSchemaContext {
    pub fn new(store: impl LinkStore + 'static, feed: FeedConfig) -> Self {
        Self {
            store: Arc::new(store),
            feed,
        }
    }
}

pub fn api_schema_builder(
    ctx: ApiSchemaContext,
) -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(
        QueryRoot::new(ctx.clone()),
        MutationRoot::new(ctx),
        EmptySubscription,
    )
}

pub fn api_schema(ctx: ApiSchemaContext) -> ApiSchema {
    api_schema_builder(ctx).finish()
}

/// The GraphQL SDL of the API. The schema's shape doesn't depend on its
/// store, so an empty in-memory one is used.
pub fn api_schema_sdl() -> String {
    api_schema(ApiSchemaContext::new(
        InMemoryStore::new(),
        FeedConfig::default(),
    ))
    .sdl()
}
