mod diesel_queries;

use std::fmt::Debug;

use anyhow::Error;
use async_trait::async_trait;
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use diesel_async_migrations::{embed_migrations, EmbeddedMigrations};
use linkfeed_common_types::inputs::{LinkFilter, LinkQuery};
use tracing::{debug, info};

use crate::models::{Link, NewLink};
use crate::{FeedPage, LinkStore};

/// An abstraction over all database operations. It uses [`std::sync::Arc`]
/// internally, so it's cheaply cloneable.
#[derive(Clone)]
pub struct Store {
    pool: Pool<AsyncPgConnection>,
}

impl Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // It might contain sensitive data, so don't print it.
        f.debug_struct("Store").finish()
    }
}

impl Store {
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    /// Connects to the database and runs all pending migrations.
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        info!("Initializing database connection pool");

        let manager = AsyncDieselConnectionManager::new(db_url);
        let pool = Pool::builder(manager).build()?;
        let store = Self { pool };

        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> anyhow::Result<()> {
        let mut conn = self.pool.get().await?;

        // Get a lock for running migrations. Blocks until we get the lock.
        // Several instances may start at once against the same database.
        diesel::sql_query("select pg_advisory_lock(1)")
            .execute(&mut conn)
            .await?;
        info!("Run database migrations");

        let result = Self::MIGRATIONS
            .run_pending_migrations(&mut conn)
            .await
            .map_err(|e| anyhow::anyhow!(e));

        diesel::sql_query("select pg_advisory_unlock(1)")
            .execute(&mut conn)
            .await?;

        result
    }

    pub async fn conn(&self) -> anyhow::Result<Object<AsyncPgConnection>> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl LinkStore for Store {
    async fn links(&self, query: &LinkQuery) -> anyhow::Result<Vec<Link>> {
        let mut conn = self.conn().await?;
        diesel_queries::links(&mut conn, query).await
    }

    async fn count_links(&self, filter: &LinkFilter) -> anyhow::Result<i64> {
        let mut conn = self.conn().await?;
        diesel_queries::count_links(&mut conn, filter).await
    }

    /// Both reads run in the same read-only, repeatable-read transaction, so
    /// the count always agrees with the page even under concurrent inserts.
    async fn feed_page(&self, query: &LinkQuery) -> anyhow::Result<FeedPage> {
        let mut conn = self.conn().await?;

        let page = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let links = diesel_queries::links(conn, query).await?;
                    let count = diesel_queries::count_links(conn, &query.filter).await?;
                    Ok::<_, Error>(FeedPage { links, count })
                }
                .scope_boxed()
            })
            .await?;

        debug!(
            links = page.links.len(),
            count = page.count,
            "Loaded feed page"
        );
        Ok(page)
    }

    async fn create_link(&self, new_link: NewLink) -> anyhow::Result<Link> {
        let mut conn = self.conn().await?;
        let link = diesel_queries::create_link(&mut conn, &new_link).await?;

        info!(id = link.id, url = %link.url, "Created link");
        Ok(link)
    }
}
