//! Provides the diesel queries, callers should handle connection pooling and
//! transactions.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use linkfeed_common_types::inputs::{LinkFilter, LinkQuery};
use linkfeed_common_types::{LinkField, OrderKey, Sort};

use crate::models::{Link, NewLink};
use crate::schema::links;

type BoxedLinksQuery = links::BoxedQuery<'static, Pg>;

/// All links matching `filter`, without ordering or pagination. Both the page
/// and the count queries start from here, so they always share a predicate.
fn filtered_links(filter: &LinkFilter) -> BoxedLinksQuery {
    let mut query = links::table.into_boxed();

    if let Some(pattern) = filter.like_pattern() {
        query = query.filter(
            links::description
                .like(pattern.clone())
                .or(links::url.like(pattern)),
        );
    }

    query
}

fn ordered(mut query: BoxedLinksQuery, order_by: &[OrderKey]) -> BoxedLinksQuery {
    for key in order_by {
        query = match (key.field, key.direction) {
            (LinkField::Description, Sort::Asc) => query.then_order_by(links::description.asc()),
            (LinkField::Description, Sort::Desc) => {
                query.then_order_by(links::description.desc())
            }
            (LinkField::Url, Sort::Asc) => query.then_order_by(links::url.asc()),
            (LinkField::Url, Sort::Desc) => query.then_order_by(links::url.desc()),
        };
    }

    // Ties are broken by insertion order, so that offsets are stable across
    // requests.
    query.then_order_by(links::id.asc())
}

// This is a single SQL statement, a transaction is not necessary.
pub(super) async fn links(
    conn: &mut AsyncPgConnection,
    query: &LinkQuery,
) -> anyhow::Result<Vec<Link>> {
    let mut statement = ordered(filtered_links(&query.filter), &query.order_by);

    if let Some(skip) = query.skip {
        statement = statement.offset(i64::from(skip));
    }
    if let Some(take) = query.take {
        statement = statement.limit(i64::from(take));
    }

    Ok(statement.load::<Link>(conn).await?)
}

pub(super) async fn count_links(
    conn: &mut AsyncPgConnection,
    filter: &LinkFilter,
) -> anyhow::Result<i64> {
    Ok(filtered_links(filter)
        .count()
        .get_result::<i64>(conn)
        .await?)
}

pub(super) async fn create_link(
    conn: &mut AsyncPgConnection,
    new_link: &NewLink,
) -> anyhow::Result<Link> {
    Ok(diesel::insert_into(links::table)
        .values(new_link)
        .returning(links::all_columns)
        .get_result::<Link>(conn)
        .await?)
}
