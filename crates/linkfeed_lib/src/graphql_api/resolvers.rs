//! The logic behind the API's operations. Resolvers are plain functions that
//! receive the store they operate on as an argument.

use linkfeed_common_types::inputs::{FeedArgs, LinkFilter, LinkQuery};
use linkfeed_store::models::NewLink;
use linkfeed_store::LinkStore;
use thiserror::Error;
use tracing::{debug, warn};

use super::api_types::{Feed, Link};
use crate::config::FeedConfig;

/// `feed` arguments that are well-typed but can't be turned into a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedArgsError {
    #[error("`{0}` must not be negative")]
    Negative(&'static str),
    #[error("`take` must not exceed {max}, got {take}")]
    TakeTooLarge { take: u32, max: u32 },
    #[error("`orderBy` entry at index {0} must set exactly one of `description` and `url`")]
    InvalidOrderBy(usize),
}

fn non_negative(name: &'static str, value: Option<i32>) -> Result<Option<u32>, FeedArgsError> {
    value
        .map(|v| u32::try_from(v).map_err(|_| FeedArgsError::Negative(name)))
        .transpose()
}

/// Translates the arguments of `feed` into the query the store runs for it.
pub fn link_query(args: &FeedArgs, limits: &FeedConfig) -> Result<LinkQuery, FeedArgsError> {
    let skip = non_negative("skip", args.skip)?;
    let take = match (non_negative("take", args.take)?, limits.max_take) {
        (Some(take), Some(max)) if take > max => {
            return Err(FeedArgsError::TakeTooLarge { take, max });
        }
        (Some(take), _) => Some(take),
        (None, max) => max,
    };

    let order_by = args
        .order_by
        .iter()
        .flatten()
        .enumerate()
        .map(|(i, entry)| entry.key().ok_or(FeedArgsError::InvalidOrderBy(i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LinkQuery {
        filter: LinkFilter::new(args.filter.as_deref()),
        order_by,
        skip,
        take,
    })
}

/// Resolves the `feed` query: one page of matching links, the total number of
/// matches, and a fingerprint of the arguments.
pub async fn feed(
    store: &dyn LinkStore,
    limits: &FeedConfig,
    args: FeedArgs,
) -> anyhow::Result<Feed> {
    let query = link_query(&args, limits)?;
    let id = args.fingerprint()?;

    debug!(feed_id = %id, "Resolving feed");

    let page = store.feed_page(&query).await.map_err(|err| {
        warn!(error = %err, feed_id = %id, "Failed to load feed");
        err
    })?;

    Ok(Feed {
        links: page.links.into_iter().map(Link::from).collect(),
        count: page.count,
        id: Some(id.into()),
    })
}

/// Resolves the `post` mutation, persisting a new link.
pub async fn post(store: &dyn LinkStore, description: String, url: String) -> anyhow::Result<Link> {
    let link = store
        .create_link(NewLink { description, url })
        .await
        .map_err(|err| {
            warn!(error = %err, "Failed to create link");
            err
        })?;

    Ok(link.into())
}

#[cfg(test)]
mod tests {
    use linkfeed_common_types::{LinkField, LinkOrderByInput, OrderKey, Sort};
    use quickcheck_macros::quickcheck;

    use super::*;

    fn unlimited() -> FeedConfig {
        FeedConfig::default()
    }

    #[test]
    fn no_arguments_query_everything() {
        let query = link_query(&FeedArgs::default(), &unlimited()).unwrap();
        assert_eq!(query, LinkQuery::default());
    }

    #[test]
    fn empty_filter_is_no_filter() {
        let args = FeedArgs {
            filter: Some(String::new()),
            ..Default::default()
        };
        let query = link_query(&args, &unlimited()).unwrap();
        assert_eq!(query.filter, LinkFilter::all());
    }

    #[test]
    fn negative_pagination_is_rejected() {
        let args = FeedArgs {
            skip: Some(-1),
            ..Default::default()
        };
        assert_eq!(
            link_query(&args, &unlimited()),
            Err(FeedArgsError::Negative("skip"))
        );

        let args = FeedArgs {
            take: Some(-5),
            ..Default::default()
        };
        assert_eq!(
            link_query(&args, &unlimited()),
            Err(FeedArgsError::Negative("take"))
        );
    }

    #[test]
    fn max_take_caps_and_defaults_page_size() {
        let limits = FeedConfig { max_take: Some(10) };

        let args = FeedArgs {
            take: Some(11),
            ..Default::default()
        };
        assert_eq!(
            link_query(&args, &limits),
            Err(FeedArgsError::TakeTooLarge { take: 11, max: 10 })
        );

        let args = FeedArgs {
            take: Some(3),
            ..Default::default()
        };
        assert_eq!(link_query(&args, &limits).unwrap().take, Some(3));

        let query = link_query(&FeedArgs::default(), &limits).unwrap();
        assert_eq!(query.take, Some(10));
    }

    #[test]
    fn order_by_keeps_precedence() {
        let args = FeedArgs {
            order_by: Some(vec![
                LinkOrderByInput {
                    url: Some(Sort::Desc),
                    ..Default::default()
                },
                LinkOrderByInput {
                    description: Some(Sort::Asc),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        let query = link_query(&args, &unlimited()).unwrap();
        assert_eq!(
            query.order_by,
            vec![
                OrderKey {
                    field: LinkField::Url,
                    direction: Sort::Desc
                },
                OrderKey {
                    field: LinkField::Description,
                    direction: Sort::Asc
                },
            ]
        );
    }

    #[test]
    fn order_by_entry_must_name_one_field() {
        let args = FeedArgs {
            order_by: Some(vec![
                LinkOrderByInput {
                    url: Some(Sort::Desc),
                    ..Default::default()
                },
                LinkOrderByInput::default(),
            ]),
            ..Default::default()
        };
        assert_eq!(
            link_query(&args, &unlimited()),
            Err(FeedArgsError::InvalidOrderBy(1))
        );
    }

    #[quickcheck]
    fn valid_queries_respect_limits(args: FeedArgs, max_take: Option<u8>) -> bool {
        let limits = FeedConfig {
            max_take: max_take.map(u32::from),
        };
        match link_query(&args, &limits) {
            Ok(query) => {
                let within_max = match (query.take, limits.max_take) {
                    (Some(take), Some(max)) => take <= max,
                    (None, Some(_)) => false,
                    _ => true,
                };
                within_max
                    && query.order_by.len() == args.order_by.as_ref().map_or(0, Vec::len)
                    && query.skip.map(|s| s as i64) == args.skip.map(i64::from)
            }
            Err(FeedArgsError::Negative(_)) => {
                args.skip.unwrap_or(0) < 0 || args.take.unwrap_or(0) < 0
            }
            Err(FeedArgsError::TakeTooLarge { take, max }) => take > max,
            Err(FeedArgsError::InvalidOrderBy(i)) => args
                .order_by
                .as_ref()
                .and_then(|entries| entries.get(i))
                .map_or(false, |entry| entry.key().is_none()),
        }
    }
}
