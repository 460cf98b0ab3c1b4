pub mod mocks;

use std::env;

use linkfeed_store::models::NewLink;
use linkfeed_store::{InMemoryStore, LinkStore};
use once_cell::sync::Lazy;
use rand::rngs::{OsRng, SmallRng};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::FeedConfig;
use crate::graphql_api::{api_schema, ApiSchema, ApiSchemaContext};

pub static TEST_SEED: Lazy<u64> = Lazy::new(|| {
    let seed = env::var("TEST_SEED")
        .map(|seed| seed.parse().expect("Invalid TEST_SEED value"))
        .unwrap_or(OsRng.next_u64());

    println!("------------------------------------------------------------------------");
    println!("TEST_SEED={}", seed);
    println!("  This value can be changed via the environment variable TEST_SEED.");
    println!("------------------------------------------------------------------------");

    seed
});

pub fn fast_rng(seed_extra: u64) -> SmallRng {
    SmallRng::seed_from_u64(*TEST_SEED + seed_extra)
}

const WORDS: &[&str] = &[
    "rust", "graphql", "async", "tokio", "diesel", "postgres", "axum", "serde", "blog", "guide",
];

fn gen_word(rng: &mut impl Rng) -> &'static str {
    WORDS.choose(rng).copied().unwrap_or("link")
}

/// Generates `n` links with short, word-based descriptions and URLs, so that
/// substring filters have a fair chance of matching some of them.
pub fn gen_links(rng: &mut impl Rng, n: usize) -> Vec<NewLink> {
    (0..n)
        .map(|_| {
            let description = format!("{} {}", gen_word(rng), gen_word(rng));
            let url = format!("https://{}.test/{}", gen_word(rng), rng.gen_range(0..100));
            NewLink { description, url }
        })
        .collect()
}

/// An API schema backed by a fresh [`InMemoryStore`] holding `links`. The
/// store is returned too, for direct inspection.
pub async fn schema_with_links(
    links: impl IntoIterator<Item = NewLink>,
    feed: FeedConfig,
) -> (ApiSchema, InMemoryStore) {
    let store = InMemoryStore::new();
    for link in links {
        store.create_link(link).await.unwrap();
    }

    let schema = api_schema(ApiSchemaContext::new(store.clone(), feed));
    (schema, store)
}
