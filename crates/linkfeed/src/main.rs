use std::net::Ipv4Addr;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use linkfeed_lib::config::Config;
use linkfeed_lib::graphql_api::{self, ApiSchema, ApiSchemaContext};
use linkfeed_lib::{metrics, CliOptions, PrometheusExporter, LINKFEED_VERSION};
use linkfeed_store::Store;
use prometheus_exporter::prometheus;
use tokio::net::TcpListener;
use tracing::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!(version = LINKFEED_VERSION, "Parse options");
    let cli_options = CliOptions::parse();

    info!("Loading configuration file");
    let mut config = Config::read(&cli_options.config)?;
    if let Some(database_url) = cli_options.database_url {
        config.database_url = database_url;
    }

    info!("Initialize store and running migrations");
    let store = Store::new(&config.database_url).await?;
    info!("Store initialization successful");

    // Prometheus metrics.
    let registry = prometheus::default_registry().clone();
    let exporter = PrometheusExporter::start(config.prometheus_port, registry)?;
    // Registers the metrics before the first request comes in.
    metrics();
    info!(port = exporter.port(), "Prometheus exporter started");

    let schema = graphql_api::api_schema(ApiSchemaContext::new(store, config.feed));
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.graphql.port)).await?;
    info!(port = config.graphql.port, "Serving GraphQL API");

    axum::serve(listener, axum_server(schema)).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn axum_server(schema: ApiSchema) -> Router<()> {
    Router::new()
        .route("/", get(|| async { "Ready to roll!" }))
        .route(
            "/graphql",
            get(graphiql_route).post_service(GraphQL::new(schema)),
        )
}

async fn graphiql_route() -> impl IntoResponse {
    axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[cfg(test)]
mod tests {
    use linkfeed_lib::config::FeedConfig;
    use linkfeed_lib::test_utils::schema_with_links;
    use linkfeed_store::models::NewLink;
    use serde_json::{json, Value};

    use super::*;

    async fn spawn_server() -> String {
        let (schema, _store) = schema_with_links(
            [NewLink::new("hello world", "http://hello.test")],
            FeedConfig::default(),
        )
        .await;

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, axum_server(schema)).await });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn readiness() {
        let base = spawn_server().await;

        let body = reqwest::get(&base).await.unwrap().text().await.unwrap();
        assert_eq!(body, "Ready to roll!");
    }

    #[tokio::test]
    async fn graphiql_is_served() {
        let base = spawn_server().await;

        let response = reqwest::get(format!("{}/graphql", base)).await.unwrap();
        assert!(response.status().is_success());
        assert!(response.text().await.unwrap().contains("graphiql"));
    }

    #[tokio::test]
    async fn feed_over_http() {
        let base = spawn_server().await;

        let response: Value = reqwest::Client::new()
            .post(format!("{}/graphql", base))
            .json(&json!({ "query": "{ feed(filter: \"hello\") { count links { url } } }" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(
            response["data"]["feed"],
            json!({ "count": 1, "links": [{ "url": "http://hello.test" }] })
        );
    }
}
