//! Linkfeed configuration parsing and validation.

use std::fs::File;
use std::path::Path;

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlConfig {
    /// The port on which the GraphQL API server should listen.
    #[serde(default = "Config::default_graphql_api_port")]
    pub port: u16,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            port: Config::default_graphql_api_port(),
        }
    }
}

/// Limits applied to the arguments of the `feed` query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    /// Largest page size a client may request through `take`. When set, it is
    /// also the page size of requests that don't specify `take`. Unlimited if
    /// absent.
    #[serde(default)]
    pub max_take: Option<u32>,
}

/// A [`serde`]-compatible representation of Linkfeed's YAML configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// GraphQL API configuration.
    #[serde(default)]
    pub graphql: GraphQlConfig,
    /// The URL of the PostgreSQL database to use.
    pub database_url: String,
    /// The port on which the Prometheus exporter should listen.
    #[serde(default = "Config::default_prometheus_port")]
    pub prometheus_port: u16,
    /// Feed pagination limits.
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("can't open config file {}", path.display()))?;
        serde_yaml::from_reader(file).context("invalid config file")
    }

    fn default_prometheus_port() -> u16 {
        9184
    }

    fn default_graphql_api_port() -> u16 {
        3030
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: Config =
            serde_yaml::from_str("databaseUrl: postgres://localhost/linkfeed").unwrap();

        assert_eq!(config.database_url, "postgres://localhost/linkfeed");
        assert_eq!(config.graphql.port, 3030);
        assert_eq!(config.prometheus_port, 9184);
        assert_eq!(config.feed, FeedConfig::default());
    }

    #[test]
    fn full_config() {
        let yaml = r#"
databaseUrl: postgres://db/links
prometheusPort: 9000
graphql:
  port: 8080
feed:
  maxTake: 50
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.graphql.port, 8080);
        assert_eq!(config.prometheus_port, 9000);
        assert_eq!(config.feed.max_take, Some(50));
    }

    #[test]
    fn database_url_is_required() {
        assert!(serde_yaml::from_str::<Config>("prometheusPort: 9000").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::read(Path::new("/nonexistent/linkfeed.yml")).unwrap_err();
        assert!(err.to_string().contains("can't open config file"));
    }
}
