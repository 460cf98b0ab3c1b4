use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
pub struct CliOptions {
    /// Path to the YAML configuration file.
    #[clap(long)]
    pub config: PathBuf,
    /// The URL of the PostgreSQL database to use. Overrides `databaseUrl` in
    /// the configuration file. Can also be set via env. var.
    #[clap(long, env = "LINKFEED_DB_URL")]
    pub database_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_is_optional() {
        let options = CliOptions::try_parse_from(["linkfeed", "--config", "linkfeed.yml"]).unwrap();
        assert_eq!(options.config, PathBuf::from("linkfeed.yml"));
    }

    #[test]
    fn config_is_required() {
        assert!(CliOptions::try_parse_from(["linkfeed"]).is_err());
    }
}
