//! namespaces - generate namespaces.yaml
//!
//! Usage: namespaces [--custom-namespaces PATH] [--generated-sql-uri URI] [--app-listings-uri URI]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use namespaces_generator::config::{DEFAULT_APP_LISTINGS_URI, DEFAULT_GENERATED_SQL_URI};
use namespaces_generator::{pipeline, GeneratorConfig};

#[derive(Parser)]
#[command(name = "namespaces")]
#[command(about = "Generate namespaces.yaml")]
struct Cli {
    /// Path to a custom namespaces file
    #[arg(long)]
    custom_namespaces: Option<PathBuf>,

    /// URI of a tar archive of the bigquery-etl generated-sql branch, which is
    /// used to list views and determine whether they reference stable tables
    #[arg(long, env = "GENERATED_SQL_URI", default_value = DEFAULT_GENERATED_SQL_URI)]
    generated_sql_uri: String,

    /// URI for probeinfo service v2 glean app listings
    #[arg(long, env = "APP_LISTINGS_URI", default_value = DEFAULT_APP_LISTINGS_URI)]
    app_listings_uri: String,
}

/// `RUST_LOG` directives, falling back to `warn` when none are given
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

#[tokio::main]
async fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = GeneratorConfig::default()
        .with_generated_sql_uri(cli.generated_sql_uri)
        .with_app_listings_uri(cli.app_listings_uri);

    pipeline::run(&config, cli.custom_namespaces.as_deref())
        .await
        .with_context(|| format!("Failed to generate {:?}", config.output_path))?;

    Ok(())
}
