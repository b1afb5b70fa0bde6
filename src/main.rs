use anyhow::{Context, Result};
use clap::Parser;
use event_pages::build::build_site;
use event_pages::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generates paginated index pages for every event in a blog.
#[derive(Parser)]
#[command(name = "event-pages", version)]
struct Cli {
    /// The site directory (or any directory beneath it) containing `site.yaml`
    #[arg(default_value = ".")]
    source: PathBuf,

    /// The directory the generated pages are written to
    #[arg(short, long, default_value = "_site")]
    output: PathBuf,

    /// Posts per page; overrides `paginate` in `site.yaml`
    #[arg(long, conflicts_with = "no_paginate")]
    paginate: Option<usize>,

    /// Put every event's posts on a single page
    #[arg(long)]
    no_paginate: bool,
}

const DEFAULT_FILTER: &str = "event_pages=info";

/// Uses the `RUST_LOG` directives as given, or [`DEFAULT_FILTER`] when they
/// are unset or don't parse.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();
    let source = cli
        .source
        .canonicalize()
        .with_context(|| format!("resolving `{}`", cli.source.display()))?;
    let mut config = Config::from_directory(&source, &cli.output)
        .with_context(|| format!("loading configuration from `{}`", source.display()))?;
    config
        .override_pagination(cli.paginate, cli.no_paginate)
        .context("applying pagination flags")?;

    build_site(&config).context("building event pages")?;
    Ok(())
}
