use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arena_client::ArenaClient;
use constellate_common::Config;
use constellate_search::{report, SearchPipeline, SearchSession};

/// Find Are.na blocks that reference a URL, the channels holding them, and the
/// other sites those channels link to.
#[derive(Parser, Debug)]
#[command(name = "constellate", version)]
struct Args {
    /// URL to look up (must include a scheme, e.g. https://example.com/page)
    url: String,

    /// Channel fetches in flight at once (overrides CONSTELLATE_CONCURRENCY)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print the result as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::from_default_env().add_directive("constellate=info".parse()?);
    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = Config::from_env()?;
    config.log_redacted();

    let concurrency = args.concurrency.unwrap_or(config.concurrency);
    let client = ArenaClient::new(&config.api_base, config.per_page, config.request_timeout())?;
    let mut session = SearchSession::new(SearchPipeline::new(Arc::new(client), concurrency));

    session.start(&args.url)?;
    let state = session.wait().await;

    if let Some(err) = &state.error {
        return Err(err.clone().into());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.result)?);
    } else {
        print!("{}", report::render(&args.url, &state.result));
    }

    info!(generation = state.generation, "Done");
    Ok(())
}
