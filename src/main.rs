//! blogdraft is a CLI tool that writes a Japanese blog article draft with a
//! local LLM.
//!
//! The source material is either:
//! 1. `--url` - a single web page, fetched and reduced to readable text
//! 2. `--kw` - keywords, looked up on a SearXNG instance
//!
//! With `--hatena` the article is also posted to Hatena Blog as a draft.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, error, info};

use blogdraft::cli::Cli;
use blogdraft::config::Settings;
use blogdraft::constants::USER_AGENT;
use blogdraft::fetch::HttpFetcher;
use blogdraft::generate::OllamaClient;
use blogdraft::publish::{DraftPublisher, HatenaClient};
use blogdraft::search::SearxngClient;
use blogdraft::{PipelineContext, run_pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let settings = Settings::from_cli(cli).unwrap_or_else(|err| exit_with(&err));
    let article = draft(&settings)
        .await
        .unwrap_or_else(|err| exit_with(&err));

    match &settings.output {
        Some(path) => {
            fs::write(path, &article)
                .with_context(|| format!("Failed to write article to {path}"))?;
            info!("Wrote article to {path}");
        }
        None => println!("{article}"),
    }

    Ok(())
}

/// Logs a fatal pipeline error and terminates with a non-zero status.
fn exit_with(err: &blogdraft::Error) -> ! {
    error!("{err}");
    if let Some(body) = err.backend_body() {
        error!("APIエラー: {body}");
    }
    std::process::exit(1);
}

async fn draft(settings: &Settings) -> blogdraft::Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(blogdraft::Error::Client)?;

    let fetcher = HttpFetcher::new(client.clone());
    let search = SearxngClient::new(client.clone(), &settings.search_endpoint)?;
    let generator = OllamaClient::new(client.clone(), &settings.generate_endpoint)?;
    let publisher = match &settings.publish {
        Some(publish) => Some(HatenaClient::new(
            client,
            &settings.publish_endpoint,
            publish.credentials.clone(),
        )?),
        None => None,
    };

    let ctx = PipelineContext {
        fetcher: &fetcher,
        search: &search,
        generator: &generator,
        publisher: publisher
            .as_ref()
            .map(|publisher| publisher as &dyn DraftPublisher),
    };

    let draft = run_pipeline(&ctx, settings).await?;
    Ok(draft.article)
}
