//! # Tech News Feed
//!
//! Fetches technology news from a third-party search API, sorts it into a
//! fixed set of topical categories and serves it in one stable JSON shape.
//!
//! ## Features
//!
//! - Eight curated categories (AI, ML, IoT, Blockchain, Quantum Computing,
//!   VR, Networking, Robotics), each backed by an OR-query of topic synonyms
//! - Fallback to current top stories when a category search comes back thin
//! - Field-level defaults so every article has the same shape
//! - Upstream failures degrade to an empty list for that request only
//! - HTTP API for the browser front-end, or one-shot JSON on stdout
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... tech_news_feed serve
//! NEWS_API_KEY=... tech_news_feed fetch iot
//! ```
//!
//! ## Architecture
//!
//! Each request runs the same pipeline:
//! 1. **Resolve**: look up the category's query and label in the catalog
//! 2. **Retrieve**: relevance search, then a top-stories fallback if needed
//! 3. **Normalize**: drop records without title or URL, default the rest
//! 4. **Label**: stamp the display label and return the list in provider order

use clap::Parser;
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod catalog;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod normalize;
mod pipeline;
mod retrieval;
mod routes;
mod utils;

use cli::{Cli, Command};
use client::newsapi::NewsApiClient;
use config::{FileConfig, Settings};
use pipeline::AggregationPipeline;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    debug!(command = ?args.command, config = ?args.config, "Parsed CLI arguments");

    let file = match &args.config {
        Some(path) => config::load_file(path).await?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file)?;
    info!(?settings, "Settings resolved");

    let client = NewsApiClient::new(
        settings.api_key.clone(),
        settings.base_url.clone(),
        settings.timeout,
    )?;
    let pipeline = AggregationPipeline::new(Arc::new(client));

    match args.command {
        Command::Serve => serve(pipeline, settings).await,
        Command::Fetch {
            category,
            trending,
            all,
        } => {
            let json = if all {
                let by_label: BTreeMap<_, _> =
                    pipeline.fetch_all_categories().await.into_iter().collect();
                serde_json::to_string_pretty(&by_label)?
            } else if trending {
                serde_json::to_string_pretty(&pipeline.fetch_trending().await)?
            } else {
                serde_json::to_string_pretty(&pipeline.fetch(category.as_deref()).await)?
            };
            println!("{json}");
            Ok(())
        }
    }
}

#[instrument(level = "info", skip_all, fields(bind = %settings.bind))]
async fn serve(pipeline: AggregationPipeline, settings: Settings) -> Result<(), Box<dyn Error>> {
    let app = routes::router(pipeline, settings.allowed_origin.clone());
    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}
