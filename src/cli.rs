//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every setting can also be provided through an environment variable, and
//! any setting left unset falls back to the optional YAML file given with
//! `--config` (see [`crate::config`]).

use clap::{Parser, Subcommand};

/// Command-line arguments for the technology news feed.
///
/// # Examples
///
/// ```sh
/// # Serve the HTTP API
/// NEWS_API_KEY=... tech_news_feed serve
///
/// # Print one category once
/// tech_news_feed --api-key ... fetch cybersecurity
///
/// # Print every category, fetched concurrently
/// tech_news_feed --config feed.yaml fetch --all
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// News search API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the news search API
    #[arg(long, env = "NEWS_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "NEWS_API_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR")]
    pub bind: Option<String>,

    /// Browser origin allowed by CORS
    #[arg(long, env = "ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve the JSON feed over HTTP
    Serve,

    /// Run the pipeline once and print JSON to stdout
    Fetch {
        /// Category identifier, e.g. "ai" or "quantum computing"; omit for the general feed
        category: Option<String>,

        /// Fetch current top stories instead
        #[arg(long, conflicts_with_all = ["category", "all"])]
        trending: bool,

        /// Fetch every known category concurrently
        #[arg(long, conflicts_with = "category")]
        all: bool,
    },
}
