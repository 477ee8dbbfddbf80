//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// newsgate: news-feed gateway and browsing CLI
#[derive(Parser, Debug)]
#[command(name = "newsgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Gateway configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Country preference file (JSON)
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the request forwarder
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch a page of headlines for a country
    Fetch {
        /// ISO country code (defaults to the saved preference)
        #[arg(long)]
        country: Option<String>,

        /// Provider category (e.g. technology)
        #[arg(long)]
        category: Option<String>,

        /// 1-based page number; earlier pages are walked to build the
        /// token chain
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Search news by free text
    Search {
        /// Search query
        query: String,

        /// ISO country code filter (defaults to the saved preference)
        #[arg(long)]
        country: Option<String>,

        /// Article language
        #[arg(long)]
        language: Option<String>,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// List or search the country catalog
    Countries {
        /// Picker search term
        term: Option<String>,
    },

    /// Persist a new country selection
    SetCountry {
        /// ISO country code from the catalog
        code: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
