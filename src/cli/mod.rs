//! CLI module
//!
//! Command-line interface for the gateway.
//!
//! # Commands
//!
//! - `serve` - Start the request forwarder
//! - `fetch` - Fetch a page of headlines for a country
//! - `search` - Search news by free text
//! - `countries` - List or search the country catalog
//! - `set-country` - Persist a new country selection

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve, ApiError, AppState, NewsEnvelope};
