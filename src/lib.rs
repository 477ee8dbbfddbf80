// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # newsgate
//!
//! A news-feed gateway and browsing core: bridges a cursor-paginated
//! upstream news provider to the 1-based numbered pages a browsing UI
//! shows.
//!
//! ## Features
//!
//! - **Request Forwarder**: stateless HTTP endpoints that validate
//!   parameters, attach the provider credential, forward one GET upstream,
//!   and republish the response with normalized pagination metadata
//! - **Page-Token Store**: the state machine mapping page numbers to
//!   opaque continuation tokens, built up as the user pages forward and
//!   invalidated on every scope change
//! - **Browse Session**: scope + token chain + current page, with article
//!   normalization for rendering
//! - **Country Preference**: a persisted selection with explicit
//!   load/update/persist operations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use newsgate::{BrowseSession, GatewayConfig, ProviderClient, Scope};
//!
//! #[tokio::main]
//! async fn main() -> newsgate::Result<()> {
//!     let config = GatewayConfig::default();
//!     let client = ProviderClient::from_config(&config)?;
//!
//!     let mut session = BrowseSession::new(client, Scope::listing("us"));
//!     session.refresh().await?;
//!
//!     // Page 2 became navigable if the provider issued a token
//!     session.goto_page(2)?;
//!     session.refresh().await?;
//!
//!     for article in session.articles() {
//!         println!("{}", article.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        Browse Session                         │
//! │   scope change → reset tokens     goto(n) → resolve token     │
//! │   refresh() → fetch page → articles + next token recorded     │
//! └───────────────────────────────────────────────────────────────┘
//!                │                                  │
//! ┌──────────────┴──────────────┐    ┌──────────────┴──────────────┐
//! │       Page-Token Store      │    │         NewsSource          │
//! │  slot n−1 ⇒ token for page n│    │  ProviderClient (one GET,   │
//! │  reset on scope change      │    │  no retry)  /  forwarder    │
//! └─────────────────────────────┘    └─────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the gateway
pub mod error;

/// Common types and type aliases
pub mod types;

/// Gateway configuration
pub mod config;

/// Query scope (country / category / search / language)
pub mod scope;

/// Article view records and normalization
pub mod article;

/// Upstream provider client and wire types
pub mod provider;

/// Page-token store and numbered page window
pub mod pagination;

/// Browse session state machine
pub mod session;

/// Country preference store
pub mod prefs;

/// Country and category catalog
pub mod catalog;

/// Command-line interface and forwarder server
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use article::Article;
pub use config::GatewayConfig;
pub use error::{Error, Result};
pub use pagination::{PageToken, PageTokenStore};
pub use prefs::{Country, PreferenceStore};
pub use provider::{NewsSource, ProviderClient};
pub use scope::Scope;
pub use session::BrowseSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
