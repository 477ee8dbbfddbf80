//! CLI runner - executes commands

use crate::catalog::{country_by_code, is_valid_category, search_countries};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::pagination::MAX_PAGES;
use crate::prefs::{default_prefs_path, Country, PreferenceStore};
use crate::provider::ProviderClient;
use crate::scope::Scope;
use crate::session::BrowseSession;
use serde_json::json;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port } => self.serve(*port).await,
            Commands::Fetch {
                country,
                category,
                page,
            } => {
                self.fetch(country.as_deref(), category.as_deref(), *page)
                    .await
            }
            Commands::Search {
                query,
                country,
                language,
                page,
            } => {
                self.search(query, country.as_deref(), language.as_deref(), *page)
                    .await
            }
            Commands::Countries { term } => self.countries(term.as_deref()),
            Commands::SetCountry { code } => self.set_country(code).await,
        }
    }

    /// Load gateway configuration (file or defaults)
    fn load_config(&self) -> Result<GatewayConfig> {
        match &self.cli.config {
            Some(path) => GatewayConfig::from_file(path),
            None => Ok(GatewayConfig::default()),
        }
    }

    /// Load the country preference store
    fn load_prefs(&self) -> PreferenceStore {
        let path = self
            .cli
            .prefs
            .clone()
            .unwrap_or_else(default_prefs_path);
        PreferenceStore::load(path)
    }

    /// Resolve the country to browse: explicit flag wins, otherwise the
    /// persisted selection.
    fn resolve_country(&self, flag: Option<&str>) -> String {
        match flag {
            Some(code) => code.to_lowercase(),
            None => self.load_prefs().country().code.clone(),
        }
    }

    async fn serve(&self, port: Option<u16>) -> Result<()> {
        let config = self.load_config()?;
        let port = port.unwrap_or(config.server.port);
        crate::cli::server::serve(config, port).await
    }

    async fn fetch(&self, country: Option<&str>, category: Option<&str>, page: u32) -> Result<()> {
        if let Some(category) = category {
            if !is_valid_category(category) {
                return Err(Error::config(format!("Unknown category: {category}")));
            }
        }

        let mut scope = Scope::listing(self.resolve_country(country));
        if let Some(category) = category {
            scope = scope.with_category(category.to_lowercase());
        }

        self.browse_to(scope, page).await
    }

    async fn search(
        &self,
        query: &str,
        country: Option<&str>,
        language: Option<&str>,
        page: u32,
    ) -> Result<()> {
        let mut scope = Scope::search(query).with_country(self.resolve_country(country));
        if let Some(language) = language {
            scope = scope.with_language(language);
        }

        self.browse_to(scope, page).await
    }

    /// Walk a session to the requested page, fetching each page on the
    /// way exactly as the UI would, then print the final page.
    async fn browse_to(&self, scope: Scope, target_page: u32) -> Result<()> {
        if target_page == 0 || target_page > MAX_PAGES {
            return Err(Error::Other(format!(
                "Page must be between 1 and {MAX_PAGES}"
            )));
        }

        let config = self.load_config()?;
        let client = ProviderClient::from_config(&config)?;
        let mut session = BrowseSession::new(client, scope);

        session.refresh().await?;
        for page in 2..=target_page {
            session.goto_page(page)?;
            session.refresh().await?;
        }

        self.print_page(&session);
        Ok(())
    }

    fn print_page<S>(&self, session: &BrowseSession<S>) {
        match self.cli.format {
            OutputFormat::Json => {
                let out = json!({
                    "page": session.current_page(),
                    "totalResults": session.total_results(),
                    "totalPages": session.total_pages(),
                    "articles": session.articles(),
                });
                println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!(
                    "Page {}/{} ({} results)",
                    session.current_page(),
                    session.total_pages(),
                    session.total_results()
                );
                for article in session.articles() {
                    println!();
                    println!("  {}", article.title);
                    println!("  {} | {}", article.source_name, article.formatted_date);
                    println!("  {}", article.link);
                }
                if session.articles().is_empty() {
                    println!("No articles found.");
                }
            }
        }
    }

    fn countries(&self, term: Option<&str>) -> Result<()> {
        let results = search_countries(term.unwrap_or(""));
        match self.cli.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&results).unwrap_or_default()
                );
            }
            OutputFormat::Pretty => {
                if results.is_empty() {
                    println!("No matches found");
                }
                for country in results {
                    println!("{}  {}", country.code, country.name);
                }
            }
        }
        Ok(())
    }

    async fn set_country(&self, code: &str) -> Result<()> {
        let country: &Country = country_by_code(code)
            .ok_or_else(|| Error::config(format!("Unknown country code: {code}")))?;

        let mut prefs = self.load_prefs();
        prefs.set_country(country.clone()).await?;
        println!("Country set to {} ({})", country.name, country.code);
        Ok(())
    }
}
