//! Provider HTTP client
//!
//! Issues one upstream GET per page fetch and relays failures without
//! retrying. Error mapping follows the forwarder taxonomy: a non-success
//! provider status becomes `Upstream` with the provider's own message,
//! network and decode failures become `Transport`.

use super::types::{NewsSource, ProviderResponse};
use crate::config::{GatewayConfig, ProviderConfig};
use crate::error::{Error, Result};
use crate::pagination::{PageToken, PAGE_SIZE};
use crate::scope::Scope;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the upstream news provider
#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    config: ProviderConfig,
    page_size: u32,
}

impl ProviderClient {
    /// Create a client from provider settings
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Self::with_page_size(config, PAGE_SIZE)
    }

    /// Create a client with a non-default page size
    pub fn with_page_size(config: ProviderConfig, page_size: u32) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            page_size,
        })
    }

    /// Create a client from a full gateway config
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Self::with_page_size(config.provider.clone(), config.pagination.page_size)
    }

    /// Articles requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch one page for a scope, replaying `token` verbatim when given.
    ///
    /// Exactly one request reaches the provider; there is no caching and
    /// no retry on any failure.
    pub async fn fetch_page(
        &self,
        scope: &Scope,
        token: Option<&PageToken>,
    ) -> Result<ProviderResponse> {
        scope.validate()?;
        let api_key = self.config.resolve_api_key()?;

        let endpoint = if scope.is_search() {
            &self.config.search_url
        } else {
            &self.config.latest_url
        };

        let mut params: Vec<(&str, String)> = vec![
            ("apikey", api_key),
            ("language", scope.language.clone()),
            ("size", self.page_size.to_string()),
        ];

        if let Some(query) = &scope.query {
            params.push(("q", query.clone()));
            if let Some(country) = &scope.country {
                params.push(("country", country.clone()));
            }
        } else {
            // validate() guarantees the country is present for listings
            if let Some(country) = &scope.country {
                params.push(("country", country.clone()));
            }
            if let Some(category) = &scope.category {
                params.push(("category", category.clone()));
            }
        }

        if let Some(token) = token {
            params.push(("page", token.as_str().to_string()));
        }

        debug!(
            %endpoint,
            search = scope.is_search(),
            has_token = token.is_some(),
            "fetching provider page"
        );

        let response = self.client.get(endpoint).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_provider_message(&body)
                .unwrap_or_else(|| fallback_message(scope).to_string());
            warn!(status = status.as_u16(), %message, "provider error response");
            return Err(Error::upstream(status.as_u16(), message));
        }

        let page: ProviderResponse = response.json().await?;
        Ok(page)
    }
}

#[async_trait]
impl NewsSource for ProviderClient {
    async fn fetch_page(
        &self,
        scope: &Scope,
        token: Option<&PageToken>,
    ) -> Result<ProviderResponse> {
        ProviderClient::fetch_page(self, scope, token).await
    }
}

/// Pull the human-readable message out of a provider error body.
///
/// The provider wraps errors as `{"results": {"message": "..."}}`; a flat
/// `{"message": "..."}` is accepted too.
fn extract_provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/results/message")
        .or_else(|| value.get("message"))
        .and_then(|m| m.as_str())
        .map(ToString::to_string)
}

fn fallback_message(scope: &Scope) -> &'static str {
    if scope.is_search() {
        "Failed to search news"
    } else {
        "Failed to fetch news"
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_extract_provider_message_nested() {
        let body = r#"{"status":"error","results":{"message":"API key invalid","code":"Unauthorized"}}"#;
        assert_eq!(
            extract_provider_message(body).as_deref(),
            Some("API key invalid")
        );
    }

    #[test]
    fn test_extract_provider_message_flat() {
        let body = r#"{"message":"Too many requests"}"#;
        assert_eq!(
            extract_provider_message(body).as_deref(),
            Some("Too many requests")
        );
    }

    #[test]
    fn test_extract_provider_message_unparseable() {
        assert_eq!(extract_provider_message("<html>oops</html>"), None);
        assert_eq!(extract_provider_message(""), None);
    }

    #[test]
    fn test_fallback_message_by_mode() {
        assert_eq!(fallback_message(&Scope::listing("us")), "Failed to fetch news");
        assert_eq!(
            fallback_message(&Scope::search("election")),
            "Failed to search news"
        );
    }
}
