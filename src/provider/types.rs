//! Provider wire types and the source seam

use crate::error::Result;
use crate::pagination::PageToken;
use crate::scope::Scope;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One page of the provider's feed, as it appears on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Provider's own status string ("success" on the happy path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Articles for this page
    #[serde(default)]
    pub results: Vec<ProviderArticle>,

    /// Continuation token for the following page; absent on the last page
    #[serde(default, rename = "nextPage", skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,

    /// Total matching results, when the provider reports it
    #[serde(default, rename = "totalResults", skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,

    /// Total pages, when the provider reports it (usually absent)
    #[serde(default, rename = "totalPages", skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl ProviderResponse {
    /// The continuation token as a typed [`PageToken`].
    ///
    /// Empty strings normalize to None so an empty provider token can
    /// never masquerade as the implicit first-page token.
    pub fn next_token(&self) -> Option<PageToken> {
        self.next_page.as_deref().and_then(PageToken::new)
    }
}

/// One raw feed item. Every field is optional on the wire; normalization
/// into a displayable record happens in [`crate::article`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderArticle {
    /// Provider item id; some feeds label it `guid`
    #[serde(default, alias = "guid", skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, rename = "pubDate", skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Anything the browse session can fetch pages from.
///
/// Implemented by [`super::ProviderClient`] for the real provider and by
/// scripted doubles in tests, so the pagination state machine can be
/// exercised without a network.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch one page of the scope's result set. `token` is the
    /// continuation cursor for that page; None means the first page.
    async fn fetch_page(
        &self,
        scope: &Scope,
        token: Option<&PageToken>,
    ) -> Result<ProviderResponse>;
}
