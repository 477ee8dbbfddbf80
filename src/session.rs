//! Browse session
//!
//! The client-side state machine behind the news views: one scope, one
//! token chain, one current page. All mutation happens either from user
//! input (scope and page changes) or from a completed fetch, and the
//! session awaits its single in-flight fetch before accepting anything
//! else, so no locking is needed and a superseded response can never be
//! applied after a scope change.

use crate::article::{normalize_articles, Article};
use crate::error::{Error, Result};
use crate::pagination::{self, PageItem, PageToken, PageTokenStore};
use crate::provider::NewsSource;
use crate::scope::Scope;
use tracing::debug;

/// Browsing state for one view, generic over the page source
#[derive(Debug)]
pub struct BrowseSession<S> {
    source: S,
    scope: Scope,
    tokens: PageTokenStore,
    page: u32,
    total_results: u64,
    articles: Vec<Article>,
}

impl<S> BrowseSession<S> {
    /// Create a session positioned on page 1 of `scope`
    pub fn new(source: S, scope: Scope) -> Self {
        Self {
            source,
            scope,
            tokens: PageTokenStore::new(),
            page: 1,
            total_results: 0,
            articles: Vec::new(),
        }
    }

    /// The current scope
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The current 1-based page number
    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Articles from the most recent successful fetch
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Total results the provider last reported
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    /// Navigable page count, bounded by the page cap
    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.total_results)
    }

    /// The numbered page control for the current position
    pub fn page_window(&self) -> Vec<PageItem> {
        pagination::page_window(self.page, self.total_pages())
    }

    /// The token store, for introspection
    pub fn tokens(&self) -> &PageTokenStore {
        &self.tokens
    }

    /// Replace the whole scope. Any identity change invalidates the token
    /// chain and returns to page 1; setting an equal scope is a no-op.
    pub fn set_scope(&mut self, scope: Scope) {
        if scope == self.scope {
            return;
        }
        debug!(?scope, "scope changed, resetting token chain");
        self.scope = scope;
        self.invalidate();
    }

    /// Switch country, keeping category/query/language
    pub fn set_country(&mut self, country: impl Into<String>) {
        let scope = self.scope.clone().with_country(country);
        self.set_scope(scope);
    }

    /// Switch category, keeping the rest of the scope
    pub fn set_category(&mut self, category: impl Into<String>) {
        let scope = self.scope.clone().with_category(category);
        self.set_scope(scope);
    }

    /// Switch to a search scope for `query`, keeping the country
    pub fn set_query(&mut self, query: impl Into<String>) {
        let mut scope = Scope::search(query);
        scope.country = self.scope.country.clone();
        scope.language = self.scope.language.clone();
        self.set_scope(scope);
    }

    /// Move to `page`. Only page 1 and pages whose token is already known
    /// are reachable; everything else is rejected without touching state.
    pub fn goto_page(&mut self, page: u32) -> Result<()> {
        if !self.tokens.is_navigable(page) {
            return Err(Error::Other(format!("Page {page} is not reachable yet")));
        }
        self.page = page;
        Ok(())
    }

    /// Move forward one page
    pub fn next_page(&mut self) -> Result<()> {
        self.goto_page(self.page + 1)
    }

    /// Move back one page
    pub fn previous_page(&mut self) -> Result<()> {
        self.goto_page(self.page.saturating_sub(1).max(1))
    }

    /// Token for a page, if already learned
    pub fn token_for_page(&self, page: u32) -> Option<&PageToken> {
        self.tokens.token_for_page(page)
    }

    fn invalidate(&mut self) {
        self.tokens.reset();
        self.page = 1;
    }
}

impl<S: NewsSource> BrowseSession<S> {
    /// Fetch the current page and apply the result.
    ///
    /// On success the articles and total are replaced and the returned
    /// next-token is recorded at the current page's slot, unlocking the
    /// following page. On failure nothing changes, the same page can be
    /// retried, and the error propagates for the caller to surface.
    pub async fn refresh(&mut self) -> Result<&[Article]> {
        let page = self.page;
        let token = self.tokens.token_for_page(page).cloned();

        let response = self.source.fetch_page(&self.scope, token.as_ref()).await?;

        self.articles = normalize_articles(&response.results);
        self.total_results = response.total_results.unwrap_or(0);
        self.tokens.record_next(page, response.next_token());

        debug!(
            page,
            articles = self.articles.len(),
            total = self.total_results,
            next = self.tokens.is_navigable(page + 1),
            "page applied"
        );
        Ok(&self.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{NewsSource, ProviderArticle, ProviderResponse};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed script of responses and records every request
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<ProviderResponse>>>,
        calls: Mutex<Vec<(Scope, Option<String>)>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<ProviderResponse>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Scope, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NewsSource for &ScriptedSource {
        async fn fetch_page(
            &self,
            scope: &Scope,
            token: Option<&PageToken>,
        ) -> Result<ProviderResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((scope.clone(), token.map(|t| t.as_str().to_string())));
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted")
        }
    }

    fn page(next: Option<&str>, total: u64) -> ProviderResponse {
        ProviderResponse {
            status: Some("success".to_string()),
            results: vec![ProviderArticle {
                title: Some("headline".to_string()),
                ..Default::default()
            }],
            next_page: next.map(ToString::to_string),
            total_results: Some(total),
            total_pages: None,
        }
    }

    #[tokio::test]
    async fn test_walks_token_chain_in_order() {
        let source = ScriptedSource::new(vec![
            Ok(page(Some("t2"), 37)),
            Ok(page(Some("t3"), 37)),
            Ok(page(None, 37)),
        ]);
        let mut session = BrowseSession::new(&source, Scope::listing("us"));

        session.refresh().await.unwrap();
        assert_eq!(session.total_pages(), 5);
        assert!(session.tokens().is_navigable(2));

        session.goto_page(2).unwrap();
        session.refresh().await.unwrap();
        assert_eq!(session.token_for_page(3).unwrap().as_str(), "t3");

        session.goto_page(3).unwrap();
        session.refresh().await.unwrap();
        // Provider stopped issuing tokens: page 4 stays unreachable
        assert!(session.goto_page(4).is_err());

        let calls = source.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].1, None);
        assert_eq!(calls[1].1.as_deref(), Some("t2"));
        assert_eq!(calls[2].1.as_deref(), Some("t3"));
    }

    #[tokio::test]
    async fn test_pages_cannot_be_skipped() {
        let source = ScriptedSource::new(vec![Ok(page(Some("t2"), 100))]);
        let mut session = BrowseSession::new(&source, Scope::listing("us"));
        session.refresh().await.unwrap();

        // Page 2 is unlocked, page 3 is not
        assert!(session.goto_page(3).is_err());
        assert_eq!(session.current_page(), 1);
        session.goto_page(2).unwrap();
        assert_eq!(session.current_page(), 2);
    }

    #[tokio::test]
    async fn test_scope_change_resets_chain_and_page() {
        let source = ScriptedSource::new(vec![Ok(page(Some("t2"), 37)), Ok(page(Some("t2b"), 12))]);
        let mut session = BrowseSession::new(&source, Scope::listing("us"));
        session.refresh().await.unwrap();
        session.goto_page(2).unwrap();

        session.set_category("sports");
        assert_eq!(session.current_page(), 1);
        assert!(session.tokens().is_empty());
        assert!(!session.tokens().is_navigable(2));

        // Same-valued scope is a no-op
        let before = session.tokens().clone();
        session.set_category("sports");
        assert_eq!(session.tokens(), &before);
    }

    #[tokio::test]
    async fn test_switching_to_search_keeps_country() {
        let source = ScriptedSource::new(vec![Ok(page(Some("t2"), 37))]);
        let mut session = BrowseSession::new(&source, Scope::listing("us"));
        session.refresh().await.unwrap();

        session.set_query("election");
        assert!(session.scope().is_search());
        assert_eq!(session.scope().country.as_deref(), Some("us"));
        assert_eq!(session.current_page(), 1);
        assert!(session.tokens().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_store_untouched() {
        let source = ScriptedSource::new(vec![
            Ok(page(Some("t2"), 37)),
            Err(Error::upstream(500, "Failed to fetch news".to_string())),
            Ok(page(Some("t3"), 37)),
        ]);
        let mut session = BrowseSession::new(&source, Scope::listing("us"));
        session.refresh().await.unwrap();
        session.goto_page(2).unwrap();

        let tokens_before = session.tokens().clone();
        let err = session.refresh().await.unwrap_err();
        assert_eq!(err.status(), 500);
        assert_eq!(session.tokens(), &tokens_before);
        assert_eq!(session.current_page(), 2);

        // Retrying the same page works and extends the chain
        session.refresh().await.unwrap();
        assert!(session.tokens().is_navigable(3));
    }

    #[tokio::test]
    async fn test_prev_next_navigation() {
        let source = ScriptedSource::new(vec![Ok(page(Some("t2"), 37))]);
        let mut session = BrowseSession::new(&source, Scope::listing("us"));
        session.refresh().await.unwrap();

        session.next_page().unwrap();
        assert_eq!(session.current_page(), 2);
        session.previous_page().unwrap();
        assert_eq!(session.current_page(), 1);
        // Already at the first page: previous stays put
        session.previous_page().unwrap();
        assert_eq!(session.current_page(), 1);
    }
}
