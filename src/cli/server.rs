//! Request forwarder HTTP service
//!
//! A stateless gateway in front of the news provider: validates required
//! parameters, attaches the credential, forwards one GET upstream, and
//! republishes the response augmented with normalized pagination
//! metadata. Every failure collapses to a uniform `{"error": "..."}`
//! body with the status the taxonomy assigns.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::pagination::PageToken;
use crate::provider::{ProviderArticle, ProviderClient, ProviderResponse};
use crate::scope::{Scope, DEFAULT_LANGUAGE};
use crate::types::OptionStringExt;

/// App state shared across handlers
pub struct AppState {
    config: GatewayConfig,
    client: ProviderClient,
}

impl AppState {
    /// Build the shared state, constructing the provider client
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = ProviderClient::from_config(&config)?;
        Ok(Self { config, client })
    }
}

/// Query parameters for `GET /api/news`
#[derive(Debug, Deserialize)]
struct NewsParams {
    country: Option<String>,
    category: Option<String>,
    /// Opaque continuation token; absent for the first page
    page: Option<String>,
}

/// Query parameters for `GET /api/search`
#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
    country: Option<String>,
    language: Option<String>,
    page: Option<String>,
}

/// Success envelope: the provider's page plus normalized pagination
/// metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEnvelope {
    pub results: Vec<ProviderArticle>,
    /// Token this page was fetched with; null for the first page
    pub current_page_token: Option<String>,
    /// Provider's continuation token, relayed verbatim; null on the last
    /// page
    pub next_page_token: Option<String>,
    pub page_size: u32,
    pub total_results: Option<u64>,
    pub total_pages: Option<u32>,
}

impl NewsEnvelope {
    fn build(page: ProviderResponse, request_token: Option<String>, page_size: u32) -> Self {
        Self {
            results: page.results,
            current_page_token: request_token,
            next_page_token: page.next_page,
            page_size,
            total_results: page.total_results,
            total_pages: page.total_pages,
        }
    }
}

/// Error wrapper turning the taxonomy into `{"error": "..."}` responses
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        // Upstream errors relay the provider's message alone; every other
        // variant renders through its Display form.
        let message = match &self.0 {
            Error::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the forwarder router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/news", get(news))
        .route("/api/search", get(search))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the forwarder
pub async fn serve(config: GatewayConfig, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting forwarder on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/news?country=<cc>&category=<opt>&page=<opt token>`
async fn news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> std::result::Result<Json<NewsEnvelope>, ApiError> {
    let country = params
        .country
        .none_if_empty()
        .ok_or_else(|| Error::missing_parameter("country code"))?;

    let mut scope = Scope::listing(country);
    if let Some(category) = params.category {
        scope = scope.with_category(category);
    }

    let token = params.page.clone().and_then(PageToken::new);
    let page = state.client.fetch_page(&scope, token.as_ref()).await?;

    Ok(Json(NewsEnvelope::build(
        page,
        params.page,
        state.config.pagination.page_size,
    )))
}

/// `GET /api/search?query=<q>&country=<opt>&language=<opt>&page=<opt token>`
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> std::result::Result<Json<NewsEnvelope>, ApiError> {
    let query = params
        .query
        .none_if_empty()
        .ok_or_else(|| Error::missing_parameter("search query"))?;

    let mut scope = Scope::search(query)
        .with_language(params.language.none_if_empty().unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()));
    if let Some(country) = params.country.none_if_empty() {
        scope = scope.with_country(country);
    }

    let token = params.page.clone().and_then(PageToken::new);
    let page = state.client.fetch_page(&scope, token.as_ref()).await?;

    Ok(Json(NewsEnvelope::build(
        page,
        params.page,
        state.config.pagination.page_size,
    )))
}
