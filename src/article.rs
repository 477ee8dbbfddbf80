//! Article view records
//!
//! Normalizes raw provider items into the display shape the browsing UI
//! consumes. Derived per-request, never persisted.

use crate::provider::ProviderArticle;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display date format: "06 Aug 2026, 14:30"
const DATE_FORMAT: &str = "%d %b %Y, %H:%M";

/// Placeholder icon served for sources without one
pub const DEFAULT_SOURCE_ICON: &str = "/default-news.jpg";

/// A normalized article ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Stable id within the page; falls back to the item's index
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Pre-formatted display date
    pub formatted_date: String,
    pub source_name: String,
    pub source_icon: String,
    /// Outbound link to the full story
    pub link: String,
}

impl Article {
    /// Normalize one provider item. `index` is the item's position within
    /// the page, used as the id of last resort.
    pub fn from_provider(item: &ProviderArticle, index: usize) -> Self {
        Self {
            id: item
                .article_id
                .clone()
                .unwrap_or_else(|| index.to_string()),
            title: item
                .title
                .clone()
                .unwrap_or_else(|| "No Title".to_string()),
            description: item
                .description
                .clone()
                .unwrap_or_else(|| "No Description".to_string()),
            image_url: item.image_url.clone(),
            formatted_date: format_pub_date(item.pub_date.as_deref()),
            source_name: item
                .source_id
                .clone()
                .unwrap_or_else(|| "Unknown Source".to_string()),
            source_icon: item
                .source_icon
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_ICON.to_string()),
            link: item.link.clone().unwrap_or_else(|| "#".to_string()),
        }
    }
}

/// Normalize a whole provider page, preserving order
pub fn normalize_articles(items: &[ProviderArticle]) -> Vec<Article> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| Article::from_provider(item, i))
        .collect()
}

/// Reformat the provider's publication timestamp for display.
///
/// The provider emits "2026-08-06 14:30:00"; RFC 3339 is accepted as well.
/// Anything unparseable renders as "Unknown Date".
fn format_pub_date(pub_date: Option<&str>) -> String {
    let Some(raw) = pub_date else {
        return "Unknown Date".to_string();
    };

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format(DATE_FORMAT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DATE_FORMAT).to_string();
    }

    "Unknown Date".to_string()
}
