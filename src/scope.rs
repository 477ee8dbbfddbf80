//! Query scope
//!
//! A scope is the tuple of country / category / search query / language
//! that identifies one distinct result set. Two scopes that compare equal
//! share a token chain; any change of identity invalidates every stored
//! page token.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};

/// Default language sent to the provider when none is given
pub const DEFAULT_LANGUAGE: &str = "en";

/// Identity of one result set.
///
/// A scope with a `query` is a search; without one it is a listing, and
/// `country` becomes mandatory. Country codes are lowercased on the way in
/// so that "US" and "us" are the same scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// ISO country code, lowercased (e.g. "us")
    pub country: Option<String>,
    /// Provider category (e.g. "technology")
    pub category: Option<String>,
    /// Free-text search query; presence switches the scope to search mode
    pub query: Option<String>,
    /// Article language
    pub language: String,
}

impl Scope {
    /// Create a listing scope for a country
    pub fn listing(country: impl Into<String>) -> Self {
        Self {
            country: country.into().to_lowercase().none_if_empty(),
            category: None,
            query: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Create a search scope for a query
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            country: None,
            category: None,
            query: query.into().none_if_empty(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into().none_if_empty();
        self
    }

    /// Set the country (lowercased)
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into().to_lowercase().none_if_empty();
        self
    }

    /// Set the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Whether this scope is a free-text search
    pub fn is_search(&self) -> bool {
        self.query.is_some()
    }

    /// Check the mandatory field for this scope's mode.
    ///
    /// Listings require a country; searches require query text. The error
    /// messages are the ones relayed verbatim to API callers.
    pub fn validate(&self) -> Result<()> {
        if self.is_search() {
            // query presence already established; nothing more to check
            Ok(())
        } else if self.country.is_none() {
            Err(Error::missing_parameter("country code"))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_scope() {
        let scope = Scope::listing("US");
        assert_eq!(scope.country.as_deref(), Some("us"));
        assert!(!scope.is_search());
        assert_eq!(scope.language, "en");
        assert!(scope.validate().is_ok());
    }

    #[test]
    fn test_listing_without_country_invalid() {
        let scope = Scope::listing("");
        let err = scope.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing country code");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_search_scope() {
        let scope = Scope::search("election").with_country("us");
        assert!(scope.is_search());
        assert!(scope.validate().is_ok());
    }

    #[test]
    fn test_identity_drives_invalidation() {
        let a = Scope::listing("us").with_category("technology");
        let b = Scope::listing("us").with_category("technology");
        let c = Scope::listing("us").with_category("sports");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Scope::listing("gb").with_category("technology"));
    }

    #[test]
    fn test_empty_strings_normalize_to_none() {
        let scope = Scope::listing("us").with_category("");
        assert!(scope.category.is_none());
        let scope = Scope::search("");
        assert!(scope.query.is_none());
        assert!(!scope.is_search());
    }
}
