//! Page-token store
//!
//! The store maps 1-based page numbers to the opaque continuation tokens
//! the provider issued for them. Tokens are only ever learned in order:
//! fetching page n yields the token for page n+1, so the chain grows one
//! slot at a time and resets wholesale whenever the query scope changes.

use super::MAX_PAGES;
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};

/// Opaque provider-issued continuation token.
///
/// Has no meaning to the client beyond being replayed verbatim. Empty
/// strings are not representable; construction normalizes them away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Wrap a raw token string; returns None for the empty string
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        raw.into().none_if_empty().map(Self)
    }

    /// The raw token, to be replayed verbatim as a query parameter
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered token slots, one per page, indexed by page number minus one.
///
/// Invariants:
/// - slot 0 (page 1) is always empty: the first page needs no token
/// - slot n is populated only after page n has been fetched in the
///   current scope and the provider returned a next-token
/// - a failed fetch records nothing, so the same page can be retried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTokenStore {
    slots: Vec<Option<PageToken>>,
    max_pages: u32,
}

impl Default for PageTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTokenStore {
    /// Create a store seeded with the implicit empty first slot
    pub fn new() -> Self {
        Self::with_max_pages(MAX_PAGES)
    }

    /// Create a store with a non-default page cap
    pub fn with_max_pages(max_pages: u32) -> Self {
        Self {
            slots: vec![None],
            max_pages: max_pages.max(1),
        }
    }

    /// Reset to a single empty slot. Called on every scope change.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.slots.push(None);
    }

    /// Token needed to fetch `page`. Always None for page 1; None for any
    /// page whose token has not been learned yet.
    pub fn token_for_page(&self, page: u32) -> Option<&PageToken> {
        if page < 2 {
            return None;
        }
        self.slots.get(page as usize - 1).and_then(Option::as_ref)
    }

    /// Whether the UI may navigate to `page` right now
    pub fn is_navigable(&self, page: u32) -> bool {
        match page {
            0 => false,
            1 => true,
            n if n > self.max_pages => false,
            n => self.token_for_page(n).is_some(),
        }
    }

    /// Record the outcome of fetching `fetched_page`.
    ///
    /// A present next-token lands at slot index `fetched_page`, i.e. it is
    /// the token for page `fetched_page + 1`. An absent token caps forward
    /// navigation at the fetched page. Tokens past the page cap are
    /// discarded: the page they would unlock is not navigable anyway.
    pub fn record_next(&mut self, fetched_page: u32, next_token: Option<PageToken>) {
        let Some(token) = next_token else {
            return;
        };
        if fetched_page == 0 || fetched_page >= self.max_pages {
            return;
        }

        let slot = fetched_page as usize;
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, None);
        }
        self.slots[slot] = Some(token);
    }

    /// Highest page currently navigable
    pub fn highest_navigable(&self) -> u32 {
        let mut highest = 1;
        for page in 2..=self.max_pages {
            if self.token_for_page(page).is_some() {
                highest = page;
            } else {
                break;
            }
        }
        highest
    }

    /// Number of slots currently held (known pages)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True only immediately after construction or reset
    pub fn is_empty(&self) -> bool {
        self.slots.len() == 1 && self.slots[0].is_none()
    }
}
