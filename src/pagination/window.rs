//! Numbered page control
//!
//! Computes the row of page buttons shown under the results: the first
//! page, a sibling run around the current page, the last page, and
//! ellipsis markers where the run detaches from either end.

/// One item in the page control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A numbered page button
    Page(u32),
    /// A gap between the sibling run and an endpoint
    Ellipsis,
}

/// Build the page control for `current` out of `total_pages`.
///
/// Empty when there is at most one page (the control is hidden). One
/// sibling is kept on each side of the current page; the first and last
/// pages are always present.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let sibling_count = 1;
    let start = current.saturating_sub(sibling_count).max(2);
    let end = (current + sibling_count).min(total_pages - 1);

    let mut items = vec![PageItem::Page(1)];

    if start > 2 {
        items.push(PageItem::Ellipsis);
    }

    for page in start..=end {
        items.push(PageItem::Page(page));
    }

    if end + 1 < total_pages {
        items.push(PageItem::Ellipsis);
    }

    items.push(PageItem::Page(total_pages));
    items
}
