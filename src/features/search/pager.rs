use url::form_urlencoded;

use crate::features::search::schemas::Pagination;

/// One slot in the pager row: an interactive page button or a non-interactive
/// collapsed range marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerItem {
    Page(u32),
    Ellipsis,
}

/// Page-button visibility: always the first and last page, the current page
/// ± 1, every other run collapsed into a single ellipsis.
/// `(5, 10)` yields `[1, …, 4, 5, 6, …, 10]`.
pub fn pager_items(current_page: u32, total_pages: u32) -> Vec<PagerItem> {
    let mut items = Vec::new();
    let mut last_shown = 0u32;
    for page in 1..=total_pages {
        let visible = page == 1
            || page == total_pages
            || (page + 1 >= current_page && page <= current_page + 1);
        if !visible {
            continue;
        }
        if last_shown != 0 && page - last_shown > 1 {
            items.push(PagerItem::Ellipsis);
        }
        items.push(PagerItem::Page(page));
        last_shown = page;
    }
    items
}

/// Prev/next enablement comes straight from the server's pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerControls {
    pub current_page: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl From<&Pagination> for PagerControls {
    fn from(pagination: &Pagination) -> Self {
        Self {
            current_page: pagination.page_number,
            previous_enabled: pagination.has_previous_page,
            next_enabled: pagination.has_next_page,
        }
    }
}

/// Rewrite only the `page` parameter of the current query string, keeping
/// every other parameter and their order. The canonical first-page URL omits
/// `page` entirely. The caller owns the accompanying scroll-to-top effect.
pub fn page_transition(query: &str, target_page: u32) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key != "page" {
            serializer.append_pair(&key, &value);
        }
    }
    if target_page > 1 {
        serializer.append_pair("page", &target_page.to_string());
    }
    serializer.finish()
}
