//! Page arithmetic shared by listing endpoints.

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 12;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 50;
/// Highest page number whose row offset still fits a SQL `OFFSET`.
pub const MAX_PAGE: usize = i64::MAX as usize / MAX_PAGE_SIZE;

/// Coerces a requested page number into `1..=MAX_PAGE`.
pub fn normalize_page(page: Option<i64>) -> usize {
    match page {
        Some(page) if page > 1 => usize::try_from(page).map_or(MAX_PAGE, |p| p.min(MAX_PAGE)),
        _ => 1,
    }
}

/// Coerces a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn normalize_page_size(page_size: Option<i64>) -> usize {
    match page_size {
        None => DEFAULT_PAGE_SIZE,
        Some(size) => size.clamp(1, MAX_PAGE_SIZE as i64) as usize,
    }
}

/// `ceil(total / per_page)`; zero results means zero pages.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Builds the compact list of page links shown under a result list.
///
/// `None` marks a gap. Edge and neighbourhood widths match the listing
/// widget: two pages at each edge, two before and four after the current one.
/// A current page past the end is windowed as the last page.
pub fn page_links(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    get_pages(total_pages, current_page.clamp(1, total_pages.max(1)), 2, 2, 4, 2)
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}
