//! Pagination defaults and clamps for record listing.

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of records per page.
pub const MAX_PAGE_SIZE: i64 = 50;

/// Clamp a user-provided page number to `[1, ∞)`.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to `[1, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

/// Row offset for a (page, page_size) pair.
pub fn offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}
