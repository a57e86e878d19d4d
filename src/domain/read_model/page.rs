//! Page requests and paginated results.

use serde::Serialize;

use crate::domain::foundation::ValidationError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// A 1-based page number and page size, always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Clamps `page` to at least 1 and `limit` to `1..=MAX_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Parses raw query-string values.
    ///
    /// Absent or blank values take the defaults. Non-numeric values and a
    /// limit below 1 are rejected; a page below 1 becomes 1 and a limit
    /// above the maximum is capped.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, ValidationError> {
        let page = match parse_number("page", page)? {
            None => DEFAULT_PAGE,
            Some(n) => n.clamp(1, u32::MAX as i64) as u32,
        };
        let limit = match parse_number("limit", limit)? {
            None => DEFAULT_LIMIT,
            Some(n) if n < 1 => {
                return Err(ValidationError::out_of_range("limit", 1, MAX_LIMIT as i64, n))
            }
            Some(n) => n.min(MAX_LIMIT as i64) as u32,
        };
        Ok(Self::new(page, limit))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows skipped before this page.
    pub fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            skip: self.skip(),
            take: self.limit as u64,
        }
    }
}

fn parse_number(field: &str, raw: Option<&str>) -> Result<Option<i64>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ValidationError::invalid_format(field, "must be an integer")),
    }
}

/// Skip/take slice applied after sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub take: u64,
}

impl PageWindow {
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.skip as usize)
            .take(self.take as usize)
            .collect()
    }
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit as u64)
}

/// One page of a result set plus the counts needed to navigate it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub limit: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: &PageRequest) -> Self {
        let total_pages = total_pages(total_items, request.limit());
        let current_page = request.page();
        Self {
            items,
            total_items,
            total_pages,
            current_page,
            limit: request.limit(),
            has_next: (current_page as u64) < total_pages,
            has_prev: current_page > 1 && total_items > 0,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<PageResult<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(PageResult {
            items,
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
            limit: self.limit,
            has_next: self.has_next,
            has_prev: self.has_prev,
        })
    }
}
