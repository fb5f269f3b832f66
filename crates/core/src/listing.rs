//! Paginated list queries.
//!
//! The backend paginates users, bookings and reviews server-side. A
//! [`ListQuery`] carries the admin's current page, search text and filter; it
//! produces both the backend query string and the links the panel renders, so
//! paging keeps the search and filter while changing either of them goes back
//! to page 1.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{BookingStatus, UserRole};

/// Page size for the user, booking and review tables.
pub const PAGE_SIZE: u32 = 15;

/// Page size for approval queues and provider lists, which are shown whole.
pub const QUEUE_SIZE: u32 = 100;

/// A typed filter that travels as a single query parameter.
pub trait ListFilter: Copy + FromStr {
    /// Query parameter name (`role`, `status`).
    const PARAM: &'static str;

    fn as_param(self) -> &'static str;
}

impl ListFilter for UserRole {
    const PARAM: &'static str = "role";

    fn as_param(self) -> &'static str {
        self.as_str()
    }
}

impl ListFilter for BookingStatus {
    const PARAM: &'static str = "status";

    fn as_param(self) -> &'static str {
        self.as_str()
    }
}

/// Filter for lists that have none (reviews).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFilter {}

impl FromStr for NoFilter {
    type Err = ();

    fn from_str(_: &str) -> Result<Self, Self::Err> {
        Err(())
    }
}

impl ListFilter for NoFilter {
    const PARAM: &'static str = "filter";

    fn as_param(self) -> &'static str {
        match self {}
    }
}

/// Page metadata reported by the backend alongside a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            pages: 1,
        }
    }
}

impl Pagination {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Page, page size, search text and filter for one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    page: u32,
    limit: u32,
    search: Option<String>,
    filter: Option<F>,
}

impl<F: ListFilter> ListQuery<F> {
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            search: None,
            filter: None,
        }
    }

    /// Build from raw query-string values.
    ///
    /// Missing or zero pages become page 1, blank search is dropped and an
    /// unrecognized filter value is ignored.
    #[must_use]
    pub fn from_raw(
        limit: u32,
        page: Option<u32>,
        search: Option<&str>,
        filter: Option<&str>,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit,
            search: normalize_search(search),
            filter: filter.and_then(|f| f.parse().ok()),
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    #[must_use]
    pub const fn filter(&self) -> Option<F> {
        self.filter
    }

    /// Change the search text and go back to page 1.
    #[must_use]
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = normalize_search(search);
        self.page = 1;
        self
    }

    /// Change the filter and go back to page 1.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<F>) -> Self {
        self.filter = filter;
        self.page = 1;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// The following page, if the backend reports one.
    #[must_use]
    pub fn next(&self, pagination: &Pagination) -> Option<Self> {
        (self.page < pagination.pages).then(|| self.clone().with_page(self.page + 1))
    }

    /// The preceding page, if not already on the first.
    #[must_use]
    pub fn previous(&self, pagination: &Pagination) -> Option<Self> {
        let last = pagination.pages.max(1);
        (self.page > 1).then(|| self.clone().with_page((self.page - 1).min(last)))
    }

    /// Query pairs sent to the backend.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(filter) = self.filter {
            params.push((F::PARAM, filter.as_param().to_owned()));
        }
        params
    }

    /// Panel link to this page of the list. The page size is fixed per view,
    /// so it is left out.
    #[must_use]
    pub fn href(&self, base: &str) -> String {
        let mut href = format!("{base}?page={}", self.page);
        if let Some(search) = &self.search {
            href.push_str("&search=");
            href.push_str(&urlencoding::encode(search));
        }
        if let Some(filter) = self.filter {
            href.push('&');
            href.push_str(F::PARAM);
            href.push('=');
            href.push_str(filter.as_param());
        }
        href
    }
}

fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}
