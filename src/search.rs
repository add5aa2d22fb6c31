//! Paginated search results.
//!
//! Search pages are addressed by a 1-based `start` offset and a `limit`.
//! The server reports the total and includes `previous`/`next` links only
//! when those pages exist; the rules are exposed here as plain functions so
//! both sides of the exchange agree on them.

use serde::{Deserialize, Serialize};

use crate::client::TaleoClient;
use crate::error::Result;
use crate::relationship::ResourceKind;
use crate::resource::Resource;

/// Default page size for searches.
pub const DEFAULT_LIMIT: u32 = 10;

/// Pagination block of a search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Number of results on the page starting at `start`.
pub fn page_len(total: u64, start: u32, limit: u32) -> u64 {
    let remaining = (total + 1).saturating_sub(u64::from(start));
    remaining.min(u64::from(limit))
}

/// Start of the previous page, if there is one.
///
/// A previous page exists whenever `start - limit > 0`; its start is clamped
/// to 1.
pub fn previous_start(start: u32, limit: u32) -> Option<u32> {
    (i64::from(start) - i64::from(limit) > 0).then(|| start.saturating_sub(limit).max(1))
}

/// Start of the next page, if there is one.
///
/// A next page exists whenever `start + limit <= total`; its start is clamped
/// to `total`.
pub fn next_start(total: u64, start: u32, limit: u32) -> Option<u32> {
    let next = u64::from(start) + u64::from(limit);
    (next <= total).then(|| u32::try_from(next.min(total)).unwrap_or(u32::MAX))
}

/// One page of a search.
#[derive(Debug, Clone)]
pub struct SearchResultSet {
    kind: &'static ResourceKind,
    /// Total number of matches across all pages.
    pub total: u64,
    /// 1-based offset of the first item.
    pub start: u32,
    /// Requested page size.
    pub limit: u32,
    /// Results in server order.
    pub items: Vec<Resource>,
    pagination: Pagination,
}

impl SearchResultSet {
    pub(crate) fn new(
        kind: &'static ResourceKind,
        start: u32,
        limit: u32,
        pagination: Pagination,
        items: Vec<Resource>,
    ) -> Self {
        Self {
            kind,
            total: pagination.total,
            start,
            limit,
            items,
            pagination,
        }
    }

    /// Kind of every item on the page.
    pub fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    /// Whether the server linked a next page.
    pub fn has_next(&self) -> bool {
        self.pagination.next.is_some()
    }

    /// Whether the server linked a previous page.
    pub fn has_previous(&self) -> bool {
        self.pagination.previous.is_some()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Fetch the next page, or `None` on the last page.
    pub async fn next_page(&self, client: &TaleoClient) -> Result<Option<SearchResultSet>> {
        match &self.pagination.next {
            Some(link) => Ok(Some(client.search_at(self.kind, link).await?)),
            None => Ok(None),
        }
    }

    /// Fetch the previous page, or `None` on the first page.
    pub async fn previous_page(&self, client: &TaleoClient) -> Result<Option<SearchResultSet>> {
        match &self.pagination.previous {
            Some(link) => Ok(Some(client.search_at(self.kind, link).await?)),
            None => Ok(None),
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.items.iter()
    }
}

impl IntoIterator for SearchResultSet {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResultSet {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
