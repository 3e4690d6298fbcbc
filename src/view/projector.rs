use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Course;

/// Grid page size.
pub const PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Date,
}

impl SortKey {
    /// Direction picked when switching to this key.
    pub fn default_order(self) -> SortOrder {
        match self {
            SortKey::Name => SortOrder::Asc,
            SortKey::Date => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            order: SortOrder::Desc,
        }
    }
}

impl SortState {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Toggle semantics of the sort control: re-selecting the current key
    /// (or deselecting, `None`) flips the order, a new key starts at its default.
    pub fn select(self, key: Option<SortKey>) -> Self {
        match key {
            Some(key) if key != self.key => Self::new(key, key.default_order()),
            _ => Self::new(self.key, self.order.flipped()),
        }
    }

    fn compare(&self, a: &Course, b: &Course) -> Ordering {
        let ord = match self.key {
            SortKey::Name => compare_titles(&a.title, &b.title),
            SortKey::Date => a.created_at.cmp(&b.created_at),
        };
        match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Case-insensitive comparison, falling back to the raw text so distinct titles never tie.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: String,
    pub sort: SortState,
}

impl ListQuery {
    /// Lowercased search term, or `None` when blank.
    fn needle(&self) -> Option<String> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then(|| self.search.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub items: Vec<Course>,
    pub total: usize,
    pub pages_loaded: usize,
    pub has_more: bool,
}

/// Filters by title and sorts. The sort is stable, equal keys keep input order.
pub fn filter_and_sort(courses: &[Course], query: &ListQuery) -> Vec<Course> {
    let needle = query.needle();
    let mut results: Vec<Course> = courses
        .iter()
        .filter(|c| match &needle {
            None => true,
            Some(needle) => c.title.to_lowercase().contains(needle),
        })
        .cloned()
        .collect();

    results.sort_by(|a, b| query.sort.compare(a, b));
    results
}

/// The first `pages_loaded` pages of the filtered and sorted list.
/// `pages_loaded` is clamped to at least one page.
pub fn project(courses: &[Course], query: &ListQuery, pages_loaded: usize, page_size: usize) -> Projection {
    let page_size = page_size.max(1);
    let pages_loaded = pages_loaded.max(1);
    let mut all = filter_and_sort(courses, query);
    let total = all.len();

    all.truncate(pages_loaded.saturating_mul(page_size));

    Projection {
        has_more: all.len() < total,
        items: all,
        total,
        pages_loaded,
    }
}
