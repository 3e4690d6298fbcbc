use crate::models::Course;

use super::projector::{self, ListQuery, PAGE_SIZE, Projection, SortKey, SortState};

/// Search, sort and "load more" cursor of the course grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    query: ListQuery,
    pages_loaded: usize,
    page_size: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: ListQuery::default(),
            pages_loaded: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn sort(&self) -> SortState {
        self.query.sort
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Applies a settled search term. Pagination restarts at page one.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search = term.into();
        self.pages_loaded = 1;
    }

    /// Applies a click on the sort control. Pagination restarts at page one.
    pub fn select_sort(&mut self, key: Option<SortKey>) {
        self.query.sort = self.query.sort.select(key);
        self.pages_loaded = 1;
    }

    /// Extends the displayed slice by one page, if more is available.
    pub fn load_more(&mut self, courses: &[Course]) -> Projection {
        if self.project(courses).has_more {
            self.pages_loaded += 1;
        }
        self.project(courses)
    }

    pub fn project(&self, courses: &[Course]) -> Projection {
        projector::project(courses, &self.query, self.pages_loaded, self.page_size)
    }
}
