use std::time::Duration;

use tokio::sync::watch;

use crate::debounce::Debouncer;
use crate::models::Course;

use super::list_view::ListView;
use super::projector::{Projection, SortKey};

/// Delay between the last keystroke and the search being applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

/// A browsing session over the course list: raw search input goes through a
/// debouncer and only the settled term reaches the list view.
pub struct BrowseSession {
    view: ListView,
    search: Debouncer<String>,
    settled: watch::Receiver<String>,
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new(ListView::default(), SEARCH_DEBOUNCE)
    }
}

impl BrowseSession {
    pub fn new(view: ListView, delay: Duration) -> Self {
        let search = Debouncer::new(delay, String::new());
        let settled = search.subscribe();
        Self { view, search, settled }
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn type_search(&self, raw: impl Into<String>) {
        self.search.push(raw.into());
    }

    pub fn clear_search(&self) {
        self.search.cancel();
        self.search.push(String::new());
    }

    /// Applies a settled search term if one arrived since the last call.
    /// Returns true when the view changed.
    pub fn sync(&mut self) -> bool {
        match self.settled.has_changed() {
            Ok(true) => self.sync_current(),
            _ => false,
        }
    }

    /// Waits for the next settled search term and applies it.
    pub async fn settle(&mut self) -> bool {
        if self.settled.changed().await.is_err() {
            return false;
        }
        self.sync_current()
    }

    fn sync_current(&mut self) -> bool {
        let term = self.settled.borrow_and_update().clone();
        if term == self.view.query().search {
            return false;
        }
        self.view.set_search(term);
        true
    }

    pub fn select_sort(&mut self, key: Option<SortKey>) {
        self.view.select_sort(key);
    }

    pub fn load_more(&mut self, courses: &[Course]) -> Projection {
        self.sync();
        self.view.load_more(courses)
    }

    pub fn project(&mut self, courses: &[Course]) -> Projection {
        self.sync();
        self.view.project(courses)
    }
}
