pub mod list_view;
pub mod projector;
pub mod session;

pub use list_view::ListView;
pub use projector::{
    ListQuery, PAGE_SIZE, Projection, SortKey, SortOrder, SortState, filter_and_sort, project,
};
pub use session::{BrowseSession, SEARCH_DEBOUNCE};
