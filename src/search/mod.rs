mod debouncer;

pub use debouncer::{SEARCH_DEBOUNCE, SearchDebouncer, TaskState};
