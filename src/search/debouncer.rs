use std::{sync::Arc, time::Duration};

use tokio::{sync::Mutex, task::JoinHandle, time::sleep};

use crate::{
    spotify::Catalog,
    types::{ArtistSummary, SearchSnapshot},
};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Waiting out the quiet period.
    Pending,
    /// The search request has been sent.
    Fired,
    /// Replaced by a newer query before it fired.
    Cancelled,
}

struct ScheduledSearch {
    generation: u64,
    state: TaskState,
    handle: JoinHandle<()>,
}

impl ScheduledSearch {
    fn cancel(&mut self) {
        if self.state == TaskState::Pending {
            self.handle.abort();
            self.state = TaskState::Cancelled;
        }
    }
}

#[derive(Default)]
struct DebounceState {
    results: Vec<ArtistSummary>,
    is_searching: bool,
    generation: u64,
    applied_generation: u64,
    scheduled: Option<ScheduledSearch>,
}

/// Keystroke-driven artist search with a quiet period.
///
/// Every call replaces the pending search, so only the last query of a burst
/// reaches the catalog. A search that already fired is left to finish; its
/// results are dropped if something newer has been applied in the meantime.
///
/// # Example
///
/// ```
/// let debouncer = SearchDebouncer::new(catalog);
/// debouncer.search("Radio").await;
/// debouncer.search("Radiohead").await;
/// // ~300ms later a single search for "Radiohead" runs
/// ```
#[derive(Clone)]
pub struct SearchDebouncer {
    catalog: Arc<dyn Catalog>,
    delay: Duration,
    state: Arc<Mutex<DebounceState>>,
}

impl SearchDebouncer {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self::with_delay(catalog, SEARCH_DEBOUNCE)
    }

    pub fn with_delay(catalog: Arc<dyn Catalog>, delay: Duration) -> Self {
        Self {
            catalog,
            delay,
            state: Arc::new(Mutex::new(DebounceState::default())),
        }
    }

    /// Schedules a search for `query` and returns the state right after
    /// scheduling. A blank query clears results at once and schedules nothing.
    pub async fn search(&self, query: &str) -> SearchSnapshot {
        let mut state = self.state.lock().await;

        if let Some(mut previous) = state.scheduled.take() {
            previous.cancel();
        }
        state.generation += 1;
        let generation = state.generation;

        if query.trim().is_empty() {
            state.results.clear();
            state.is_searching = false;
            state.applied_generation = generation;
            return snapshot_of(&state);
        }

        state.is_searching = true;
        let handle = tokio::spawn(run_scheduled(
            Arc::clone(&self.state),
            Arc::clone(&self.catalog),
            query.to_string(),
            generation,
            self.delay,
        ));
        state.scheduled = Some(ScheduledSearch {
            generation,
            state: TaskState::Pending,
            handle,
        });

        snapshot_of(&state)
    }

    pub async fn snapshot(&self) -> SearchSnapshot {
        snapshot_of(&*self.state.lock().await)
    }

    pub async fn results(&self) -> Vec<ArtistSummary> {
        self.state.lock().await.results.clone()
    }

    pub async fn is_searching(&self) -> bool {
        self.state.lock().await.is_searching
    }

    /// State of the most recently scheduled search, if any.
    pub async fn task_state(&self) -> Option<TaskState> {
        self.state.lock().await.scheduled.as_ref().map(|s| s.state)
    }
}

async fn run_scheduled(
    state: Arc<Mutex<DebounceState>>,
    catalog: Arc<dyn Catalog>,
    query: String,
    generation: u64,
    delay: Duration,
) {
    sleep(delay).await;

    {
        let mut guard = state.lock().await;
        match guard.scheduled.as_mut() {
            Some(task) if task.generation == generation && task.state == TaskState::Pending => {
                task.state = TaskState::Fired;
            }
            _ => return,
        }
    }

    let outcome = catalog.search_artists(&query, None).await;

    let mut guard = state.lock().await;
    match outcome {
        Ok(artists) if generation >= guard.applied_generation => {
            guard.results = artists;
            guard.applied_generation = generation;
        }
        Ok(_) => log::debug!("Dropping stale results for '{query}'"),
        // last good results stay in place
        Err(e) => log::warn!("Error searching artists for '{query}': {e}"),
    }
    if guard.generation == generation {
        guard.is_searching = false;
    }
}

fn snapshot_of(state: &DebounceState) -> SearchSnapshot {
    SearchSnapshot {
        results: state.results.clone(),
        is_searching: state.is_searching,
    }
}
