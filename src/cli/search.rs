use std::time::Duration;

use tabled::Table;
use tokio::time::{Instant, sleep};

use crate::{cli, search::SearchDebouncer, success, utils, warning};

const MAX_WAIT: Duration = Duration::from_secs(30);

/// Runs one query through the debouncer and prints the matches.
///
/// The debouncer is built for bursts of keystrokes; from the command line
/// there is exactly one query, so this waits out the quiet period and the
/// request, polling the searching flag.
pub async fn search(query: String) {
    let settings = cli::settings();
    let debouncer = SearchDebouncer::new(cli::catalog(&settings));

    let scheduled = debouncer.search(&query).await;
    if !scheduled.is_searching {
        warning!("Nothing to search for.");
        return;
    }

    let pb = cli::spinner(&format!("Searching artists for '{}'...", query));
    let start = Instant::now();
    while debouncer.is_searching().await && start.elapsed() < MAX_WAIT {
        sleep(Duration::from_millis(50)).await;
    }
    pb.finish_and_clear();

    let snapshot = debouncer.snapshot().await;
    if snapshot.is_searching {
        warning!("Search for '{}' did not finish in time.", query);
        return;
    }
    if snapshot.results.is_empty() {
        warning!("No artists found for '{}'.", query);
        return;
    }

    success!("Found {} artists.", snapshot.results.len());
    println!("{}", Table::new(utils::artist_table_rows(&snapshot.results)));
}
