//! Background search runs: [`SearchSession`].
//!
//! A session runs one search on a dedicated worker thread while the
//! presentation side polls a shared `done` flag and drains progress events
//! from a channel. The worker is the sole writer of cell transient state
//! for the duration of the run; observers see an eventually-consistent
//! event stream, and the grid itself travels back in the final report.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use gridsearch_core::Grid;

use crate::context::{CancelToken, SearchContext, SearchEvent};
use crate::outcome::{Path, SearchError, SearchOutcome, path_traced};
use crate::traits::SearchAlgorithm;

/// Pacing used by the legacy animation between expansion steps.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(5);

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Knobs for a background run.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Delay between open-set entries. Zero disables pacing.
    pub step_delay: Duration,
    /// Rotate seen-again markers on revisits.
    pub show_reuse_markers: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            show_reuse_markers: false,
        }
    }
}

impl SessionConfig {
    /// No pacing, no markers: run the algorithm flat out.
    pub fn headless() -> Self {
        Self {
            step_delay: Duration::ZERO,
            show_reuse_markers: false,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchSession
// ---------------------------------------------------------------------------

/// Everything a run produces: how it ended, the route if one was found, and
/// the grid with its final transient state.
#[derive(Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub path: Option<Path>,
    pub grid: Grid,
}

/// Handle to a search running on a worker thread.
pub struct SearchSession {
    worker: JoinHandle<Result<SearchReport, SearchError>>,
    events: Receiver<SearchEvent>,
    done: Arc<AtomicBool>,
    token: CancelToken,
}

impl SearchSession {
    /// Start `algorithm` against `grid` on a dedicated worker.
    ///
    /// The grid moves into the worker and comes back in the
    /// [`SearchReport`]; when the outcome is `Found`, the worker also
    /// reconstructs the path before raising the done flag.
    pub fn spawn(
        mut grid: Grid,
        mut algorithm: Box<dyn SearchAlgorithm + Send>,
        config: SessionConfig,
    ) -> SearchSession {
        let (tx, rx) = mpsc::channel();
        let done = Arc::new(AtomicBool::new(false));
        let token = CancelToken::new();

        let worker_done = Arc::clone(&done);
        let worker_token = token.clone();
        let worker = thread::spawn(move || {
            let mut cx = SearchContext::headless()
                .with_token(worker_token)
                .with_step_delay(config.step_delay)
                .with_reuse_markers(config.show_reuse_markers)
                .with_observer(move |ev| {
                    // The receiver may be gone; progress is best-effort.
                    let _ = tx.send(ev);
                });

            let result = run(&mut grid, algorithm.as_mut(), &mut cx);
            // The done flag is the single termination signal consumers
            // poll, raised no matter how the run ended.
            worker_done.store(true, Ordering::Release);
            result.map(|(outcome, path)| SearchReport {
                outcome,
                path,
                grid,
            })
        });

        SearchSession {
            worker,
            events: rx,
            done,
            token,
        }
    }

    /// Whether the run (including path reconstruction) has completed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Request cancellation; honoured at the next iteration boundary.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Drain all progress events received so far.
    pub fn drain_events(&self) -> Vec<SearchEvent> {
        self.events.try_iter().collect()
    }

    /// Block until the worker finishes and hand back its report.
    pub fn join(self) -> Result<SearchReport, SearchError> {
        self.worker
            .join()
            .map_err(|_| SearchError::InvalidState("search worker panicked"))?
    }
}

fn run(
    grid: &mut Grid,
    algorithm: &mut dyn SearchAlgorithm,
    cx: &mut SearchContext,
) -> Result<(SearchOutcome, Option<Path>), SearchError> {
    log::info!("{} search: {}x{} grid", algorithm.name(), grid.size(), grid.size());
    let outcome = algorithm.search(grid, cx)?;

    let path = match outcome {
        SearchOutcome::Found(_) => {
            let found = path_traced(grid, &outcome, cx)?;
            log::info!("{} search: path found, cost {}", algorithm.name(), found.cost);
            Some(found)
        }
        SearchOutcome::Exhausted => {
            log::info!("{} search: open set exhausted, no path", algorithm.name());
            None
        }
        SearchOutcome::Cancelled => {
            log::info!("{} search: cancelled", algorithm.name());
            None
        }
    };

    Ok((outcome, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::BreadthFirstSearcher;
    use crate::testgrid::{grid_with, walled_off};

    #[test]
    fn run_completes_and_raises_done() {
        let grid = grid_with(5, (0, 0), (4, 4), &[]);
        let session = SearchSession::spawn(
            grid,
            Box::new(BreadthFirstSearcher::new()),
            SessionConfig::headless(),
        );
        let report = session.join().unwrap();
        assert!(report.outcome.is_found());
        assert_eq!(report.path.unwrap().cost, 8);
    }

    #[test]
    fn done_flag_is_observable_while_polling() {
        let grid = grid_with(5, (0, 0), (4, 4), &[]);
        let session = SearchSession::spawn(
            grid,
            Box::new(BreadthFirstSearcher::new()),
            SessionConfig::headless(),
        );
        // Poll until the worker signals completion.
        while !session.is_done() {
            std::thread::yield_now();
        }
        let report = session.join().unwrap();
        assert!(report.path.is_some());
    }

    #[test]
    fn events_include_a_path_trace_on_success() {
        let grid = grid_with(5, (0, 0), (4, 4), &[]);
        let session = SearchSession::spawn(
            grid,
            Box::new(BreadthFirstSearcher::new()),
            SessionConfig::headless(),
        );
        // All events are sent before the done flag is raised.
        while !session.is_done() {
            std::thread::yield_now();
        }
        let events = session.drain_events();
        let report = session.join().unwrap();
        assert!(report.outcome.is_found());
        assert!(events.iter().any(|e| matches!(e, SearchEvent::Expanded { .. })));
        let traced: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, SearchEvent::PathTraced { .. }))
            .collect();
        // Trace covers every route cell, endpoints included.
        assert_eq!(traced.len(), report.path.as_ref().unwrap().route.len());
    }

    #[test]
    fn exhausted_run_reports_no_path() {
        let grid = walled_off(7);
        let session = SearchSession::spawn(
            grid,
            Box::new(BreadthFirstSearcher::new()),
            SessionConfig::headless(),
        );
        let report = session.join().unwrap();
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert!(report.path.is_none());
    }

    #[test]
    fn cancellation_is_honoured_between_iterations() {
        let grid = grid_with(50, (0, 0), (49, 49), &[]);
        let session = SearchSession::spawn(
            grid,
            Box::new(BreadthFirstSearcher::new()),
            SessionConfig {
                step_delay: Duration::from_millis(2),
                show_reuse_markers: false,
            },
        );
        session.cancel();
        let report = session.join().unwrap();
        assert_eq!(report.outcome, SearchOutcome::Cancelled);
        assert!(report.path.is_none());
    }
}
