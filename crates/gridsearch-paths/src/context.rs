//! Per-run search plumbing: [`CancelToken`], [`SearchEvent`],
//! [`SearchContext`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gridsearch_core::{Cell, Point};

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Searchers honour it at each iteration boundary, between processing one
/// open-set entry and the next; a running expansion is never interrupted.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// SearchEvent
// ---------------------------------------------------------------------------

/// Progress notification emitted while a search runs.
///
/// Events exist for the animation host; they carry positions and palette
/// indices, never correctness-relevant state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchEvent {
    /// A cell joined the frontier for the first time.
    Discovered { pos: Point },
    /// A cell was taken off the open set and expanded.
    Expanded { pos: Point },
    /// An already-closed cell was reached again; `marker` indexes the
    /// five-entry seen-again palette.
    Revisited { pos: Point, marker: u8 },
    /// A cell was confirmed to lie on the reconstructed path.
    PathTraced { pos: Point },
}

// ---------------------------------------------------------------------------
// SearchContext
// ---------------------------------------------------------------------------

/// Knobs and hooks threaded through every search run.
pub struct SearchContext {
    token: CancelToken,
    step_delay: Duration,
    show_reuse_markers: bool,
    observer: Option<Box<dyn FnMut(SearchEvent) + Send>>,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::headless()
    }
}

impl SearchContext {
    /// A context with no delay, no observer and no reuse markers — suitable
    /// for batch use and tests.
    pub fn headless() -> Self {
        Self {
            token: CancelToken::new(),
            step_delay: Duration::ZERO,
            show_reuse_markers: false,
            observer: None,
        }
    }

    /// Use the given cancellation token (builder).
    pub fn with_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    /// Sleep this long between open-set entries (builder). Zero disables
    /// pacing entirely.
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Rotate the seen-again palette when closed cells are re-reached
    /// (builder).
    pub fn with_reuse_markers(mut self, show: bool) -> Self {
        self.show_reuse_markers = show;
        self
    }

    /// Receive progress events (builder).
    pub fn with_observer(mut self, observer: impl FnMut(SearchEvent) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// The cancellation token in use.
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Iteration-boundary checkpoint: applies the inter-step delay and
    /// reports whether the run should stop.
    pub fn pace(&self) -> bool {
        if self.token.is_cancelled() {
            return true;
        }
        if !self.step_delay.is_zero() {
            std::thread::sleep(self.step_delay);
        }
        self.token.is_cancelled()
    }

    /// Deliver an event to the observer, if any.
    #[inline]
    pub fn emit(&mut self, event: SearchEvent) {
        if let Some(observer) = &mut self.observer {
            observer(event);
        }
    }

    /// Handle a searcher coming back to an already-closed cell: rotate the
    /// cell's revisit marker (unless markers are off or the cell is an
    /// endpoint) and notify the observer.
    pub fn note_revisit(&mut self, cell: &mut Cell) {
        if !self.show_reuse_markers || cell.is_start() || cell.is_goal() {
            return;
        }
        let marker = cell.bump_reached();
        self.emit(SearchEvent::Revisited {
            pos: cell.pos(),
            marker,
        });
    }
}
