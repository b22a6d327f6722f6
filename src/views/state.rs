//! Shared load lifecycle for the dashboard views.
//!
//! Every view goes through `loading -> ready | failed`, exactly once per
//! load invocation. A generation counter plus a mounted flag stand in for
//! request cancellation: a settlement belonging to a superseded or unmounted
//! invocation is discarded instead of written.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::debug;

/// Lifecycle of one view's data. `Ready` carries the data and `Failed`
/// carries the message, so the two can never coexist.
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

struct CellInner<T> {
    state: LoadState<T>,
    generation: u64,
    mounted: bool,
}

/// Observable state owned by a single view.
///
/// `begin_load` starts a new invocation and hands out a one-shot
/// [`LoadTicket`]; only the ticket from the newest invocation may commit,
/// and only while the view is still mounted.
pub struct ViewCell<T> {
    inner: Arc<Mutex<CellInner<T>>>,
}

impl<T> Clone for ViewCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ViewCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewCell<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CellInner {
                state: LoadState::Loading,
                generation: 0,
                mounted: true,
            })),
        }
    }

    /// Starts a new load cycle: state back to `Loading`, previous error
    /// cleared, any in-flight ticket superseded.
    pub fn begin_load(&self) -> LoadTicket<T> {
        let mut inner = self.inner.lock().unwrap();
        inner.generation += 1;
        inner.state = LoadState::Loading;
        LoadTicket {
            cell: self.clone(),
            generation: inner.generation,
        }
    }

    /// Marks the view deactivated; settlements arriving afterwards are
    /// discarded.
    pub fn unmount(&self) {
        self.inner.lock().unwrap().mounted = false;
    }
}

impl<T: Clone> ViewCell<T> {
    pub fn snapshot(&self) -> LoadState<T> {
        self.inner.lock().unwrap().state.clone()
    }
}

/// Permission to settle one load invocation. Consumed on commit, so the
/// `loading -> ready | failed` transition can happen at most once per
/// invocation.
pub struct LoadTicket<T> {
    cell: ViewCell<T>,
    generation: u64,
}

impl<T> LoadTicket<T> {
    /// Commits the invocation's outcome. Returns false when the settlement
    /// was discarded because the view unmounted or a newer load began.
    pub fn commit(self, outcome: Result<T>) -> bool {
        let mut inner = self.cell.inner.lock().unwrap();
        if !inner.mounted {
            debug!("load settled after unmount, discarding result");
            return false;
        }
        if inner.generation != self.generation {
            debug!(
                "load generation {} superseded by {}, discarding result",
                self.generation, inner.generation
            );
            return false;
        }
        inner.state = match outcome {
            Ok(data) => LoadState::Ready(data),
            Err(e) => LoadState::Failed(e.to_string()),
        };
        true
    }
}
