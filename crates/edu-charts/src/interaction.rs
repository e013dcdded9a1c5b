//! Hover highlight state machine
//!
//! One [`InteractionState`] per chart instance. Marks and legend rows share it,
//! so only one element is ever highlighted. Transitions are last-write-wins
//! assignments; repeating the current state is a no-op.
//!
//! Every transition returns the new highlight when it changed. The state is
//! updated before an installed listener runs, and owners that keep the state
//! behind a lock can leave the listener unset and notify from the returned
//! change once the lock is released.

use crate::Emphasis;
use edu_core::Dataset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Current highlight of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "lowercase")]
pub enum Highlight {
    #[default]
    Idle,
    Hovering(usize),
}

impl Highlight {
    pub fn active_index(&self) -> Option<usize> {
        match *self {
            Self::Idle => None,
            Self::Hovering(index) => Some(index),
        }
    }

    pub fn from_index(index: Option<usize>) -> Self {
        index.map_or(Self::Idle, Self::Hovering)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Drop a highlight that points past the end of a dataset of `len` points.
    pub fn validated(self, len: usize) -> Self {
        match self {
            Self::Hovering(index) if index >= len => {
                tracing::debug!(index, len, "dropping out-of-range highlight");
                Self::Idle
            }
            other => other,
        }
    }

    /// Emphasis of `element` under this highlight
    pub fn emphasis(&self, element: usize) -> Emphasis {
        match *self {
            Self::Idle => Emphasis::Normal,
            Self::Hovering(active) if active == element => Emphasis::Highlighted,
            Self::Hovering(_) => Emphasis::Dimmed,
        }
    }
}

/// Called with the new active index after every transition
pub type HoverListener = Arc<dyn Fn(Option<usize>) + Send + Sync>;

/// Highlight bound to a dataset snapshot
#[derive(Clone, Default)]
pub struct InteractionState {
    highlight: Highlight,
    snapshot: Option<Dataset>,
    listener: Option<HoverListener>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            snapshot: Some(dataset.clone()),
            ..Self::default()
        }
    }

    pub fn with_listener(mut self, listener: impl Fn(Option<usize>) + Send + Sync + 'static) -> Self {
        self.listener = Some(Arc::new(listener));
        self
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn active_index(&self) -> Option<usize> {
        self.highlight.active_index()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.snapshot.as_ref()
    }

    fn dataset_len(&self) -> usize {
        self.snapshot.as_ref().map_or(0, Dataset::len)
    }

    /// Bind to `dataset`, clearing the highlight if the snapshot changed.
    ///
    /// Returns `true` when a highlight was cleared.
    pub fn sync_dataset(&mut self, dataset: &Dataset) -> bool {
        let unchanged = self
            .snapshot
            .as_ref()
            .is_some_and(|current| current.same_snapshot(dataset));
        if unchanged {
            return false;
        }

        self.snapshot = Some(dataset.clone());
        if self.highlight.is_idle() {
            return false;
        }

        tracing::debug!(points = dataset.len(), "dataset replaced, clearing highlight");
        self.transition(Highlight::Idle);
        true
    }

    /// Pointer entered the element at `index`.
    pub fn pointer_enter(&mut self, index: usize) -> Option<Highlight> {
        let len = self.dataset_len();
        if index >= len {
            tracing::warn!(index, len, "hover on element outside the dataset");
            return self.transition(Highlight::Idle);
        }

        tracing::trace!(index, "pointer enter");
        self.transition(Highlight::Hovering(index))
    }

    /// Pointer left the element at `index`.
    ///
    /// A late leave for an element that is no longer active is ignored, so a
    /// fast move from one element to the next keeps the newer highlight.
    pub fn pointer_leave(&mut self, index: usize) -> Option<Highlight> {
        if self.highlight.active_index() != Some(index) {
            return None;
        }
        tracing::trace!(index, "pointer leave");
        self.transition(Highlight::Idle)
    }

    /// Clear any highlight, e.g. when the pointer leaves the whole chart.
    pub fn clear(&mut self) -> Option<Highlight> {
        self.transition(Highlight::Idle)
    }

    /// Emphasis of `element` under the current highlight
    pub fn emphasis(&self, element: usize) -> Emphasis {
        self.highlight.emphasis(element)
    }

    fn transition(&mut self, next: Highlight) -> Option<Highlight> {
        if self.highlight == next {
            return None;
        }
        self.highlight = next;
        if let Some(listener) = &self.listener {
            listener(next.active_index());
        }
        Some(next)
    }
}

impl fmt::Debug for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionState")
            .field("highlight", &self.highlight)
            .field("points", &self.snapshot.as_ref().map(Dataset::len))
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
