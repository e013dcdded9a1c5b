//! # edu-state
//!
//! Reactive chart state for the Learnhub dashboards.
//! Each chart instance owns one [`ChartState`]; its marks and its legend read
//! the same hover signal, so they always agree on what is highlighted.
//!
//! Geometry and highlight are tracked separately: [`ChartState::layout_memo`]
//! changes with the dataset, extent and config, never with hover.

use edu_charts::{
    ChartConfig, ChartKind, Highlight, HoverListener, InteractionState, OutputExtent, RenderFrame,
};
use edu_core::Dataset;
use leptos::prelude::*;

// ============================================================================
// CHART STATE
// ============================================================================

/// Reactive state for a single chart instance
#[derive(Clone, Copy)]
pub struct ChartState {
    /// Which renderer draws this chart
    pub kind: ChartKind,
    /// Current dataset snapshot
    pub dataset: RwSignal<Dataset>,
    /// Plot area size
    pub extent: RwSignal<OutputExtent>,
    /// Rendering knobs
    pub config: RwSignal<ChartConfig>,
    /// Hover state shared by marks and legend
    pub interaction: RwSignal<InteractionState>,
    /// Highlight callback, run after the interaction signal is released
    listener: StoredValue<Option<HoverListener>>,
}

impl ChartState {
    /// Create state for `kind`, bound to `dataset`
    pub fn new(kind: ChartKind, dataset: Dataset, config: ChartConfig) -> Self {
        let interaction = InteractionState::for_dataset(&dataset);
        Self {
            kind,
            extent: RwSignal::new(config.extent()),
            dataset: RwSignal::new(dataset),
            config: RwSignal::new(config),
            interaction: RwSignal::new(interaction),
            listener: StoredValue::new(None),
        }
    }

    // ========================================================================
    // Data
    // ========================================================================

    /// Replace the dataset. A highlight on the old snapshot is cleared first.
    pub fn set_dataset(&self, dataset: Dataset) {
        let unchanged = self.dataset.with_untracked(|current| current.same_snapshot(&dataset));
        if unchanged {
            return;
        }
        let cleared = self
            .interaction
            .try_update(|state| state.sync_dataset(&dataset))
            .unwrap_or(false);
        tracing::debug!(len = dataset.len(), cleared, "dataset replaced");
        self.dataset.set(dataset);
        if cleared {
            self.notify(Some(Highlight::Idle));
        }
    }

    /// Resize the plot area
    pub fn set_extent(&self, extent: OutputExtent) {
        self.extent.set(extent.sanitized());
    }

    pub fn set_config(&self, config: ChartConfig) {
        self.config.set(config);
    }

    /// Install the callback fired on every highlight change
    pub fn set_hover_listener(&self, listener: Option<HoverListener>) {
        self.listener.set_value(listener);
    }

    // ========================================================================
    // Hover
    // ========================================================================

    /// Pointer entered element `index`
    pub fn hover(&self, index: usize) {
        let change = self.interaction.try_update(|state| state.pointer_enter(index));
        self.notify(change.flatten());
    }

    /// Pointer left element `index`
    pub fn leave(&self, index: usize) {
        let change = self.interaction.try_update(|state| state.pointer_leave(index));
        self.notify(change.flatten());
    }

    /// Pointer left the chart entirely
    pub fn clear(&self) {
        let change = self.interaction.try_update(InteractionState::clear);
        self.notify(change.flatten());
    }

    /// Runs with no signal borrowed, so the listener may read this state.
    fn notify(&self, change: Option<Highlight>) {
        let Some(highlight) = change else {
            return;
        };
        tracing::trace!(index = ?highlight.active_index(), "highlight changed");
        if let Some(listener) = self.listener.get_value() {
            listener(highlight.active_index());
        }
    }

    /// Current highlight (tracked)
    pub fn highlight(&self) -> Highlight {
        self.interaction.with(InteractionState::highlight)
    }

    /// Currently hovered element (tracked)
    pub fn active_index(&self) -> Option<usize> {
        self.highlight().active_index()
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Lay out the current dataset at normal emphasis. Does not track hover.
    pub fn layout(&self) -> RenderFrame {
        let extent = self.extent.get();
        self.config
            .with(|config| self.dataset.with(|data| self.kind.layout(config, data, extent)))
    }

    pub fn layout_memo(&self) -> Memo<RenderFrame> {
        let state = *self;
        Memo::new(move |_| state.layout())
    }

    /// Opacity factor for dimmed marks (tracked)
    pub fn dimmed_opacity(&self) -> f64 {
        self.config.with(|config| config.dimmed_opacity)
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide chart state to the component subtree of one chart
pub fn provide_chart_state(state: ChartState) -> ChartState {
    provide_context(state);
    state
}

/// Use chart state from context
pub fn use_chart_state() -> ChartState {
    expect_context::<ChartState>()
}

/// Try to get chart state from context (returns None if not provided)
pub fn try_use_chart_state() -> Option<ChartState> {
    use_context::<ChartState>()
}
