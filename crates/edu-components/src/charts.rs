//! Bar, donut and line chart components

use crate::{ChartLegend, FrameView};
use edu_charts::{ChartConfig, ChartKind};
use edu_core::Dataset;
use edu_state::{provide_chart_state, ChartState};
use leptos::prelude::*;
use std::sync::Arc;

/// Create the chart state, bridge the hover callback and follow `data`.
fn mount_chart(
    kind: ChartKind,
    data: Signal<Dataset>,
    config: Option<ChartConfig>,
    on_hover_change: Option<Callback<Option<usize>>>,
) -> ChartState {
    let state = provide_chart_state(ChartState::new(
        kind,
        data.get_untracked(),
        config.unwrap_or_default(),
    ));

    if let Some(callback) = on_hover_change {
        state.set_hover_listener(Some(Arc::new(move |index: Option<usize>| callback.run(index))));
    }

    Effect::new(move |_| {
        let dataset = data.get();
        state.set_dataset(dataset);
    });

    tracing::debug!(kind = kind.label(), "chart mounted");
    state
}

// ============================================================================
// BAR CHART
// ============================================================================

#[component]
pub fn BarChart(
    #[prop(into)] data: Signal<Dataset>,
    #[prop(optional)] config: Option<ChartConfig>,
    #[prop(optional, into)] on_hover_change: Option<Callback<Option<usize>>>,
) -> impl IntoView {
    let state = mount_chart(ChartKind::Bar, data, config, on_hover_change);
    let layout = state.layout_memo();

    view! {
        <div class="edu-chart-panel">
            <FrameView layout=layout />
        </div>
    }
}

// ============================================================================
// DONUT CHART
// ============================================================================

/// Donut with an optional percentage legend underneath
#[component]
pub fn DonutChart(
    #[prop(into)] data: Signal<Dataset>,
    #[prop(optional)] config: Option<ChartConfig>,
    #[prop(optional, into)] on_hover_change: Option<Callback<Option<usize>>>,
    #[prop(default = true)] show_legend: bool,
) -> impl IntoView {
    let state = mount_chart(ChartKind::Donut, data, config, on_hover_change);
    let layout = state.layout_memo();

    view! {
        <div class="edu-chart-panel">
            <FrameView layout=layout />
            {show_legend.then(|| view! { <ChartLegend layout=layout /> })}
        </div>
    }
}

// ============================================================================
// LINE CHART
// ============================================================================

/// Trend line with gradient area, for series of two or more points
#[component]
pub fn LineChart(
    #[prop(into)] data: Signal<Dataset>,
    #[prop(optional)] config: Option<ChartConfig>,
    #[prop(optional, into)] on_hover_change: Option<Callback<Option<usize>>>,
) -> impl IntoView {
    let state = mount_chart(ChartKind::Line, data, config, on_hover_change);
    let layout = state.layout_memo();

    view! {
        <div class="edu-chart-panel">
            <FrameView layout=layout />
        </div>
    }
}
