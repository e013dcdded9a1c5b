//! Legend rows that drive the same highlight as the chart marks

use edu_charts::{Emphasis, LegendEntry, RenderFrame};
use edu_state::{use_chart_state, ChartState};
use leptos::prelude::*;

pub fn legend_row_class(emphasis: Emphasis) -> String {
    format!("legend-row {}", emphasis.css_class())
}

/// Rows follow `layout`; their emphasis follows the hover state.
#[component]
pub fn ChartLegend(#[prop(into)] layout: Signal<RenderFrame>) -> impl IntoView {
    let state = use_chart_state();

    move || {
        let entries = layout.with(|f| f.chart().map(|c| c.legend.clone()).unwrap_or_default());
        view! {
            <ul class="edu-legend">
                {entries.into_iter().map(|entry| legend_row(entry, state)).collect_view()}
            </ul>
        }
    }
}

fn legend_row(entry: LegendEntry, state: ChartState) -> impl IntoView {
    let index = entry.index;
    let class = move || legend_row_class(state.highlight().emphasis(index));
    view! {
        <li
            class=class
            on:mouseenter=move |_| state.hover(index)
            on:mouseleave=move |_| state.leave(index)
        >
            <span class="legend-swatch" style=format!("background: {};", entry.color)></span>
            <span class="legend-label">{entry.label}</span>
            <span class="legend-percent">{entry.percent_text}</span>
        </li>
    }
}
