//! SVG drawing of render frames
//!
//! Marks are drawn in frame order. Marks bound to a dataset element forward
//! pointer events to the chart state in context.
//!
//! The SVG tree is rebuilt only when the layout changes. Hover updates the
//! class, opacity and radius attributes of existing marks in place.

use edu_charts::{
    to_svg_path, ChartFrame, ChartKind, Emphasis, EmptyReason, Fill, Highlight, Mark, RenderFrame,
    MarkRole, Shape, Tooltip,
};
use edu_state::{use_chart_state, ChartState};
use leptos::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_CHART_ID: AtomicUsize = AtomicUsize::new(0);

/// Unique id per mounted chart, used to scope gradient ids in the document
pub fn next_chart_id() -> usize {
    NEXT_CHART_ID.fetch_add(1, Ordering::Relaxed)
}

pub fn gradient_id(chart_id: usize, mark_index: usize) -> String {
    format!("edu-gradient-{chart_id}-{mark_index}")
}

/// Value of the SVG `fill` attribute
pub fn fill_attr(fill: &Fill, gradient: &str) -> String {
    match fill {
        Fill::None => "none".to_string(),
        Fill::Solid { color } => color.clone(),
        Fill::VerticalGradient { .. } => format!("url(#{gradient})"),
    }
}

pub fn mark_class(role: MarkRole, emphasis: Emphasis) -> String {
    format!("mark {} {}", role.css_class(), emphasis.css_class())
}

pub fn tooltip_transform(tooltip: &Tooltip) -> String {
    format!("translate({:.2},{:.2})", tooltip.anchor.x, tooltip.anchor.y)
}

// ============================================================================
// FRAME VIEW
// ============================================================================

/// Draws a laid-out frame, or the empty-state placeholder
#[component]
pub fn FrameView(#[prop(into)] layout: Signal<RenderFrame>) -> impl IntoView {
    let state = use_chart_state();
    let chart_id = next_chart_id();

    move || match layout.get() {
        RenderFrame::Empty(empty) => view! {
            <EmptyState kind=empty.kind reason=empty.reason />
        }
        .into_any(),
        RenderFrame::Chart(chart) => chart_svg(&chart, chart_id, state),
    }
}

fn chart_svg(chart: &ChartFrame, chart_id: usize, state: ChartState) -> AnyView {
    let len = chart.tooltips.len();
    let highlight = Memo::new(move |_| state.highlight().validated(len));

    let defs = gradient_defs(chart, chart_id);
    let marks = chart
        .marks
        .iter()
        .enumerate()
        .map(|(i, mark)| mark_view(mark, &gradient_id(chart_id, i), state, highlight))
        .collect_view();

    let tooltips = chart.tooltips.clone();
    let tooltip = move || {
        highlight
            .get()
            .active_index()
            .and_then(|i| tooltips.get(i).cloned())
            .map(|tooltip| view! { <TooltipView tooltip=tooltip /> })
    };

    view! {
        <svg
            class=format!("edu-chart {}", chart.kind.css_class())
            viewBox=chart.viewbox.to_attr()
            preserveAspectRatio="xMidYMid meet"
            style="width: 100%; height: 100%;"
            on:mouseleave=move |_: leptos::ev::MouseEvent| state.clear()
        >
            <defs>{defs}</defs>
            {marks}
            {tooltip}
        </svg>
    }
    .into_any()
}

fn gradient_defs(chart: &ChartFrame, chart_id: usize) -> impl IntoView + use<> {
    chart
        .marks
        .iter()
        .enumerate()
        .filter_map(|(i, mark)| match &mark.style.fill {
            Fill::VerticalGradient {
                color,
                top_opacity,
                bottom_opacity,
            } => Some(view! {
                <linearGradient id=gradient_id(chart_id, i) x1="0" y1="0" x2="0" y2="1">
                    <stop offset="0%" stop-color=color.clone() stop-opacity=*top_opacity />
                    <stop offset="100%" stop-color=color.clone() stop-opacity=*bottom_opacity />
                </linearGradient>
            }),
            Fill::None | Fill::Solid { .. } => None,
        })
        .collect_view()
}

fn mark_view(mark: &Mark, gradient: &str, state: ChartState, highlight: Memo<Highlight>) -> AnyView {
    let fill = fill_attr(&mark.style.fill, gradient);
    let stroke = mark.style.stroke.as_ref().map(|s| s.color.clone());
    let stroke_width = mark.style.stroke.as_ref().map(|s| s.width);
    let base_opacity = mark.style.opacity;

    let element = mark.element;
    let emphasis = move || element.map_or(Emphasis::Normal, |e| highlight.get().emphasis(e));
    let role = mark.role;
    let class = move || mark_class(role, emphasis());
    let opacity = move || base_opacity * emphasis().opacity(state.dimmed_opacity());

    let enter = move |_: leptos::ev::MouseEvent| {
        if let Some(index) = element {
            state.hover(index);
        }
    };
    let leave = move |_: leptos::ev::MouseEvent| {
        if let Some(index) = element {
            state.leave(index);
        }
    };

    match &mark.shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => view! {
            <rect
                class=class
                x=*x
                y=*y
                width=*width
                height=*height
                rx="2"
                fill=fill
                stroke=stroke
                stroke-width=stroke_width
                opacity=opacity
                on:mouseenter=enter
                on:mouseleave=leave
            />
        }
        .into_any(),
        Shape::Path { commands } => view! {
            <path
                class=class
                d=to_svg_path(commands)
                fill=fill
                stroke=stroke
                stroke-width=stroke_width
                stroke-linecap="round"
                stroke-linejoin="round"
                opacity=opacity
                on:mouseenter=enter
                on:mouseleave=leave
            />
        }
        .into_any(),
        Shape::Circle { center, radius } => {
            let radius = *radius;
            view! {
                <circle
                    class=class
                    cx=center.x
                    cy=center.y
                    r=move || emphasis().radius(radius)
                    fill=fill
                    stroke=stroke
                    stroke-width=stroke_width
                    opacity=opacity
                    on:mouseenter=enter
                    on:mouseleave=leave
                />
            }
            .into_any()
        }
        Shape::Text {
            position,
            content,
            anchor,
        } => view! {
            <text
                class=class
                x=position.x
                y=position.y
                text-anchor=anchor.as_attr()
                dominant-baseline="middle"
                fill=fill
                opacity=opacity
            >
                {content.clone()}
            </text>
        }
        .into_any(),
    }
}

// ============================================================================
// OVERLAYS
// ============================================================================

#[component]
pub fn TooltipView(tooltip: Tooltip) -> impl IntoView {
    let transform = tooltip_transform(&tooltip);
    view! {
        <g class="edu-tooltip" transform=transform pointer-events="none">
            <text text-anchor="middle" dy="-10">{tooltip.text}</text>
        </g>
    }
}

/// Placeholder shown instead of a chart
#[component]
pub fn EmptyState(kind: ChartKind, reason: EmptyReason) -> impl IntoView {
    view! {
        <div class=format!("edu-chart-empty {}", kind.css_class())>
            <span class="empty-message">{reason.message()}</span>
        </div>
    }
}
