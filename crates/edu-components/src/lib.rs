//! # edu-components
//!
//! Leptos components that draw [`edu_charts::RenderFrame`]s as SVG.
//!
//! Each chart component owns one [`edu_state::ChartState`] and provides it as
//! context, so the SVG marks and the legend below share one hover highlight.

pub mod charts;
pub mod legend;
pub mod svg;

pub use charts::*;
pub use legend::*;
pub use svg::*;
