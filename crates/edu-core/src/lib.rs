//! # edu-core
//!
//! Core dataset types for the Learnhub dashboard charts.
//! Everything here is plain data: the remote API layer produces it, the
//! chart renderers consume it.

pub mod dataset;
pub mod distribution;

pub use dataset::*;
pub use distribution::*;

// ============================================================================
// FORMATTERS
// ============================================================================

/// Format a data value for tooltips and center labels.
///
/// Whole numbers print without decimals; anything else keeps up to two
/// decimals with trailing zeros trimmed.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }

    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Format a share of a total (`0.0..=1.0`) as a whole percentage.
///
/// Rounding happens here, at presentation time, never in geometry.
pub fn format_percent(share: f64) -> String {
    if !share.is_finite() {
        return "0%".to_string();
    }
    format!("{:.0}%", (share * 100.0).round())
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const INDIGO: &str = "#6366f1";
    pub const GREEN: &str = "#22c55e";
    pub const AMBER: &str = "#f59e0b";
    pub const RED: &str = "#ef4444";
    pub const CYAN: &str = "#06b6d4";

    pub const POSITIVE: &str = GREEN;
    pub const NEGATIVE: &str = RED;
    pub const NEUTRAL: &str = "#9ca3af";
    pub const TEXT_PRIMARY: &str = "#111827";
    pub const TEXT_MUTED: &str = "#6b7280";
    pub const GRID: &str = "#e5e7eb";

    /// Fallback palette, cycled by data point index.
    pub const PALETTE: [&str; 5] = [INDIGO, GREEN, AMBER, RED, CYAN];
}
