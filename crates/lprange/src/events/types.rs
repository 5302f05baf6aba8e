//! Event and command type definitions.
//!
//! - [`PointerEvent`] - Raw pointer input from the rendering layer
//! - [`AppEvent`] - Semantic session-level events
//! - [`Command`] - State mutation commands derived from events

use lprange_data::SeriesKind;

use crate::coords::ScreenPos;

/// Pointer input over the chart area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(ScreenPos),
    Move(ScreenPos),
    Up,
    /// The pointer left the canvas.
    Leave,
}

/// Semantic events raised while handling input and data arrival.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The range bounds changed (drag, typed input, seed or reset).
    BoundsChanged,
    /// A fresh copy of a series was stored.
    SeriesLanded(SeriesKind),
    /// A fetch for a series failed.
    FetchFailed { kind: SeriesKind, message: String },
}

/// State mutation commands executed by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fit the value axis to the loaded prices.
    FitView,
    /// Seed the bounds from the latest price (no-op after the first time).
    SeedBounds,
    /// Recompute liquidity in the current range.
    RecomputeLiquidity,
    /// Recompute the trailing fee sums.
    RecomputeFeeSummary,
    /// Drop the last estimate; it no longer matches the inputs.
    InvalidateEstimate,
    /// Show an error message to the user.
    ShowError(String),
    /// Clear the error message raised for a series.
    ClearError(SeriesKind),
}
