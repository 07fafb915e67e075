//! A headless windowing engine for virtual scrolling.
//!
//! For the notification-driven controller (render effects, coalescing, autosize retries), see
//! the `vs-window-adapter` crate.
//!
//! Rendering thousands of elements at once makes a UI sluggish. This crate computes which slice
//! of a large ordered collection needs to exist for a given scroll position, where each of those
//! items goes, and how large the scrollable area must be so native scrollbars behave as if every
//! item were present:
//!
//! - [`SizeModel`]: uniform item size, or per-item sizes with cumulative offsets.
//! - [`compute_range`]: scroll position + viewport + sizes → `[start, end)` indices.
//! - [`TileLayout`] / [`position_of`]: absolute `(x, y)` placement in list or tile mode.
//! - [`total_extent`]: size for the filler element.
//! - [`AutosizeProbe`]: derives sizes from one rendered reference item.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - viewport extent and scroll position
//! - either a fixed item size, a per-item size accessor, or measurements of a rendered item
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod autosize;
mod error;
mod extent;
mod options;
mod range;
mod size_model;
mod source;
mod state;
mod tile;
mod types;

#[cfg(test)]
mod tests;

pub use autosize::{AutoSize, AutosizeProbe, ProbeOutcome};
pub use error::ConfigError;
pub use extent::{content_extent, total_extent};
pub use options::{
    AnimationConfig, ConfigChange, LayoutParams, MeasureCallback, Measurement, SizeAccessor,
    WindowOptions,
};
pub use range::compute_range;
pub use size_model::{CumulativeSizes, SizeModel};
pub use source::SourceExpression;
pub use state::ViewportState;
pub use tile::{TileLayout, position_of};
pub use types::{AnimationState, ElementBox, Orientation, Point, VisibleRange};
