use std::sync::Arc;

use vs_window::{AnimationState, Point, VisibleRange};

/// Why a render effect was emitted.
///
/// Everything except `Scrolled` and `Resized` is a full reinitialization of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderReason {
    Initialized,
    CollectionChanged,
    ConfigChanged,
    Scrolled,
    Resized,
    Measured,
    ManualTrigger,
    TransitionFinished,
}

impl RenderReason {
    pub fn is_reinitialization(self) -> bool {
        !matches!(self, Self::Scrolled | Self::Resized)
    }
}

/// Placement of one materialized item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    pub index: usize,
    /// Absolute offset inside the relatively positioned container.
    pub position: Point,
    /// The item was not materialized by the previous effect and should play the entrance
    /// transition.
    pub entering: bool,
}

/// "Render these indices at these positions."
///
/// Holds a shared snapshot of the collection, so the slice stays valid (and read-only) until the
/// host drops the effect.
pub struct RenderEffect<T> {
    pub range: VisibleRange,
    /// One entry per index in `range`, in ascending order.
    pub placed: Vec<PlacedItem>,
    pub animation: AnimationState,
    /// Scroll-axis size for the filler element.
    pub extent: f64,
    /// Set when the host must move the native scroll position (e.g. back to 0 on entering tile mode).
    pub scroll_to: Option<f64>,
    pub reason: RenderReason,
    collection: Arc<[T]>,
}

impl<T> RenderEffect<T> {
    pub(crate) fn new(
        range: VisibleRange,
        placed: Vec<PlacedItem>,
        animation: AnimationState,
        extent: f64,
        scroll_to: Option<f64>,
        reason: RenderReason,
        collection: Arc<[T]>,
    ) -> Self {
        debug_assert_eq!(placed.len(), range.len());
        Self {
            range,
            placed,
            animation,
            extent,
            scroll_to,
            reason,
            collection,
        }
    }

    pub fn start_index(&self) -> usize {
        self.range.start_index
    }

    pub fn end_index(&self) -> usize {
        self.range.end_index
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The materialized slice of the collection.
    pub fn items(&self) -> &[T] {
        &self.collection[self.range.start_index..self.range.end_index]
    }

    pub fn position_of(&self, index: usize) -> Option<Point> {
        if !self.range.contains(index) {
            return None;
        }
        self.placed
            .get(index - self.range.start_index)
            .map(|p| p.position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlacedItem, &T)> + '_ {
        self.placed.iter().zip(self.items())
    }

    pub fn entering(&self) -> impl Iterator<Item = usize> + '_ {
        self.placed.iter().filter(|p| p.entering).map(|p| p.index)
    }
}

impl<T> Clone for RenderEffect<T> {
    fn clone(&self) -> Self {
        Self {
            range: self.range,
            placed: self.placed.clone(),
            animation: self.animation,
            extent: self.extent,
            scroll_to: self.scroll_to,
            reason: self.reason,
            collection: Arc::clone(&self.collection),
        }
    }
}

impl<T> core::fmt::Debug for RenderEffect<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderEffect")
            .field("range", &self.range)
            .field("animation", &self.animation)
            .field("extent", &self.extent)
            .field("scroll_to", &self.scroll_to)
            .field("reason", &self.reason)
            .field("placed", &self.placed.len())
            .finish_non_exhaustive()
    }
}
