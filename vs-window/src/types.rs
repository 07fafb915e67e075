/// Stacking direction of a list (or the scroll axis of a tile grid).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Size of `b` along the scroll axis.
    pub fn main(self, b: ElementBox) -> f64 {
        match self {
            Self::Vertical => b.height,
            Self::Horizontal => b.width,
        }
    }

    /// Size of `b` across the scroll axis.
    pub fn cross(self, b: ElementBox) -> f64 {
        match self {
            Self::Vertical => b.width,
            Self::Horizontal => b.height,
        }
    }

    /// Builds a point from scroll-axis (`main`) and cross-axis coordinates.
    pub fn point(self, main: f64, cross: f64) -> Point {
        match self {
            Self::Vertical => Point { x: cross, y: main },
            Self::Horizontal => Point { x: main, y: cross },
        }
    }
}

/// Absolute placement of a rendered item inside the (relatively positioned) container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A measured outer box (content, padding, border and margins).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementBox {
    pub width: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` when the box has not been laid out yet (no positive dimension).
    pub fn is_unsized(&self) -> bool {
        !(self.width > 0.0) && !(self.height > 0.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index < self.end_index
    }

    /// Enforces `start <= end <= count`.
    ///
    /// A range that violates the invariant is an engine bug: debug builds assert, release builds
    /// log and clamp so the render layer never sees an out-of-bounds slice.
    pub fn clamped(self, count: usize) -> Self {
        if self.start_index <= self.end_index && self.end_index <= count {
            return self;
        }
        vwarn!(
            start = self.start_index,
            end = self.end_index,
            count,
            "VisibleRange: invariant violated, clamping"
        );
        debug_assert!(
            self.start_index <= self.end_index && self.end_index <= count,
            "invalid range (start={}, end={}, count={count})",
            self.start_index,
            self.end_index
        );
        let end_index = self.end_index.min(count);
        Self {
            start_index: self.start_index.min(end_index),
            end_index,
        }
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// Transition state attached to a render effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationState {
    #[default]
    Idle,
    /// Some materialized items are new and should play the entrance transition.
    Entering,
    /// The layout mode is switching; the current items play the exit transition.
    Exiting,
}
