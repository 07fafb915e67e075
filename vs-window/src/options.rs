use std::sync::Arc;

use crate::{AutoSize, ConfigError, ElementBox, Orientation, SourceExpression};

/// Derives an item's size along the scroll axis (enables per-item sizing in list mode).
pub type SizeAccessor<T> = Arc<dyn Fn(&T) -> f64 + Send + Sync>;

/// Measures the rendered reference item and its container.
///
/// Returns `None` for the sample when nothing is rendered yet; the autosize probe treats that
/// the same as a zero-sized (not yet laid out) element.
pub type MeasureCallback = Arc<dyn Fn() -> Measurement + Send + Sync>;

/// Output of a [`MeasureCallback`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurement {
    pub sample: Option<ElementBox>,
    pub container: ElementBox,
}

/// Resolved geometry used by the range calculator, tile layout and extent reporter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutParams {
    pub orientation: Orientation,
    pub tile: bool,
    /// Meaningful only when `tile` is set; always at least 1.
    pub items_per_row: usize,
    pub item_width: f64,
    pub item_height: f64,
    pub offset_before: f64,
    pub offset_after: f64,
    pub excess: usize,
}

impl LayoutParams {
    /// A single-column list with uniform `element_size` items.
    pub fn list(orientation: Orientation, element_size: f64) -> Self {
        let (item_width, item_height) = match orientation {
            Orientation::Vertical => (0.0, element_size),
            Orientation::Horizontal => (element_size, 0.0),
        };
        Self {
            orientation,
            tile: false,
            items_per_row: 1,
            item_width,
            item_height,
            offset_before: 0.0,
            offset_after: 0.0,
            excess: 0,
        }
    }

    /// A vertical tile grid with `items_per_row` cells of `item_width` × `item_height`.
    pub fn grid(items_per_row: usize, item_width: f64, item_height: f64) -> Self {
        Self {
            orientation: Orientation::Vertical,
            tile: true,
            items_per_row: items_per_row.max(1),
            item_width,
            item_height,
            offset_before: 0.0,
            offset_after: 0.0,
            excess: 0,
        }
    }

    pub fn with_offsets(mut self, offset_before: f64, offset_after: f64) -> Self {
        self.offset_before = offset_before;
        self.offset_after = offset_after;
        self
    }

    pub fn with_excess(mut self, excess: usize) -> Self {
        self.excess = excess;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Items per scroll-axis row: `items_per_row` in tile mode, `1` otherwise.
    pub fn columns(&self) -> usize {
        if self.tile {
            self.items_per_row.max(1)
        } else {
            1
        }
    }

    /// Cell size along the scroll axis.
    pub fn item_main(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.item_height,
            Orientation::Horizontal => self.item_width,
        }
    }

    /// Cell size across the scroll axis.
    pub fn item_cross(&self) -> f64 {
        match self.orientation {
            Orientation::Vertical => self.item_width,
            Orientation::Horizontal => self.item_height,
        }
    }
}

/// Entrance/exit transition settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationConfig {
    /// How long the exit transition runs before the new layout enters.
    pub duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration_ms: 500 }
    }
}

/// A single runtime configuration update (`configChanged(key, value)`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigChange {
    ElementSize(Option<f64>),
    Orientation(Orientation),
    Tile(bool),
    ItemsPerRow(Option<usize>),
    OffsetBefore(f64),
    OffsetAfter(f64),
    Excess(Option<usize>),
    Autoresize(bool),
    Animation(Option<AnimationConfig>),
}

impl ConfigChange {
    /// Changes that alter item geometry (and so may need a fresh autosize probe).
    pub fn affects_layout(&self) -> bool {
        matches!(
            self,
            Self::ElementSize(_) | Self::Orientation(_) | Self::Tile(_) | Self::ItemsPerRow(_)
        )
    }

    /// Changes that move or resize what is on screen.
    pub fn affects_render(&self) -> bool {
        !matches!(self, Self::Autoresize(_) | Self::Animation(_))
    }
}

/// Configuration for a scroll window.
///
/// Cheap to clone: closures are stored in `Arc`s.
pub struct WindowOptions<T> {
    /// Fixed item size; `None` enables autosize.
    pub element_size: Option<f64>,
    pub orientation: Orientation,
    pub tile: bool,
    /// Explicit tile columns; `None` derives them from the measured container.
    pub items_per_row: Option<usize>,
    pub offset_before: f64,
    pub offset_after: f64,
    /// Extra items rendered past the visible range; `None` uses the mode default.
    pub excess: Option<usize>,
    /// Enables per-item sizing in list mode.
    pub size_accessor: Option<SizeAccessor<T>>,
    /// Re-run the autosize probe when the viewport is resized.
    pub autoresize: bool,
    /// `None` disables entrance/exit marks.
    pub animation: Option<AnimationConfig>,
    /// Poll interval of the autosize retry while the container is not laid out yet.
    pub retry_interval_ms: u64,
    /// Minimum spacing between coalesced scroll/resize updates (`0` = once per tick).
    pub frame_interval_ms: u64,
    /// Optional `item in collection [track by expr]` source, validated at setup.
    pub source: Option<String>,
    /// Optional selector of the scroll container, resolved by the host at setup.
    pub scroll_parent: Option<String>,
    pub measure: Option<MeasureCallback>,
}

impl<T> Clone for WindowOptions<T> {
    fn clone(&self) -> Self {
        Self {
            element_size: self.element_size,
            orientation: self.orientation,
            tile: self.tile,
            items_per_row: self.items_per_row,
            offset_before: self.offset_before,
            offset_after: self.offset_after,
            excess: self.excess,
            size_accessor: self.size_accessor.clone(),
            autoresize: self.autoresize,
            animation: self.animation,
            retry_interval_ms: self.retry_interval_ms,
            frame_interval_ms: self.frame_interval_ms,
            source: self.source.clone(),
            scroll_parent: self.scroll_parent.clone(),
            measure: self.measure.clone(),
        }
    }
}

impl<T> Default for WindowOptions<T> {
    fn default() -> Self {
        Self {
            element_size: None,
            orientation: Orientation::Vertical,
            tile: false,
            items_per_row: None,
            offset_before: 0.0,
            offset_after: 0.0,
            excess: None,
            size_accessor: None,
            autoresize: false,
            animation: Some(AnimationConfig::default()),
            retry_interval_ms: 100,
            frame_interval_ms: 0,
            source: None,
            scroll_parent: None,
            measure: None,
        }
    }
}

impl<T> WindowOptions<T> {
    /// Options for items of a known, uniform size.
    pub fn fixed(element_size: f64) -> Self {
        Self {
            element_size: Some(element_size),
            ..Self::default()
        }
    }

    /// Options that derive the item size from a rendered sample.
    pub fn autosized(measure: impl Fn() -> Measurement + Send + Sync + 'static) -> Self {
        Self {
            measure: Some(Arc::new(measure)),
            ..Self::default()
        }
    }

    /// Options for a list whose item sizes come from the items themselves.
    pub fn per_item(size_accessor: impl Fn(&T) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            size_accessor: Some(Arc::new(size_accessor)),
            ..Self::default()
        }
    }

    pub fn with_element_size(mut self, element_size: Option<f64>) -> Self {
        self.element_size = element_size;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_tile(mut self, tile: bool) -> Self {
        self.tile = tile;
        self
    }

    pub fn with_items_per_row(mut self, items_per_row: Option<usize>) -> Self {
        self.items_per_row = items_per_row;
        self
    }

    pub fn with_offsets(mut self, offset_before: f64, offset_after: f64) -> Self {
        self.offset_before = offset_before;
        self.offset_after = offset_after;
        self
    }

    pub fn with_excess(mut self, excess: Option<usize>) -> Self {
        self.excess = excess;
        self
    }

    pub fn with_size_accessor(
        mut self,
        size_accessor: Option<impl Fn(&T) -> f64 + Send + Sync + 'static>,
    ) -> Self {
        self.size_accessor = size_accessor.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_autoresize(mut self, autoresize: bool) -> Self {
        self.autoresize = autoresize;
        self
    }

    pub fn with_animation(mut self, animation: Option<AnimationConfig>) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_retry_interval_ms(mut self, retry_interval_ms: u64) -> Self {
        self.retry_interval_ms = retry_interval_ms;
        self
    }

    pub fn with_frame_interval_ms(mut self, frame_interval_ms: u64) -> Self {
        self.frame_interval_ms = frame_interval_ms;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_scroll_parent(mut self, selector: impl Into<String>) -> Self {
        self.scroll_parent = Some(selector.into());
        self
    }

    pub fn with_measure(
        mut self,
        measure: Option<impl Fn() -> Measurement + Send + Sync + 'static>,
    ) -> Self {
        self.measure = measure.map(|f| Arc::new(f) as _);
        self
    }

    /// Checks every value that would leave the engine in an undefined state.
    ///
    /// Returns the parsed source expression when one is configured.
    pub fn validate(&self) -> Result<Option<SourceExpression>, ConfigError> {
        if let Some(size) = self.element_size {
            if !(size.is_finite() && size > 0.0) {
                return Err(ConfigError::InvalidElementSize(size));
            }
        }
        if self.items_per_row == Some(0) {
            return Err(ConfigError::InvalidItemsPerRow);
        }
        check_offset("offset_before", self.offset_before)?;
        check_offset("offset_after", self.offset_after)?;
        self.source
            .as_deref()
            .map(SourceExpression::parse)
            .transpose()
    }

    /// Applies a runtime change, leaving `self` untouched when the result would be invalid.
    pub fn apply(&mut self, change: ConfigChange) -> Result<(), ConfigError> {
        let mut next = self.clone();
        match change {
            ConfigChange::ElementSize(v) => next.element_size = v,
            ConfigChange::Orientation(v) => next.orientation = v,
            ConfigChange::Tile(v) => next.tile = v,
            ConfigChange::ItemsPerRow(v) => next.items_per_row = v,
            ConfigChange::OffsetBefore(v) => next.offset_before = v,
            ConfigChange::OffsetAfter(v) => next.offset_after = v,
            ConfigChange::Excess(v) => next.excess = v,
            ConfigChange::Autoresize(v) => next.autoresize = v,
            ConfigChange::Animation(v) => next.animation = v,
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// `true` when item sizes must be measured from a rendered sample.
    ///
    /// Tile grids ignore the size accessor, so they autosize unless a size is configured.
    pub fn autosize(&self) -> bool {
        self.element_size.is_none() && (self.size_accessor.is_none() || self.tile)
    }

    /// Per-item sizing is only available in list mode.
    pub fn uses_size_accessor(&self) -> bool {
        self.size_accessor.is_some() && !self.tile
    }

    /// Excess actually applied: the explicit value, else `items_per_row` for tiles and `0` for lists.
    pub fn effective_excess(&self, items_per_row: usize) -> usize {
        match self.excess {
            Some(excess) => excess,
            None if self.tile => items_per_row,
            None => 0,
        }
    }

    /// Resolves layout geometry from configuration plus the latest autosize result.
    ///
    /// `fallback_size` is used while neither a configured nor a measured size exists.
    pub fn layout_params(&self, measured: Option<&AutoSize>, fallback_size: f64) -> LayoutParams {
        let element_size = self
            .element_size
            .or(measured.map(|m| m.element_size))
            .unwrap_or(fallback_size);

        let (main, cross, items_per_row) = if self.tile {
            let main = measured
                .filter(|_| self.element_size.is_none())
                .map(|m| self.orientation.main(m.item))
                .unwrap_or(element_size);
            let cross = measured
                .map(|m| self.orientation.cross(m.item))
                .filter(|c| *c > 0.0)
                .unwrap_or(element_size);
            let per_row = self
                .items_per_row
                .or(measured.map(|m| m.items_per_row))
                .unwrap_or(1)
                .max(1);
            (main, cross, per_row)
        } else {
            let cross = measured.map(|m| self.orientation.cross(m.item)).unwrap_or(0.0);
            (element_size, cross, 1)
        };

        let cell = self.orientation.point(main, cross);
        LayoutParams {
            orientation: self.orientation,
            tile: self.tile,
            items_per_row,
            item_width: cell.x,
            item_height: cell.y,
            offset_before: self.offset_before,
            offset_after: self.offset_after,
            excess: self.effective_excess(items_per_row),
        }
    }
}

impl<T> core::fmt::Debug for WindowOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("element_size", &self.element_size)
            .field("orientation", &self.orientation)
            .field("tile", &self.tile)
            .field("items_per_row", &self.items_per_row)
            .field("offset_before", &self.offset_before)
            .field("offset_after", &self.offset_after)
            .field("excess", &self.excess)
            .field("size_accessor", &self.size_accessor.is_some())
            .field("autoresize", &self.autoresize)
            .field("animation", &self.animation)
            .field("retry_interval_ms", &self.retry_interval_ms)
            .field("frame_interval_ms", &self.frame_interval_ms)
            .field("source", &self.source)
            .field("scroll_parent", &self.scroll_parent)
            .finish_non_exhaustive()
    }
}

fn check_offset(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidOffset { name, value })
    }
}
