use crate::{LayoutParams, SizeModel};

/// Scroll-axis size of the filler element: `offset_before + content + offset_after`.
///
/// Content is `element_size * ceil(count / columns)` for uniform sizes (rows of tiles in tile
/// mode) and the cumulative total for per-item sizes. An empty collection contributes nothing,
/// so only the configured offsets remain.
pub fn total_extent(model: &SizeModel, layout: &LayoutParams, count: usize) -> f64 {
    layout.offset_before + content_extent(model, layout, count) + layout.offset_after
}

/// Extent of the items alone.
pub fn content_extent(model: &SizeModel, layout: &LayoutParams, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    if layout.tile {
        return SizeModel::uniform(layout.item_main()).content_extent(count, layout.columns());
    }
    model.content_extent(count, 1)
}
