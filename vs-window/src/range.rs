use crate::{CumulativeSizes, LayoutParams, SizeModel, ViewportState, VisibleRange};

/// Computes the `[start, end)` index range to materialize for `count` items.
///
/// Pure and deterministic. The result always satisfies `0 <= start <= end <= count`; a
/// scroll position past the end of the content yields an empty or trailing range rather than
/// an error.
///
/// - Tile mode uses row arithmetic over `layout.item_main()` (per-item sizes are not supported).
/// - Uniform lists use direct division.
/// - Per-item lists binary-search the cumulative offsets.
pub fn compute_range(
    viewport: ViewportState,
    model: &SizeModel,
    layout: &LayoutParams,
    count: usize,
) -> VisibleRange {
    if count == 0 {
        return VisibleRange::EMPTY;
    }

    let range = if layout.tile {
        tile_range(viewport, layout.item_main(), layout, count)
    } else {
        match model {
            SizeModel::Uniform { element_size } => {
                uniform_range(viewport, *element_size, layout, count)
            }
            SizeModel::PerItem(sizes) => {
                if sizes.len() != count {
                    vwarn!(
                        sizes = sizes.len(),
                        count,
                        "compute_range: size model out of sync with collection"
                    );
                }
                per_item_range(viewport, sizes, layout, count.min(sizes.len()))
            }
        }
    };

    vtrace!(
        scroll = viewport.scroll_position,
        extent = viewport.viewport_extent,
        start = range.start_index,
        end = range.end_index,
        "compute_range"
    );
    range.clamped(count)
}

fn uniform_range(
    viewport: ViewportState,
    size: f64,
    layout: &LayoutParams,
    count: usize,
) -> VisibleRange {
    if !(size.is_finite() && size > 0.0) {
        vwarn!(size, "compute_range: element size is not positive");
        return VisibleRange::EMPTY;
    }
    let excess = layout.excess as f64;
    let into_list = viewport.scroll_position - layout.offset_before;

    let start = ((into_list / size + excess / 2.0).floor() - excess).max(0.0);
    let start = to_index(start).min(count);
    let fitting = to_index(((viewport.viewport_extent + layout.offset_before) / size).ceil());
    let end = start
        .saturating_add(fitting)
        .saturating_add(layout.excess)
        .min(count);
    VisibleRange::new(start, end)
}

fn tile_range(
    viewport: ViewportState,
    row_size: f64,
    layout: &LayoutParams,
    count: usize,
) -> VisibleRange {
    if !(row_size.is_finite() && row_size > 0.0) {
        vwarn!(row_size, "compute_range: tile row size is not positive");
        return VisibleRange::EMPTY;
    }
    let columns = layout.columns();
    let into_list = viewport.scroll_position - layout.offset_before;

    let first_row = to_index((into_list / row_size).floor().max(0.0));
    let start = first_row.saturating_mul(columns).min(count);
    let rows = to_index(((viewport.viewport_extent + layout.offset_before) / row_size).ceil());
    let end = start
        .saturating_add(rows.saturating_mul(columns))
        .saturating_add(layout.excess)
        .min(count);
    VisibleRange::new(start, end)
}

fn per_item_range(
    viewport: ViewportState,
    sizes: &CumulativeSizes,
    layout: &LayoutParams,
    count: usize,
) -> VisibleRange {
    let top = viewport.scroll_position - layout.offset_before;
    let bottom = viewport.scroll_end() - layout.offset_before;

    // First item whose trailing edge reaches the scroll position.
    let first_visible = sizes.first_ending_at_or_after(top).min(count);
    // First item whose leading edge is at or past the viewport end.
    let past_end = sizes
        .first_starting_at_or_after(bottom)
        .min(count)
        .max(first_visible);

    let start = first_visible.saturating_sub(layout.excess);
    let end = past_end.saturating_add(layout.excess).min(count);
    VisibleRange::new(start, end)
}

// `as` saturates: negatives and NaN become 0.
fn to_index(v: f64) -> usize {
    v as usize
}
