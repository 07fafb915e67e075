// Example: uniform list, per-item sizes and a tile grid over the same viewport.
use vs_window::{
    LayoutParams, Orientation, SizeModel, ViewportState, compute_range, position_of, total_extent,
};

fn main() {
    let viewport = ViewportState::new(12_345.0, 600.0);

    let model = SizeModel::uniform(50.0);
    let layout = LayoutParams::list(Orientation::Vertical, 50.0).with_excess(4);
    let range = compute_range(viewport, &model, &layout, 1_000_000);
    println!("uniform: range={range:?} extent={}", total_extent(&model, &layout, 1_000_000));
    println!(
        "first_visible at {:?}",
        position_of(range.start_index, &model, &layout)
    );

    let model = SizeModel::per_item((0..10_000).map(|i| if i % 3 == 0 { 120.0 } else { 40.0 }));
    let layout = LayoutParams::list(Orientation::Vertical, 40.0);
    let range = compute_range(viewport, &model, &layout, 10_000);
    println!("per-item: range={range:?} extent={}", total_extent(&model, &layout, 10_000));

    let layout = LayoutParams::grid(5, 160.0, 120.0).with_offsets(24.0, 24.0);
    let model = SizeModel::uniform(layout.item_main());
    let range = compute_range(viewport, &model, &layout, 50_000);
    println!("tile: range={range:?} extent={}", total_extent(&model, &layout, 50_000));
    for i in range.iter().take(3) {
        println!("  item {i} at {:?}", position_of(i, &model, &layout));
    }
}
