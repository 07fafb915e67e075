use crate::*;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 11
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }

    fn gen_f64(&mut self, start: f64, end: f64) -> f64 {
        let unit = (self.next_u64() % 1_000_000) as f64 / 1_000_000.0;
        start + (end - start) * unit
    }
}

fn list(element_size: f64, excess: usize) -> (SizeModel, LayoutParams) {
    (
        SizeModel::uniform(element_size),
        LayoutParams::list(Orientation::Vertical, element_size).with_excess(excess),
    )
}

// Direct transcription of the range definition, scanning every item.
fn expected_per_item_range(
    sizes: &[f64],
    offset_before: f64,
    excess: usize,
    viewport: ViewportState,
) -> VisibleRange {
    let n = sizes.len();
    let mut offsets = Vec::with_capacity(n + 1);
    let mut sum = 0.0;
    offsets.push(0.0);
    for s in sizes {
        sum += s;
        offsets.push(sum);
    }
    let offset_of = |i: usize| offset_before + offsets[i];

    let mut start = n;
    for i in 0..n {
        if offset_of(i) + sizes[i] >= viewport.scroll_position {
            start = i;
            break;
        }
    }
    let mut end = n;
    for i in start..n {
        if offset_of(i) >= viewport.scroll_end() {
            end = i;
            break;
        }
    }
    VisibleRange::new(start.saturating_sub(excess), (end + excess).min(n))
}

#[test]
fn uniform_range_at_top() {
    let (model, layout) = list(50.0, 2);
    let r = compute_range(ViewportState::new(0.0, 500.0), &model, &layout, 1000);
    // 10 fitting + 2 excess
    assert_eq!(r, VisibleRange::new(0, 12));
}

#[test]
fn uniform_range_scrolled() {
    let (model, layout) = list(50.0, 2);
    let r = compute_range(ViewportState::new(2500.0, 500.0), &model, &layout, 1000);
    // floor(2500 / 50 + 1) - 2 = 49, 49 + ceil(500 / 50) + 2 = 61
    assert_eq!(r, VisibleRange::new(49, 61));
}

#[test]
fn uniform_range_is_clamped_near_the_end() {
    let (model, layout) = list(50.0, 2);
    let r = compute_range(ViewportState::new(49_600.0, 500.0), &model, &layout, 1000);
    assert_eq!(r.end_index, 1000);
    assert!(r.start_index <= r.end_index);

    // Overshooting the content never produces an out-of-bounds range.
    let r = compute_range(ViewportState::new(1.0e9, 500.0), &model, &layout, 1000);
    assert_eq!(r, VisibleRange::new(1000, 1000));
}

#[test]
fn offset_before_shifts_uniform_range() {
    let (model, layout) = list(50.0, 0);
    let layout = layout.with_offsets(100.0, 0.0);
    // The first 100px are header; items 0.. start at 100.
    let r = compute_range(ViewportState::new(100.0, 500.0), &model, &layout, 1000);
    assert_eq!(r.start_index, 0);
    let r = compute_range(ViewportState::new(350.0, 500.0), &model, &layout, 1000);
    assert_eq!(r.start_index, 5);
}

#[test]
fn empty_collection_renders_nothing() {
    let (model, layout) = list(50.0, 2);
    let r = compute_range(ViewportState::new(0.0, 500.0), &model, &layout, 0);
    assert_eq!(r, VisibleRange::EMPTY);
    assert!(r.is_empty());
    assert_eq!(total_extent(&model, &layout, 0), 0.0);

    let per_item = SizeModel::per_item(core::iter::empty());
    let r = compute_range(ViewportState::new(0.0, 500.0), &per_item, &layout, 0);
    assert_eq!(r, VisibleRange::EMPTY);
    assert_eq!(total_extent(&per_item, &layout, 0), 0.0);
}

#[test]
fn tile_range_uses_whole_rows() {
    let model = SizeModel::uniform(100.0);
    let layout = LayoutParams::grid(4, 100.0, 100.0).with_excess(4);
    let r = compute_range(ViewportState::new(250.0, 400.0), &model, &layout, 40);
    // floor(250 / 100) * 4 = 8, 8 + ceil(400 / 100) * 4 + 4 = 28
    assert_eq!(r, VisibleRange::new(8, 28));

    let r = compute_range(ViewportState::new(3900.0, 400.0), &model, &layout, 40);
    assert!(r.end_index <= 40);
    assert!(r.start_index <= r.end_index);
}

#[test]
fn tile_excess_defaults_to_items_per_row() {
    let opts = WindowOptions::<u32>::fixed(100.0)
        .with_tile(true)
        .with_items_per_row(Some(4));
    let layout = opts.layout_params(None, 50.0);
    assert_eq!(layout.items_per_row, 4);
    assert_eq!(layout.excess, 4);

    let model = SizeModel::uniform(layout.item_main());
    let r = compute_range(ViewportState::new(250.0, 400.0), &model, &layout, 40);
    assert_eq!(r, VisibleRange::new(8, 28));

    // Lists default to no excess; an explicit value always wins.
    let opts = WindowOptions::<u32>::fixed(100.0);
    assert_eq!(opts.layout_params(None, 50.0).excess, 0);
    let opts = opts.with_tile(true).with_excess(Some(1));
    assert_eq!(opts.layout_params(None, 50.0).excess, 1);
}

#[test]
fn tile_ignores_per_item_sizes() {
    let model = SizeModel::per_item([10.0, 500.0, 10.0, 10.0]);
    let layout = LayoutParams::grid(2, 50.0, 100.0);
    let r = compute_range(ViewportState::new(0.0, 100.0), &model, &layout, 4);
    assert_eq!(r, VisibleRange::new(0, 2));
    // Two rows of 100.
    assert_eq!(total_extent(&model, &layout, 4), 200.0);
}

#[test]
fn cumulative_offsets_are_prefix_sums() {
    let sizes: Vec<f64> = (1..=10).map(|i| i as f64 * 10.0).collect();
    let model = SizeModel::per_item(sizes.iter().copied());
    let cumulative = model.cumulative().unwrap();

    assert_eq!(cumulative.offsets().len(), 11);
    assert_eq!(cumulative.offsets()[0], 0.0);
    assert_eq!(cumulative.offsets()[3], 60.0);
    assert_eq!(cumulative.total(), sizes.iter().sum::<f64>());
    assert!(cumulative.offsets().windows(2).all(|w| w[0] <= w[1]));

    let layout = LayoutParams::list(Orientation::Vertical, 0.0).with_offsets(5.0, 7.0);
    assert_eq!(total_extent(&model, &layout, 10), 550.0 + 12.0);
    assert_eq!(model.offset_of(3, &layout), 65.0);
    assert_eq!(model.size_of(3), 40.0);
}

#[test]
fn invalid_item_sizes_count_as_zero() {
    let model = SizeModel::per_item([10.0, -5.0, f64::NAN, 20.0]);
    let cumulative = model.cumulative().unwrap();
    assert_eq!(cumulative.sizes(), &[10.0, 0.0, 0.0, 20.0]);
    assert_eq!(cumulative.total(), 30.0);
}

#[test]
fn per_item_range_covers_viewport() {
    let model = SizeModel::per_item([10.0, 20.0, 30.0, 40.0, 50.0]);
    let layout = LayoutParams::list(Orientation::Vertical, 0.0);
    let r = compute_range(ViewportState::new(25.0, 40.0), &model, &layout, 5);
    // Visible 25..65 touches items 1 (10..30), 2 (30..60), 3 (60..100).
    assert_eq!(r, VisibleRange::new(1, 4));

    let r = compute_range(
        ViewportState::new(25.0, 40.0),
        &model,
        &layout.with_excess(1),
        5,
    );
    assert_eq!(r, VisibleRange::new(0, 5));
}

#[test]
fn per_item_binary_search_matches_linear_scan() {
    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let n = rng.gen_range_usize(1, 300);
        let sizes: Vec<f64> = (0..n)
            .map(|_| rng.gen_range_usize(0, 80) as f64)
            .collect();
        let offset_before = rng.gen_range_usize(0, 3) as f64 * 20.0;
        let excess = rng.gen_range_usize(0, 4);
        let model = SizeModel::per_item(sizes.iter().copied());
        let layout = LayoutParams::list(Orientation::Vertical, 0.0)
            .with_offsets(offset_before, 0.0)
            .with_excess(excess);
        let total = total_extent(&model, &layout, n);
        // Whole pixels keep both formulations exact.
        let viewport = ViewportState::new(
            rng.gen_range_usize(0, total as usize + 100) as f64,
            rng.gen_range_usize(1, 600) as f64,
        );

        let got = compute_range(viewport, &model, &layout, n);
        let expected = expected_per_item_range(&sizes, offset_before, excess, viewport);
        assert_eq!(got, expected, "sizes={sizes:?} viewport={viewport:?}");
    }
}

#[test]
fn per_item_range_reaches_viewport_end() {
    let mut rng = Lcg::new(42);
    for _ in 0..200 {
        let n = rng.gen_range_usize(1, 200);
        let sizes: Vec<f64> = (0..n)
            .map(|_| rng.gen_range_usize(1, 120) as f64)
            .collect();
        let model = SizeModel::per_item(sizes.iter().copied());
        let layout = LayoutParams::list(Orientation::Vertical, 0.0);
        let total = total_extent(&model, &layout, n);
        let extent = rng.gen_f64(1.0, 500.0);
        let scroll = rng.gen_f64(0.0, (total - extent).max(0.0));
        let viewport = ViewportState::new(scroll, extent);

        let r = compute_range(viewport, &model, &layout, n);
        if r.end_index < n {
            let last = r.end_index - 1;
            assert!(
                model.offset_of(last, &layout) + model.size_of(last) >= viewport.scroll_end(),
                "range {r:?} stops short of {}",
                viewport.scroll_end()
            );
        }
    }
}

#[test]
fn ranges_stay_in_bounds() {
    let mut rng = Lcg::new(1234);
    for _ in 0..500 {
        let n = rng.gen_range_usize(0, 2000);
        let size = rng.gen_range_usize(1, 200) as f64;
        let excess = rng.gen_range_usize(0, 10);
        let tile = rng.gen_range_usize(0, 2) == 1;
        let layout = if tile {
            LayoutParams::grid(rng.gen_range_usize(1, 8), size, size).with_excess(excess)
        } else {
            LayoutParams::list(Orientation::Vertical, size).with_excess(excess)
        };
        let model = SizeModel::uniform(size);
        let total = total_extent(&model, &layout, n);
        let extent = rng.gen_f64(1.0, 1000.0);
        let scroll = rng.gen_f64(0.0, (total - extent).max(0.0));

        let r = compute_range(ViewportState::new(scroll, extent), &model, &layout, n);
        assert!(r.start_index <= r.end_index, "{r:?}");
        assert!(r.end_index <= n, "{r:?} n={n}");
    }
}

#[test]
fn uniform_range_is_monotonic_in_scroll_position() {
    let (model, layout) = list(37.0, 3);
    let n = 500;
    let extent = 420.0;
    let max = total_extent(&model, &layout, n) - extent;

    let mut prev = compute_range(ViewportState::new(0.0, extent), &model, &layout, n);
    let mut scroll = 0.0;
    while scroll <= max {
        let r = compute_range(ViewportState::new(scroll, extent), &model, &layout, n);
        assert!(r.start_index >= prev.start_index, "{prev:?} -> {r:?}");
        assert!(r.end_index >= prev.end_index, "{prev:?} -> {r:?}");
        prev = r;
        scroll += 13.5;
    }
}

#[test]
fn tile_positions_follow_rows_and_columns() {
    let layout = LayoutParams::grid(4, 30.0, 40.0);
    let tiles = TileLayout::from_params(&layout);
    assert_eq!(tiles.row_of(5), 1);
    assert_eq!(tiles.column_of(5), 1);
    assert_eq!(tiles.position_of(5), Point { x: 30.0, y: 40.0 });
    assert_eq!(tiles.position_of(11), Point { x: 90.0, y: 80.0 });

    let model = SizeModel::uniform(40.0);
    assert_eq!(position_of(11, &model, &layout), Point { x: 90.0, y: 80.0 });

    let horizontal = layout.with_orientation(Orientation::Horizontal);
    assert_eq!(
        position_of(5, &model, &horizontal),
        Point { x: 30.0, y: 40.0 }
    );
    assert_eq!(
        position_of(6, &model, &horizontal),
        Point { x: 30.0, y: 80.0 }
    );
}

#[test]
fn list_positions_use_offsets() {
    let layout = LayoutParams::list(Orientation::Vertical, 25.0).with_offsets(10.0, 0.0);
    let model = SizeModel::uniform(25.0);
    assert_eq!(position_of(0, &model, &layout), Point { x: 0.0, y: 10.0 });
    assert_eq!(position_of(4, &model, &layout), Point { x: 0.0, y: 110.0 });

    let horizontal = LayoutParams::list(Orientation::Horizontal, 25.0);
    assert_eq!(position_of(4, &model, &horizontal), Point { x: 100.0, y: 0.0 });

    let per_item = SizeModel::per_item([5.0, 15.0, 30.0]);
    assert_eq!(position_of(2, &per_item, &layout), Point { x: 0.0, y: 30.0 });
}

#[test]
fn extent_counts_partial_tile_rows() {
    let layout = LayoutParams::grid(4, 100.0, 120.0).with_offsets(10.0, 20.0);
    let model = SizeModel::uniform(120.0);
    // ceil(10 / 4) = 3 rows
    assert_eq!(total_extent(&model, &layout, 10), 10.0 + 360.0 + 20.0);
    assert_eq!(content_extent(&model, &layout, 10), 360.0);

    let (model, layout) = list(50.0, 0);
    assert_eq!(total_extent(&model, &layout, 1000), 50_000.0);
}

#[test]
fn probe_waits_for_layout() {
    let probe = AutosizeProbe::new(Orientation::Vertical, false, None);
    assert_eq!(
        probe.probe(Some(ElementBox::new(100.0, 20.0)), ElementBox::default()),
        ProbeOutcome::Pending
    );
    assert_eq!(
        probe.probe(None, ElementBox::new(300.0, 400.0)),
        ProbeOutcome::Pending
    );
    assert_eq!(
        probe.probe(Some(ElementBox::new(100.0, 0.0)), ElementBox::new(300.0, 400.0)),
        ProbeOutcome::Pending
    );
}

#[test]
fn probe_measures_list_items() {
    let probe = AutosizeProbe::new(Orientation::Vertical, false, Some(3));
    let ProbeOutcome::Measured(size) =
        probe.probe(Some(ElementBox::new(300.0, 24.0)), ElementBox::new(300.0, 400.0))
    else {
        panic!("expected a measurement");
    };
    assert_eq!(size.element_size, 24.0);
    assert_eq!(size.items_per_row, 1);

    let probe = AutosizeProbe::new(Orientation::Horizontal, false, None);
    let ProbeOutcome::Measured(size) =
        probe.probe(Some(ElementBox::new(80.0, 24.0)), ElementBox::new(300.0, 400.0))
    else {
        panic!("expected a measurement");
    };
    assert_eq!(size.element_size, 80.0);
}

#[test]
fn probe_derives_tile_columns() {
    let probe = AutosizeProbe::new(Orientation::Vertical, true, None);
    let ProbeOutcome::Measured(size) =
        probe.probe(Some(ElementBox::new(100.0, 120.0)), ElementBox::new(410.0, 600.0))
    else {
        panic!("expected a measurement");
    };
    assert_eq!(size.items_per_row, 4);
    assert_eq!(size.item_width(), 100.0);
    assert_eq!(size.item_height(), 120.0);
    assert_eq!(size.element_size, 120.0);

    // Wider than the container still gets one column.
    let ProbeOutcome::Measured(size) =
        probe.probe(Some(ElementBox::new(500.0, 120.0)), ElementBox::new(410.0, 600.0))
    else {
        panic!("expected a measurement");
    };
    assert_eq!(size.items_per_row, 1);

    let probe = AutosizeProbe::new(Orientation::Vertical, true, Some(6));
    let ProbeOutcome::Measured(size) =
        probe.probe(Some(ElementBox::new(100.0, 120.0)), ElementBox::new(410.0, 600.0))
    else {
        panic!("expected a measurement");
    };
    assert_eq!(size.items_per_row, 6);
}

#[test]
fn layout_params_prefer_configured_then_measured_then_fallback() {
    let measured = AutoSize {
        element_size: 120.0,
        item: ElementBox::new(100.0, 120.0),
        items_per_row: 4,
    };

    let opts = WindowOptions::<u32>::default();
    assert_eq!(opts.layout_params(None, 50.0).item_main(), 50.0);
    assert_eq!(opts.layout_params(Some(&measured), 50.0).item_main(), 120.0);

    let opts = opts.with_element_size(Some(30.0));
    assert_eq!(opts.layout_params(Some(&measured), 50.0).item_main(), 30.0);

    let tile = WindowOptions::<u32>::default().with_tile(true);
    let layout = tile.layout_params(Some(&measured), 50.0);
    assert_eq!(layout.items_per_row, 4);
    assert_eq!(layout.item_width, 100.0);
    assert_eq!(layout.item_height, 120.0);
    assert_eq!(layout.item_main(), 120.0);
    assert_eq!(layout.item_cross(), 100.0);

    let horizontal = tile.with_orientation(Orientation::Horizontal);
    let layout = horizontal.layout_params(Some(&measured), 50.0);
    assert_eq!(layout.item_main(), 100.0);
    assert_eq!(layout.item_cross(), 120.0);
}

#[test]
fn validate_rejects_bad_values() {
    let opts = WindowOptions::<u32>::fixed(0.0);
    assert_eq!(opts.validate(), Err(ConfigError::InvalidElementSize(0.0)));

    let opts = WindowOptions::<u32>::default().with_items_per_row(Some(0));
    assert_eq!(opts.validate(), Err(ConfigError::InvalidItemsPerRow));

    let opts = WindowOptions::<u32>::default().with_offsets(-1.0, 0.0);
    assert!(matches!(
        opts.validate(),
        Err(ConfigError::InvalidOffset {
            name: "offset_before",
            ..
        })
    ));

    let opts = WindowOptions::<u32>::default().with_source("items");
    assert!(matches!(
        opts.validate(),
        Err(ConfigError::MalformedSourceExpression(_))
    ));
}

#[test]
fn apply_keeps_previous_options_on_error() {
    let mut opts = WindowOptions::<u32>::fixed(40.0);
    assert!(opts.apply(ConfigChange::ElementSize(Some(-3.0))).is_err());
    assert_eq!(opts.element_size, Some(40.0));

    opts.apply(ConfigChange::Tile(true)).unwrap();
    assert!(opts.tile);
    assert!(ConfigChange::Tile(true).affects_layout());
    assert!(!ConfigChange::OffsetAfter(1.0).affects_layout());
    assert!(!ConfigChange::Autoresize(true).affects_render());
}

#[test]
fn autosize_applies_without_explicit_size() {
    assert!(WindowOptions::<f64>::default().autosize());
    assert!(!WindowOptions::<f64>::fixed(20.0).autosize());
    let per_item = WindowOptions::<f64>::per_item(|v| *v);
    assert!(!per_item.autosize());
    assert!(per_item.uses_size_accessor());
    let per_item_tile = per_item.with_tile(true);
    assert!(per_item_tile.autosize());
    assert!(!per_item_tile.uses_size_accessor());
}

#[test]
fn source_expression_parses() {
    let e = SourceExpression::parse("item in items").unwrap();
    assert_eq!(e.item, "item");
    assert_eq!(e.collection, "items");
    assert_eq!(e.track_by, None);

    let e: SourceExpression = "  row in vm.rows | filter:q track by row.id ".parse().unwrap();
    assert_eq!(e.collection, "vm.rows | filter:q");
    assert_eq!(e.track_by.as_deref(), Some("row.id"));
    assert_eq!(e.to_string(), "row in vm.rows | filter:q track by row.id");

    assert_eq!(
        SourceExpression::parse("   "),
        Err(ConfigError::EmptySourceExpression)
    );
    assert!(matches!(
        SourceExpression::parse("item of items"),
        Err(ConfigError::MalformedSourceExpression(_))
    ));
    assert!(matches!(
        SourceExpression::parse("item in"),
        Err(ConfigError::MalformedSourceExpression(_))
    ));
}

#[test]
fn viewport_state_sanitizes_inputs() {
    let v = ViewportState::new(-10.0, f64::NAN);
    assert_eq!(v.scroll_position, 0.0);
    assert_eq!(v.viewport_extent, 0.0);
    assert_eq!(ViewportState::new(5.0, 10.0).scroll_end(), 15.0);
}
