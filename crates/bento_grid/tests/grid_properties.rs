//! Integration tests for generation and gap repair
//!
//! Covers the packing invariants (no overlap, in bounds, one tile per id) for
//! generated and repaired layouts, plus the reference repair scenarios.

use bento_grid::{
    generate_items, generate_layout, grid_stats, repair_gaps, repair_gaps_with_limit, GridConfig,
    GridError, Layout, OccupancyMap, RepairStatus, Tile, GRID_WIDTH,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn assert_packed(layout: &Layout, grid_width: u32) {
    assert!(
        layout.overlapping_pairs().is_empty(),
        "overlap in {:?}",
        layout
    );
    assert!(layout.out_of_bounds(grid_width).is_empty());
}

fn config_strategy() -> impl Strategy<Value = GridConfig> {
    (4u32..=32, 1u32..=4, 0u32..=4, 1u32..=4, 0u32..=4).prop_filter_map(
        "max width must fit the grid",
        |(grid_width, min_w, extra_w, min_h, extra_h)| {
            let max_w = min_w + extra_w;
            (max_w <= grid_width).then(|| {
                GridConfig::default()
                    .with_grid_width(grid_width)
                    .with_width_range(min_w, max_w)
                    .with_height_range(min_h, min_h + extra_h)
            })
        },
    )
}

#[test]
fn test_seeded_generation_is_reproducible() {
    init_tracing();
    let config = GridConfig::default();
    let ids = ["a", "b", "c"];
    let first = generate_layout(&ids, &config, &mut StdRng::seed_from_u64(2024)).unwrap();
    let second = generate_layout(&ids, &config, &mut StdRng::seed_from_u64(2024)).unwrap();

    assert_eq!(first.ids(), vec!["a", "b", "c"]);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    assert_packed(&first, GRID_WIDTH);
    // every default tile is at least 10 wide, so the first tile starts the row
    assert_eq!(first.get("a").map(|t| (t.x, t.y)), Some((0, 0)));
}

#[test]
fn test_single_tile_expands_to_full_width() {
    init_tracing();
    let layout = Layout::from_tiles(vec![Tile::new("a", 0, 0, 10, 4)]);
    let outcome = repair_gaps(&layout, 32);

    assert_eq!(outcome.residual_gaps, 0);
    assert_eq!(outcome.status, RepairStatus::Complete);
    assert_eq!(outcome.layout.tiles(), &[Tile::new("a", 0, 0, 32, 4)]);
}

#[test]
fn test_gap_between_two_tiles_is_closed() {
    init_tracing();
    let layout = Layout::from_tiles(vec![
        Tile::new("a", 0, 0, 10, 4),
        Tile::new("b", 20, 0, 12, 4),
    ]);
    let outcome = repair_gaps(&layout, 32);

    assert_eq!(outcome.residual_gaps, 0);
    assert_packed(&outcome.layout, 32);
    assert_eq!(outcome.layout.get("a"), Some(&Tile::new("a", 0, 0, 20, 4)));
    assert!(grid_stats(&outcome.layout, 32).is_gap_free());
}

#[test]
fn test_generated_gallery_repairs_without_overlap() {
    init_tracing();
    let config = GridConfig::default();
    let layout = generate_items(15, &config, &mut StdRng::seed_from_u64(15)).unwrap();
    let outcome = repair_gaps(&layout, config.grid_width);

    assert_eq!(outcome.layout.len(), 15);
    assert_packed(&outcome.layout, config.grid_width);
    assert_eq!(
        grid_stats(&outcome.layout, config.grid_width).blank_cells,
        outcome.residual_gaps
    );
}

#[test]
fn test_generation_stops_at_row_limit() {
    init_tracing();
    let config = GridConfig::default()
        .with_grid_width(10)
        .with_width_range(10, 10)
        .with_height_range(4, 4)
        .with_max_aspect_height(4)
        .with_max_rows(8);
    let mut rng = StdRng::seed_from_u64(8);

    let layout = generate_items(2, &config, &mut rng).unwrap();
    assert_eq!(layout.height(), 8);
    let err = generate_items(3, &config, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        GridError::PlacementFailed { ref id, rows_scanned: 5, .. } if id == "item-2"
    ));
}

proptest! {
    #[test]
    fn test_generated_layouts_are_packed(
        config in config_strategy(),
        count in 0usize..40,
        seed in any::<u64>(),
    ) {
        let layout = generate_items(count, &config, &mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(layout.len(), count);
        prop_assert!(layout.validate(config.grid_width).is_ok());
        prop_assert!(layout.height() <= config.max_rows);
        for (i, tile) in layout.iter().enumerate() {
            prop_assert_eq!(&tile.id, &format!("item-{}", i));
        }
    }

    #[test]
    fn test_repair_keeps_origins_and_count(
        config in config_strategy(),
        count in 0usize..25,
        seed in any::<u64>(),
    ) {
        let layout = generate_items(count, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
        let outcome = repair_gaps(&layout, config.grid_width);

        prop_assert!(outcome.layout.validate(config.grid_width).is_ok());
        prop_assert_eq!(outcome.layout.len(), layout.len());
        for (before, after) in layout.iter().zip(outcome.layout.iter()) {
            prop_assert_eq!(&before.id, &after.id);
            prop_assert_eq!((before.x, before.y), (after.x, after.y));
            prop_assert!(after.w >= before.w && after.h >= before.h);
        }
        prop_assert_eq!(outcome.layout.height(), layout.height());
    }

    #[test]
    fn test_repair_is_idempotent(
        config in config_strategy(),
        count in 0usize..25,
        seed in any::<u64>(),
    ) {
        let layout = generate_items(count, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
        let first = repair_gaps(&layout, config.grid_width);
        let second = repair_gaps(&first.layout, config.grid_width);

        prop_assert_eq!(&second.layout, &first.layout);
        prop_assert_eq!(second.expansions, 0);
        prop_assert_eq!(second.residual_gaps, first.residual_gaps);
    }

    #[test]
    fn test_each_expansion_grows_coverage(
        count in 1usize..12,
        seed in any::<u64>(),
        steps in 0u32..30,
    ) {
        let config = GridConfig::default();
        let layout = generate_items(count, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
        let before = repair_gaps_with_limit(&layout, config.grid_width, steps);
        let after = repair_gaps_with_limit(&layout, config.grid_width, steps + 1);

        let covered = |layout: &Layout| {
            OccupancyMap::from_layout(layout, config.grid_width).occupied_count()
        };
        let covered_before = covered(&before.layout);
        let covered_after = covered(&after.layout);
        if after.expansions > before.expansions {
            prop_assert!(covered_after > covered_before);
        } else {
            prop_assert_eq!(covered_after, covered_before);
        }
    }
}
