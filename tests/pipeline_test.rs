//! Integration tests: run the whole pipeline from raw catalog rows to
//! emitted records and verify the resolved geometry against hand-computed
//! values.

use approx::assert_relative_eq;
use pyramid_db::{
    balanced_preorder, format_record, generate_from_lines, generate_to_file, parse_catalog,
    GenerateConfig, Point, SelectionStrategy, SortOrder, StarSet, Tree, OUTPUT_HEADER,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .try_init();
}

/// The 4-row worked example: one pilot with exactly three companions in
/// range resolves to a single record with a hand-computable angle.
#[test]
fn end_to_end_four_star_catalog() {
    init_tracing();

    let lines = ["mag,ra,dec", "1,0,0", "2,3,4", "3,0,8", "4,-3,4"];
    let config = GenerateConfig {
        magnitude_cutoff: 10.0,
        group_size: 3,
        radius: 20.0,
        strategy: SelectionStrategy::BoundSearch,
        sort_order: SortOrder::Descending,
    };

    let records = generate_from_lines(lines, &config).expect("pipeline failed");
    assert_eq!(records.len(), 1, "C(3,3) = 1 combination expected");

    let record = &records[0];
    // The companion at (0, 8) is farthest from the pilot (distance 8 vs 5
    // and 5); the triangle sides at that vertex are both 5, the opposite
    // side is 6, so the angle is acos((25 + 25 - 36) / 50).
    assert_eq!(record.pilot(), Point::new(0.0, 0.0));
    assert_eq!(record.opposite, Point::new(0.0, 8.0));
    assert_relative_eq!(record.angle(), (0.28_f64).acos(), epsilon = 1e-12);
}

/// A pilot with `k` companions in range yields exactly C(k, 3) records.
#[test]
fn pilot_round_yields_all_combinations() {
    init_tracing();

    // Pilot plus 5 companions at distinct distances, all within radius.
    let lines = [
        "0.0,0,0",
        "1.0,2.0,0.5",
        "2.0,-1.5,1.8",
        "3.0,0.7,-2.6",
        "4.0,3.1,1.1",
        "5.0,-2.2,-2.4",
    ];
    let config = GenerateConfig {
        magnitude_cutoff: 10.0,
        group_size: 5,
        radius: 20.0,
        strategy: SelectionStrategy::BoundSearch,
        sort_order: SortOrder::Descending,
    };

    let records = generate_from_lines(lines, &config).expect("pipeline failed");
    assert_eq!(records.len(), 10, "C(5,3) = 10 combinations expected");

    // Emission order is nonincreasing by angle and every angle is finite.
    for pair in records.windows(2) {
        assert!(pair[0].angle() >= pair[1].angle());
    }
    for record in &records {
        assert!(record.angle().is_finite());
        assert!((0.0..=std::f64::consts::PI).contains(&record.angle()));
    }
}

/// The ascending comparator is available for tree-derived orderings.
#[test]
fn ascending_sort_order_is_respected() {
    init_tracing();

    let lines = [
        "0.0,0,0",
        "1.0,2.0,0.5",
        "2.0,-1.5,1.8",
        "3.0,0.7,-2.6",
        "4.0,3.1,1.1",
    ];
    let config = GenerateConfig {
        magnitude_cutoff: 10.0,
        group_size: 4,
        radius: 20.0,
        strategy: SelectionStrategy::BoundSearch,
        sort_order: SortOrder::Ascending,
    };

    let records = generate_from_lines(lines, &config).expect("pipeline failed");
    assert_eq!(records.len(), 4, "C(4,3) = 4 combinations expected");
    for pair in records.windows(2) {
        assert!(pair[0].angle() <= pair[1].angle());
    }
}

/// Both selection strategies produce the same set of angles for a single
/// pilot round; only the record ordering may differ.
#[test]
fn strategies_agree_on_resolved_angles() {
    init_tracing();

    // Companion distances from the pilot are all distinct (5, 8, sqrt(25.81)):
    // the ring search's strictly increasing threshold skips distance ties, so
    // an equidistant pair would leave its group short. Only the first pilot
    // round can fill a group under either strategy.
    let lines = ["1,0,0", "2,3,4", "3,0,8", "4,-3,4.1"];
    let base = GenerateConfig {
        magnitude_cutoff: 10.0,
        group_size: 3,
        radius: 20.0,
        strategy: SelectionStrategy::BoundSearch,
        sort_order: SortOrder::Descending,
    };
    let ring = GenerateConfig {
        strategy: SelectionStrategy::RingSearch,
        ..base.clone()
    };

    let bound = generate_from_lines(lines, &base).unwrap();
    let ring = generate_from_lines(lines, &ring).unwrap();

    assert_eq!(bound.len(), 1);
    assert_eq!(ring.len(), 1);
    assert_relative_eq!(bound[0].angle(), ring[0].angle(), epsilon = 1e-12);
    assert_eq!(bound[0].opposite, ring[0].opposite);
}

/// File-to-file wrapper: header plus one re-parseable row per record.
#[test]
fn file_round_trip_preserves_values() {
    init_tracing();

    let dir = std::env::temp_dir();
    let input = dir.join("pyramid_db_test_catalog.csv");
    let output = dir.join("pyramid_db_test_database.csv");

    std::fs::write(&input, "mag,ra,dec\n1,0,0\n2,3,4\n3,0,8\n4,-3,4\n").unwrap();

    let config = GenerateConfig {
        magnitude_cutoff: 10.0,
        group_size: 3,
        radius: 20.0,
        strategy: SelectionStrategy::BoundSearch,
        sort_order: SortOrder::Descending,
    };
    generate_to_file(&input, &output, &config).expect("pipeline failed");

    let written = std::fs::read_to_string(&output).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some(OUTPUT_HEADER));

    let row = lines.next().expect("one record expected");
    let fields: Vec<f64> = row.split(',').map(|f| f.parse().unwrap()).collect();
    assert_eq!(fields.len(), 5);
    assert_relative_eq!(fields[0], (0.28_f64).acos(), epsilon = 1e-6);
    assert_relative_eq!(fields[1], 0.0, epsilon = 1e-6);
    assert_relative_eq!(fields[2], 0.0, epsilon = 1e-6);
    assert_relative_eq!(fields[3], 0.0, epsilon = 1e-6);
    assert_relative_eq!(fields[4], 8.0, epsilon = 1e-6);
    assert!(lines.next().is_none());

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

/// No record with a non-finite angle may reach the emitted stream, even
/// when the catalog contains coincident stars.
#[test]
fn degenerate_combinations_never_reach_output() {
    init_tracing();

    // A coincident pair farthest from the pilot: any triangle using both
    // has a zero-length side at the designated far vertex, so its cosine
    // rule divides by zero and the combination must be dropped.
    let lines = [
        "0.0,0,0",
        "1.0,3.1,1.1",
        "2.0,3.1,1.1",
        "3.0,2.0,0.5",
        "4.0,0.7,-2.6",
    ];
    let config = GenerateConfig {
        magnitude_cutoff: 10.0,
        group_size: 4,
        radius: 20.0,
        strategy: SelectionStrategy::BoundSearch,
        sort_order: SortOrder::Descending,
    };

    let records = generate_from_lines(lines, &config).expect("pipeline failed");
    // Of the C(4,3) = 4 combinations, the two containing both coincident
    // companions are degenerate.
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(record.angle().is_finite());
        let row = format_record(record);
        assert!(!row.contains("NaN") && !row.contains("inf"), "row: {row}");
    }
}

/// Records flow through the attribute-keyed tree: insertion, rebalancing,
/// and pre-order layout for flat-file consumers.
#[test]
fn records_reorder_through_balanced_tree() {
    init_tracing();

    let lines: Vec<String> = std::iter::once("mag,ra,dec".to_string())
        .chain((0..12).map(|i| {
            let theta = 0.7 * i as f64;
            let r = 1.0 + 0.25 * i as f64;
            format!("{},{},{}", i, r * theta.cos(), r * theta.sin())
        }))
        .collect();
    let config = GenerateConfig {
        magnitude_cutoff: 100.0,
        group_size: 4,
        radius: 50.0,
        strategy: SelectionStrategy::BoundSearch,
        sort_order: SortOrder::Ascending,
    };

    let records = generate_from_lines(lines, &config).expect("pipeline failed");
    assert!(records.len() > 4);

    let layout = balanced_preorder(&records);
    // The rebalance never re-inserts the sorted extremes.
    assert_eq!(layout.len(), records.len() - 2);

    // Re-inserting the layout in file order rebuilds a tree whose sorted
    // view is the interior of the original ordering.
    let rebuilt: Tree<StarSet> = Tree::from_values(layout.iter().copied());
    let sorted: Vec<f64> = rebuilt.in_order().iter().map(|r| r.angle()).collect();
    let expected: Vec<f64> = records[1..records.len() - 1]
        .iter()
        .map(|r| r.angle())
        .collect();
    assert_eq!(sorted, expected);
}

/// The catalog filter and the generator compose: fainter-than-cutoff stars
/// never become pilots or companions.
#[test]
fn cutoff_excludes_faint_stars_from_enumeration() {
    init_tracing();

    let lines = [
        "1,0,0", "2,3,4", "3,0,8", "4,-3,4", // bright group
        "11,0.5,0.5", "12,1.0,1.0", // fainter than the cutoff
    ];
    let stars = parse_catalog(lines, 10.0);
    assert_eq!(stars.len(), 4);

    let config = GenerateConfig {
        magnitude_cutoff: 10.0,
        group_size: 3,
        radius: 20.0,
        strategy: SelectionStrategy::BoundSearch,
        sort_order: SortOrder::Descending,
    };
    let records = generate_from_lines(lines, &config).expect("pipeline failed");
    // Same single record as the 4-star example: the faint stars are gone
    // before enumeration begins.
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].opposite, Point::new(0.0, 8.0));
}
