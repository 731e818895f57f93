//! Tests for marching-squares contour extraction and merging.

use contour_engine::contour::is_major_level;
use contour_engine::{
    compute_segments, generate_contours, generate_levels, merge_segments, Segment,
    DEFAULT_MERGE_TOLERANCE,
};
use survey_common::{ContourConfig, ElevationGrid, Point, TerrainError};
use test_utils::{
    assert_approx_eq, assert_coords_approx_eq, create_cone_grid, create_flat_grid,
    create_planar_grid, create_rolling_grid, create_sparse_grid, fixtures, grid_from_rows,
};

fn config(interval: f64, major: u32) -> ContourConfig {
    ContourConfig::new(interval, major)
}

// ============================================================================
// generate_levels tests
// ============================================================================

#[test]
fn test_generate_levels_offset_start() {
    assert_eq!(generate_levels(3.0, 27.0, 5.0), vec![5.0, 10.0, 15.0, 20.0, 25.0]);
}

#[test]
fn test_generate_levels_negative_range() {
    assert_eq!(
        generate_levels(-20.0, 20.0, 10.0),
        vec![-20.0, -10.0, 0.0, 10.0, 20.0]
    );
}

#[test]
fn test_generate_levels_invalid_interval() {
    assert!(generate_levels(0.0, 100.0, 0.0).is_empty());
    assert!(generate_levels(0.0, 100.0, -10.0).is_empty());
    assert!(generate_levels(0.0, 100.0, f64::NAN).is_empty());
}

#[test]
fn test_generate_levels_inverted_range() {
    assert!(generate_levels(100.0, 0.0, 10.0).is_empty());
}

#[test]
fn test_generate_levels_many_small_steps_do_not_drift() {
    let levels = generate_levels(0.0, 100.0, 0.1);
    assert_eq!(levels.len(), 1001);
    assert_eq!(levels[1000], 100.0);
    assert_eq!(levels[777], 77.7);
}

// ============================================================================
// compute_segments tests
// ============================================================================

#[test]
fn test_segments_grid_too_small() {
    let grid = ElevationGrid::from_rows(vec![vec![Some(1.0), Some(2.0)]]).unwrap();
    assert!(compute_segments(&grid, 1.5).is_empty());
}

#[test]
fn test_segments_all_absent_cell() {
    let grid = ElevationGrid::new(2, 2, vec![None; 4]).unwrap();
    assert!(compute_segments(&grid, 0.0).is_empty());
}

#[test]
fn test_segments_cell_with_one_absent_corner_is_skipped() {
    let grid = grid_from_rows(&[[0.0, 10.0], [f64::NAN, 10.0]]);
    assert!(compute_segments(&grid, 5.0).is_empty());
}

#[test]
fn test_segments_flat_field_at_level() {
    // All corners equal the level: every corner counts as above (case 15)
    let grid = create_flat_grid(3, 3, 5.0);
    assert!(compute_segments(&grid, 5.0).is_empty());
}

#[test]
fn test_segments_single_corner_above() {
    // Only top-left above (case 8): left edge to top edge
    let grid = grid_from_rows(&[[10.0, 0.0], [0.0, 0.0]]);
    let segments = compute_segments(&grid, 5.0);
    assert_eq!(segments.len(), 1);

    let seg = &segments[0];
    assert_coords_approx_eq!((seg.start.x, seg.start.y), (0.0, 0.5), 1e-12);
    assert_coords_approx_eq!((seg.end.x, seg.end.y), (0.5, 0.0), 1e-12);
}

#[test]
fn test_segments_single_corner_below() {
    // Only bottom-left below (case 14): left edge to bottom edge
    let grid = grid_from_rows(&[[10.0, 10.0], [0.0, 10.0]]);
    let segments = compute_segments(&grid, 5.0);
    assert_eq!(segments.len(), 1);

    let seg = &segments[0];
    assert_coords_approx_eq!((seg.start.x, seg.start.y), (0.0, 0.5), 1e-12);
    assert_coords_approx_eq!((seg.end.x, seg.end.y), (0.5, 1.0), 1e-12);
}

#[test]
fn test_segments_interpolate_along_edge() {
    // Left column 0, right column 4: level 1 crosses a quarter of the way
    let grid = grid_from_rows(&[[0.0, 4.0], [0.0, 4.0]]);
    let segments = compute_segments(&grid, 1.0);
    assert_eq!(segments.len(), 1);
    assert_approx_eq!(segments[0].start.x, 0.25, 1e-12);
    assert_approx_eq!(segments[0].end.x, 0.25, 1e-12);
}

#[test]
fn test_saddle_case_10_fixed_pairing() {
    // TL and BR high: top-right and bottom-left segments
    let segments = compute_segments(&fixtures::saddle_main_diagonal(), 5.0);
    assert_eq!(segments.len(), 2);

    assert_coords_approx_eq!((segments[0].start.x, segments[0].start.y), (0.5, 0.0), 1e-12);
    assert_coords_approx_eq!((segments[0].end.x, segments[0].end.y), (1.0, 0.5), 1e-12);
    assert_coords_approx_eq!((segments[1].start.x, segments[1].start.y), (0.5, 1.0), 1e-12);
    assert_coords_approx_eq!((segments[1].end.x, segments[1].end.y), (0.0, 0.5), 1e-12);
}

#[test]
fn test_saddle_case_5_fixed_pairing() {
    // TR and BL high: left-top and right-bottom segments
    let segments = compute_segments(&fixtures::saddle_anti_diagonal(), 5.0);
    assert_eq!(segments.len(), 2);

    assert_coords_approx_eq!((segments[0].start.x, segments[0].start.y), (0.0, 0.5), 1e-12);
    assert_coords_approx_eq!((segments[0].end.x, segments[0].end.y), (0.5, 0.0), 1e-12);
    assert_coords_approx_eq!((segments[1].start.x, segments[1].start.y), (1.0, 0.5), 1e-12);
    assert_coords_approx_eq!((segments[1].end.x, segments[1].end.y), (0.5, 1.0), 1e-12);
}

#[test]
fn test_saddle_ignores_center_average() {
    // Centre average (2.5) is below the level, pairing is unchanged
    let high = compute_segments(&grid_from_rows(&[[10.0, 0.0], [0.0, 10.0]]), 5.0);
    let low = compute_segments(&grid_from_rows(&[[6.0, 0.0], [0.0, 6.0]]), 5.0);
    assert_eq!(high.len(), 2);
    assert_eq!(low.len(), 2);
    assert_approx_eq!(low[0].start.y, 0.0, 1e-12);
    assert_approx_eq!(low[0].end.x, 1.0, 1e-12);
}

// ============================================================================
// merge_segments tests
// ============================================================================

#[test]
fn test_merge_empty() {
    assert!(merge_segments(&[], DEFAULT_MERGE_TOLERANCE).is_empty());
}

#[test]
fn test_merge_unmatched_segments_stay_separate() {
    let segments = vec![
        Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
        Segment::new(Point::new(5.0, 5.0), Point::new(6.0, 5.0)),
    ];
    let polylines = merge_segments(&segments, DEFAULT_MERGE_TOLERANCE);
    assert_eq!(polylines.len(), 2);
    assert!(polylines.iter().all(|p| p.points.len() == 2 && !p.closed));
}

#[test]
fn test_merge_chains_in_both_directions() {
    // Seed is the middle segment; reversed neighbours on both sides
    let segments = vec![
        Segment::new(Point::new(1.0, 0.0), Point::new(2.0, 0.0)),
        Segment::new(Point::new(3.0, 0.0), Point::new(2.0, 0.0)),
        Segment::new(Point::new(1.0, 0.0), Point::new(0.0, 0.0)),
    ];
    let polylines = merge_segments(&segments, DEFAULT_MERGE_TOLERANCE);
    assert_eq!(polylines.len(), 1);

    let xs: Vec<f64> = polylines[0].points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_merge_within_tolerance() {
    let segments = vec![
        Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
        Segment::new(Point::new(1.0 + 1e-9, 0.0), Point::new(2.0, 0.0)),
    ];
    assert_eq!(merge_segments(&segments, 1e-6).len(), 1);
    assert_eq!(merge_segments(&segments, 1e-12).len(), 2);
}

#[test]
fn test_merge_closes_loop_around_peak() {
    let grid = create_cone_grid(7, 7, 100.0, 0.0);
    let segments = compute_segments(&grid, 50.0);
    let polylines = merge_segments(&segments, DEFAULT_MERGE_TOLERANCE);

    assert_eq!(polylines.len(), 1);
    assert!(polylines[0].closed);
    assert_eq!(polylines[0].points.len(), segments.len() + 1);
}

#[test]
fn test_merge_consumes_every_segment_once() {
    let grid = create_rolling_grid(40, 30);
    let segments = compute_segments(&grid, 55.0);
    let polylines = merge_segments(&segments, DEFAULT_MERGE_TOLERANCE);

    let consumed: usize = polylines.iter().map(|p| p.points.len() - 1).sum();
    assert_eq!(consumed, segments.len());
}

#[test]
fn test_merge_is_idempotent() {
    let grid = create_rolling_grid(30, 30);
    let segments = compute_segments(&grid, 45.0);
    let polylines = merge_segments(&segments, DEFAULT_MERGE_TOLERANCE);
    assert!(!polylines.is_empty());

    for polyline in &polylines {
        let remerged = merge_segments(&polyline.segments(), DEFAULT_MERGE_TOLERANCE);
        assert_eq!(remerged.len(), 1);

        let mut forward = remerged[0].points.clone();
        if forward != polyline.points {
            forward.reverse();
        }
        assert_eq!(forward, polyline.points);
    }
}

// ============================================================================
// generate_contours tests
// ============================================================================

#[test]
fn test_contours_flat_zero_grid() {
    let grid = grid_from_rows(&[[0.0, 0.0], [0.0, 0.0]]);
    assert!(generate_contours(&grid, &config(1.0, 5)).unwrap().is_empty());
}

#[test]
fn test_contours_flat_grid_on_level_boundary() {
    // 5.0 is exactly a level, but every corner is >= level
    let grid = create_flat_grid(4, 4, 5.0);
    assert!(generate_contours(&grid, &config(1.0, 5)).unwrap().is_empty());

    let grid = create_flat_grid(4, 4, 5.5);
    assert!(generate_contours(&grid, &config(1.0, 5)).unwrap().is_empty());
}

#[test]
fn test_contours_too_few_samples() {
    let n = f64::NAN;
    let grid = grid_from_rows(&[[0.0, 10.0, n], [5.0, n, n], [n, n, n]]);
    assert!(generate_contours(&grid, &config(1.0, 5)).unwrap().is_empty());
}

#[test]
fn test_contours_planar_grid_parallel_lines() {
    // z = col + 0.5 over 5 columns: levels 1..=4 each cross the interior
    let grid = create_planar_grid(5, 4, 1.0, 0.0, 0.5);
    let contours = generate_contours(&grid, &config(1.0, 5)).unwrap();

    let levels: Vec<f64> = contours.iter().map(|c| c.level).collect();
    assert_eq!(levels, vec![1.0, 2.0, 3.0, 4.0]);

    for contour in &contours {
        assert_eq!(contour.polylines.len(), 1);
        let line = &contour.polylines[0];
        assert_eq!(line.points.len(), 4);
        assert!(!line.closed);

        let expected_x = contour.level - 0.5;
        for p in &line.points {
            assert_approx_eq!(p.x, expected_x, 1e-9);
        }
    }
}

#[test]
fn test_contours_planar_count_matches_relief() {
    // z = 2 * row + 0.3; relief 8, interval 2 -> floor(8/2) levels cross
    let grid = create_planar_grid(3, 5, 0.0, 2.0, 0.3);
    let contours = generate_contours(&grid, &config(2.0, 5)).unwrap();
    assert_eq!(contours.len(), 4);

    let spacing: Vec<f64> = contours.windows(2).map(|w| w[1].level - w[0].level).collect();
    assert!(spacing.iter().all(|&d| (d - 2.0).abs() < 1e-9));
}

#[test]
fn test_contours_ascending_without_duplicates() {
    let grid = create_rolling_grid(25, 25);
    let contours = generate_contours(&grid, &config(2.5, 4)).unwrap();
    assert!(!contours.is_empty());
    assert!(contours.windows(2).all(|w| w[0].level < w[1].level));
    assert!(contours.iter().all(|c| !c.polylines.is_empty()));
}

#[test]
fn test_contours_major_flags() {
    let grid = create_planar_grid(12, 3, 1.0, 0.0, 0.5);
    let contours = generate_contours(&grid, &config(1.0, 5)).unwrap();

    for contour in &contours {
        let expected = (contour.level.round() as i64) % 5 == 0;
        assert_eq!(contour.is_major, expected, "level {}", contour.level);
    }
    assert!(contours.iter().any(|c| c.is_major));
    assert!(is_major_level(10.0, 1.0, 5));
}

#[test]
fn test_contours_skip_missing_row() {
    // Row 1 unsurveyed: only the cells between rows 2 and 3 contribute
    let grid = fixtures::missing_row();
    let contours = generate_contours(&grid, &config(1.0, 5)).unwrap();
    assert!(!contours.is_empty());

    for contour in &contours {
        for line in &contour.polylines {
            assert!(line.points.iter().all(|p| p.y >= 2.0));
        }
    }
}

#[test]
fn test_contours_hole_splits_lines() {
    let grid = create_sparse_grid(6, 6, &[(2, 2), (3, 3)]);
    let contours = generate_contours(&grid, &config(10.0, 5)).unwrap();
    assert!(!contours.is_empty());
}

#[test]
fn test_contours_invalid_config() {
    let grid = create_planar_grid(3, 3, 1.0, 1.0, 0.0);

    let err = generate_contours(&grid, &config(0.0, 5)).unwrap_err();
    assert!(err.is_configuration_error());

    let err = generate_contours(&grid, &config(1.0, 0)).unwrap_err();
    assert!(matches!(err, TerrainError::InvalidParameter { .. }));
}

#[test]
fn test_contours_level_limit() {
    let grid = create_planar_grid(3, 3, 100.0, 100.0, 0.0);
    let mut cfg = config(0.001, 5);
    cfg.max_levels = 1000;

    let err = generate_contours(&grid, &cfg).unwrap_err();
    assert!(matches!(err, TerrainError::TooManyLevels { max: 1000, .. }));
}

#[test]
fn test_contours_reject_interval_below_level_resolution() {
    let grid = create_planar_grid(3, 3, 5e-5, 0.0, 1e6);

    let err = generate_contours(&grid, &config(1e-7, 5)).unwrap_err();
    assert!(matches!(
        err,
        TerrainError::InvalidParameter { ref param, .. } if param == "interval"
    ));
}

#[test]
fn test_generate_levels_at_finest_interval_keeps_advancing() {
    // 1e-4 of relief at 1e-6 spacing, far from zero
    let levels = generate_levels(1e6, 1e6 + 1e-4, 1e-6);
    assert!((100..=101).contains(&levels.len()), "got {} levels", levels.len());
    assert!(levels.windows(2).all(|w| w[1] > w[0]));
}
