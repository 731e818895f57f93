//! Tests for the elevation grid model and support math.

use survey_common::{
    bilinear_interpolate, elevation_stats, ElevationGrid, GridField, TerrainError,
};
use test_utils::{assert_approx_eq, create_planar_grid, create_sparse_grid};

#[test]
fn test_grid_dimensions_from_rows() {
    let grid = ElevationGrid::from_rows(vec![
        vec![Some(1.0), Some(2.0), Some(3.0)],
        vec![Some(4.0), None, Some(6.0)],
    ])
    .unwrap();

    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 3);
    assert_eq!(grid.len(), 6);
    assert_eq!(grid.valid_count(), 5);
    assert!(grid.has_cells());
}

#[test]
fn test_grid_single_row_has_no_cells() {
    let grid = ElevationGrid::from_rows(vec![vec![Some(1.0), Some(2.0)]]).unwrap();
    assert!(!grid.has_cells());
}

#[test]
fn test_grid_dimension_mismatch() {
    let err = ElevationGrid::new(3, 3, vec![Some(1.0); 8]).unwrap_err();
    assert!(matches!(
        err,
        TerrainError::DimensionMismatch {
            expected: 9,
            found: 8
        }
    ));
}

#[test]
fn test_grid_out_of_bounds_is_absent() {
    let grid = ElevationGrid::filled(2, 2, 1.0).unwrap();
    assert_eq!(grid.get(2, 0), None);
    assert_eq!(grid.get(0, 2), None);
}

#[test]
fn test_grid_to_rows_round_trip() {
    let rows = vec![vec![Some(1.0), None], vec![None, Some(4.0)]];
    let grid = ElevationGrid::from_rows(rows.clone()).unwrap();
    assert_eq!(grid.to_rows(), rows);
}

#[test]
fn test_grid_rejects_ragged_json() {
    let json = r#"{"elevations":[[1.0,2.0],[3.0]]}"#;
    let result: Result<ElevationGrid, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_bilinear_on_planar_grid_is_exact() {
    // z = 2 * col + 3 * row
    let grid = create_planar_grid(5, 4, 2.0, 3.0, 0.0);
    let value = bilinear_interpolate(&grid, 2.25, 1.5).unwrap();
    assert_approx_eq!(value, 2.0 * 2.25 + 3.0 * 1.5, 1e-9);
}

#[test]
fn test_bilinear_near_hole_is_absent() {
    let grid = create_sparse_grid(4, 4, &[(1, 1)]);
    assert!(bilinear_interpolate(&grid, 0.5, 0.5).is_none());
    assert!(bilinear_interpolate(&grid, 2.5, 2.5).is_some());
}

#[test]
fn test_stats_on_planar_grid() {
    let grid = create_planar_grid(3, 3, 1.0, 10.0, 100.0);
    let stats = elevation_stats(&grid).unwrap();
    assert_eq!(stats.min, 100.0);
    assert_eq!(stats.max, 122.0);
    assert_eq!(stats.relief, 22.0);
    assert_approx_eq!(stats.mean, 111.0, 1e-9);
}

#[test]
fn test_grid_field_summary() {
    let mut field = GridField::empty(2, 2);
    assert_eq!(field.present_count(), 0);
    assert!(field.mean().is_none());

    field.set(0, 0, Some(2.0));
    field.set(1, 1, Some(4.0));
    field.set(5, 5, Some(100.0)); // ignored, out of bounds

    assert_eq!(field.present_count(), 2);
    assert_eq!(field.max(), Some(4.0));
    assert_eq!(field.mean(), Some(3.0));
}
