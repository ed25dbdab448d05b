//! Integration tests for map collections, smoothing and fingerprints.

mod common;

use binmaps::{
    fingerprint_array, fingerprint_value, first_binning, smooth_map, validate_common_binning,
    validate_common_binning_with, BinningError, MapTree, Tolerances,
};
use common::{counting_map, edges, linear_edges, log_edges};
use serde_json::json;

// =============================================================================
// Common Binning
// =============================================================================

fn channel_doc(czbins_numu: serde_json::Value) -> serde_json::Value {
    json!({
        "nue": {
            "ebins": [1.0, 10.0, 100.0],
            "czbins": [-1.0, 0.0, 1.0],
            "map": [[0.1, 0.2], [0.3, 0.4]]
        },
        "numu": {
            "ebins": [1.0, 10.0, 100.0],
            "czbins": czbins_numu,
            "map": [[0.5, 0.6], [0.7, 0.8]]
        },
        "params": {"theta23": 0.78}
    })
}

#[test]
fn json_collection_with_common_binning() {
    let tree = MapTree::from_json(&channel_doc(json!([-1.0, 0.0, 1.0]))).unwrap();
    assert_eq!(tree.leaves().len(), 2);

    let (ebins, czbins) = validate_common_binning(&tree).unwrap();
    assert_eq!(&ebins[..], &[1.0, 10.0, 100.0]);
    assert_eq!(&czbins[..], &[-1.0, 0.0, 1.0]);
}

#[test]
fn json_collection_with_different_second_axis() {
    let tree = MapTree::from_json(&channel_doc(json!([-1.0, 0.5, 1.0]))).unwrap();
    assert!(matches!(
        validate_common_binning(&tree),
        Err(BinningError::BinningMismatch { axis: "axis 2" })
    ));
    // the first map is still reported
    let (_, czbins) = first_binning(&tree).unwrap();
    assert_eq!(&czbins[..], &[-1.0, 0.0, 1.0]);
}

#[test]
fn looser_tolerance_accepts_rounded_edges() {
    let tree = MapTree::from_json(&channel_doc(json!([-1.0, 1e-9, 1.0]))).unwrap();
    assert!(validate_common_binning(&tree).is_ok());

    let tree = MapTree::from_json(&channel_doc(json!([-1.0, 1e-4, 1.0]))).unwrap();
    assert!(validate_common_binning(&tree).is_err());

    let loose = Tolerances::builder().equality_rtol(1e-3).build().unwrap();
    let tree = MapTree::from_json(&channel_doc(json!([-1.0, 0.0, 1.0 + 1e-4]))).unwrap();
    assert!(validate_common_binning_with(&tree, &loose).is_ok());
}

#[test]
fn typed_tree_with_mismatched_first_axis() {
    let tree = MapTree::branch([
        (
            "up",
            MapTree::leaf(counting_map(log_edges(0.0, 2.0, 4), linear_edges(-1.0, 0.0, 5))),
        ),
        (
            "down",
            MapTree::branch([(
                "cc",
                MapTree::leaf(counting_map(log_edges(0.0, 2.0, 8), linear_edges(-1.0, 0.0, 5))),
            )]),
        ),
    ]);
    assert!(matches!(
        validate_common_binning(&tree),
        Err(BinningError::BinningMismatch { axis: "axis 1" })
    ));
}

// =============================================================================
// Smoothing
// =============================================================================

#[test]
fn smoothing_averages_per_cell() {
    let ebins = edges(&[1.0, 10.0, 100.0]);
    let czbins = edges(&[-1.0, 0.0, 1.0]);
    let probs = [0.2, 0.4, 0.9, 1.0, 0.5];
    let energies = [2.0, 5.0, 20.0, 100.0, 500.0];
    let coszen = [-0.5, -0.1, 0.5, 1.0, 0.0];

    let grid = smooth_map(&probs, &energies, &coszen, &ebins, &czbins).unwrap();
    assert_eq!(grid.dim(), (2, 2));
    assert!((grid[[0, 0]] - 0.3).abs() < 1e-12);
    assert!(grid[[0, 1]].is_nan());
    assert!(grid[[1, 0]].is_nan());
    assert!((grid[[1, 1]] - 0.95).abs() < 1e-12);
}

// =============================================================================
// Fingerprints
// =============================================================================

#[test]
fn map_fingerprints() {
    let a = counting_map(linear_edges(0.0, 1.0, 3), linear_edges(0.0, 1.0, 2));
    let b = counting_map(linear_edges(0.0, 2.0, 3), linear_edges(0.0, 1.0, 2));

    // same values, different binning
    assert_eq!(fingerprint_array(a.values()), fingerprint_array(b.values()));
    assert_ne!(
        fingerprint_value(&a.axes()).unwrap(),
        fingerprint_value(&b.axes()).unwrap()
    );
}

#[test]
fn value_fingerprint_ignores_key_order() {
    let one = json!({"ebins": [1.0, 10.0], "czbins": [-1.0, 1.0]});
    let two: serde_json::Value =
        serde_json::from_str(r#"{"czbins":[-1.0,1.0],"ebins":[1.0,10.0]}"#).unwrap();
    assert_eq!(fingerprint_value(&one).unwrap(), fingerprint_value(&two).unwrap());
}

#[test]
fn smoothed_grid_fingerprint_tells_empty_cells_from_null() {
    let ebins = edges(&[1.0, 10.0, 100.0]);
    let czbins = edges(&[-1.0, 0.0, 1.0]);
    let grid = smooth_map(&[0.5], &[2.0], &[-0.5], &ebins, &czbins).unwrap();
    assert!(grid[[1, 1]].is_nan());

    let cells: Vec<f64> = grid.iter().copied().collect();
    let as_null = json!([0.5, null, null, null]);
    let as_inf = vec![0.5, f64::INFINITY, f64::INFINITY, f64::INFINITY];

    assert_ne!(fingerprint_value(&cells).unwrap(), fingerprint_value(&as_null).unwrap());
    assert_ne!(fingerprint_value(&cells).unwrap(), fingerprint_value(&as_inf).unwrap());
}
