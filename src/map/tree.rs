//! Nested map collections and the common-binning check.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde_json::Value;

use super::Map;
use crate::binning::{edges_equal, BinEdges};
use crate::config::Tolerances;
use crate::error::{BinningError, Result};

// ============================================================================
// MapTree
// ============================================================================

/// A nested collection of maps.
///
/// Branches are keyed by name and iterated in key order.
#[derive(Clone, Debug, PartialEq)]
pub enum MapTree {
    Branch(BTreeMap<String, MapTree>),
    Leaf(Map),
}

impl MapTree {
    pub fn leaf(map: Map) -> Self {
        MapTree::Leaf(map)
    }

    pub fn branch<K, I>(children: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, MapTree)>,
    {
        MapTree::Branch(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// All maps in depth-first, key order.
    pub fn leaves(&self) -> Vec<&Map> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                MapTree::Leaf(map) => out.push(map),
                // reversed so the first key is popped first
                MapTree::Branch(children) => stack.extend(children.values().rev()),
            }
        }
        out
    }

    /// Convert a parsed JSON document using the default [`LeafKeys`].
    pub fn from_json(value: &Value) -> Result<Self> {
        Self::from_json_with_keys(value, &LeafKeys::default())
    }

    /// Convert a parsed JSON document into a tree.
    ///
    /// An object whose key set is exactly the three keys in `keys` becomes a
    /// leaf; any other object becomes a branch. Non-object values inside a
    /// branch (parameters, labels, ...) are skipped.
    ///
    /// # Errors
    ///
    /// [`BinningError::InvalidCollection`] if the root is not an object or a
    /// leaf cannot be turned into a valid 2D [`Map`].
    pub fn from_json_with_keys(value: &Value, keys: &LeafKeys) -> Result<Self> {
        match convert(value, keys, "")? {
            Some(tree) => Ok(tree),
            None => Err(BinningError::InvalidCollection {
                path: "/".to_string(),
                reason: "expected a JSON object".to_string(),
            }),
        }
    }
}

/// Key names identifying a map leaf in a JSON collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafKeys {
    pub axis1: String,
    pub axis2: String,
    pub values: String,
}

impl Default for LeafKeys {
    fn default() -> Self {
        Self {
            axis1: "ebins".to_string(),
            axis2: "czbins".to_string(),
            values: "map".to_string(),
        }
    }
}

impl LeafKeys {
    fn matches(&self, object: &serde_json::Map<String, Value>) -> bool {
        object.len() == 3
            && [&self.axis1, &self.axis2, &self.values]
                .into_iter()
                .all(|k| object.contains_key(k))
    }
}

fn convert(value: &Value, keys: &LeafKeys, path: &str) -> Result<Option<MapTree>> {
    let Value::Object(object) = value else {
        return Ok(None);
    };

    if keys.matches(object) {
        return parse_leaf(object, keys)
            .map(|map| Some(MapTree::Leaf(map)))
            .map_err(|reason| BinningError::InvalidCollection {
                path: if path.is_empty() { "/".to_string() } else { path.to_string() },
                reason,
            });
    }

    let mut children = BTreeMap::new();
    for (key, child) in object {
        if let Some(tree) = convert(child, keys, &format!("{path}/{key}"))? {
            children.insert(key.clone(), tree);
        }
    }
    Ok(Some(MapTree::Branch(children)))
}

fn parse_leaf(
    object: &serde_json::Map<String, Value>,
    keys: &LeafKeys,
) -> std::result::Result<Map, String> {
    let edges = |key: &str| -> std::result::Result<BinEdges, String> {
        let raw: Vec<f64> =
            serde_json::from_value(object[key].clone()).map_err(|e| format!("`{key}`: {e}"))?;
        BinEdges::new(raw).map_err(|e| format!("`{key}`: {e}"))
    };
    let edges1 = edges(&keys.axis1)?;
    let edges2 = edges(&keys.axis2)?;

    let rows: Vec<Vec<f64>> = serde_json::from_value(object[&keys.values].clone())
        .map_err(|e| format!("`{}`: {e}", keys.values))?;
    let n_cols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != n_cols) {
        return Err(format!("`{}`: rows have different lengths", keys.values));
    }
    let values = Array2::from_shape_vec((rows.len(), n_cols), rows.concat())
        .map_err(|e| format!("`{}`: {e}", keys.values))?;

    Map::new_2d(edges1, edges2, values).map_err(|e| e.to_string())
}

// ============================================================================
// Binning checks
// ============================================================================

/// Binning of the first map in the tree, without checking the others.
///
/// Returns `None` if the tree has no 2D map.
pub fn first_binning(tree: &MapTree) -> Option<(&BinEdges, &BinEdges)> {
    tree.leaves()
        .into_iter()
        .find_map(|map| Some((map.axis(0)?, map.axis(1)?)))
}

/// Check whether all maps in the tree share the same binning, and return it.
///
/// Uses the default tolerances; see [`validate_common_binning_with`].
pub fn validate_common_binning(tree: &MapTree) -> Result<(BinEdges, BinEdges)> {
    validate_common_binning_with(tree, &Tolerances::default())
}

/// Check whether all maps in the tree share the same binning, and return it.
///
/// Every map is compared against the first one, axis by axis.
///
/// # Errors
///
/// - [`BinningError::ShapeMismatch`] if a map is not two-dimensional
/// - [`BinningError::BinningMismatch`] if two maps differ on an axis
/// - [`BinningError::EmptyCollection`] if the tree holds no maps
pub fn validate_common_binning_with(
    tree: &MapTree,
    tolerances: &Tolerances,
) -> Result<(BinEdges, BinEdges)> {
    let mut set1 = Vec::new();
    let mut set2 = Vec::new();
    for map in tree.leaves() {
        match map.axes() {
            [edges1, edges2] => {
                set1.push(edges1);
                set2.push(edges2);
            }
            axes => {
                return Err(BinningError::ShapeMismatch(format!(
                    "expected 2D maps in collection, found a {}D map",
                    axes.len()
                )))
            }
        }
    }

    for (set, axis) in [(&set1, "axis 1"), (&set2, "axis 2")] {
        let Some((first, rest)) = set.split_first() else {
            return Err(BinningError::EmptyCollection);
        };
        if !rest
            .iter()
            .all(|edges| edges_equal(first, edges, tolerances.equality_rtol))
        {
            return Err(BinningError::BinningMismatch { axis });
        }
    }

    Ok((set1[0].clone(), set2[0].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use serde_json::json;

    fn edges(values: &[f64]) -> BinEdges {
        BinEdges::new(values.to_vec()).unwrap()
    }

    fn map(e1: &[f64], e2: &[f64]) -> Map {
        let (e1, e2) = (edges(e1), edges(e2));
        let values = Array2::zeros((e1.n_bins(), e2.n_bins()));
        Map::new_2d(e1, e2, values).unwrap()
    }

    #[test]
    fn leaves_in_key_order() {
        let tree = MapTree::branch([
            ("b", MapTree::leaf(map(&[0.0, 2.0], &[0.0, 1.0]))),
            (
                "a",
                MapTree::branch([("x", MapTree::leaf(map(&[0.0, 1.0], &[0.0, 1.0])))]),
            ),
        ]);
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].axes()[0].upper(), 1.0);
        assert_eq!(leaves[1].axes()[0].upper(), 2.0);
    }

    #[test]
    fn common_binning() {
        let tree = MapTree::branch([
            ("nue", MapTree::leaf(map(&[1.0, 10.0, 100.0], &[-1.0, 0.0, 1.0]))),
            ("numu", MapTree::leaf(map(&[1.0, 10.0, 100.0], &[-1.0, 0.0, 1.0]))),
        ]);
        let (e1, e2) = validate_common_binning(&tree).unwrap();
        assert_eq!(&e1[..], &[1.0, 10.0, 100.0]);
        assert_eq!(&e2[..], &[-1.0, 0.0, 1.0]);
    }

    #[test]
    fn mismatch_on_second_axis() {
        let tree = MapTree::branch([
            ("nue", MapTree::leaf(map(&[1.0, 10.0], &[-1.0, 0.0, 1.0]))),
            ("numu", MapTree::leaf(map(&[1.0, 10.0], &[-1.0, 1.0]))),
        ]);
        assert!(matches!(
            validate_common_binning(&tree),
            Err(BinningError::BinningMismatch { axis: "axis 2" })
        ));
    }

    #[test]
    fn empty_tree() {
        let tree = MapTree::branch(Vec::<(String, MapTree)>::new());
        assert!(matches!(
            validate_common_binning(&tree),
            Err(BinningError::EmptyCollection)
        ));
        assert!(first_binning(&tree).is_none());
    }

    #[test]
    fn json_leaves_and_branches() {
        let doc = json!({
            "params": {"livetime": 3.0},
            "label": "test",
            "nue": {
                "cc": {"ebins": [1.0, 10.0, 100.0], "czbins": [-1.0, 1.0], "map": [[0.5], [0.25]]}
            }
        });
        let tree = MapTree::from_json(&doc).unwrap();
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].values().shape(), &[2, 1]);
        let (e1, e2) = first_binning(&tree).unwrap();
        assert_eq!(e1.n_bins(), 2);
        assert_eq!(e2.n_bins(), 1);
    }

    #[test]
    fn json_invalid_leaf() {
        let doc = json!({
            "nue": {"ebins": [1.0, 10.0], "czbins": [-1.0, 1.0], "map": [[0.5, 0.5]]}
        });
        match MapTree::from_json(&doc) {
            Err(BinningError::InvalidCollection { path, .. }) => assert_eq!(path, "/nue"),
            other => panic!("expected InvalidCollection, got {other:?}"),
        }
    }

    #[test]
    fn json_root_must_be_object() {
        assert!(matches!(
            MapTree::from_json(&json!([1, 2, 3])),
            Err(BinningError::InvalidCollection { .. })
        ));
    }

    #[test]
    fn json_custom_keys() {
        let keys = LeafKeys {
            axis1: "x".into(),
            axis2: "y".into(),
            values: "z".into(),
        };
        let doc = json!({"only": {"x": [0.0, 1.0], "y": [0.0, 1.0], "z": [[2.0]]}});
        let tree = MapTree::from_json_with_keys(&doc, &keys).unwrap();
        assert_eq!(tree.leaves()[0].values()[[0, 0]], 2.0);
    }
}
