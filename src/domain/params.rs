// ============================================================
// Layer 3 - Parameter Domain Types
// ============================================================
// The vocabulary of a grid sweep:
//
//   ParamValue          - one candidate value (an integer or None)
//   ParameterGrid       - name -> ordered list of candidates
//   ParameterAssignment - name -> one concrete value
//
// Both maps are BTreeMaps, so keys always iterate in
// lexicographic order. The grid iterator relies on this.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Parameter names the benchmark sweeps over.
pub const NUM_TOPICS: &str = "num_topics";
pub const ITERATIONS: &str = "iterations";
pub const WORKERS: &str = "workers";

/// The fixed key set of a benchmark grid.
pub const BENCHMARK_KEYS: [&str; 3] = [ITERATIONS, NUM_TOPICS, WORKERS];

/// A single candidate value.
///
/// `None` serialises as JSON `null` and is displayed as `None`,
/// which is how "let the library decide" is written in grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    None,
    Int(u64),
}

impl ParamValue {
    pub fn as_int(self) -> Option<u64> {
        match self {
            ParamValue::None => None,
            ParamValue::Int(v) => Some(v),
        }
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<Option<u64>> for ParamValue {
    fn from(v: Option<u64>) -> Self {
        v.map_or(ParamValue::None, ParamValue::Int)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::None => write!(f, "None"),
            ParamValue::Int(v) => write!(f, "{v}"),
        }
    }
}

// ─── ParameterGrid ────────────────────────────────────────────────────────────

/// Mapping from parameter name to its ordered candidate values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterGrid {
    params: BTreeMap<String, Vec<ParamValue>>,
}

impl ParameterGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Replaces any previous candidates for `name`.
    pub fn with<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        self.params
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// The sweep the benchmark runs when no grid file is given.
    pub fn benchmark_default() -> Self {
        Self::new()
            .with(NUM_TOPICS, [5u64, 10, 20, 30, 40])
            .with(ITERATIONS, [50u64, 100, 300, 600, 1000])
            .with(WORKERS, [None, Some(1u64), Some(2), Some(3), Some(4)])
    }

    /// Parameter names and candidates in sorted key order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Vec<ParamValue>)> {
        self.params.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of assignments the grid expands to.
    /// An empty grid still yields one (empty) assignment.
    pub fn combinations(&self) -> usize {
        self.params.values().map(Vec::len).product()
    }

    /// Checks the grid uses exactly the benchmark's key set.
    pub fn validate_benchmark_keys(&self) -> Result<()> {
        for key in self.params.keys() {
            if !BENCHMARK_KEYS.contains(&key.as_str()) {
                bail!(
                    "Unknown grid parameter '{}'; expected one of {:?}",
                    key,
                    BENCHMARK_KEYS
                );
            }
        }
        for key in BENCHMARK_KEYS {
            if !self.params.contains_key(key) {
                bail!("Grid is missing parameter '{}'", key);
            }
        }
        Ok(())
    }
}

// ─── ParameterAssignment ──────────────────────────────────────────────────────

/// One concrete point of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterAssignment {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl fmt::Display for ParameterAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_size() {
        let grid = ParameterGrid::benchmark_default();
        assert_eq!(grid.combinations(), 125);
        assert!(grid.validate_benchmark_keys().is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let grid = ParameterGrid::benchmark_default().with("passes", [1u64]);
        assert!(grid.validate_benchmark_keys().is_err());
    }

    #[test]
    fn test_missing_key_rejected() {
        let grid = ParameterGrid::new()
            .with(NUM_TOPICS, [5u64])
            .with(ITERATIONS, [50u64]);
        let err = grid.validate_benchmark_keys().unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn test_grid_from_json_with_null() {
        let json = r#"{"workers": [null, 2], "num_topics": [5], "iterations": [50]}"#;
        let grid: ParameterGrid = serde_json::from_str(json).unwrap();
        let workers: Vec<_> = grid
            .entries()
            .find(|(k, _)| k.as_str() == WORKERS)
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(workers, vec![ParamValue::None, ParamValue::Int(2)]);
    }

    #[test]
    fn test_assignment_display_sorted() {
        let mut a = ParameterAssignment::new();
        a.insert(WORKERS, ParamValue::None);
        a.insert(NUM_TOPICS, ParamValue::Int(5));
        a.insert(ITERATIONS, ParamValue::Int(50));
        assert_eq!(a.to_string(), "{iterations: 50, num_topics: 5, workers: None}");
    }
}
