// ============================================================
// Layer 3 - Grid Iterator
// ============================================================
// Expands a ParameterGrid into every ParameterAssignment, lazily.
//
// Ordering:
//   keys sorted lexicographically (BTreeMap order), values in the
//   order given, rightmost key varying fastest. This is the usual
//   odometer / Cartesian product order.
//
// Edge cases:
//   - empty grid          -> exactly one empty assignment
//   - any empty value list -> no assignments at all
//
// The iterator borrows the grid, so calling `iter()` again
// restarts the sweep from the first combination.

use crate::domain::params::{ParamValue, ParameterAssignment, ParameterGrid};

impl ParameterGrid {
    /// Lazily iterate all assignments of this grid.
    pub fn iter(&self) -> GridIter<'_> {
        let (keys, values): (Vec<&String>, Vec<&Vec<ParamValue>>) = self.entries().unzip();
        let done = values.iter().any(|v| v.is_empty());
        GridIter {
            indices: vec![0; keys.len()],
            remaining: if done { 0 } else { self.combinations() },
            keys,
            values,
        }
    }
}

impl<'a> IntoIterator for &'a ParameterGrid {
    type Item = ParameterAssignment;
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Odometer over the candidate lists of a grid.
#[derive(Debug, Clone)]
pub struct GridIter<'a> {
    keys:      Vec<&'a String>,
    values:    Vec<&'a Vec<ParamValue>>,
    indices:   Vec<usize>,
    remaining: usize,
}

impl GridIter<'_> {
    /// Advance the odometer by one, rightmost position first.
    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.values[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
    }
}

impl Iterator for GridIter<'_> {
    type Item = ParameterAssignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let mut assignment = ParameterAssignment::new();
        for (pos, key) in self.keys.iter().enumerate() {
            assignment.insert(key.as_str(), self.values[pos][self.indices[pos]]);
        }

        self.remaining -= 1;
        self.advance();
        Some(assignment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}
