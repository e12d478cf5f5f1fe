// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running bottom edges of each column.

use smallvec::SmallVec;

use crate::Scalar;

/// Running bottom-edge offset of each column during and after a layout pass.
#[derive(Debug, Clone)]
pub struct ColumnHeights<S: Scalar> {
    heights: SmallVec<[S; 8]>,
}

impl<S: Scalar> Default for ColumnHeights<S> {
    fn default() -> Self {
        Self {
            heights: SmallVec::new(),
        }
    }
}

impl<S: Scalar> ColumnHeights<S> {
    /// Creates `columns` columns, all at height zero.
    #[must_use]
    pub fn zeroed(columns: usize) -> Self {
        Self {
            heights: core::iter::repeat_n(S::zero(), columns).collect(),
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Returns `true` if there are no columns (only before the first layout).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Heights in column order.
    #[must_use]
    pub fn as_slice(&self) -> &[S] {
        &self.heights
    }

    /// Height of column `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<S> {
        self.heights.get(index).copied()
    }

    /// The shortest column as `(index, height)`.
    ///
    /// Columns are scanned left to right and the running minimum is only replaced
    /// on a strictly lower height, so ties resolve to the lowest index.
    #[must_use]
    pub fn shortest(&self) -> Option<(usize, S)> {
        let (&first, rest) = self.heights.split_first()?;
        let mut best = (0, first);
        for (offset, &height) in rest.iter().enumerate() {
            if height < best.1 {
                best = (offset + 1, height);
            }
        }
        Some(best)
    }

    /// Height of the tallest column, or zero when there are no columns.
    #[must_use]
    pub fn tallest(&self) -> S {
        self.heights
            .iter()
            .fold(S::zero(), |acc, &height| acc.max(height))
    }

    /// Moves the bottom of column `index` to `height`. Out-of-range indices are ignored.
    pub(crate) fn set(&mut self, index: usize, height: S) {
        if let Some(slot) = self.heights.get_mut(index) {
            *slot = height;
        }
    }

    /// Adds `extent` to every column.
    pub(crate) fn pad_all(&mut self, extent: S) {
        for height in &mut self.heights {
            *height = *height + extent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnHeights;

    fn heights(values: &[f64]) -> ColumnHeights<f64> {
        let mut columns = ColumnHeights::zeroed(values.len());
        for (i, v) in values.iter().copied().enumerate() {
            columns.set(i, v);
        }
        columns
    }

    #[test]
    fn shortest_prefers_lowest_index_on_ties() {
        assert_eq!(heights(&[0.0, 0.0, 0.0]).shortest(), Some((0, 0.0)));
        assert_eq!(heights(&[30.0, 10.0, 10.0]).shortest(), Some((1, 10.0)));
        assert_eq!(heights(&[30.0, 20.0, 10.0]).shortest(), Some((2, 10.0)));
    }

    #[test]
    fn empty_columns() {
        let columns = ColumnHeights::<f32>::default();
        assert!(columns.is_empty());
        assert_eq!(columns.shortest(), None);
        assert_eq!(columns.tallest(), 0.0);
    }

    #[test]
    fn tallest_and_padding() {
        let mut columns = heights(&[110.0, 150.0]);
        assert_eq!(columns.tallest(), 150.0);
        columns.pad_all(10.0);
        assert_eq!(columns.as_slice(), &[120.0, 160.0]);
        assert_eq!(columns.get(0), Some(120.0));
        assert_eq!(columns.get(2), None);
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let mut columns = heights(&[5.0, 7.0]);
        columns.set(2, 100.0);
        assert_eq!(columns.as_slice(), &[5.0, 7.0]);
    }
}
