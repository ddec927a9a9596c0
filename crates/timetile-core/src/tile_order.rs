//! Shuffled reveal thresholds for every cell of the puzzle grid.
//!
//! A [`TileOrder`] assigns each cell a distinct threshold in
//! `0..width * height`. A cell stays covered until the instant counter
//! moves past its threshold, so a uniformly shuffled order uncovers the
//! picture in a random pattern, one cell per second.
//!
//! Thresholds are stored row-major: the cell at `(column, row)` lives at
//! linear index `row * width + column`. The row is the minute slot and the
//! column the second slot.

use rand::Rng;

/// Errors that can occur when building a tile order.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TileOrderError {
    /// The grid has more cells than a threshold can number.
    #[error("grid of {width}x{height} cells is too large for u32 thresholds")]
    TooLarge {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },

    /// A supplied threshold list does not match the grid size.
    #[error("expected {expected} thresholds, got {actual}")]
    LengthMismatch {
        /// Number of cells in the grid.
        expected: usize,
        /// Number of thresholds supplied.
        actual: usize,
    },

    /// A supplied threshold list repeats or skips a value.
    #[error("thresholds are not a permutation of 0..{len}: offending value {value}")]
    NotAPermutation {
        /// Number of cells in the grid.
        len: usize,
        /// First duplicated or out-of-range value.
        value: u32,
    },
}

/// A permutation of `0..width * height` laid over the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileOrder {
    width: u32,
    height: u32,
    thresholds: Vec<u32>,
}

impl TileOrder {
    /// Shuffle a fresh order for a `width` x `height` grid.
    ///
    /// Uses a Fisher-Yates pass from the last index down, swapping each
    /// position with a uniformly chosen index at or below it.
    ///
    /// # Errors
    ///
    /// Returns [`TileOrderError::TooLarge`] if the cell count does not fit
    /// in a `u32` threshold.
    pub fn generate<R: Rng>(
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<Self, TileOrderError> {
        let count = cell_count(width, height)?;

        let mut thresholds: Vec<u32> = (0..count).collect();
        for i in (1..thresholds.len()).rev() {
            let j = rng.random_range(0..=i);
            thresholds.swap(i, j);
        }

        Ok(Self {
            width,
            height,
            thresholds,
        })
    }

    /// Rebuild an order from explicit thresholds (useful for tests and
    /// replaying a recorded layout).
    ///
    /// # Errors
    ///
    /// Returns [`TileOrderError::LengthMismatch`] if the list length differs
    /// from the cell count, or [`TileOrderError::NotAPermutation`] if a value
    /// repeats or falls outside `0..len`.
    pub fn from_thresholds(
        width: u32,
        height: u32,
        thresholds: Vec<u32>,
    ) -> Result<Self, TileOrderError> {
        let count = cell_count(width, height)?;
        let expected = usize::try_from(count).map_err(|_conversion_err| {
            TileOrderError::TooLarge { width, height }
        })?;
        if thresholds.len() != expected {
            return Err(TileOrderError::LengthMismatch {
                expected,
                actual: thresholds.len(),
            });
        }

        let mut seen = vec![false; expected];
        for &value in &thresholds {
            let slot = usize::try_from(value)
                .ok()
                .and_then(|idx| seen.get_mut(idx))
                .filter(|already| !**already);
            match slot {
                Some(flag) => *flag = true,
                None => {
                    return Err(TileOrderError::NotAPermutation {
                        len: expected,
                        value,
                    });
                }
            }
        }

        Ok(Self {
            width,
            height,
            thresholds,
        })
    }

    /// Number of columns (second slots).
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows (minute slots).
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// All thresholds in row-major order.
    pub fn as_slice(&self) -> &[u32] {
        &self.thresholds
    }

    /// Threshold of the cell at `(column, row)`, or `None` outside the grid.
    pub fn threshold(&self, column: u32, row: u32) -> Option<u32> {
        if column >= self.width || row >= self.height {
            return None;
        }
        let linear = row.checked_mul(self.width)?.checked_add(column)?;
        let idx = usize::try_from(linear).ok()?;
        self.thresholds.get(idx).copied()
    }
}

/// Number of cells in a grid, bounded by the threshold type.
fn cell_count(width: u32, height: u32) -> Result<u32, TileOrderError> {
    width
        .checked_mul(height)
        .ok_or(TileOrderError::TooLarge { width, height })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn is_permutation(values: &[u32]) -> bool {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        sorted
            .iter()
            .enumerate()
            .all(|(idx, &value)| usize::try_from(value).unwrap() == idx)
    }

    #[test]
    fn reference_grid_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(42);
        let order = TileOrder::generate(60, 60, &mut rng).unwrap();
        assert_eq!(order.len(), 3600);
        assert!(is_permutation(order.as_slice()));
    }

    #[test]
    fn shuffle_actually_moves_cells() {
        let mut rng = SmallRng::seed_from_u64(7);
        let order = TileOrder::generate(60, 60, &mut rng).unwrap();
        let identity: Vec<u32> = (0..3600).collect();
        assert_ne!(order.as_slice(), identity.as_slice());
    }

    #[test]
    fn same_seed_same_order() {
        let a = TileOrder::generate(10, 6, &mut SmallRng::seed_from_u64(99)).unwrap();
        let b = TileOrder::generate(10, 6, &mut SmallRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_grid() {
        let mut rng = SmallRng::seed_from_u64(1);
        let order = TileOrder::generate(0, 60, &mut rng).unwrap();
        assert!(order.is_empty());
        assert_eq!(order.threshold(0, 0), None);
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        let err = TileOrder::generate(u32::MAX, 2, &mut rng).unwrap_err();
        assert_eq!(
            err,
            TileOrderError::TooLarge {
                width: u32::MAX,
                height: 2
            }
        );
    }

    #[test]
    fn threshold_uses_row_major_index() {
        // Row 1 starts at linear index 3.
        let order = TileOrder::from_thresholds(3, 2, vec![5, 4, 3, 2, 1, 0]).unwrap();
        assert_eq!(order.threshold(0, 0), Some(5));
        assert_eq!(order.threshold(2, 0), Some(3));
        assert_eq!(order.threshold(0, 1), Some(2));
        assert_eq!(order.threshold(2, 1), Some(0));
        assert_eq!(order.threshold(3, 0), None);
        assert_eq!(order.threshold(0, 2), None);
    }

    #[test]
    fn from_thresholds_rejects_duplicates() {
        let err = TileOrder::from_thresholds(2, 2, vec![0, 1, 1, 3]).unwrap_err();
        assert_eq!(err, TileOrderError::NotAPermutation { len: 4, value: 1 });
    }

    #[test]
    fn from_thresholds_rejects_out_of_range() {
        let err = TileOrder::from_thresholds(2, 1, vec![0, 2]).unwrap_err();
        assert_eq!(err, TileOrderError::NotAPermutation { len: 2, value: 2 });
    }

    #[test]
    fn from_thresholds_rejects_wrong_length() {
        let err = TileOrder::from_thresholds(2, 2, vec![0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            TileOrderError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    proptest! {
        #[test]
        fn generated_orders_are_permutations(
            width in 0u32..40,
            height in 0u32..40,
            seed in any::<u64>(),
        ) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let order = TileOrder::generate(width, height, &mut rng).unwrap();
            prop_assert_eq!(order.len(), usize::try_from(width * height).unwrap());
            prop_assert!(is_permutation(order.as_slice()));
        }
    }
}
