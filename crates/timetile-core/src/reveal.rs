//! Reveal predicate and hour-derived overlay color.
//!
//! A cell is revealed once the instant counter has moved strictly past its
//! threshold. A threshold equal to the instant is still covered, so at
//! instant 0 every cell is covered and at instant `N` (the cell count) every
//! cell is revealed.

use timetile_types::{Rgba, TimeOfDay};

use crate::tile_order::TileOrder;

/// Seconds per minute used to build the instant counter.
const SECONDS_PER_MINUTE: u32 = 60;

/// Channel value of the darkest overlay shade.
const BASE_CHANNEL: f32 = 50.0;

/// Channel increase per hour away from noon.
const CHANNEL_STEP: f32 = 150.0 / 12.0;

/// Opacity of covered cells.
pub const OVERLAY_ALPHA: u8 = 200;

/// Seconds elapsed within the hour: `minute * 60 + second`.
pub fn instant_of(time: TimeOfDay) -> u32 {
    u32::from(time.minute)
        .saturating_mul(SECONDS_PER_MINUTE)
        .saturating_add(u32::from(time.second))
}

/// Whether the cell at `(column, row)` is uncovered at `instant`.
///
/// Coordinates outside the grid have no overlay to remove and report
/// `true`.
pub fn is_revealed(column: u32, row: u32, order: &TileOrder, instant: u32) -> bool {
    order
        .threshold(column, row)
        .is_none_or(|threshold| threshold < instant)
}

/// Whether the cell at `(column, row)` still needs its overlay drawn.
pub fn is_covered(column: u32, row: u32, order: &TileOrder, instant: u32) -> bool {
    !is_revealed(column, row, order, instant)
}

/// Every covered cell as `(column, row)`, row by row.
pub fn covered_cells(order: &TileOrder, instant: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
    (0..order.height()).flat_map(move |row| {
        (0..order.width())
            .filter(move |&column| is_covered(column, row, order, instant))
            .map(move |column| (column, row))
    })
}

/// Number of cells already revealed at `instant`.
pub fn revealed_count(order: &TileOrder, instant: u32) -> usize {
    order
        .as_slice()
        .iter()
        .filter(|&&threshold| threshold < instant)
        .count()
}

/// Overlay color for an hour of the day.
///
/// Blue fades out through the morning and red fades in through the
/// afternoon: red is `50` before noon and `50 + (h - 11) * 12.5` after,
/// blue is `50 + (12 - h) * 12.5` before noon and `50` after. Green stays
/// at `50` and alpha at [`OVERLAY_ALPHA`].
pub fn overlay_color(hour: u8) -> Rgba {
    let h = f32::from(hour);
    let (red, blue) = if hour < 12 {
        (BASE_CHANNEL, (12.0 - h).mul_add(CHANNEL_STEP, BASE_CHANNEL))
    } else {
        ((h - 11.0).mul_add(CHANNEL_STEP, BASE_CHANNEL), BASE_CHANNEL)
    };
    Rgba::new(red, BASE_CHANNEL, blue, OVERLAY_ALPHA)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn reference_order(seed: u64) -> TileOrder {
        TileOrder::generate(60, 60, &mut SmallRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn instant_counts_seconds_in_hour() {
        assert_eq!(instant_of(TimeOfDay::new(5, 0, 0)), 0);
        assert_eq!(instant_of(TimeOfDay::new(5, 1, 1)), 61);
        assert_eq!(instant_of(TimeOfDay::new(23, 59, 59)), 3599);
        assert_eq!(instant_of(TimeOfDay::new(0, 60, 60)), 3660);
    }

    #[test]
    fn nothing_revealed_at_instant_zero() {
        let order = reference_order(3);
        assert_eq!(revealed_count(&order, 0), 0);
        assert_eq!(covered_cells(&order, 0).count(), 3600);
        assert!((0..60).all(|row| (0..60).all(|col| !is_revealed(col, row, &order, 0))));
    }

    #[test]
    fn everything_revealed_at_cell_count() {
        let order = reference_order(4);
        assert_eq!(revealed_count(&order, 3600), 3600);
        assert_eq!(covered_cells(&order, 3600).count(), 0);
    }

    #[test]
    fn threshold_equal_to_instant_is_covered() {
        let order = TileOrder::from_thresholds(2, 1, vec![1, 0]).unwrap();
        assert!(is_covered(0, 0, &order, 1));
        assert!(is_revealed(0, 0, &order, 2));
        assert!(is_revealed(1, 0, &order, 1));
    }

    #[test]
    fn lookup_is_row_major() {
        // (column 1, row 0) holds 5; (column 0, row 1) holds 2.
        let order = TileOrder::from_thresholds(3, 2, vec![0, 5, 1, 2, 3, 4]).unwrap();
        assert!(is_covered(1, 0, &order, 5));
        assert!(is_revealed(0, 1, &order, 3));
    }

    #[test]
    fn outside_grid_is_never_covered() {
        let order = reference_order(5);
        assert!(is_revealed(60, 0, &order, 0));
        assert!(is_revealed(0, 60, &order, 0));
    }

    #[test]
    fn one_cell_per_second() {
        let order = reference_order(6);
        for instant in 0..=3600 {
            assert_eq!(revealed_count(&order, instant), usize::try_from(instant).unwrap());
        }
    }

    #[test]
    fn covered_cells_match_predicate() {
        let order = reference_order(8);
        let instant = 1234;
        let covered: Vec<_> = covered_cells(&order, instant).collect();
        assert_eq!(covered.len(), 3600 - 1234);
        assert!(
            covered
                .iter()
                .all(|&(col, row)| order.threshold(col, row).unwrap() >= instant)
        );
    }

    #[test]
    fn midnight_is_blue() {
        let color = overlay_color(0);
        assert_eq!(color.red, 50.0);
        assert_eq!(color.green, 50.0);
        assert_eq!(color.blue, 200.0);
        assert_eq!(color.alpha, 200);
    }

    #[test]
    fn late_evening_is_red() {
        let color = overlay_color(23);
        assert_eq!(color.red, 200.0);
        assert_eq!(color.blue, 50.0);
    }

    #[test]
    fn noon_boundary() {
        let morning = overlay_color(11);
        assert_eq!((morning.red, morning.blue), (50.0, 62.5));
        let noon = overlay_color(12);
        assert_eq!((noon.red, noon.blue), (62.5, 50.0));
    }

    proptest! {
        #[test]
        fn reveal_is_monotonic(
            seed in any::<u64>(),
            column in 0u32..60,
            row in 0u32..60,
            instant in 0u32..3700,
            step in 0u32..100,
        ) {
            let order = reference_order(seed);
            if is_revealed(column, row, &order, instant) {
                prop_assert!(is_revealed(column, row, &order, instant + step));
            }
        }
    }
}
