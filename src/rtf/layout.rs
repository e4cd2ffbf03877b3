//! Table layout arithmetic.

use super::error::{RtfError, RtfResult};

/// Split `table_width` twips into cells proportional to `ratios`.
///
/// Each width is `floor(ratio * table_width / sum(ratios))`. The truncation
/// remainder is not redistributed, so the widths may add up to as much as
/// `ratios.len() - 1` twips less than `table_width`. A negative width is
/// treated as zero.
pub fn compute_cell_widths(table_width: i32, ratios: &[f64]) -> RtfResult<Vec<i32>> {
    if ratios.is_empty() {
        return Err(RtfError::MalformedRatioInput("empty ratio list".to_string()));
    }
    if let Some(bad) = ratios.iter().find(|r| !r.is_finite() || **r < 0.0) {
        return Err(RtfError::MalformedRatioInput(format!(
            "ratio {bad} is negative or not finite"
        )));
    }

    let sum: f64 = ratios.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(RtfError::MalformedRatioInput(format!(
            "ratio sum must be positive and finite, got {sum}"
        )));
    }

    let width = table_width.max(0) as f64;
    // Scaling by a power of two is exact and keeps `ratio * width` finite.
    let scale = if sum > f64::MAX / width.max(1.0) {
        RATIO_DOWNSCALE
    } else {
        1.0
    };
    let sum = sum * scale;
    Ok(ratios
        .iter()
        .map(|ratio| (ratio * scale * width / sum).floor() as i32)
        .collect())
}

const RATIO_DOWNSCALE: f64 = 1.0 / (1u64 << 63) as f64;

/// Running right edges (`\cellx` values) for a row of cell widths.
///
/// The running sum saturates at `i32::MAX`; `Table` validation rejects rows
/// that would get there.
pub fn cell_boundaries(widths: impl IntoIterator<Item = i32>) -> impl Iterator<Item = i32> {
    widths.into_iter().scan(0i32, |edge, width| {
        *edge = edge.saturating_add(width);
        Some(*edge)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_to_three() {
        assert_eq!(compute_cell_widths(10000, &[1.0, 3.0]).unwrap(), vec![2500, 7500]);
    }

    #[test]
    fn test_fractional_ratios() {
        assert_eq!(
            compute_cell_widths(10000, &[1.0, 1.5, 1.5]).unwrap(),
            vec![2500, 3750, 3750]
        );
        // 10000 / 3 leaves a remainder that is not redistributed
        assert_eq!(
            compute_cell_widths(10000, &[1.0, 1.0, 1.0]).unwrap(),
            vec![3333, 3333, 3333]
        );
    }

    #[test]
    fn test_malformed_ratios() {
        for ratios in [
            &[][..],
            &[0.0, 0.0][..],
            &[1.0, -2.0][..],
            &[f64::NAN][..],
            &[f64::MAX, f64::MAX][..],
        ] {
            assert!(matches!(
                compute_cell_widths(1000, ratios),
                Err(RtfError::MalformedRatioInput(_))
            ));
        }
    }

    #[test]
    fn test_huge_ratios_stay_within_table() {
        let huge = 2f64.powi(1000);
        assert_eq!(compute_cell_widths(10000, &[huge, huge]).unwrap(), vec![5000, 5000]);
        assert_eq!(compute_cell_widths(10000, &[2f64.powi(1023), 0.0]).unwrap(), vec![10000, 0]);

        let widths = compute_cell_widths(10000, &[1e305, 1e305]).unwrap();
        let total: i32 = widths.iter().sum();
        assert!(widths.iter().all(|w| (0..=10000).contains(w)));
        assert!((9999..=10000).contains(&total));
    }

    #[test]
    fn test_boundaries_are_cumulative() {
        let edges: Vec<i32> = cell_boundaries([2500, 3750, 3750]).collect();
        assert_eq!(edges, vec![2500, 6250, 10000]);
    }

    #[test]
    fn test_boundaries_saturate() {
        let edges: Vec<i32> = cell_boundaries([i32::MAX, 1]).collect();
        assert_eq!(edges, vec![i32::MAX, i32::MAX]);
    }

    proptest! {
        #[test]
        fn prop_widths_cover_table_within_tolerance(
            width in 0i32..200_000,
            ratios in prop::collection::vec(1u32..1000, 1..12),
        ) {
            let ratios: Vec<f64> = ratios.into_iter().map(f64::from).collect();
            let widths = compute_cell_widths(width, &ratios).unwrap();

            prop_assert_eq!(widths.len(), ratios.len());
            prop_assert!(widths.iter().all(|w| *w >= 0));

            let total: i32 = widths.iter().sum();
            prop_assert!(total <= width);
            prop_assert!(width - total <= ratios.len() as i32 - 1);
        }

        #[test]
        fn prop_widths_ignore_ratio_magnitude(
            width in 0i32..200_000,
            ratios in prop::collection::vec(1u32..1000, 1..12),
            exponent in 0i32..960,
        ) {
            let ratios: Vec<f64> = ratios.into_iter().map(f64::from).collect();
            let scaled: Vec<f64> = ratios.iter().map(|r| r * 2f64.powi(exponent)).collect();
            prop_assert_eq!(
                compute_cell_widths(width, &scaled).unwrap(),
                compute_cell_widths(width, &ratios).unwrap()
            );
        }
    }
}
