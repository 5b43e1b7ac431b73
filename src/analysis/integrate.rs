use crate::data::model::DataSet;
use crate::error::{AnalysisError, Result};

/// Result of one intensity integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integral {
    /// Lower selected energy (before snapping).
    pub x_lo: f64,
    /// Upper selected energy (before snapping).
    pub x_hi: f64,
    /// First sample in the window.
    pub start_idx: usize,
    /// One past the last sample in the window.
    pub end_idx: usize,
    pub area: f64,
}

/// Index of the sample closest to `target`; the lowest index wins ties.
pub fn nearest_index(xs: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &x) in xs.iter().enumerate() {
        let dist = (x - target).abs();
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

/// Trapezoidal rule over paired samples. Fewer than two samples give zero.
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}

/// Integrate the spectrum between two selected energies.
///
/// The bounds may come in either order. Each is snapped to its nearest
/// sample, and the window is `[start_idx, end_idx)`: the sample at the upper
/// bound is not included.
pub fn integrate(dataset: &DataSet, x_a: f64, x_b: f64) -> Result<Integral> {
    let (x_lo, x_hi) = if x_a <= x_b { (x_a, x_b) } else { (x_b, x_a) };

    let start_idx = nearest_index(dataset.x(), x_lo).unwrap_or(0);
    let end_idx = nearest_index(dataset.x(), x_hi).unwrap_or(0);
    if start_idx >= end_idx {
        return Err(AnalysisError::InvalidRange {
            start: start_idx,
            end: end_idx,
        });
    }

    let area = trapezoid(
        &dataset.x()[start_idx..end_idx],
        &dataset.y()[start_idx..end_idx],
    );

    Ok(Integral {
        x_lo,
        x_hi,
        start_idx,
        end_idx,
        area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> DataSet {
        DataSet::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![0.0, 1.0, 4.0, 1.0, 0.0],
        )
        .unwrap()
    }

    // ========================================================================
    // nearest_index
    // ========================================================================

    #[test]
    fn test_nearest_index_exact_and_between() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest_index(&xs, 2.0), Some(2));
        assert_eq!(nearest_index(&xs, 2.4), Some(2));
        assert_eq!(nearest_index(&xs, 2.6), Some(3));
        assert_eq!(nearest_index(&xs, -50.0), Some(0));
        assert_eq!(nearest_index(&xs, 50.0), Some(3));
    }

    #[test]
    fn test_nearest_index_tie_takes_first() {
        assert_eq!(nearest_index(&[0.0, 1.0], 0.5), Some(0));
        assert_eq!(nearest_index(&[4.0, 2.0, 2.0], 2.0), Some(1));
    }

    #[test]
    fn test_nearest_index_descending_axis() {
        let xs = [10.0, 8.0, 6.0, 4.0];
        assert_eq!(nearest_index(&xs, 6.9), Some(2));
    }

    #[test]
    fn test_nearest_index_empty() {
        assert_eq!(nearest_index(&[], 1.0), None);
    }

    // ========================================================================
    // trapezoid
    // ========================================================================

    #[test]
    fn test_trapezoid_simple() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 20.0, 5.0, 0.0];
        // 15 + 12.5 + 2.5
        assert_eq!(trapezoid(&x, &y), 30.0);
    }

    #[test]
    fn test_trapezoid_uneven_spacing() {
        let x = [0.0, 0.5, 2.0];
        let y = [2.0, 2.0, 0.0];
        // 0.5*2 + 1.5*1
        assert!((trapezoid(&x, &y) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_trapezoid_single_sample() {
        assert_eq!(trapezoid(&[1.0], &[10.0]), 0.0);
    }

    // ========================================================================
    // integrate
    // ========================================================================

    #[test]
    fn test_integrate_excludes_upper_sample() {
        let result = integrate(&triangle(), 1.0, 3.0).unwrap();
        assert_eq!(result.start_idx, 1);
        assert_eq!(result.end_idx, 3);
        assert_eq!(result.area, 2.5);
    }

    #[test]
    fn test_integrate_unordered_bounds() {
        let forward = integrate(&triangle(), 1.0, 3.0).unwrap();
        let reverse = integrate(&triangle(), 3.0, 1.0).unwrap();
        assert_eq!(forward, reverse);
        assert_eq!(reverse.x_lo, 1.0);
        assert_eq!(reverse.x_hi, 3.0);
    }

    #[test]
    fn test_integrate_snaps_to_nearest_samples() {
        let result = integrate(&triangle(), 0.9, 3.2).unwrap();
        assert_eq!((result.start_idx, result.end_idx), (1, 3));
        assert_eq!(result.area, 2.5);
        assert_eq!(result.x_lo, 0.9);
    }

    #[test]
    fn test_integrate_constant_is_rectangle() {
        let x: Vec<f64> = (0..20).map(|i| 100.0 + i as f64 * 0.25).collect();
        let ds = DataSet::new(x.clone(), vec![3.0; 20]).unwrap();
        let result = integrate(&ds, 101.0, 104.0).unwrap();
        let expected = 3.0 * (x[result.end_idx - 1] - x[result.start_idx]);
        assert!((result.area - expected).abs() < 1e-12);
    }

    #[test]
    fn test_integrate_negative_area_not_clamped() {
        let ds = DataSet::new(vec![0.0, 1.0, 2.0, 3.0], vec![-1.0; 4]).unwrap();
        let result = integrate(&ds, 0.0, 3.0).unwrap();
        assert_eq!(result.area, -2.0);
    }

    #[test]
    fn test_integrate_collapsed_window_is_invalid_range() {
        let err = integrate(&triangle(), 2.1, 1.9).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRange { start: 2, end: 2 }));
    }

    #[test]
    fn test_integrate_inverted_after_snapping() {
        // Descending axis: the lower energy snaps to the higher index.
        let ds = DataSet::new(vec![4.0, 3.0, 2.0, 1.0], vec![1.0; 4]).unwrap();
        let err = integrate(&ds, 1.0, 4.0).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRange { start: 3, end: 0 }));
    }
}
