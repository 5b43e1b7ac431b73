use std::fmt;

// ---------------------------------------------------------------------------
// Point – one click in data coordinates
// ---------------------------------------------------------------------------

/// A position on the plot, in axis units (binding energy, intensity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.4})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// DataSet – one loaded spectrum
// ---------------------------------------------------------------------------

/// A single spectrum: paired binding energies and intensities.
///
/// `x` and `y` always have the same, non-zero length. Ordering of `x` is not
/// checked.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl DataSet {
    /// Returns `None` when the columns differ in length or are empty.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Option<Self> {
        if x.is_empty() || x.len() != y.len() {
            return None;
        }
        Some(DataSet { x, y })
    }

    /// Binding energy axis (eV).
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Intensity axis.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Only intensities may change after load; the length is fixed.
    pub(crate) fn y_mut(&mut self) -> &mut [f64] {
        &mut self.y
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false for a constructed `DataSet`.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Smallest and largest binding energy.
    pub fn x_range(&self) -> (f64, f64) {
        self.x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        assert!(DataSet::new(vec![1.0, 2.0], vec![1.0]).is_none());
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(DataSet::new(Vec::new(), Vec::new()).is_none());
    }

    #[test]
    fn test_accessors() {
        let ds = DataSet::new(vec![0.0, 1.0], vec![5.0, 6.0]).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(!ds.is_empty());
        assert_eq!(ds.x(), &[0.0, 1.0]);
        assert_eq!(ds.y(), &[5.0, 6.0]);
    }

    #[test]
    fn test_x_range_unsorted() {
        let ds = DataSet::new(vec![3.0, -1.0, 2.0], vec![0.0; 3]).unwrap();
        assert_eq!(ds.x_range(), (-1.0, 3.0));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(1.005, 2.0).to_string(), "(1.00, 2.0000)");
        assert_eq!(Point::from([3.0, 4.0]), Point::new(3.0, 4.0));
    }
}
