use crate::data::model::{DataSet, Point};
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Linear background
// ---------------------------------------------------------------------------

/// A straight baseline `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearBackground {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearBackground {
    /// The line through two points, in either order.
    ///
    /// Points sharing an x value do not define a line and are rejected.
    pub fn through(p1: Point, p2: Point) -> Result<Self> {
        let (a, b) = if p1.x > p2.x { (p2, p1) } else { (p1, p2) };

        if a.x == b.x {
            return Err(AnalysisError::InvalidSelection(format!(
                "both background points are at {:.2} eV; pick two different energies",
                a.x
            )));
        }

        let slope = (b.y - a.y) / (b.x - a.x);
        let intercept = a.y - slope * a.x;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(AnalysisError::InvalidSelection(format!(
                "points {a} and {b} are too close to define a background"
            )));
        }

        Ok(LinearBackground { slope, intercept })
    }

    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Subtract the line from every sample, extrapolating past the two
    /// defining points.
    pub fn subtract_from(&self, dataset: &mut DataSet) {
        let n = dataset.len();
        for i in 0..n {
            let baseline = self.value_at(dataset.x()[i]);
            dataset.y_mut()[i] -= baseline;
        }
    }
}

/// Remove the linear background defined by `p1` and `p2` from `dataset`.
///
/// Not idempotent: a second call with the same points subtracts the line
/// again.
pub fn remove_linear_background(
    dataset: &mut DataSet,
    p1: Point,
    p2: Point,
) -> Result<LinearBackground> {
    let line = LinearBackground::through(p1, p2)?;
    line.subtract_from(dataset);
    log::debug!(
        "Removed background slope={:.6} intercept={:.6} over {} samples",
        line.slope,
        line.intercept,
        dataset.len()
    );
    Ok(line)
}
