use std::path::{Path, PathBuf};

use eframe::egui::ColorImage;

use crate::analysis::background::{remove_linear_background, LinearBackground};
use crate::analysis::integrate::{integrate, Integral};
use crate::collector::{PointCollector, PointRequest};
use crate::data::loader::load_txt;
use crate::data::model::{DataSet, Point};
use crate::error::{AnalysisError, Result};
use crate::export::save_png;

pub const PLOT_TITLE: &str = "Photoionization Spectrum";
pub const X_LABEL: &str = "Binding Energy (eV)";
pub const Y_LABEL: &str = "Intensity";
pub const LEGEND: &str = "Spectrum";

// ---------------------------------------------------------------------------
// PlotSpec – what the canvas should draw
// ---------------------------------------------------------------------------

/// A snapshot of the spectrum as a labelled line plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub legend: &'static str,
    pub grid: bool,
}

impl PlotSpec {
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&xi, &yi)| [xi, yi])
            .collect()
    }
}

/// Log entry for one integration, e.g. `Intensity(284.10-290.55 eV): 12.3456`.
pub fn format_intensity(integral: &Integral) -> String {
    format!(
        "Intensity({:.2}-{:.2} eV): {:.4}",
        integral.x_lo, integral.x_hi, integral.area
    )
}

// ---------------------------------------------------------------------------
// SpectrumSession
// ---------------------------------------------------------------------------

/// Owns the loaded spectrum and everything computed from it.
pub struct SpectrumSession {
    dataset: Option<DataSet>,
    source: Option<PathBuf>,
    intensity_log: Vec<String>,
    collector: PointCollector,
}

impl Default for SpectrumSession {
    fn default() -> Self {
        Self::new(PointCollector::new())
    }
}

impl SpectrumSession {
    /// `collector` is shared with the canvas, which feeds it clicks.
    pub fn new(collector: PointCollector) -> Self {
        Self {
            dataset: None,
            source: None,
            intensity_log: Vec::new(),
            collector,
        }
    }

    pub fn collector(&self) -> &PointCollector {
        &self.collector
    }

    pub fn dataset(&self) -> Option<&DataSet> {
        self.dataset.as_ref()
    }

    /// File the current dataset came from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Append-only list of intensity results, oldest first.
    pub fn log(&self) -> &[String] {
        &self.intensity_log
    }

    fn require_data(&self) -> Result<&DataSet> {
        self.dataset.as_ref().ok_or(AnalysisError::NoData)
    }

    fn require_data_mut(&mut self) -> Result<&mut DataSet> {
        self.dataset.as_mut().ok_or(AnalysisError::NoData)
    }

    /// Replace the current dataset with the contents of `path`.
    ///
    /// On failure the previous dataset is kept.
    pub fn load(&mut self, path: &Path) -> Result<&DataSet> {
        let dataset = load_txt(path)?;
        log::info!(
            "Loaded {} samples from {}",
            dataset.len(),
            path.display()
        );
        self.source = Some(path.to_path_buf());
        let current: &DataSet = self.dataset.insert(dataset);
        Ok(current)
    }

    pub fn plot(&self) -> Result<PlotSpec> {
        let ds = self.require_data()?;
        Ok(PlotSpec {
            x: ds.x().to_vec(),
            y: ds.y().to_vec(),
            title: PLOT_TITLE,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            legend: LEGEND,
            grid: true,
        })
    }

    /// Ask the canvas for `n` clicks. Fails fast when nothing is loaded.
    pub fn request_points(&self, n: usize) -> Result<PointRequest> {
        self.require_data()?;
        self.collector.collect(n)
    }

    /// Subtract the line through the first two points.
    ///
    /// With fewer than two points nothing happens and `None` is returned.
    pub fn remove_background(&mut self, points: &[Point]) -> Result<Option<LinearBackground>> {
        let ds = self.require_data_mut()?;
        let [p1, p2, ..] = points else {
            log::warn!("Background removal needs 2 points, got {}", points.len());
            return Ok(None);
        };
        remove_linear_background(ds, *p1, *p2).map(Some)
    }

    /// Integrate between the x values of the first two points and log the
    /// result.
    pub fn calculate_intensity(&mut self, points: &[Point]) -> Result<Integral> {
        let ds = self.require_data()?;
        let [p1, p2, ..] = points else {
            return Err(AnalysisError::InvalidSelection(format!(
                "integration needs 2 points, got {}",
                points.len()
            )));
        };

        let integral = integrate(ds, p1.x, p2.x)?;
        let line = format_intensity(&integral);
        log::info!("{line}");
        self.intensity_log.push(line);
        Ok(integral)
    }

    /// Wait for two clicks, then remove the background they define.
    pub async fn remove_background_interactive(&mut self) -> Result<Option<LinearBackground>> {
        let points = self.request_points(2)?.await;
        self.remove_background(&points)
    }

    /// Wait for two clicks, then integrate between them. Returns the area.
    pub async fn calculate_intensity_interactive(&mut self) -> Result<f64> {
        let points = self.request_points(2)?.await;
        self.calculate_intensity(&points).map(|integral| integral.area)
    }

    /// Write a captured rendering of the current figure as PNG.
    pub fn save_plot(&self, path: &Path, capture: &ColorImage) -> Result<()> {
        save_png(capture, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::test_support::{poll_once, CountingWaker};
    use std::fs;
    use std::pin::pin;
    use std::sync::Arc;
    use std::task::Poll;
    use tempfile::{tempdir, TempDir};

    /// A session holding the triangle spectrum; keep the guard alive while
    /// the file is needed.
    fn loaded_session() -> (TempDir, SpectrumSession) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("triangle.txt");
        fs::write(&path, "0 0\n1 1\n2 4\n3 1\n4 0\n").unwrap();
        let mut session = SpectrumSession::default();
        session.load(&path).unwrap();
        (dir, session)
    }

    #[test]
    fn test_operations_without_data_fail() {
        let mut session = SpectrumSession::default();
        assert!(matches!(session.plot(), Err(AnalysisError::NoData)));
        assert!(matches!(session.request_points(2), Err(AnalysisError::NoData)));
        assert!(matches!(
            session.remove_background(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            Err(AnalysisError::NoData)
        ));
        assert!(!session.collector().is_collecting());
    }

    #[test]
    fn test_plot_description() {
        let (_dir, session) = loaded_session();
        let plot = session.plot().unwrap();
        assert_eq!(plot.title, "Photoionization Spectrum");
        assert_eq!(plot.x_label, "Binding Energy (eV)");
        assert_eq!(plot.y_label, "Intensity");
        assert_eq!(plot.legend, "Spectrum");
        assert!(plot.grid);
        assert_eq!(plot.points()[2], [2.0, 4.0]);
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let (dir, mut session) = loaded_session();
        let before = session.dataset().cloned();
        let source = session.source().map(Path::to_path_buf);

        let bad = dir.path().join("bad.txt");
        fs::write(&bad, "1 2\n3 four\n").unwrap();
        assert!(matches!(
            session.load(&bad),
            Err(AnalysisError::FileFormat { .. })
        ));
        assert_eq!(session.dataset().cloned(), before);
        assert_eq!(session.source().map(Path::to_path_buf), source);
    }

    #[test]
    fn test_load_replaces_dataset() {
        let (dir, mut session) = loaded_session();
        let other = dir.path().join("flat.txt");
        fs::write(&other, "10 1\n11 1\n").unwrap();
        let ds = session.load(&other).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(session.source(), Some(other.as_path()));
    }

    #[test]
    fn test_calculate_intensity_logs_formatted_line() {
        let (_dir, mut session) = loaded_session();
        let integral = session
            .calculate_intensity(&[Point::new(3.0, 0.5), Point::new(1.0, 0.2)])
            .unwrap();
        assert_eq!(integral.area, 2.5);
        assert_eq!(session.log(), &["Intensity(1.00-3.00 eV): 2.5000".to_string()]);
    }

    #[test]
    fn test_invalid_range_does_not_log() {
        let (_dir, mut session) = loaded_session();
        let err = session
            .calculate_intensity(&[Point::new(2.0, 0.0), Point::new(2.1, 0.0)])
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRange { .. }));
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_remove_background_with_one_point_is_noop() {
        let (_dir, mut session) = loaded_session();
        let before = session.dataset().cloned();
        assert_eq!(session.remove_background(&[Point::new(1.0, 1.0)]).unwrap(), None);
        assert_eq!(session.dataset().cloned(), before);
    }

    #[test]
    fn test_interactive_background_removal() {
        let (_dir, mut session) = loaded_session();
        let canvas = session.collector().clone();
        let counter = Arc::new(CountingWaker::default());

        {
            let mut task = pin!(session.remove_background_interactive());
            assert!(poll_once(task.as_mut(), &counter).is_pending());

            // outside the axes, then two valid clicks in reverse x order
            assert!(!canvas.offer(None));
            assert!(canvas.offer(Some(Point::new(4.0, 1.0))));
            assert!(poll_once(task.as_mut(), &counter).is_pending());
            assert!(canvas.offer(Some(Point::new(0.0, 1.0))));

            match poll_once(task.as_mut(), &counter) {
                Poll::Ready(result) => {
                    let line = result.unwrap().unwrap();
                    assert_eq!(line.slope, 0.0);
                    assert_eq!(line.intercept, 1.0);
                }
                Poll::Pending => panic!("background removal should have finished"),
            }
        }

        assert_eq!(
            session.dataset().unwrap().y(),
            &[-1.0, 0.0, 3.0, 0.0, -1.0]
        );
    }

    #[test]
    fn test_interactive_intensity() {
        let (_dir, mut session) = loaded_session();
        let canvas = session.collector().clone();
        let counter = Arc::new(CountingWaker::default());

        {
            let mut task = pin!(session.calculate_intensity_interactive());
            assert!(poll_once(task.as_mut(), &counter).is_pending());
            canvas.offer(Some(Point::new(1.0, 0.0)));
            canvas.offer(Some(Point::new(3.0, 0.0)));

            match poll_once(task.as_mut(), &counter) {
                Poll::Ready(area) => assert_eq!(area.unwrap(), 2.5),
                Poll::Pending => panic!("integration should have finished"),
            }
        }

        assert_eq!(session.log().len(), 1);
    }

    #[test]
    fn test_interactive_without_data_fails_immediately() {
        let mut session = SpectrumSession::default();
        let counter = Arc::new(CountingWaker::default());
        let mut task = pin!(session.calculate_intensity_interactive());
        match poll_once(task.as_mut(), &counter) {
            Poll::Ready(result) => assert!(matches!(result, Err(AnalysisError::NoData))),
            Poll::Pending => panic!("should fail without waiting for clicks"),
        }
    }

    #[test]
    fn test_save_plot_writes_png() {
        let (dir, session) = loaded_session();
        let path = dir.path().join("figure.png");
        let capture = ColorImage::new([8, 6], eframe::egui::Color32::BLACK);
        session.save_plot(&path, &capture).unwrap();
        assert!(path.exists());
    }
}
