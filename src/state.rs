use std::path::{Path, PathBuf};

use eframe::egui::{ColorImage, Rect};

use crate::collector::{PointCollector, PointRequest};
use crate::config::AppConfig;
use crate::data::loader::discover_data_files;
use crate::error::AnalysisError;
use crate::session::{PlotSpec, SpectrumSession};

// ---------------------------------------------------------------------------
// Interactions that wait for clicks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    RemoveBackground,
    CalculateIntensity,
}

impl Interaction {
    pub fn points_needed(self) -> usize {
        2
    }

    pub fn label(self) -> &'static str {
        match self {
            Interaction::RemoveBackground => "Remove Background",
            Interaction::CalculateIntensity => "Calculate Intensities",
        }
    }
}

struct PendingInteraction {
    kind: Interaction,
    request: PointRequest,
}

/// One-line message shown under the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    pub session: SpectrumSession,

    /// Canvas-side handle; plot clicks are offered here.
    pub collector: PointCollector,

    /// `*.txt` files found in the chosen folder.
    pub data_files: Vec<PathBuf>,

    /// Index into `data_files` of the loaded file.
    pub selected_file: Option<usize>,

    /// What the canvas currently shows (None until "Plot Data").
    pub figure: Option<PlotSpec>,

    /// Screen area of the last drawn figure, used to crop captures.
    pub figure_rect: Option<Rect>,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,

    pending: Option<PendingInteraction>,

    pending_save: Option<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let collector = PointCollector::new();
        let mut state = Self {
            config,
            session: SpectrumSession::new(collector.clone()),
            collector,
            data_files: Vec::new(),
            selected_file: None,
            figure: None,
            figure_rect: None,
            status: None,
            pending: None,
            pending_save: None,
        };
        if let Some(dir) = state.config.initial_folder.clone() {
            state.open_folder(&dir);
        }
        state
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, err: &AnalysisError) {
        log::warn!("{err}");
        self.status = Some(Status {
            text: format!("Error: {err}"),
            is_error: true,
        });
    }

    /// Scan `dir` for data files and offer them in the selector.
    pub fn open_folder(&mut self, dir: &Path) {
        match discover_data_files(dir) {
            Ok(files) => {
                log::info!("Found {} data files in {}", files.len(), dir.display());
                self.data_files = files;
                self.selected_file = None;
                self.set_info("Files loaded successfully!");
            }
            Err(e) => self.set_error(&e),
        }
    }

    /// Load the `index`-th discovered file into the session.
    pub fn select_file(&mut self, index: usize) {
        let Some(path) = self.data_files.get(index).cloned() else {
            return;
        };
        let name = file_label(&path);
        match self.session.load(&path) {
            Ok(_) => {
                self.selected_file = Some(index);
                self.set_info(format!("Loaded {name} successfully!"));
            }
            Err(e) => self.set_error(&e),
        }
    }

    /// Redraw the canvas from the session's current data.
    pub fn plot(&mut self) {
        match self.session.plot() {
            Ok(spec) => self.figure = Some(spec),
            Err(e) => self.set_error(&e),
        }
    }

    /// The interaction waiting for clicks, if any.
    pub fn pending_kind(&self) -> Option<Interaction> {
        self.pending.as_ref().map(|p| p.kind)
    }

    /// Start an interaction; its clicks arrive on later frames.
    pub fn begin(&mut self, kind: Interaction) {
        if let Some(active) = self.pending_kind() {
            self.set_error(&AnalysisError::SelectionInProgress);
            log::debug!("{} still waiting for clicks", active.label());
            return;
        }
        let n = kind.points_needed();
        match self.session.request_points(n) {
            Ok(request) => {
                self.pending = Some(PendingInteraction { kind, request });
                self.set_info(format!("Click {n} points on the graph."));
            }
            Err(e) => self.set_error(&e),
        }
    }

    /// Finish the pending interaction once its points are in. Called every
    /// frame.
    pub fn poll_pending(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(points) = pending.request.try_take() else {
            return;
        };
        let kind = pending.kind;
        self.pending = None;

        match kind {
            Interaction::RemoveBackground => match self.session.remove_background(&points) {
                Ok(Some(line)) => {
                    self.set_info(format!(
                        "Background removed (slope {:.4}, intercept {:.4}).",
                        line.slope, line.intercept
                    ));
                    self.plot();
                }
                Ok(None) => {}
                Err(e) => self.set_error(&e),
            },
            Interaction::CalculateIntensity => match self.session.calculate_intensity(&points) {
                Ok(integral) => self.set_info(format!("Calculated Intensity: {}", integral.area)),
                Err(e) => self.set_error(&e),
            },
        }
    }

    /// Remember where the next canvas capture should go.
    pub fn request_save(&mut self, path: PathBuf) {
        self.pending_save = Some(path);
    }

    pub fn is_saving(&self) -> bool {
        self.pending_save.is_some()
    }

    /// Write a capture to the path given to [`request_save`](Self::request_save).
    pub fn finish_save(&mut self, capture: &ColorImage) {
        let Some(path) = self.pending_save.take() else {
            return;
        };
        match self.session.save_plot(&path, capture) {
            Ok(()) => self.set_info("Figure saved successfully!"),
            Err(e) => self.set_error(&e),
        }
    }
}

/// File name for display in the selector.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
