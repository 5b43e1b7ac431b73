use std::path::PathBuf;

use eframe::egui;

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

/// Window and drawing settings. There is no config file; these are fixed.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    pub line_width: f32,
    pub marker_radius: f32,
    /// Folder scanned for data files at startup.
    pub initial_folder: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Spectrum Analyzer 1.0".to_string(),
            inner_size: [1200.0, 800.0],
            min_inner_size: [600.0, 400.0],
            line_width: 1.5,
            marker_radius: 5.0,
            initial_folder: None,
        }
    }
}

impl AppConfig {
    /// Defaults, with an optional data folder as the first argument.
    pub fn from_args<I: IntoIterator<Item = std::ffi::OsString>>(args: I) -> Self {
        let initial_folder = args.into_iter().nth(1).map(PathBuf::from);
        Self {
            initial_folder,
            ..Self::default()
        }
    }

    pub fn native_options(&self) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&self.title)
                .with_inner_size(self.inner_size)
                .with_min_inner_size(self.min_inner_size),
            ..Default::default()
        }
    }
}
