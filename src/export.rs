use std::io;
use std::path::Path;

use eframe::egui::ColorImage;
use image::{ImageError, ImageFormat, RgbaImage};

use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// PNG export of a captured canvas
// ---------------------------------------------------------------------------

/// Write a captured canvas image to `path` as PNG.
pub fn save_png(capture: &ColorImage, path: &Path) -> Result<()> {
    let io_err = |source: io::Error| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    };

    let [w, h] = capture.size;
    let bytes: Vec<u8> = capture.pixels.iter().flat_map(|p| p.to_array()).collect();
    let buffer = RgbaImage::from_raw(w as u32, h as u32, bytes).ok_or_else(|| {
        io_err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("capture of {w}x{h} has {} pixels", capture.pixels.len()),
        ))
    })?;

    buffer
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => io_err(source),
            other => io_err(io::Error::other(other)),
        })?;

    log::info!("Saved {w}x{h} figure to {}", path.display());
    Ok(())
}
