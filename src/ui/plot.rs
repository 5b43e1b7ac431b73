use eframe::egui::{self, CursorIcon, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color;
use crate::data::model::Point;
use crate::session::{X_LABEL, Y_LABEL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Spectrum canvas (central panel)
// ---------------------------------------------------------------------------

/// Render the current figure and route clicks to the point collector.
pub fn spectrum_plot(ui: &mut Ui, state: &mut AppState) {
    let collecting = state.collector.is_collecting();
    let selected = state.collector.collected();
    let marker_colors = color::marker_colors(selected.len() + state.collector.remaining());
    let line_width = state.config.line_width;
    let marker_radius = state.config.marker_radius;

    let figure_rect = ui
        .vertical(|ui: &mut Ui| {
            match &state.figure {
                Some(fig) => {
                    ui.vertical_centered(|ui: &mut Ui| ui.heading(fig.title));
                }
                None => {
                    ui.label("Load a data file and press \"Plot Data\".");
                }
            }

            let (x_label, y_label, grid) = match &state.figure {
                Some(fig) => (fig.x_label, fig.y_label, fig.grid),
                None => (X_LABEL, Y_LABEL, true),
            };

            let plot_resp = Plot::new("spectrum_plot")
                .legend(Legend::default())
                .x_axis_label(x_label)
                .y_axis_label(y_label)
                .show_grid(grid)
                .allow_boxed_zoom(!collecting)
                .allow_drag(!collecting)
                .allow_scroll(true)
                .allow_zoom(true)
                .show(ui, |plot_ui| {
                    if let Some(fig) = &state.figure {
                        let line = Line::new(PlotPoints::from(fig.points()))
                            .name(fig.legend)
                            .color(color::SPECTRUM)
                            .width(line_width);
                        plot_ui.line(line);
                    }

                    for (i, (p, c)) in selected.iter().zip(marker_colors.iter()).enumerate() {
                        let marker = Points::new(vec![[p.x, p.y]])
                            .name(format!("Point {}", i + 1))
                            .color(*c)
                            .radius(marker_radius)
                            .shape(MarkerShape::Diamond);
                        plot_ui.points(marker);
                    }
                });

            if collecting && plot_resp.response.clicked() {
                let click = plot_resp
                    .response
                    .interact_pointer_pos()
                    .map(|pos| plot_resp.transform.value_from_position(pos))
                    .map(|value| Point::from([value.x, value.y]));
                if !state.collector.offer(click) {
                    log::debug!("Click ignored");
                }
            }

            if collecting {
                plot_resp.response.on_hover_cursor(CursorIcon::Crosshair);
            }
        })
        .response
        .rect;

    state.figure_rect = Some(figure_rect);
}

/// Crop a full-window capture down to the figure area.
///
/// The stored rect is clipped to the capture; if nothing of it is left the
/// whole capture is returned.
pub fn crop_to_figure(
    capture: &egui::ColorImage,
    state: &AppState,
    pixels_per_point: f32,
) -> egui::ColorImage {
    let Some(rect) = state.figure_rect else {
        return capture.clone();
    };
    let [w, h] = capture.size;
    let bounds = egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(w as f32, h as f32) / pixels_per_point,
    );
    let clipped = rect.intersect(bounds);
    if clipped.width() * pixels_per_point < 1.0 || clipped.height() * pixels_per_point < 1.0 {
        log::debug!("Figure area {rect:?} lies outside the {w}x{h} capture");
        return capture.clone();
    }
    capture.region(&clipped, Some(pixels_per_point))
}
