use eframe::egui::{self, Button, Color32, RichText, ScrollArea, Ui};

use crate::state::{file_label, AppState, Interaction};

// ---------------------------------------------------------------------------
// Left side panel – actions, file selector, results log
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let busy = state.pending_kind().is_some();
    let has_data = state.session.dataset().is_some();

    ui.add_space(4.0);
    if ui.button("Load Data").clicked() {
        open_folder_dialog(state);
    }

    file_selector(ui, state);

    ui.add_space(4.0);
    if ui.button("Plot Data").clicked() {
        state.plot();
    }

    for kind in [Interaction::RemoveBackground, Interaction::CalculateIntensity] {
        let active = state.pending_kind() == Some(kind);
        let button = Button::new(kind.label()).selected(active);
        if ui.add_enabled(!busy || active, button).clicked() && !active {
            state.begin(kind);
        }
    }

    if ui
        .add_enabled(!state.is_saving(), Button::new("Save Figure"))
        .clicked()
    {
        save_figure_dialog(ui.ctx(), state);
    }

    ui.separator();
    ui.strong("Results");
    intensity_log(ui, state);

    ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui: &mut Ui| {
        ui.add_space(8.0);
        let quit = Button::new(RichText::new("Quit").strong().color(Color32::WHITE))
            .fill(Color32::from_rgb(200, 30, 30));
        if ui.add(quit).clicked() {
            log::info!("Quit requested");
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if !has_data {
            ui.label(RichText::new("No dataset loaded.").weak());
        }
    });
}

fn file_selector(ui: &mut Ui, state: &mut AppState) {
    let selected_text = state
        .selected_file
        .and_then(|i| state.data_files.get(i))
        .map(|p| file_label(p))
        .unwrap_or_else(|| "Select a file".to_string());

    let mut choice = None;
    egui::ComboBox::from_id_salt("file_selector")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (i, path) in state.data_files.iter().enumerate() {
                if ui
                    .selectable_label(state.selected_file == Some(i), file_label(path))
                    .clicked()
                {
                    choice = Some(i);
                }
            }
        });

    if let Some(i) = choice {
        state.select_file(i);
    }
}

/// Read-only, auto-scrolling list of computed intensities.
fn intensity_log(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .max_height((ui.available_height() - 60.0).max(40.0))
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui: &mut Ui| {
            for line in state.session.log() {
                ui.label(RichText::new(line).monospace());
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar – status line
// ---------------------------------------------------------------------------

/// Render the status bar: current file, click prompt, last message.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if let Some(ds) = state.session.dataset() {
            let name = state
                .session
                .source()
                .map(file_label)
                .unwrap_or_default();
            let (lo, hi) = ds.x_range();
            ui.label(format!("{name}: {} samples, {lo:.2}–{hi:.2} eV", ds.len()));
            ui.separator();
        }

        if let Some(kind) = state.pending_kind() {
            ui.label(
                RichText::new(format!(
                    "{}: {} more point(s)",
                    kind.label(),
                    state.collector.remaining()
                ))
                .strong(),
            );
            ui.separator();
        }

        if let Some(status) = &state.status {
            let color = if status.is_error {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(&status.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Select Folder Containing Measurement Files")
        .pick_folder();

    if let Some(dir) = folder {
        state.open_folder(&dir);
    }
}

/// Ask for a target path, then request a capture of the next frame.
pub fn save_figure_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save Figure")
        .add_filter("PNG files", &["png"])
        .set_file_name("figure.png")
        .save_file();

    if let Some(mut path) = file {
        if path.extension().is_none() {
            path.set_extension("png");
        }
        state.request_save(path);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
    }
}
