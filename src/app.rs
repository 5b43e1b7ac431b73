use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpectrumAnalyzerApp {
    pub state: AppState,
}

impl SpectrumAnalyzerApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Deliver a requested window capture to the pending save.
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if !self.state.is_saving() {
            return;
        }
        let capture = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        if let Some(image) = capture {
            let cropped = plot::crop_to_figure(&image, &self.state, ctx.pixels_per_point());
            self.state.finish_save(&cropped);
        }
    }
}

impl eframe::App for SpectrumAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot(ctx);
        self.state.poll_pending();

        // ---- Top panel: status ----
        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: actions and results ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::spectrum_plot(ui, &mut self.state);
        });
    }
}
