use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use super::{INVERSE_TITLE, SWEEP_TITLE, Visualizer, display_points};
use crate::error::{Result, SweepError};
use crate::signal_processing::{SweepPair, TimeGrid};

const MAX_DISPLAY_POINTS: usize = 8000;

/// Native window with the sweep and inverse filter stacked as time-domain plots.
///
/// `show` blocks until the window is closed (`q` or Escape).
pub struct PlotWindow {
    window_title: String,
}

impl Default for PlotWindow {
    fn default() -> Self {
        Self {
            window_title: "ESS signal and inverse filter".to_string(),
        }
    }
}

impl Visualizer for PlotWindow {
    fn show(&mut self, grid: &TimeGrid, pair: &SweepPair) -> Result<()> {
        let app = SweepPlotApp {
            sweep: display_points(grid, &pair.sweep, MAX_DISPLAY_POINTS),
            inverse: display_points(grid, &pair.inverse, MAX_DISPLAY_POINTS),
        };

        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 700.0])
                .with_min_inner_size([500.0, 400.0])
                .with_title(self.window_title.clone()),
            ..Default::default()
        };

        eframe::run_native(
            "expsweep",
            native_options,
            Box::new(move |_cc| Ok(Box::new(app))),
        )
        .map_err(|e| SweepError::Plot(format!("eframe error: {}", e)))
    }
}

struct SweepPlotApp {
    sweep: Vec<[f64; 2]>,
    inverse: Vec<[f64; 2]>,
}

impl eframe::App for SweepPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let plot_height = ((ui.available_height() - 80.0) / 2.0).max(100.0);
            let link_group = ui.id().with("time_axis");

            for (id, title, points) in [
                ("sweep_plot", SWEEP_TITLE, &self.sweep),
                ("inverse_plot", INVERSE_TITLE, &self.inverse),
            ] {
                ui.label(egui::RichText::new(title).strong());
                let line: PlotPoints = points.iter().copied().collect();
                Plot::new(id)
                    .height(plot_height)
                    .show_grid(true)
                    .x_axis_label("time (s)")
                    .link_axis(link_group, [true, false])
                    .show(ui, |plot_ui| {
                        plot_ui.line(
                            Line::new(title, line).color(egui::Color32::from_rgb(100, 200, 255)),
                        );
                    });
                ui.add_space(8.0);
            }
        });
    }
}
