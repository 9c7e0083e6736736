use std::time::Duration;

use eframe::egui;

use dispatch_core::config::DispatchConfig;

use crate::app::DispatchUiApp;
use crate::ui::controls::render_control_panel;
use crate::ui::dashboard::{render_dashboard, render_dispatch_panel};

pub fn run(config: DispatchConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "São José Dispatch",
        options,
        Box::new(move |_cc| Ok(Box::new(DispatchUiApp::new(config)))),
    )
}

impl eframe::App for DispatchUiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_optimize();

        if self.advance_navigation() || self.state.is_optimizing() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
        if self.expire_notice() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            render_control_panel(ui, self);
        });

        if self.state.panel_expanded() {
            egui::SidePanel::right("dispatch_panel")
                .default_width(340.0)
                .show(ctx, |ui| {
                    render_dispatch_panel(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            render_dashboard(ui, self);
        });
    }
}
