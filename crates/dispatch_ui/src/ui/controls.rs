//! Top control bar: batch actions, navigation, batch stats and session totals.

use chrono::Local;
use eframe::egui;
use egui_plot::{Line, Plot};

use crate::app::DispatchUiApp;
use crate::ui::utils::{format_brl, format_clock, format_km, notice_color};

pub fn render_control_panel(ui: &mut egui::Ui, app: &mut DispatchUiApp) {
    let navigating = app.state.is_navigating();
    let optimizing = app.state.is_optimizing();

    ui.horizontal(|ui| {
        if ui.button("Refresh orders").clicked() {
            app.state.refresh();
        }

        let optimize_label = if optimizing {
            "Analyzing traffic..."
        } else {
            "Optimize routes"
        };
        if ui
            .add_enabled(!optimizing && !navigating, egui::Button::new(optimize_label))
            .clicked()
        {
            let ctx = ui.ctx().clone();
            app.request_optimize(&ctx);
        }

        let can_start = app.state.selected_id().is_some() && !navigating && !optimizing;
        if ui
            .add_enabled(can_start, egui::Button::new("Start navigation"))
            .clicked()
        {
            app.start_navigation();
        }
        if ui
            .add_enabled(navigating, egui::Button::new("Stop"))
            .clicked()
        {
            app.state.stop_navigation();
        }

        let mut expanded = app.state.panel_expanded();
        if ui.toggle_value(&mut expanded, "Dispatch panel").changed() {
            app.state.toggle_panel();
        }
    });

    let stats = app.state.stats();
    ui.horizontal(|ui| {
        ui.label(format!(
            "Potential profit: {}",
            format_brl(stats.total_potential_profit)
        ));
        ui.label(format!("Total distance: {}", format_km(stats.total_distance_km)));
        ui.label(format!(
            "Last optimized: {}",
            format_clock(app.state.last_optimized_at())
        ));
        ui.label(format!("Local time: {}", Local::now().format("%H:%M")));
        ui.label(format!("Oracle: {}", app.oracle_status));
    });

    if let Some(notice) = &app.notice {
        ui.colored_label(notice_color(), &notice.text);
    }

    egui::CollapsingHeader::new("Session")
        .default_open(false)
        .show(ui, |ui| {
            render_session(ui, app);
        });
}

/// Completed deliveries and earnings since the app started.
fn render_session(ui: &mut egui::Ui, app: &DispatchUiApp) {
    let telemetry = app.state.telemetry();
    ui.horizontal(|ui| {
        ui.label(format!("Deliveries: {}", telemetry.deliveries().len()));
        ui.label(format!("Earnings: {}", format_brl(telemetry.total_earnings())));
        ui.label(format!("Driven: {}", format_km(telemetry.total_distance_km())));
        ui.label(format!(
            "Optimize runs: {} ({} fallback)",
            telemetry.optimize_runs(),
            telemetry.optimize_fallbacks()
        ));
    });

    if telemetry.deliveries().is_empty() {
        ui.label("No deliveries yet.");
        return;
    }

    let mut total = 0.0;
    let earnings: Vec<[f64; 2]> = telemetry
        .deliveries()
        .iter()
        .enumerate()
        .map(|(i, delivery)| {
            total += delivery.price;
            [(i + 1) as f64, total]
        })
        .collect();
    Plot::new("earnings_plot")
        .height(140.0)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new("Earnings (R$)", earnings).color(notice_color()));
        });

    egui::Grid::new("deliveries_table")
        .striped(true)
        .show(ui, |ui| {
            ui.label("Order");
            ui.label("Price");
            ui.label("Distance");
            ui.label("Completed");
            ui.end_row();
            for delivery in telemetry.deliveries().iter().rev() {
                ui.label(&delivery.order_id);
                ui.label(format_brl(delivery.price));
                ui.label(format_km(delivery.distance_km));
                ui.label(delivery.completed_at.format("%H:%M:%S").to_string());
                ui.end_row();
            }
        });
}
