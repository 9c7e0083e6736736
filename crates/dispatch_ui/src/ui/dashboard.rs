use eframe::egui;

use dispatch_core::map_view::best_order_id;
use dispatch_core::orders::Order;

use crate::app::DispatchUiApp;
use crate::ui::rendering::{draw_driver, draw_route, draw_zones, pick_order, render_map_legend};
use crate::ui::utils::{
    format_brl, format_km, format_minutes, priority_color, traffic_color, traffic_label,
};

pub fn render_dashboard(ui: &mut egui::Ui, app: &mut DispatchUiApp) {
    render_map_legend(ui);

    let side = ui.available_width().min(ui.available_height());
    let (map_rect, response) =
        ui.allocate_exact_size(egui::Vec2::splat(side), egui::Sense::click());
    let painter = ui.painter_at(map_rect);

    painter.rect_filled(map_rect, 0.0, egui::Color32::from_gray(20));
    painter.rect_stroke(
        map_rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(60)),
        egui::StrokeKind::Middle,
    );

    let view = app.state.map_view();
    let view_box = view.view_box();
    draw_zones(&painter, &view_box, map_rect);

    // Highlighted routes last so they sit on top.
    let (highlighted, rest): (Vec<&Order>, Vec<&Order>) =
        view.orders.iter().partition(|o| view.is_highlighted(&o.id));
    for order in rest.into_iter().chain(highlighted) {
        draw_route(&painter, &view, &view_box, map_rect, order);
    }
    draw_driver(&painter, &view, &view_box, map_rect);

    let clicked_id = response
        .clicked()
        .then(|| response.interact_pointer_pos())
        .flatten()
        .and_then(|pointer| pick_order(view.orders, &view_box, map_rect, pointer))
        .map(|order| order.id.clone());
    if let Some(id) = clicked_id {
        app.state.select(&id);
    }
}

/// Side panel: order list, selected order details and trip progress.
pub fn render_dispatch_panel(ui: &mut egui::Ui, app: &mut DispatchUiApp) {
    ui.heading("Orders");
    let navigating = app.state.is_navigating();
    let best = best_order_id(app.state.orders()).map(str::to_string);
    let scored = app.state.orders().iter().any(|o| o.is_scored());

    let mut clicked: Option<String> = None;
    egui::ScrollArea::vertical()
        .id_salt("orders_scroll")
        .max_height(260.0)
        .show(ui, |ui| {
            for order in app.state.orders() {
                let selected = app.state.selected_id() == Some(order.id.as_str());
                let marker = if scored && best.as_deref() == Some(order.id.as_str()) {
                    " *"
                } else {
                    ""
                };
                let text = format!(
                    "{}{}  {}  {}",
                    order.id,
                    marker,
                    format_brl(order.price),
                    order.restaurant
                );
                let response = ui.add_enabled(!navigating, egui::Button::selectable(selected, text));
                if response.clicked() {
                    clicked = Some(order.id.clone());
                }
            }
        });
    if let Some(id) = clicked {
        app.state.select(&id);
    }

    ui.separator();
    match app.state.selected_order().cloned() {
        Some(order) => render_order_details(ui, &order),
        None => {
            ui.label("Select an order on the map or in the list.");
        }
    }

    if let Some(session) = app.state.navigation_session() {
        ui.separator();
        ui.label(format!("Driving {}", session.order_id));
        ui.add(egui::ProgressBar::new(session.progress() as f32).show_percentage());
        ui.label(format!("Remaining: {}", format_km(app.state.remaining_km())));
    }

    ui.separator();
    ui.horizontal(|ui| {
        let can_start = app.state.selected_id().is_some() && !navigating && !app.state.is_optimizing();
        if ui
            .add_enabled(can_start, egui::Button::new("Start navigation"))
            .clicked()
        {
            app.start_navigation();
        }
        if ui.add_enabled(!navigating, egui::Button::new("Close")).clicked() {
            app.state.close_panel();
        }
    });
}

fn render_order_details(ui: &mut egui::Ui, order: &Order) {
    ui.heading(&order.id);
    egui::Grid::new("order_details").num_columns(2).show(ui, |ui| {
        ui.label("Restaurant");
        ui.label(&order.restaurant);
        ui.end_row();
        ui.label("Customer");
        ui.label(&order.customer);
        ui.end_row();
        ui.label("Price");
        ui.label(format_brl(order.price));
        ui.end_row();
        ui.label("Distance");
        ui.label(format_km(order.distance_km));
        ui.end_row();
        ui.label("Base time");
        ui.label(format_minutes(order.base_time_min));
        ui.end_row();
        ui.label("Estimated");
        ui.label(format_minutes(order.estimated_time_min));
        ui.end_row();
        ui.label("Priority");
        ui.colored_label(priority_color(order.priority), order.priority.as_str());
        ui.end_row();
        ui.label("Traffic");
        ui.colored_label(traffic_color(order.traffic_level), traffic_label(order.traffic_level));
        ui.end_row();
        if let Some(delay) = order.traffic_delay_min {
            ui.label("Delay");
            ui.label(format!("+{}", format_minutes(delay)));
            ui.end_row();
        }
        if let Some(score) = order.profitability_score {
            ui.label("Score");
            ui.label(format!("{score:.0}"));
            ui.end_row();
        }
    });
}
