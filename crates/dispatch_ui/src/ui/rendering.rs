//! Map drawing: projects grid coordinates through the active view box.

use eframe::egui::{self, Align2, Color32, FontId, Vec2};

use dispatch_core::map_view::{DriverMarker, MapView, ViewBox};
use dispatch_core::orders::{Order, TrafficLevel};
use dispatch_core::zones::ZONES;

use crate::ui::utils::{depot_color, driver_color, traffic_color, with_opacity, zone_stroke_color};

/// Pixel radius within which a click picks an order's pickup or dropoff.
const PICK_RADIUS_PX: f32 = 12.0;

/// Project a grid point into the map rect. Points outside the view box land
/// outside the rect and are clipped by the painter.
pub fn project(view_box: &ViewBox, rect: egui::Rect, x: f64, y: f64) -> egui::Pos2 {
    let (nx, ny) = view_box.normalize(x, y);
    egui::pos2(
        rect.left() + rect.width() * nx as f32,
        rect.top() + rect.height() * ny as f32,
    )
}

/// Grid units to pixels at the current zoom.
fn grid_to_px(view_box: &ViewBox, rect: egui::Rect, units: f64) -> f32 {
    (units / view_box.width) as f32 * rect.width()
}

pub fn draw_zones(painter: &egui::Painter, view_box: &ViewBox, rect: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, zone_stroke_color());
    for zone in ZONES.iter() {
        let b = &zone.bounds;
        let min = project(view_box, rect, b.x_min, b.y_min);
        let max = project(view_box, rect, b.x_max, b.y_max);
        painter.rect_stroke(
            egui::Rect::from_min_max(min, max),
            2.0,
            stroke,
            egui::StrokeKind::Middle,
        );
        painter.text(
            min + Vec2::new(4.0, 4.0),
            Align2::LEFT_TOP,
            zone.name,
            FontId::proportional(10.0),
            Color32::from_gray(90),
        );
    }
}

pub fn draw_route(
    painter: &egui::Painter,
    view: &MapView<'_>,
    view_box: &ViewBox,
    rect: egui::Rect,
    order: &Order,
) {
    let style = view.route_style(order);
    let color = with_opacity(traffic_color(order.traffic_level), style.opacity);
    let from = project(view_box, rect, order.pickup.x, order.pickup.y);
    let to = project(view_box, rect, order.dropoff.x, order.dropoff.y);
    let width = grid_to_px(view_box, rect, style.stroke_width).max(1.0);
    painter.line_segment([from, to], egui::Stroke::new(width, color));

    let radius = if style.highlighted { 5.0 } else { 3.0 };
    painter.circle_filled(from, radius, color);
    painter.circle_stroke(to, radius, egui::Stroke::new(1.5, color));

    if style.highlighted {
        painter.text(
            from + Vec2::new(7.0, -7.0),
            Align2::LEFT_BOTTOM,
            &order.id,
            FontId::monospace(10.0),
            color,
        );
        painter.text(
            to + Vec2::new(7.0, -7.0),
            Align2::LEFT_BOTTOM,
            &order.dropoff.label,
            FontId::proportional(10.0),
            color,
        );
    }
}

pub fn draw_driver(painter: &egui::Painter, view: &MapView<'_>, view_box: &ViewBox, rect: egui::Rect) {
    match view.driver_marker() {
        DriverMarker::Navigating(position) => {
            let pos = project(view_box, rect, position.x, position.y);
            painter.circle_filled(pos, 9.0, with_opacity(driver_color(), 0.25));
            painter.circle_filled(pos, 5.0, driver_color());
            painter.text(
                pos + Vec2::new(8.0, 8.0),
                Align2::LEFT_TOP,
                &position.label,
                FontId::monospace(10.0),
                driver_color(),
            );
        }
        DriverMarker::Idle { x, y } => {
            let pos = project(view_box, rect, x, y);
            painter.circle_stroke(pos, 5.0, egui::Stroke::new(1.5, depot_color()));
            painter.text(
                pos + Vec2::new(8.0, 8.0),
                Align2::LEFT_TOP,
                "Depot",
                FontId::proportional(10.0),
                depot_color(),
            );
        }
        DriverMarker::Hidden => {}
    }
}

/// Order whose pickup or dropoff marker is closest to `pointer`, if any is
/// within the pick radius.
pub fn pick_order<'a>(
    orders: &'a [Order],
    view_box: &ViewBox,
    rect: egui::Rect,
    pointer: egui::Pos2,
) -> Option<&'a Order> {
    orders
        .iter()
        .flat_map(|order| {
            [&order.pickup, &order.dropoff].map(|point| {
                let pos = project(view_box, rect, point.x, point.y);
                (order, pos.distance(pointer))
            })
        })
        .filter(|(_, distance)| *distance <= PICK_RADIUS_PX)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(order, _)| order)
}

/// Render a legend item (color swatch + label).
fn legend_item(ui: &mut egui::Ui, color: Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::new(14.0, 14.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, color);
        ui.label(label);
    });
}

pub fn render_map_legend(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label("Traffic:");
        for level in TrafficLevel::ALL {
            legend_item(ui, traffic_color(Some(level)), level.as_str());
        }
        legend_item(ui, driver_color(), "Driver");
    });
}
