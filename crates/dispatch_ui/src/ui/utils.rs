//! Utility functions for the UI: formatting and colours.

use chrono::{DateTime, Local};
use eframe::egui::Color32;

use dispatch_core::map_view::traffic_color_rgb;
use dispatch_core::orders::{Priority, TrafficLevel};

pub fn format_brl(amount: f64) -> String {
    format!("R$ {amount:.2}")
}

pub fn format_km(km: f64) -> String {
    format!("{km:.1} km")
}

pub fn format_minutes(minutes: u32) -> String {
    format!("{minutes} min")
}

pub fn format_clock(at: Option<DateTime<Local>>) -> String {
    at.map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string())
}

pub fn traffic_label(level: Option<TrafficLevel>) -> &'static str {
    level.map(TrafficLevel::as_str).unwrap_or("Unknown")
}

pub fn traffic_color(level: Option<TrafficLevel>) -> Color32 {
    let [r, g, b] = traffic_color_rgb(level);
    Color32::from_rgb(r, g, b)
}

/// Apply a `[0, 1]` opacity to an opaque colour.
pub fn with_opacity(color: Color32, opacity: f64) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub fn priority_color(priority: Priority) -> Color32 {
    match priority {
        Priority::High => Color32::from_rgb(0, 255, 157),
        Priority::Medium => Color32::from_rgb(255, 234, 0),
        Priority::Low => Color32::from_gray(150),
    }
}

pub fn driver_color() -> Color32 {
    Color32::from_rgb(0, 200, 255)
}

pub fn depot_color() -> Color32 {
    Color32::from_gray(170)
}

pub fn zone_stroke_color() -> Color32 {
    Color32::from_gray(45)
}

pub fn notice_color() -> Color32 {
    Color32::from_rgb(0, 255, 157)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_and_distance_use_fixed_decimals() {
        assert_eq!(format_brl(21.4), "R$ 21.40");
        assert_eq!(format_km(3.25), "3.2 km");
        assert_eq!(format_minutes(17), "17 min");
        assert_eq!(format_clock(None), "never");
    }

    #[test]
    fn opacity_maps_to_alpha() {
        let red = Color32::from_rgb(255, 0, 0);
        assert_eq!(with_opacity(red, 1.0).a(), 255);
        assert_eq!(with_opacity(red, 0.0).a(), 0);
        assert_eq!(with_opacity(red, 2.0).a(), 255);
    }

    #[test]
    fn unscored_traffic_uses_low_colour() {
        assert_eq!(traffic_color(None), traffic_color(Some(TrafficLevel::Low)));
        assert_eq!(traffic_label(None), "Unknown");
    }
}
