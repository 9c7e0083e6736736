//! Read-only projection of the dispatch state onto the map.
//!
//! Pure functions of `(orders, selection, navigating, driver position)`; the
//! front end only draws what these return.

use std::fmt;

use crate::orders::{Order, TrafficLevel};
use crate::spatial::{LocationPoint, WORLD_SIZE};

/// Side of the square window centred on the driver while navigating.
pub const NAVIGATION_ZOOM_SIZE: f64 = 20.0;

/// Where the idle driver waits between trips.
pub const DEPOT: (f64, f64) = (60.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub const WORLD: ViewBox = ViewBox {
        min_x: 0.0,
        min_y: 0.0,
        width: WORLD_SIZE,
        height: WORLD_SIZE,
    };

    pub fn centered_on(point: &LocationPoint, size: f64) -> Self {
        Self {
            min_x: point.x - size / 2.0,
            min_y: point.y - size / 2.0,
            width: size,
            height: size,
        }
    }

    /// Map a grid point into `[0, 1]²` relative to this box (may fall outside).
    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.min_x) / self.width, (y - self.min_y) / self.height)
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

/// Zoom onto the driver while navigating, otherwise show the whole world.
pub fn view_box(is_navigating: bool, driver_position: Option<&LocationPoint>) -> ViewBox {
    match driver_position {
        Some(position) if is_navigating => ViewBox::centered_on(position, NAVIGATION_ZOOM_SIZE),
        _ => ViewBox::WORLD,
    }
}

/// Id of the highest-scoring order. On ties the later order wins.
pub fn best_order_id(orders: &[Order]) -> Option<&str> {
    orders
        .iter()
        .reduce(|prev, current| {
            if prev.score_or_zero() > current.score_or_zero() {
                prev
            } else {
                current
            }
        })
        .map(|order| order.id.as_str())
}

pub fn traffic_color_hex(level: Option<TrafficLevel>) -> &'static str {
    match level {
        Some(TrafficLevel::Critical) => "#ff0055",
        Some(TrafficLevel::High) => "#ff5e00",
        Some(TrafficLevel::Medium) => "#ffea00",
        Some(TrafficLevel::Low) | None => "#00ff9d",
    }
}

pub fn traffic_color_rgb(level: Option<TrafficLevel>) -> [u8; 3] {
    match level {
        Some(TrafficLevel::Critical) => [0xff, 0x00, 0x55],
        Some(TrafficLevel::High) => [0xff, 0x5e, 0x00],
        Some(TrafficLevel::Medium) => [0xff, 0xea, 0x00],
        Some(TrafficLevel::Low) | None => [0x00, 0xff, 0x9d],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStyle {
    pub opacity: f64,
    pub stroke_width: f64,
    pub color: [u8; 3],
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DriverMarker {
    /// Moving driver at its interpolated position.
    Navigating(LocationPoint),
    /// Parked driver at the depot.
    Idle { x: f64, y: f64 },
    /// Navigating but no position published yet.
    Hidden,
}

#[derive(Debug, Clone, Copy)]
pub struct MapView<'a> {
    pub orders: &'a [Order],
    pub selected_id: Option<&'a str>,
    pub is_navigating: bool,
    pub driver_position: Option<&'a LocationPoint>,
}

impl<'a> MapView<'a> {
    pub fn view_box(&self) -> ViewBox {
        view_box(self.is_navigating, self.driver_position)
    }

    pub fn best_order_id(&self) -> Option<&'a str> {
        best_order_id(self.orders)
    }

    fn is_selected(&self, order_id: &str) -> bool {
        self.selected_id == Some(order_id)
    }

    fn is_best(&self, order_id: &str) -> bool {
        self.best_order_id() == Some(order_id)
    }

    /// Best or selected routes are drawn emphasised.
    pub fn is_highlighted(&self, order_id: &str) -> bool {
        self.is_best(order_id) || self.is_selected(order_id)
    }

    pub fn opacity(&self, order_id: &str) -> f64 {
        let selected = self.is_selected(order_id);
        if self.is_navigating {
            return if selected { 1.0 } else { 0.02 };
        }
        if self.selected_id.is_some() {
            return if selected { 1.0 } else { 0.1 };
        }
        let any_scored = self
            .orders
            .iter()
            .any(|o| o.profitability_score.is_some_and(|s| s != 0.0));
        if any_scored && self.best_order_id().is_some() {
            return if self.is_best(order_id) { 1.0 } else { 0.3 };
        }
        0.7
    }

    pub fn stroke_width(&self, order_id: &str) -> f64 {
        let selected = self.is_selected(order_id);
        if self.is_navigating && selected {
            1.0
        } else if selected {
            1.5
        } else if self.is_best(order_id) {
            1.2
        } else {
            0.6
        }
    }

    pub fn route_style(&self, order: &Order) -> RouteStyle {
        RouteStyle {
            opacity: self.opacity(&order.id),
            stroke_width: self.stroke_width(&order.id),
            color: traffic_color_rgb(order.traffic_level),
            highlighted: self.is_highlighted(&order.id),
        }
    }

    pub fn driver_marker(&self) -> DriverMarker {
        match (self.is_navigating, self.driver_position) {
            (true, Some(position)) => DriverMarker::Navigating(position.clone()),
            (true, None) => DriverMarker::Hidden,
            (false, _) => DriverMarker::Idle {
                x: DEPOT.0,
                y: DEPOT.1,
            },
        }
    }
}
