//! Named delivery zones and the geocoder that samples points inside them.
//!
//! Zones are the neighbourhoods of São José (SC) laid out on the 100×100
//! grid. The coast sits on the right (x > 80) and the BR-101 cuts the map
//! around x = 60.

use rand::Rng;

use crate::spatial::LocationPoint;

/// Axis-aligned rectangle on the map grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ZoneBounds {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub name: &'static str,
    pub bounds: ZoneBounds,
}

pub const ZONES: [Zone; 11] = [
    Zone {
        name: "Barreiros",
        bounds: ZoneBounds::new(40.0, 65.0, 5.0, 25.0),
    },
    Zone {
        name: "Bela Vista",
        bounds: ZoneBounds::new(30.0, 50.0, 20.0, 40.0),
    },
    Zone {
        name: "Kobrasol",
        bounds: ZoneBounds::new(55.0, 70.0, 30.0, 45.0),
    },
    Zone {
        name: "Campinas",
        bounds: ZoneBounds::new(65.0, 78.0, 35.0, 50.0),
    },
    Zone {
        name: "Praia Comprida",
        bounds: ZoneBounds::new(65.0, 80.0, 50.0, 65.0),
    },
    Zone {
        name: "Centro Histórico",
        bounds: ZoneBounds::new(70.0, 85.0, 65.0, 85.0),
    },
    Zone {
        name: "Ponta de Baixo",
        bounds: ZoneBounds::new(75.0, 90.0, 75.0, 90.0),
    },
    Zone {
        name: "Forquilhinhas",
        bounds: ZoneBounds::new(10.0, 40.0, 40.0, 60.0),
    },
    Zone {
        name: "Areias",
        bounds: ZoneBounds::new(30.0, 50.0, 40.0, 60.0),
    },
    Zone {
        name: "Serraria",
        bounds: ZoneBounds::new(40.0, 60.0, 0.0, 15.0),
    },
    Zone {
        name: "Fazenda Santo Antônio",
        bounds: ZoneBounds::new(20.0, 40.0, 60.0, 80.0),
    },
];

/// Look up a zone by its display name.
pub fn zone_by_name(name: &str) -> Option<&'static Zone> {
    ZONES.iter().find(|zone| zone.name == name)
}

/// Pick a zone uniformly at random.
pub fn random_zone<R: Rng + ?Sized>(rng: &mut R) -> &'static Zone {
    &ZONES[rng.gen_range(0..ZONES.len())]
}

/// Sample a point uniformly inside the zone's rectangle.
pub fn geocode<R: Rng + ?Sized>(zone: &Zone, rng: &mut R) -> LocationPoint {
    let b = zone.bounds;
    LocationPoint {
        x: rng.gen::<f64>() * (b.x_max - b.x_min) + b.x_min,
        y: rng.gen::<f64>() * (b.y_max - b.y_min) + b.y_min,
        label: zone.name.to_string(),
    }
}
