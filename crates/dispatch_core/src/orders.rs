//! Delivery orders and the mock order generator.
//!
//! A batch is created wholesale by [`generate_orders`], optionally enriched in
//! place by the scoring step (same ids, extra fields), and discarded on the
//! next refresh.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pricing::{base_time_minutes, sample_order_fare};
use crate::spatial::{distance_km_between, LocationPoint};
use crate::zones::{geocode, random_zone};

/// Prefix of generated order ids (`SJ-1000`, `SJ-1001`, ...).
pub const ORDER_ID_PREFIX: &str = "SJ-";

/// Number assigned to the first order of every batch.
pub const FIRST_ORDER_NUMBER: usize = 1000;

/// Profitability score above which an order is marked high priority.
pub const HIGH_PRIORITY_SCORE: f64 = 80.0;

const RESTAURANT_NAMES: [&str; 10] = [
    "Sushi Kobrasol",
    "Barreiros Burger",
    "Pizzaria Campinas",
    "Tacos da Praia",
    "Marmitas da Dona Maria",
    "Hot Dog do Zé",
    "Açaí Floripa",
    "Churrascaria BR",
    "Pastelaria Areias",
    "Bistrô Histórico",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    /// Never assigned by the current scoring rules.
    Low,
}

impl Priority {
    /// `High` iff the score is strictly above [`HIGH_PRIORITY_SCORE`].
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_PRIORITY_SCORE {
            Priority::High
        } else {
            Priority::Medium
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl TrafficLevel {
    pub const ALL: [TrafficLevel; 4] = [
        TrafficLevel::Low,
        TrafficLevel::Medium,
        TrafficLevel::High,
        TrafficLevel::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
            TrafficLevel::Critical => "Critical",
        }
    }

    /// Parse an oracle label; case-insensitive, `None` for anything unknown.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub restaurant: String,
    pub customer: String,
    pub price: f64,
    pub distance_km: f64,
    /// Free-flow time, fixed at creation.
    pub base_time_min: u32,
    /// `base_time_min` until scored, then `base_time_min + traffic_delay_min`.
    pub estimated_time_min: u32,
    pub pickup: LocationPoint,
    pub dropoff: LocationPoint,
    pub priority: Priority,
    pub profitability_score: Option<f64>,
    pub traffic_level: Option<TrafficLevel>,
    pub traffic_delay_min: Option<u32>,
}

impl Order {
    /// Score used for ranking; unscored orders rank as zero.
    pub fn score_or_zero(&self) -> f64 {
        self.profitability_score.unwrap_or(0.0)
    }

    pub fn is_scored(&self) -> bool {
        self.profitability_score.is_some()
    }
}

pub fn order_id(index: usize) -> String {
    format!("{}{}", ORDER_ID_PREFIX, FIRST_ORDER_NUMBER + index)
}

/// Build an unscored order between two points.
pub fn build_order(
    index: usize,
    restaurant: &str,
    pickup: LocationPoint,
    dropoff: LocationPoint,
    price: f64,
) -> Order {
    let distance_km = distance_km_between(&pickup, &dropoff);
    let base_time_min = base_time_minutes(distance_km);
    Order {
        id: order_id(index),
        restaurant: format!("{} ({})", restaurant, pickup.label),
        customer: format!("Cliente em {}", dropoff.label),
        price,
        distance_km,
        base_time_min,
        estimated_time_min: base_time_min,
        pickup,
        dropoff,
        priority: Priority::Medium,
        profitability_score: None,
        traffic_level: None,
        traffic_delay_min: None,
    }
}

/// Generate exactly `count` mock orders with sequential ids.
///
/// Dropoff zones are re-rolled while they match the pickup zone, but each
/// re-roll only happens with probability 1/2, so same-zone trips still occur.
pub fn generate_orders<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Order> {
    (0..count)
        .map(|index| {
            let pickup_zone = random_zone(rng);
            let mut dropoff_zone = random_zone(rng);
            while pickup_zone.name == dropoff_zone.name && rng.gen::<f64>() > 0.5 {
                dropoff_zone = random_zone(rng);
            }

            let pickup = geocode(pickup_zone, rng);
            let dropoff = geocode(dropoff_zone, rng);
            let distance_km = distance_km_between(&pickup, &dropoff);
            let restaurant = RESTAURANT_NAMES[rng.gen_range(0..RESTAURANT_NAMES.len())];
            let price = sample_order_fare(rng, distance_km);

            build_order(index, restaurant, pickup, dropoff, price)
        })
        .collect()
}
