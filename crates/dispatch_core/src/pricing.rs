//! Simple pricing and timing rules for mock delivery orders.

use rand::Rng;

/// Base fare in currency units (R$).
pub const BASE_FARE: f64 = 8.0;

/// Per-kilometer rate in currency units.
pub const PER_KM_RATE: f64 = 1.50;

/// Upper bound (exclusive) of the whole-unit bonus drawn for each order.
pub const MAX_FARE_BONUS: u32 = 20;

/// Minutes of fixed handling time added to every delivery.
pub const HANDLING_MINUTES: u32 = 5;

/// Minutes per kilometer at free-flow speed.
pub const MINUTES_PER_KM: f64 = 2.0;

/// Calculate the fare for an order.
///
/// Formula: `fare = bonus + BASE_FARE + (distance_km * PER_KM_RATE)`
pub fn calculate_order_fare(bonus: u32, distance_km: f64) -> f64 {
    f64::from(bonus) + BASE_FARE + distance_km * PER_KM_RATE
}

/// Draw a bonus in `0..MAX_FARE_BONUS` and price the order with it.
pub fn sample_order_fare<R: Rng + ?Sized>(rng: &mut R, distance_km: f64) -> f64 {
    calculate_order_fare(rng.gen_range(0..MAX_FARE_BONUS), distance_km)
}

/// Optimistic travel time without traffic: `floor(distance_km * 2) + 5`.
pub fn base_time_minutes(distance_km: f64) -> u32 {
    (distance_km * MINUTES_PER_KM).floor() as u32 + HANDLING_MINUTES
}
