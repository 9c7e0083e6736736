//! Session telemetry: records completed deliveries for the earnings panel.
//!
//! Unlike order batches, telemetry lives for the whole session and survives
//! refreshes.

use chrono::{DateTime, Local};

use crate::navigation::Arrival;

/// One completed delivery, recorded when the driver reaches the dropoff.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedDeliveryRecord {
    pub order_id: String,
    pub price: f64,
    pub distance_km: f64,
    /// Ticks the trip took.
    pub ticks: u64,
    pub completed_at: DateTime<Local>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionTelemetry {
    deliveries: Vec<CompletedDeliveryRecord>,
    optimize_runs: u32,
    optimize_fallbacks: u32,
}

impl SessionTelemetry {
    pub fn record_arrival(&mut self, arrival: &Arrival, completed_at: DateTime<Local>) {
        self.deliveries.push(CompletedDeliveryRecord {
            order_id: arrival.order_id.clone(),
            price: arrival.price,
            distance_km: arrival.distance_km,
            ticks: arrival.ticks,
            completed_at,
        });
    }

    /// Count one optimize round; `scored` is false when the oracle fell back.
    pub fn record_optimize(&mut self, scored: bool) {
        self.optimize_runs += 1;
        if !scored {
            self.optimize_fallbacks += 1;
        }
    }

    pub fn deliveries(&self) -> &[CompletedDeliveryRecord] {
        &self.deliveries
    }

    pub fn total_earnings(&self) -> f64 {
        self.deliveries.iter().map(|d| d.price).sum()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.deliveries.iter().map(|d| d.distance_km).sum()
    }

    pub fn optimize_runs(&self) -> u32 {
        self.optimize_runs
    }

    pub fn optimize_fallbacks(&self) -> u32 {
        self.optimize_fallbacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrival(id: &str, price: f64, km: f64) -> Arrival {
        Arrival {
            order_id: id.to_string(),
            price,
            distance_km: km,
            ticks: 300,
        }
    }

    #[test]
    fn totals_sum_recorded_deliveries() {
        let mut telemetry = SessionTelemetry::default();
        let now = Local::now();
        telemetry.record_arrival(&arrival("SJ-1000", 20.5, 3.0), now);
        telemetry.record_arrival(&arrival("SJ-1003", 14.0, 1.5), now);

        assert_eq!(telemetry.deliveries().len(), 2);
        assert_eq!(telemetry.total_earnings(), 34.5);
        assert_eq!(telemetry.total_distance_km(), 4.5);
    }

    #[test]
    fn optimize_counters_track_fallbacks() {
        let mut telemetry = SessionTelemetry::default();
        telemetry.record_optimize(true);
        telemetry.record_optimize(false);
        assert_eq!(telemetry.optimize_runs(), 2);
        assert_eq!(telemetry.optimize_fallbacks(), 1);
    }
}
