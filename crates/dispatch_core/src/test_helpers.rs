//! Test helpers: order fixtures and a scripted scoring oracle.
//!
//! Shared by unit tests, integration tests and benches.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::orders::build_order;
use crate::orders::Order;
use crate::scoring::{ScoringError, ScoringOracle};
use crate::spatial::LocationPoint;

/// Kobrasol → Campinas order with a fixed base time.
///
/// Geometry and price are placeholders; only `base_time_min` is forced.
pub fn sample_order(id: &str, base_time_min: u32) -> Order {
    let mut order = build_order(
        0,
        "Sushi Kobrasol",
        LocationPoint::new(60.0, 40.0, "Kobrasol"),
        LocationPoint::new(70.0, 45.0, "Campinas"),
        20.0,
    );
    order.id = id.to_string();
    order.base_time_min = base_time_min;
    order.estimated_time_min = base_time_min;
    order
}

/// Order between two raw grid points with a forced distance.
pub fn order_between(id: &str, from: (f64, f64), to: (f64, f64), distance_km: f64) -> Order {
    let mut order = build_order(
        0,
        "Hot Dog do Zé",
        LocationPoint::new(from.0, from.1, "Pickup"),
        LocationPoint::new(to.0, to.1, "Dropoff"),
        15.0,
    );
    order.id = id.to_string();
    order.distance_km = distance_km;
    order
}

/// JSON reply scoring each `(id, score)` with Medium traffic and no delay.
pub fn reply_scoring(entries: &[(&str, f64)]) -> String {
    let items: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, score)| {
            serde_json::json!({
                "id": id,
                "profitabilityScore": score,
                "trafficLevel": "Medium",
                "trafficDelayMin": 0
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

/// Oracle returning a canned reply (or failure) and counting calls.
#[derive(Debug)]
pub struct ScriptedOracle {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedOracle {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .ok()
            .and_then(|prompt| prompt.clone())
    }
}

impl ScoringOracle for ScriptedOracle {
    fn complete(&self, prompt: &str) -> Result<String, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.reply
            .clone()
            .map_err(ScoringError::Unavailable)
    }
}
