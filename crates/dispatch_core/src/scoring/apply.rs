use std::cmp::Ordering;

use super::response::OrderAnalysis;
use crate::orders::{Order, Priority, TrafficLevel};

/// Score given to an order the oracle did not mention.
pub const DEFAULT_PROFITABILITY_SCORE: f64 = 50.0;

/// Merge oracle analyses into a copy of the batch and rank it.
///
/// Orders keep their identity and creation-time fields. Missing analyses (or
/// missing fields inside one) fall back to Low traffic, no delay and a score
/// of 50. The result is sorted by score, highest first; equal scores keep
/// their batch order.
pub fn apply_analyses(orders: &[Order], analyses: &[OrderAnalysis]) -> Vec<Order> {
    let mut scored: Vec<Order> = orders
        .iter()
        .map(|order| {
            let analysis = analyses.iter().find(|a| a.id == order.id);

            let delay = analysis.and_then(|a| a.traffic_delay_min).unwrap_or(0);
            let traffic_level = analysis
                .and_then(|a| a.traffic_level)
                .unwrap_or(TrafficLevel::Low);
            let score = analysis
                .and_then(|a| a.profitability_score)
                .unwrap_or(DEFAULT_PROFITABILITY_SCORE)
                .clamp(0.0, 100.0);

            Order {
                profitability_score: Some(score),
                traffic_level: Some(traffic_level),
                traffic_delay_min: Some(delay),
                estimated_time_min: order.base_time_min.saturating_add(delay),
                priority: Priority::from_score(score),
                ..order.clone()
            }
        })
        .collect();

    sort_by_score_desc(&mut scored);
    scored
}

pub fn sort_by_score_desc(orders: &mut [Order]) {
    orders.sort_by(|a, b| {
        b.score_or_zero()
            .partial_cmp(&a.score_or_zero())
            .unwrap_or(Ordering::Equal)
    });
}
