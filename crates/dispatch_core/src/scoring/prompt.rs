use chrono::NaiveTime;
use serde::Serialize;

use crate::orders::Order;
use crate::traffic::TrafficRules;

/// Compact projection of an order sent to the oracle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary<'a> {
    pub id: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    pub price: f64,
    pub base_time: u32,
}

impl<'a> From<&'a Order> for OrderSummary<'a> {
    fn from(order: &'a Order) -> Self {
        Self {
            id: &order.id,
            from: &order.pickup.label,
            to: &order.dropoff.label,
            price: order.price,
            base_time: order.base_time_min,
        }
    }
}

/// Build the traffic-analysis request for a batch.
pub fn build_prompt(
    orders: &[Order],
    local_time: NaiveTime,
    rules: &TrafficRules,
) -> Result<String, serde_json::Error> {
    let summaries: Vec<OrderSummary<'_>> = orders.iter().map(OrderSummary::from).collect();
    let orders_json = serde_json::to_string(&summaries)?;

    Ok(format!(
        "You are a real-time traffic monitoring system for {city}.\n\
         Current time: {time}.\n\
         \n\
         Simulated traffic rules:\n\
         {rules}\n\
         \n\
         For each order, analyse the route (pickup -> dropoff) and return:\n\
         - trafficLevel: \"Low\", \"Medium\", \"High\" or \"Critical\".\n\
         - trafficDelayMin: extra minutes to add because of traffic.\n\
         - profitabilityScore: 0-100. (If traffic is Critical the score MUST be low, \
         because the courier loses time.)\n\
         \n\
         Answer with a JSON array only: one object per order with the fields \
         id, profitabilityScore, trafficLevel, trafficDelayMin.\n\
         \n\
         Orders: {orders_json}",
        city = rules.city,
        time = local_time.format("%H:%M"),
        rules = rules.render(),
    ))
}
