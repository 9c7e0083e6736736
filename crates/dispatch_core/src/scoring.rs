//! Traffic and profitability scoring through an external generative oracle.
//!
//! The oracle receives a prompt describing the batch and answers (ideally)
//! with a JSON array of per-order analyses. Scoring is best-effort: any
//! failure is logged and the batch is returned exactly as it came in.

mod apply;
#[cfg(feature = "gemini")]
mod client;
mod error;
mod parser;
mod prompt;
mod response;

use chrono::NaiveTime;
use tracing::{debug, warn};

use crate::orders::Order;
use crate::traffic::TrafficRules;

pub use apply::{apply_analyses, sort_by_score_desc, DEFAULT_PROFITABILITY_SCORE};
#[cfg(feature = "gemini")]
pub use client::GeminiClient;
pub use error::ScoringError;
pub use parser::{bracket_slice, parse_reply, strip_fences, ExtractionTier, ParsedReply};
pub use prompt::{build_prompt, OrderSummary};
pub use response::OrderAnalysis;

/// Anything that turns a prompt into a raw text reply.
///
/// Implementations must be shareable across threads so a front end can run
/// the call off its render loop.
pub trait ScoringOracle: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, ScoringError>;
}

impl<T: ScoringOracle + ?Sized> ScoringOracle for std::sync::Arc<T> {
    fn complete(&self, prompt: &str) -> Result<String, ScoringError> {
        (**self).complete(prompt)
    }
}

/// Score a batch, surfacing every failure.
pub fn try_score_orders(
    oracle: &dyn ScoringOracle,
    orders: &[Order],
    local_time: NaiveTime,
    rules: &TrafficRules,
) -> Result<Vec<Order>, ScoringError> {
    let prompt = build_prompt(orders, local_time, rules)?;
    let raw = oracle.complete(&prompt)?;
    let parsed = parse_reply(&raw)?;
    debug!(
        tier = ?parsed.tier,
        analyses = parsed.analyses.len(),
        orders = orders.len(),
        "oracle reply parsed"
    );
    Ok(apply_analyses(orders, &parsed.analyses))
}

/// Score a batch, falling back to the unmodified input on any failure.
pub fn score_orders(
    oracle: &dyn ScoringOracle,
    orders: &[Order],
    local_time: NaiveTime,
    rules: &TrafficRules,
) -> Vec<Order> {
    match try_score_orders(oracle, orders, local_time, rules) {
        Ok(scored) => scored,
        Err(error) => {
            warn!(%error, orders = orders.len(), "traffic analysis failed; keeping unscored batch");
            orders.to_vec()
        }
    }
}
