//! Tiered extraction of the analysis array from a free-text oracle reply.
//!
//! Tiers, tried in order:
//!
//! 1. **Strict**: the trimmed reply parses as a JSON array as-is.
//! 2. **Bracket scan**: the reply contains a `[` before a `]`; the slice from
//!    the first `[` to the last `]` is parsed. Surrounding prose is ignored.
//! 3. **Fence strip**: no usable brackets; code-fence markers are removed
//!    and the remainder is parsed.
//!
//! A tier that triggers but fails to parse is final: later tiers only run
//! when the earlier tier's trigger condition does not hold.

use serde_json::Value;
use tracing::debug;

use super::error::ScoringError;
use super::response::OrderAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    Strict,
    BracketScan,
    FenceStrip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub tier: ExtractionTier,
    pub analyses: Vec<OrderAnalysis>,
}

/// Slice from the first `[` to the last `]`, inclusive.
pub fn bracket_slice(raw: &str) -> Option<&str> {
    let first = raw.find('[')?;
    let last = raw.rfind(']')?;
    (first < last).then(|| &raw[first..=last])
}

/// Remove ```` ```json ```` and ```` ``` ```` markers and trim.
pub fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a JSON array, keeping only the entries that read as an analysis.
/// Entries without a string `id` (or `null`s) are dropped; the orders they
/// would have matched take the scoring defaults.
fn parse_array(text: &str) -> Result<Vec<OrderAnalysis>, ScoringError> {
    let entries: Vec<Value> = serde_json::from_str(text)?;
    let total = entries.len();
    let analyses: Vec<OrderAnalysis> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if analyses.len() < total {
        debug!(skipped = total - analyses.len(), "ignoring unusable analysis entries");
    }
    Ok(analyses)
}

pub fn parse_reply(raw: &str) -> Result<ParsedReply, ScoringError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScoringError::EmptyResponse);
    }

    if trimmed.starts_with('[') {
        if let Ok(analyses) = parse_array(trimmed) {
            return Ok(ParsedReply {
                tier: ExtractionTier::Strict,
                analyses,
            });
        }
    }

    if let Some(slice) = bracket_slice(trimmed) {
        return Ok(ParsedReply {
            tier: ExtractionTier::BracketScan,
            analyses: parse_array(slice)?,
        });
    }

    let stripped = strip_fences(trimmed);
    if stripped.is_empty() {
        return Err(ScoringError::EmptyResponse);
    }
    match parse_array(&stripped) {
        Ok(analyses) => Ok(ParsedReply {
            tier: ExtractionTier::FenceStrip,
            analyses,
        }),
        Err(_) => Err(ScoringError::Malformed(truncate(&stripped, 120))),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
