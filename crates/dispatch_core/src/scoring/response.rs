use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::orders::TrafficLevel;

/// One entry of the oracle's reply array.
///
/// Every field except `id` is optional: numbers may arrive as numeric
/// strings, unknown traffic labels and non-numeric values become `None`, and
/// the caller substitutes defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAnalysis {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub profitability_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_traffic_level")]
    pub traffic_level: Option<TrafficLevel>,
    #[serde(default, deserialize_with = "lenient_delay")]
    pub traffic_delay_min: Option<u32>,
}

fn number_from_value(value: Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(number_from_value))
}

fn lenient_delay<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(de)?;
    Ok(value
        .and_then(number_from_value)
        .map(|minutes| minutes.round().clamp(0.0, f64::from(u32::MAX)) as u32))
}

fn lenient_traffic_level<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<Option<TrafficLevel>, D::Error> {
    let value = Option::<Value>::deserialize(de)?;
    Ok(match value {
        Some(Value::String(label)) => TrafficLevel::from_label(&label),
        _ => None,
    })
}

// Gemini `generateContent` reply, reduced to the fields we read.

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub(super) candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Candidate {
    pub(super) content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub(super) parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContentPart {
    pub(super) text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any.
    pub(super) fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}
