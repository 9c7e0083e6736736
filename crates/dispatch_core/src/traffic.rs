//! Simulated traffic rules handed to the scoring oracle.
//!
//! The rules are plain text for the prompt; the oracle turns them into
//! per-order traffic levels and delays. Rules with a time window can also be
//! checked locally so the UI can flag an active rush hour.

use chrono::{NaiveTime, Timelike};

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficRule {
    pub corridor: &'static str,
    pub description: &'static str,
    /// Local time window `[start, end)` in minutes after midnight.
    pub window_minutes: Option<(u32, u32)>,
}

impl TrafficRule {
    pub fn is_active_at(&self, time: NaiveTime) -> bool {
        match self.window_minutes {
            Some((start, end)) => {
                let minute = time.hour() * 60 + time.minute();
                (start..end).contains(&minute)
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficRules {
    pub city: &'static str,
    pub rules: Vec<TrafficRule>,
}

impl TrafficRules {
    /// Rush-hour corridors of São José (SC).
    pub fn sao_jose() -> Self {
        Self {
            city: "São José, Santa Catarina",
            rules: vec![
                TrafficRule {
                    corridor: "BR-101",
                    description: "BR-101 is VERY slow between 17:00 and 19:30 (northbound and southbound).",
                    window_minutes: Some((17 * 60, 19 * 60 + 30)),
                },
                TrafficRule {
                    corridor: "Via Expressa",
                    description: "Via Expressa is jammed at peak hours.",
                    window_minutes: None,
                },
                TrafficRule {
                    corridor: "Kobrasol/Campinas",
                    description: "Inner neighbourhoods (Kobrasol/Campinas) have medium traffic.",
                    window_minutes: None,
                },
            ],
        }
    }

    /// Numbered rule list, one rule per line.
    pub fn render(&self) -> String {
        self.rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| format!("{}. {}", idx + 1, rule.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Corridors whose time window covers `time`. Unwindowed rules are skipped.
    pub fn windowed_rules_active_at(&self, time: NaiveTime) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.window_minutes.is_some() && rule.is_active_at(time))
            .map(|rule| rule.corridor)
            .collect()
    }
}

impl Default for TrafficRules {
    fn default() -> Self {
        Self::sao_jose()
    }
}
