//! Turn-line parser for interactive mode
//!
//! A line is either a JSON `TurnInput` or whitespace/comma separated tokens:
//! `interrupts activeListening t=12 poor`
//! - `t=<secs>` (or `talk=<secs>`, optional `s`): talk time
//! - `good` / `neutral` / `poor`: performance verdict
//! - identifier-shaped tokens: triggers, in order
//! - anything else is kept as a malformed trigger (the session logs it)

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::EngineError;
use crate::types::{TriggerInput, TurnInput, TurnPerformance};

lazy_static! {
    static ref RE_TALK_TIME: Regex = Regex::new(r"(?i)^t(?:alk)?=(\d+)s?$").unwrap();
    static ref RE_VERDICT: Regex = Regex::new(r"(?i)^(good|neutral|poor)$").unwrap();
    static ref RE_IDENTIFIER: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap();
    static ref RE_SEPARATOR: Regex = Regex::new(r"[\s,]+").unwrap();
}

/// Parser for one representative turn typed at the prompt
#[derive(Debug, Default)]
pub struct TurnParser;

impl TurnParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, line: &str) -> Result<TurnInput, EngineError> {
        let line = line.trim();
        if line.starts_with('{') {
            return serde_json::from_str(line)
                .map_err(|e| EngineError::configuration(format!("invalid turn JSON: {}", e)));
        }

        let mut input = TurnInput::default();
        for token in RE_SEPARATOR.split(line).filter(|t| !t.is_empty()) {
            if let Some(caps) = RE_TALK_TIME.captures(token) {
                input.talk_time_secs = caps[1].parse().map_err(|_| {
                    EngineError::configuration(format!("talk time out of range: {}", token))
                })?;
            } else if RE_VERDICT.is_match(token) {
                input.performance = match token.to_ascii_lowercase().as_str() {
                    "good" => TurnPerformance::Good,
                    "poor" => TurnPerformance::Poor,
                    _ => TurnPerformance::Neutral,
                };
            } else if RE_IDENTIFIER.is_match(token) {
                input.triggers.push(TriggerInput::Name(token.to_string()));
            } else {
                input.triggers.push(TriggerInput::Malformed(serde_json::Value::String(token.to_string())));
            }
        }
        Ok(input)
    }
}

// =============================================================================
// TESTS
// =============================================================================
