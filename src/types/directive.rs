//! Turn directive handed to the language-generation collaborator

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use colored::Colorize;
use crate::types::{Emotion, GateState, ObjectionKind, ReasonCode, SessionSnapshot, TerminalReason};

/// Speaking pace for the prospect's next utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Fast,
    Moderate,
    Slow,
}

/// Tone for the prospect's next utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Relaxed,
    Inquisitive,
    Warm,
    Guarded,
    Curt,
    Hurried,
    Defensive,
    /// Short, fast push-back (high-D prospects)
    Blunt,
    /// Data-first push-back (C-framed prospects)
    Analytical,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tone::Relaxed => "relaxed",
            Tone::Inquisitive => "inquisitive",
            Tone::Warm => "warm",
            Tone::Guarded => "guarded",
            Tone::Curt => "curt",
            Tone::Hurried => "hurried",
            Tone::Defensive => "defensive",
            Tone::Blunt => "blunt",
            Tone::Analytical => "analytical",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for Pace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pace::Fast => "fast",
            Pace::Moderate => "moderate",
            Pace::Slow => "slow",
        };
        write!(f, "{}", name)
    }
}

/// Output of one processed representative turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnDirective {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub turn_index: u32,
    /// Everything from here to `recommended_tone` is absent once the
    /// session is terminal
    pub top_two_emotions: Option<[Emotion; 2]>,
    pub gate_state: Option<GateState>,
    pub close_permitted: Option<bool>,
    pub hedge_on_close: Option<bool>,
    /// Objection the prospect is currently pressing, if any
    pub active_objection: Option<ObjectionKind>,
    pub recommended_pace: Option<Pace>,
    pub recommended_tone: Option<Tone>,
    pub session_terminal: bool,
    pub termination_reason: Option<TerminalReason>,
    /// Fixed marker the renderer maps to a closing utterance
    pub termination_marker: Option<String>,
    pub reason: ReasonCode,
    /// State after this turn, ready to persist
    pub snapshot: SessionSnapshot,
}

impl TurnDirective {
    /// Format for terminal display (colored by session state)
    pub fn to_terminal_string(&self) -> String {
        let line = self.to_parseable_string();
        if self.session_terminal {
            line.red().to_string()
        } else if self.close_permitted == Some(true) {
            line.green().to_string()
        } else {
            line.yellow().to_string()
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        if self.session_terminal {
            return format!(
                "turn={} | terminal={} | marker={} | reason={}",
                self.turn_index,
                self.termination_reason.unwrap_or(TerminalReason::None),
                self.termination_marker.as_deref().unwrap_or("-"),
                self.reason.code()
            );
        }
        format!(
            "turn={} | top={} | gate={} | close={} | objection={} | pace={} | tone={} | patience={}s | reason={}",
            self.turn_index,
            self.top_two_emotions
                .map(|[a, b]| format!("{}/{}", a, b))
                .unwrap_or_else(|| "-".to_string()),
            self.gate_state.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string()),
            match (self.close_permitted, self.hedge_on_close) {
                (Some(true), Some(true)) => "hedged",
                (Some(true), _) => "yes",
                _ => "no",
            },
            self.active_objection.map(|o| o.name()).unwrap_or("-"),
            self.recommended_pace.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            self.recommended_tone.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string()),
            self.snapshot.patience_remaining,
            self.reason.code()
        )
    }
}
