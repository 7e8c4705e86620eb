//! Session lifecycle and turn input

use serde::{Deserialize, Serialize};
use crate::types::TriggerInput;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalReason {
    /// Still running
    None,
    /// Prospect agreed to a next step
    Closed,
    /// Prospect hung up after repeated poor turns
    FrustrationExit,
    /// Talk-time budget used up
    PatienceExhausted,
    /// Caller cancelled at a turn boundary
    Cancelled,
}

impl TerminalReason {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminalReason::None)
    }

    /// Fixed marker handed to the renderer instead of free text
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            TerminalReason::None => None,
            TerminalReason::Closed => Some(crate::MARKER_CLOSED),
            TerminalReason::FrustrationExit => Some(crate::MARKER_FRUSTRATION_EXIT),
            TerminalReason::PatienceExhausted => Some(crate::MARKER_PATIENCE_EXHAUSTED),
            TerminalReason::Cancelled => Some(crate::MARKER_CANCELLED),
        }
    }
}

impl std::fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TerminalReason::None => "NONE",
            TerminalReason::Closed => "CLOSED",
            TerminalReason::FrustrationExit => "FRUSTRATION_EXIT",
            TerminalReason::PatienceExhausted => "PATIENCE_EXHAUSTED",
            TerminalReason::Cancelled => "CANCELLED",
        };
        write!(f, "{}", name)
    }
}

/// Orchestrator lifecycle.
///
/// `ProcessingTurn` and `EmittingDirective` only exist while a turn is being
/// handled; between turns a live session is always `AwaitingRepTurn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    AwaitingRepTurn,
    ProcessingTurn,
    EmittingDirective,
    Closed,
    FrustrationExit,
    PatienceExhausted,
    Cancelled,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionPhase::Closed
                | SessionPhase::FrustrationExit
                | SessionPhase::PatienceExhausted
                | SessionPhase::Cancelled
        )
    }

    /// Terminal phase for a terminal reason
    pub fn for_reason(reason: TerminalReason) -> SessionPhase {
        match reason {
            TerminalReason::None => SessionPhase::AwaitingRepTurn,
            TerminalReason::Closed => SessionPhase::Closed,
            TerminalReason::FrustrationExit => SessionPhase::FrustrationExit,
            TerminalReason::PatienceExhausted => SessionPhase::PatienceExhausted,
            TerminalReason::Cancelled => SessionPhase::Cancelled,
        }
    }
}

/// External verdict on the representative's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPerformance {
    Good,
    #[default]
    Neutral,
    Poor,
}

/// One classified representative turn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TurnInput {
    /// Triggers in the order they occurred
    #[serde(default)]
    pub triggers: Vec<TriggerInput>,
    /// Representative talk time this turn, seconds
    #[serde(default)]
    pub talk_time_secs: u32,
    #[serde(default)]
    pub performance: TurnPerformance,
}

impl TurnInput {
    pub fn new(talk_time_secs: u32) -> Self {
        Self {
            triggers: Vec::new(),
            talk_time_secs,
            performance: TurnPerformance::Neutral,
        }
    }

    pub fn with_trigger(mut self, trigger: impl Into<TriggerInput>) -> Self {
        self.triggers.push(trigger.into());
        self
    }

    pub fn with_performance(mut self, performance: TurnPerformance) -> Self {
        self.performance = performance;
        self
    }
}
