//! Reason codes attached to every directive
//! R1xx: turn flow, R2xx: objection gate, R4xx: termination

use serde::{Deserialize, Serialize};

/// Why a directive looks the way it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Turn flow
    // =========================================================================
    /// Turn applied, nothing notable
    R101_TURN_APPLIED,
    /// Turn carried no usable trigger (only patience moved)
    R102_NO_USABLE_TRIGGER,

    // =========================================================================
    // R2xx: Objection gate
    // =========================================================================
    /// A new objection was raised this turn
    R201_OBJECTION_RAISED,
    /// An open objection was resolved this turn
    R202_OBJECTION_RESOLVED,
    /// Representative tried to close before the gate cleared
    R203_EARLY_CLOSE_PENALIZED,
    /// Gate cleared this turn; close now permitted
    R204_GATE_CLEARED,

    // =========================================================================
    // R4xx: Termination
    // =========================================================================
    /// Prospect agreed to a next step
    R401_CLOSED,
    /// Prospect hung up
    R402_FRUSTRATION_EXIT,
    /// Patience budget used up
    R403_PATIENCE_EXHAUSTED,
    /// Session cancelled by caller
    R404_CANCELLED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_TURN_APPLIED => "R101_TURN_APPLIED",
            Self::R102_NO_USABLE_TRIGGER => "R102_NO_USABLE_TRIGGER",
            Self::R201_OBJECTION_RAISED => "R201_OBJECTION_RAISED",
            Self::R202_OBJECTION_RESOLVED => "R202_OBJECTION_RESOLVED",
            Self::R203_EARLY_CLOSE_PENALIZED => "R203_EARLY_CLOSE_PENALIZED",
            Self::R204_GATE_CLEARED => "R204_GATE_CLEARED",
            Self::R401_CLOSED => "R401_CLOSED",
            Self::R402_FRUSTRATION_EXIT => "R402_FRUSTRATION_EXIT",
            Self::R403_PATIENCE_EXHAUSTED => "R403_PATIENCE_EXHAUSTED",
            Self::R404_CANCELLED => "R404_CANCELLED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_TURN_APPLIED => "Turn applied",
            Self::R102_NO_USABLE_TRIGGER => "No usable trigger this turn",
            Self::R201_OBJECTION_RAISED => "Prospect raises a new objection",
            Self::R202_OBJECTION_RESOLVED => "Objection resolved",
            Self::R203_EARLY_CLOSE_PENALIZED => "Premature close attempt",
            Self::R204_GATE_CLEARED => "Gate cleared - close permitted",
            Self::R401_CLOSED => "Prospect agrees to next step",
            Self::R402_FRUSTRATION_EXIT => "Prospect hangs up",
            Self::R403_PATIENCE_EXHAUSTED => "Prospect out of time",
            Self::R404_CANCELLED => "Call cancelled",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
