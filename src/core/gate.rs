//! Objection Gate: close permission as a function of resolved objections
//!
//! State transitions:
//! - GATED → PARTIALLY_CLEARED: resolved ≥ 1, tier policy not yet met (T7–T9)
//! - GATED / PARTIALLY_CLEARED → CLEARED: T0–T6 resolved ≥ 1, T7–T9 resolved == total
//!
//! Early close attempts never move the gate.

use tracing::debug;
use crate::error::GateError;
use crate::types::{GateState, Tier};

/// Objection gate for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectionGate {
    /// Tier policy (cached from the profile)
    tier: Tier,
    /// Prospect hedges even when close is permitted
    hedge_on_close: bool,
    /// Objections this prospect will voice
    total: u8,
    raised: u8,
    resolved: u8,
    early_close_attempts: u32,
}

impl ObjectionGate {
    /// Create a gate for `total` objections under the tier's policy
    pub fn new(tier: Tier, hedge_on_close: bool, total: u8) -> Self {
        Self {
            tier,
            hedge_on_close,
            total,
            raised: 0,
            resolved: 0,
            early_close_attempts: 0,
        }
    }

    /// Rebuild from persisted counters.
    ///
    /// Counters must satisfy `resolved ≤ raised ≤ total`.
    pub fn restore(
        tier: Tier,
        hedge_on_close: bool,
        total: u8,
        raised: u8,
        resolved: u8,
        early_close_attempts: u32,
    ) -> Result<Self, GateError> {
        if resolved > raised || raised > total {
            return Err(GateError::CountersOutOfRange { raised, resolved, total });
        }
        Ok(Self {
            tier,
            hedge_on_close,
            total,
            raised,
            resolved,
            early_close_attempts,
        })
    }

    /// Current gate state, derived from the counters
    pub fn state(&self) -> GateState {
        if self.resolved == 0 {
            return GateState::Gated;
        }
        let policy_met = if self.tier.requires_all_objections() {
            self.resolved == self.total
        } else {
            true
        };
        if policy_met {
            GateState::Cleared
        } else {
            GateState::PartiallyCleared
        }
    }

    /// Close permitted ⇔ CLEARED
    pub fn close_permitted(&self) -> bool {
        self.state() == GateState::Cleared
    }

    pub fn hedge_on_close(&self) -> bool {
        self.hedge_on_close
    }

    /// A raised objection is still waiting for a resolution
    pub fn has_open_objection(&self) -> bool {
        self.raised > self.resolved
    }

    /// Index (into the profile's objection list) of the open objection
    pub fn open_objection_index(&self) -> Option<usize> {
        if self.has_open_objection() {
            Some(self.resolved as usize)
        } else {
            None
        }
    }

    /// Whether the prospect should voice its next objection now
    pub fn should_raise_next(&self) -> bool {
        !self.has_open_objection() && self.raised < self.total && !self.close_permitted()
    }

    pub fn record_objection_raised(&mut self) -> Result<GateState, GateError> {
        if self.raised >= self.total {
            return Err(GateError::AllObjectionsRaised { total: self.total });
        }
        self.raised += 1;
        debug!(raised = self.raised, total = self.total, "objection raised");
        Ok(self.state())
    }

    pub fn record_objection_resolved(&mut self) -> Result<GateState, GateError> {
        if self.resolved >= self.raised {
            return Err(GateError::NothingToResolve {
                raised: self.raised,
                resolved: self.resolved,
            });
        }
        self.resolved += 1;
        debug!(resolved = self.resolved, state = %self.state(), "objection resolved");
        Ok(self.state())
    }

    /// Count a premature close. The caller schedules the emotion penalty.
    pub fn record_early_close_attempt(&mut self) {
        self.early_close_attempts += 1;
    }

    pub fn early_close_attempts(&self) -> u32 {
        self.early_close_attempts
    }

    pub fn raised(&self) -> u8 {
        self.raised
    }

    pub fn resolved(&self) -> u8 {
        self.resolved
    }

    pub fn total(&self) -> u8 {
        self.total
    }
}

// =============================================================================
// TESTS
// =============================================================================
