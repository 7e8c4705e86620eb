//! Call Session: per-session turn driver
//!
//! Lifecycle:
//! - AWAITING_REP_TURN → PROCESSING_TURN → EMITTING_DIRECTIVE → AWAITING_REP_TURN
//! - terminal: CLOSED, FRUSTRATION_EXIT, PATIENCE_EXHAUSTED, CANCELLED
//!
//! Per turn:
//! 1. patience -= talk time; 0 ⇒ PATIENCE_EXHAUSTED (no triggers applied)
//! 2. triggers applied in order (attemptsClose handled by the gate)
//! 3. early-close penalties from this turn are queued for the next trigger
//! 4. close ⇒ CLOSED, else consecutive poor turns ≥ threshold ⇒ FRUSTRATION_EXIT
//! 5. next objection raised if the prospect has nothing open
//!
//! A turn is computed on a scratch copy and only committed on success, so a
//! failed turn leaves the session exactly as it was.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::directive::{recommend_pace, recommend_tone};
use crate::core::disc::DiscGenerator;
use crate::core::emotion::EmotionEngine;
use crate::core::gate::ObjectionGate;
use crate::core::tier_table::TierTable;
use crate::error::{EngineError, GateError};
use crate::types::{
    DiscTraits, EmotionVector, GateState, ObjectionKind, PersonaBrief, ProspectProfile, ReasonCode,
    SessionPhase, SessionSnapshot, SnapshotReason, TerminalReason, Trigger, TurnDirective,
    TurnInput, TurnPerformance,
};

/// One simulated call
#[derive(Debug, Clone)]
pub struct CallSession {
    id: String,
    profile: ProspectProfile,
    /// Derived from the profile's DISC split at creation
    traits: DiscTraits,
    emotions: EmotionEngine,
    gate: ObjectionGate,
    frustration_threshold: u32,
    turn_index: u32,
    patience_remaining: u32,
    consecutive_poor_turns: u32,
    phase: SessionPhase,
    terminal_reason: TerminalReason,
}

/// What happened during one turn (drives the reason code)
#[derive(Debug, Default)]
struct TurnOutcome {
    applied_triggers: usize,
    early_closes: u32,
    resolved: bool,
    raised: bool,
    gate_cleared: bool,
    close_accepted: bool,
}

impl CallSession {
    /// Start a session for a profile
    pub fn new(
        id: impl Into<String>,
        profile: ProspectProfile,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let id = id.into();
        if profile.objections.is_empty() {
            return Err(EngineError::configuration("profile has no objections"));
        }
        let tier = TierTable::config(profile.tier);
        let traits = DiscGenerator::new().traits(&profile.disc);
        let emotions = EmotionEngine::new(profile.bias_split);
        let gate = ObjectionGate::new(tier.tier, tier.hedge_on_close, profile.objection_count());

        info!(session = %id, tier = %tier.tier, patience = tier.patience_secs, "session started");
        Ok(Self {
            id,
            traits,
            emotions,
            gate,
            frustration_threshold: config.frustration_threshold,
            turn_index: 0,
            patience_remaining: tier.patience_secs,
            consecutive_poor_turns: 0,
            phase: SessionPhase::AwaitingRepTurn,
            terminal_reason: TerminalReason::None,
            profile,
        })
    }

    /// Resume a session from a snapshot taken against the same profile
    pub fn restore(
        profile: ProspectProfile,
        config: &EngineConfig,
        snapshot: &SessionSnapshot,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if !snapshot.emotions.is_normalized() {
            return Err(SnapshotReason::R302_SNAPSHOT_VECTOR_INVALID.into());
        }
        if SessionPhase::for_reason(snapshot.terminal_reason) != snapshot.phase {
            return Err(SnapshotReason::R301_SNAPSHOT_MISMATCH.into());
        }
        // every queued penalty comes from a counted early close
        if snapshot.pending_penalties > snapshot.early_close_attempts {
            return Err(SnapshotReason::R301_SNAPSHOT_MISMATCH.into());
        }

        let tier = TierTable::config(profile.tier);
        let gate = ObjectionGate::restore(
            tier.tier,
            tier.hedge_on_close,
            profile.objection_count(),
            snapshot.raised_count,
            snapshot.resolved_count,
            snapshot.early_close_attempts,
        )
        .map_err(|e| EngineError::invalid_transition(&snapshot.session_id, snapshot.turn_index, e.to_string()))?;
        if gate.state() != snapshot.gate_state {
            return Err(SnapshotReason::R301_SNAPSHOT_MISMATCH.into());
        }

        info!(session = %snapshot.session_id, turn = snapshot.turn_index, "session restored");
        Ok(Self {
            id: snapshot.session_id.clone(),
            traits: DiscGenerator::new().traits(&profile.disc),
            emotions: EmotionEngine::restore(snapshot.emotions, snapshot.pending_penalties),
            gate,
            frustration_threshold: config.frustration_threshold,
            turn_index: snapshot.turn_index,
            patience_remaining: snapshot.patience_remaining,
            consecutive_poor_turns: snapshot.consecutive_poor_turns,
            phase: snapshot.phase,
            terminal_reason: snapshot.terminal_reason,
            profile,
        })
    }

    /// Process one representative turn
    pub fn process_turn(&mut self, input: &TurnInput) -> Result<TurnDirective, EngineError> {
        self.ensure_live()?;
        let mut next = self.clone();
        let directive = next.run_turn(input)?;
        *self = next;
        Ok(directive)
    }

    /// End the call at a turn boundary
    pub fn cancel(&mut self) -> Result<TurnDirective, EngineError> {
        self.ensure_live()?;
        self.terminate(TerminalReason::Cancelled);
        Ok(self.build_directive(ReasonCode::R404_CANCELLED))
    }

    fn ensure_live(&self) -> Result<(), EngineError> {
        if self.terminal_reason.is_terminal() {
            return Err(EngineError::invalid_transition(
                &self.id,
                self.turn_index,
                format!("session already ended ({})", self.terminal_reason),
            ));
        }
        Ok(())
    }

    fn run_turn(&mut self, input: &TurnInput) -> Result<TurnDirective, EngineError> {
        self.phase = SessionPhase::ProcessingTurn;
        self.turn_index += 1;
        self.patience_remaining = self.patience_remaining.saturating_sub(input.talk_time_secs);
        debug!(
            session = %self.id,
            turn = self.turn_index,
            patience = self.patience_remaining,
            triggers = input.triggers.len(),
            "processing turn"
        );

        if self.patience_remaining == 0 {
            self.terminate(TerminalReason::PatienceExhausted);
            return Ok(self.build_directive(ReasonCode::R403_PATIENCE_EXHAUSTED));
        }

        let mut outcome = TurnOutcome::default();
        for raw in &input.triggers {
            let Some(id) = raw.identifier() else {
                warn!(session = %self.id, turn = self.turn_index, input = ?raw, "malformed trigger input ignored");
                continue;
            };

            if id == Trigger::AttemptsClose.id() {
                if self.gate.close_permitted() {
                    outcome.close_accepted = true;
                    break;
                }
                self.gate.record_early_close_attempt();
                outcome.early_closes += 1;
                continue;
            }

            let Some(trigger) = self.emotions.apply_trigger_id(id) else {
                continue;
            };
            outcome.applied_triggers += 1;

            if trigger == Trigger::HandlesObjectionGracefully && self.gate.has_open_objection() {
                let before = self.gate.state();
                let after = self.gate.record_objection_resolved().map_err(|e| self.gate_error(e))?;
                outcome.resolved = true;
                outcome.gate_cleared |= before != GateState::Cleared && after == GateState::Cleared;
            }
        }

        for _ in 0..outcome.early_closes {
            self.emotions.schedule_early_close_penalty();
        }

        self.consecutive_poor_turns = match input.performance {
            TurnPerformance::Poor => self.consecutive_poor_turns + 1,
            _ => 0,
        };

        if outcome.close_accepted {
            self.terminate(TerminalReason::Closed);
            return Ok(self.build_directive(ReasonCode::R401_CLOSED));
        }
        if self.consecutive_poor_turns >= self.frustration_threshold {
            self.terminate(TerminalReason::FrustrationExit);
            return Ok(self.build_directive(ReasonCode::R402_FRUSTRATION_EXIT));
        }

        if self.gate.should_raise_next() {
            self.gate.record_objection_raised().map_err(|e| self.gate_error(e))?;
            outcome.raised = true;
        }

        self.phase = SessionPhase::EmittingDirective;
        let reason = if outcome.gate_cleared {
            ReasonCode::R204_GATE_CLEARED
        } else if outcome.early_closes > 0 {
            ReasonCode::R203_EARLY_CLOSE_PENALIZED
        } else if outcome.resolved {
            ReasonCode::R202_OBJECTION_RESOLVED
        } else if outcome.raised {
            ReasonCode::R201_OBJECTION_RAISED
        } else if outcome.applied_triggers == 0 {
            ReasonCode::R102_NO_USABLE_TRIGGER
        } else {
            ReasonCode::R101_TURN_APPLIED
        };
        self.phase = SessionPhase::AwaitingRepTurn;
        Ok(self.build_directive(reason))
    }

    fn terminate(&mut self, reason: TerminalReason) {
        self.terminal_reason = reason;
        self.phase = SessionPhase::for_reason(reason);
        info!(
            session = %self.id,
            turn = self.turn_index,
            reason = %reason,
            emotions = %self.emotions.vector(),
            "session ended"
        );
    }

    fn gate_error(&self, err: GateError) -> EngineError {
        EngineError::invalid_transition(&self.id, self.turn_index, err.to_string())
    }

    fn build_directive(&self, reason: ReasonCode) -> TurnDirective {
        let emotions = self.emotions.vector();
        let terminal = self.terminal_reason.is_terminal();
        let live = !terminal;
        TurnDirective {
            timestamp: Utc::now(),
            session_id: self.id.clone(),
            turn_index: self.turn_index,
            top_two_emotions: live.then(|| emotions.top_two()),
            gate_state: live.then(|| self.gate.state()),
            close_permitted: live.then(|| self.gate.close_permitted()),
            hedge_on_close: live.then(|| self.gate.hedge_on_close()),
            active_objection: if live { self.active_objection() } else { None },
            recommended_pace: live.then(|| recommend_pace(&self.traits, &emotions)),
            recommended_tone: live.then(|| recommend_tone(&self.traits, &emotions)),
            session_terminal: terminal,
            termination_reason: terminal.then_some(self.terminal_reason),
            termination_marker: self.terminal_reason.marker().map(String::from),
            reason,
            snapshot: self.snapshot(),
        }
    }

    /// Current persisted-state view
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            emotions: self.emotions.vector(),
            gate_state: self.gate.state(),
            raised_count: self.gate.raised(),
            resolved_count: self.gate.resolved(),
            early_close_attempts: self.gate.early_close_attempts(),
            pending_penalties: self.emotions.pending_penalties(),
            consecutive_poor_turns: self.consecutive_poor_turns,
            turn_index: self.turn_index,
            patience_remaining: self.patience_remaining,
            phase: self.phase,
            terminal_reason: self.terminal_reason,
        }
    }

    /// Tier row and DISC tendencies for the renderer
    pub fn persona_brief(&self) -> PersonaBrief {
        PersonaBrief::new(TierTable::config(self.profile.tier), self.traits.clone())
    }

    /// Objection the prospect is currently pressing
    pub fn active_objection(&self) -> Option<ObjectionKind> {
        self.gate
            .open_objection_index()
            .and_then(|i| self.profile.objections.get(i).copied())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn profile(&self) -> &ProspectProfile {
        &self.profile
    }

    pub fn traits(&self) -> &DiscTraits {
        &self.traits
    }

    pub fn emotions(&self) -> EmotionVector {
        self.emotions.vector()
    }

    pub fn gate(&self) -> &ObjectionGate {
        &self.gate
    }

    pub fn turn_index(&self) -> u32 {
        self.turn_index
    }

    pub fn patience_remaining(&self) -> u32 {
        self.patience_remaining
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn terminal_reason(&self) -> TerminalReason {
        self.terminal_reason
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal_reason.is_terminal()
    }
}

/// Random session identifier
pub fn new_session_id() -> String {
    format!("session_{:016x}", rand::random::<u64>())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emotion::renormalize;
    use crate::types::{BiasSplit, DiscProfile, Emotion, ProspectIdentity, Tier, TriggerInput};
    use pretty_assertions::assert_eq;

    fn profile(tier: Tier, objections: Vec<ObjectionKind>) -> ProspectProfile {
        ProspectProfile {
            identity: ProspectIdentity::default(),
            disc: DiscProfile::new(10, 50, 20, 20),
            difficulty_rating: TierTable::config(tier).min_rating,
            tier,
            objections,
            bias_split: BiasSplit::default(),
            fit_strictness: Default::default(),
            call_type: Default::default(),
            tone: Default::default(),
            business_description: String::new(),
            seed: 0,
        }
    }

    fn session(tier: Tier, objections: Vec<ObjectionKind>) -> CallSession {
        CallSession::new("session_test", profile(tier, objections), &EngineConfig::default()).unwrap()
    }

    fn turn(triggers: &[Trigger]) -> TurnInput {
        triggers.iter().fold(TurnInput::new(10), |t, trig| t.with_trigger(*trig))
    }

    #[test]
    fn test_first_turn_raises_focus_objection() {
        let mut s = session(Tier::T2, vec![ObjectionKind::Price]);
        let d = s.process_turn(&turn(&[Trigger::ActiveListening])).unwrap();
        assert_eq!(d.turn_index, 1);
        assert_eq!(d.active_objection, Some(ObjectionKind::Price));
        assert_eq!(d.reason, ReasonCode::R201_OBJECTION_RAISED);
        assert_eq!(d.gate_state, Some(GateState::Gated));
        assert!(d.recommended_tone.is_some());
        assert_eq!(s.phase(), SessionPhase::AwaitingRepTurn);
    }

    #[test]
    fn test_resolve_then_close() {
        let mut s = session(Tier::T2, vec![ObjectionKind::Price]);
        s.process_turn(&turn(&[])).unwrap();

        let d = s.process_turn(&turn(&[Trigger::HandlesObjectionGracefully])).unwrap();
        assert_eq!(d.reason, ReasonCode::R204_GATE_CLEARED);
        assert_eq!(d.close_permitted, Some(true));
        assert_eq!(d.hedge_on_close, Some(false));
        assert_eq!(d.active_objection, None);

        let d = s.process_turn(&turn(&[Trigger::AttemptsClose])).unwrap();
        assert!(d.session_terminal);
        assert_eq!(d.termination_reason, Some(TerminalReason::Closed));
        assert_eq!(d.termination_marker.as_deref(), Some(crate::MARKER_CLOSED));
        assert_eq!(d.recommended_pace, None);
        assert_eq!(d.top_two_emotions, None);
        assert_eq!(d.gate_state, None);
        assert_eq!(d.close_permitted, None);
        assert_eq!(s.phase(), SessionPhase::Closed);
    }

    #[test]
    fn test_early_close_penalty_lands_next_turn() {
        let mut s = session(Tier::T3, vec![ObjectionKind::Price, ObjectionKind::Trust]);
        s.process_turn(&turn(&[Trigger::ActiveListening])).unwrap();
        let after_turn1 = s.emotions();

        let d = s.process_turn(&turn(&[Trigger::AttemptsClose])).unwrap();
        assert_eq!(d.turn_index, 2);
        assert_eq!(d.reason, ReasonCode::R203_EARLY_CLOSE_PENALIZED);
        assert_eq!(d.gate_state, Some(GateState::Gated));
        assert_eq!(s.gate().early_close_attempts(), 1);
        assert_eq!(s.snapshot().pending_penalties, 1);
        assert_eq!(s.emotions(), after_turn1);

        s.process_turn(&turn(&[Trigger::MirrorsDisc])).unwrap();
        let mut raw = after_turn1.to_array().map(|v| v as i32);
        raw[Emotion::Skeptical.index()] += 10;
        raw[Emotion::Defensive.index()] += 10;
        raw[Emotion::Curious.index()] += 10;
        raw[Emotion::Defensive.index()] -= 10;
        assert_eq!(s.emotions(), renormalize(raw));
        assert_eq!(s.snapshot().pending_penalties, 0);
    }

    #[test]
    fn test_penalty_waits_through_malformed_turn() {
        let mut s = session(Tier::T3, vec![ObjectionKind::Price, ObjectionKind::Trust]);
        s.process_turn(&turn(&[Trigger::AttemptsClose])).unwrap();
        let before = s.emotions();
        assert_eq!(s.snapshot().pending_penalties, 1);

        let input = TurnInput::new(10).with_trigger(TriggerInput::Malformed(serde_json::json!(42)));
        let d = s.process_turn(&input).unwrap();
        assert_eq!(d.reason, ReasonCode::R102_NO_USABLE_TRIGGER);
        assert_eq!(s.emotions(), before);
        assert_eq!(s.snapshot().pending_penalties, 1);
        assert_eq!(s.patience_remaining(), 300 - 20);

        // still lands on the next real trigger
        s.process_turn(&turn(&[Trigger::ActiveListening])).unwrap();
        assert_eq!(s.snapshot().pending_penalties, 0);
        assert_ne!(s.emotions(), before);
    }

    #[test]
    fn test_patience_exhaustion_is_final() {
        let mut s = session(Tier::T6, vec![ObjectionKind::Price]);
        let d = s.process_turn(&TurnInput::new(200).with_trigger(Trigger::ProvesRoi)).unwrap();
        assert!(!d.session_terminal);
        assert_eq!(d.snapshot.patience_remaining, 40);

        let before = s.emotions();
        let d = s.process_turn(&TurnInput::new(45).with_trigger(Trigger::Interrupts)).unwrap();
        assert_eq!(d.termination_reason, Some(TerminalReason::PatienceExhausted));
        assert_eq!(d.snapshot.patience_remaining, 0);
        // only the termination signal is left
        assert_eq!(d.top_two_emotions, None);
        assert_eq!(d.gate_state, None);
        assert_eq!(d.close_permitted, None);
        assert_eq!(d.hedge_on_close, None);
        assert_eq!(d.active_objection, None);
        assert_eq!(d.recommended_tone, None);
        // no triggers applied on the exhausting turn
        assert_eq!(s.emotions(), before);

        let snapshot = s.snapshot();
        let err = s.process_turn(&turn(&[Trigger::ActiveListening])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidStateTransition { turn_index: 2, .. }));
        assert_eq!(s.snapshot(), snapshot);
        assert!(s.cancel().is_err());
    }

    #[test]
    fn test_frustration_exit_after_threshold() {
        let mut s = session(Tier::T4, vec![ObjectionKind::Price, ObjectionKind::Need]);
        let poor = TurnInput::new(5).with_performance(TurnPerformance::Poor);
        assert!(!s.process_turn(&poor).unwrap().session_terminal);
        assert!(!s.process_turn(&poor).unwrap().session_terminal);
        // a neutral turn resets the streak
        s.process_turn(&TurnInput::new(5)).unwrap();
        assert!(!s.process_turn(&poor).unwrap().session_terminal);
        assert!(!s.process_turn(&poor).unwrap().session_terminal);
        let d = s.process_turn(&poor).unwrap();
        assert_eq!(d.termination_reason, Some(TerminalReason::FrustrationExit));
        assert_eq!(d.termination_marker.as_deref(), Some(crate::MARKER_FRUSTRATION_EXIT));
        assert_eq!(d.reason, ReasonCode::R402_FRUSTRATION_EXIT);
    }

    #[test]
    fn test_close_wins_over_frustration() {
        let mut s = session(Tier::T1, vec![ObjectionKind::Price]);
        s.process_turn(&turn(&[])).unwrap();
        s.process_turn(&turn(&[Trigger::HandlesObjectionGracefully])).unwrap();
        let config = EngineConfig { frustration_threshold: 1, ..EngineConfig::default() };
        let mut s = CallSession::restore(s.profile().clone(), &config, &s.snapshot()).unwrap();
        let d = s
            .process_turn(&turn(&[Trigger::AttemptsClose]).with_performance(TurnPerformance::Poor))
            .unwrap();
        assert_eq!(d.termination_reason, Some(TerminalReason::Closed));
    }

    #[test]
    fn test_high_tier_needs_all_objections() {
        let objections = vec![ObjectionKind::Price, ObjectionKind::Trust, ObjectionKind::Timing];
        let mut s = session(Tier::T9, objections.clone());
        let handle = turn(&[Trigger::HandlesObjectionGracefully]);

        let d = s.process_turn(&turn(&[])).unwrap();
        assert_eq!(d.active_objection, Some(ObjectionKind::Price));
        let d = s.process_turn(&handle).unwrap();
        assert_eq!(d.gate_state, Some(GateState::PartiallyCleared));
        assert_eq!(d.active_objection, Some(ObjectionKind::Trust));
        let d = s.process_turn(&handle).unwrap();
        assert_eq!(d.close_permitted, Some(false));
        assert_eq!(d.active_objection, Some(ObjectionKind::Timing));
        let d = s.process_turn(&handle).unwrap();
        assert_eq!(d.close_permitted, Some(true));
        assert_eq!(d.hedge_on_close, Some(true));
        assert_eq!(d.reason, ReasonCode::R204_GATE_CLEARED);
    }

    #[test]
    fn test_malformed_and_unknown_triggers_still_cost_patience() {
        let mut s = session(Tier::T0, vec![ObjectionKind::Price]);
        s.process_turn(&turn(&[])).unwrap();
        let before = s.emotions();
        let input = TurnInput::new(30)
            .with_trigger(TriggerInput::Malformed(serde_json::json!(42)))
            .with_trigger("telepathy");
        let d = s.process_turn(&input).unwrap();
        assert_eq!(d.reason, ReasonCode::R102_NO_USABLE_TRIGGER);
        assert_eq!(s.emotions(), before);
        assert_eq!(s.patience_remaining(), 360 - 10 - 30);
    }

    #[test]
    fn test_cancel() {
        let mut s = session(Tier::T5, vec![ObjectionKind::Price, ObjectionKind::Authority]);
        s.process_turn(&turn(&[Trigger::Interrupts])).unwrap();
        let d = s.cancel().unwrap();
        assert_eq!(d.termination_reason, Some(TerminalReason::Cancelled));
        assert_eq!(d.reason, ReasonCode::R404_CANCELLED);
        assert_eq!(s.phase(), SessionPhase::Cancelled);
        assert!(s.process_turn(&turn(&[])).is_err());
    }

    #[test]
    fn test_restore_continues_identically() {
        let mut original = session(Tier::T7, vec![ObjectionKind::Price, ObjectionKind::Trust, ObjectionKind::Need]);
        original.process_turn(&turn(&[Trigger::Interrupts])).unwrap();
        original.process_turn(&turn(&[Trigger::HandlesObjectionGracefully, Trigger::AttemptsClose])).unwrap();

        let snapshot = original.snapshot();
        let mut restored =
            CallSession::restore(original.profile().clone(), &EngineConfig::default(), &snapshot).unwrap();
        assert_eq!(restored.snapshot(), snapshot);

        let next = turn(&[Trigger::ProvesRoi, Trigger::HandlesObjectionGracefully]);
        let a = original.process_turn(&next).unwrap();
        let b = restored.process_turn(&next).unwrap();
        assert_eq!(a.snapshot, b.snapshot);
        assert_eq!(a.reason, b.reason);
    }

    #[test]
    fn test_restore_rejects_bad_snapshots() {
        let s = session(Tier::T3, vec![ObjectionKind::Price, ObjectionKind::Trust]);
        let profile = s.profile().clone();
        let config = EngineConfig::default();

        let mut bad = s.snapshot();
        bad.emotions.calm += 1;
        assert_eq!(
            CallSession::restore(profile.clone(), &config, &bad).unwrap_err(),
            EngineError::Snapshot(SnapshotReason::R302_SNAPSHOT_VECTOR_INVALID)
        );

        let mut bad = s.snapshot();
        bad.raised_count = 3;
        assert!(matches!(
            CallSession::restore(profile.clone(), &config, &bad),
            Err(EngineError::InvalidStateTransition { .. })
        ));

        let mut bad = s.snapshot();
        bad.gate_state = GateState::Cleared;
        assert_eq!(
            CallSession::restore(profile.clone(), &config, &bad).unwrap_err(),
            EngineError::Snapshot(SnapshotReason::R301_SNAPSHOT_MISMATCH)
        );

        // more queued penalties than early closes ever counted
        let mut bad = s.snapshot();
        bad.pending_penalties = 300_000_000;
        assert_eq!(
            CallSession::restore(profile, &config, &bad).unwrap_err(),
            EngineError::Snapshot(SnapshotReason::R301_SNAPSHOT_MISMATCH)
        );
    }

    #[test]
    fn test_persona_brief_carries_tier_and_traits() {
        let s = session(Tier::T6, vec![ObjectionKind::Price]);
        let brief = s.persona_brief();
        let tier = TierTable::config(Tier::T6);
        assert_eq!(brief.label, tier.label);
        assert_eq!(brief.toughness, tier.toughness);
        assert_eq!(brief.patience_secs, tier.patience_secs);
        assert_eq!(brief.tactics, tier.unlocked_tactics().to_vec());
        assert_eq!(brief.traits, *s.traits());
    }

    #[test]
    fn test_profile_without_objections_rejected() {
        let err = CallSession::new("s", profile(Tier::T0, vec![]), &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }
}
