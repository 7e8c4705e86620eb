//! Integration tests for Slice 4
//!
//! Tests the session path: TurnInput → CallSession → TurnDirective → snapshot → resume

use pretty_assertions::assert_eq;
use prospect_sim::core::emotion::renormalize;
use prospect_sim::core::{build_profile, load_and_validate_snapshot, save_snapshot, CallSession};
use prospect_sim::types::{
    Emotion, GateState, ObjectionKind, PersonaRequest, ProspectProfile, ReasonCode, SessionPhase,
    SessionSnapshot, SnapshotReason, TerminalReason, Trigger, TurnInput, TurnPerformance,
};
use prospect_sim::{EngineConfig, EngineError, EARLY_CLOSE_DEFENSIVE_DELTA, EARLY_CLOSE_SKEPTICAL_DELTA};

fn profile(rating: i64, seed: u64) -> ProspectProfile {
    let request = PersonaRequest::new(ObjectionKind::Price).with_rating(rating).with_seed(seed);
    build_profile(&request, None).unwrap()
}

fn start(rating: i64, seed: u64) -> CallSession {
    CallSession::new("session_slice4", profile(rating, seed), &EngineConfig::default()).unwrap()
}

fn turn(secs: u32, triggers: &[Trigger]) -> TurnInput {
    triggers.iter().fold(TurnInput::new(secs), |t, trig| t.with_trigger(*trig))
}

/// Early close at turn 2: counted, and the next update carries +10/+10
#[test]
fn test_early_close_penalty_on_next_update() {
    let mut session = start(1500, 3);
    session.process_turn(&turn(10, &[Trigger::ActiveListening])).unwrap();

    let d = session.process_turn(&turn(10, &[Trigger::AttemptsClose])).unwrap();
    assert_eq!(d.reason, ReasonCode::R203_EARLY_CLOSE_PENALIZED);
    assert!(!d.session_terminal);
    assert_eq!(d.snapshot.early_close_attempts, 1);
    let before_penalty = session.emotions();

    session.process_turn(&turn(10, &[Trigger::ProvesRoi])).unwrap();
    let mut raw = before_penalty.to_array().map(|v| v as i32);
    raw[Emotion::Skeptical.index()] += EARLY_CLOSE_SKEPTICAL_DELTA as i32;
    raw[Emotion::Defensive.index()] += EARLY_CLOSE_DEFENSIVE_DELTA as i32;
    for (emotion, delta) in Trigger::ProvesRoi.deltas() {
        raw[emotion.index()] += *delta as i32;
    }
    assert_eq!(session.emotions(), renormalize(raw));
    assert_eq!(session.gate().early_close_attempts(), 1);
}

/// Talk time past patience ends the call; later turns are rejected untouched
#[test]
fn test_patience_exhaustion() {
    let mut session = start(2500, 1);
    assert_eq!(session.patience_remaining(), 180);

    for _ in 0..5 {
        let d = session.process_turn(&turn(30, &[Trigger::AsksOpenQuestion])).unwrap();
        assert!(!d.session_terminal);
    }
    let d = session.process_turn(&turn(30, &[Trigger::AsksOpenQuestion])).unwrap();
    assert_eq!(d.termination_reason, Some(TerminalReason::PatienceExhausted));
    assert_eq!(d.termination_marker.as_deref(), Some(prospect_sim::MARKER_PATIENCE_EXHAUSTED));
    assert_eq!(d.reason, ReasonCode::R403_PATIENCE_EXHAUSTED);
    assert_eq!(session.phase(), SessionPhase::PatienceExhausted);
    assert!(session.phase().is_terminal());

    let frozen = session.snapshot();
    let err = session.process_turn(&turn(1, &[])).unwrap_err();
    assert!(matches!(err, EngineError::InvalidStateTransition { .. }));
    assert_eq!(session.snapshot(), frozen);
}

/// Oversized talk time saturates at zero instead of wrapping
#[test]
fn test_patience_never_negative() {
    let mut session = start(900, 2);
    let d = session.process_turn(&TurnInput::new(u32::MAX)).unwrap();
    assert_eq!(d.snapshot.patience_remaining, 0);
    assert!(d.session_terminal);
}

/// Three poor verdicts in a row and the prospect hangs up
#[test]
fn test_frustration_exit() {
    let mut session = start(1200, 5);
    let poor = turn(5, &[Trigger::PoorDiscovery]).with_performance(TurnPerformance::Poor);
    session.process_turn(&poor).unwrap();
    session.process_turn(&poor).unwrap();
    let d = session.process_turn(&poor).unwrap();
    assert_eq!(d.termination_reason, Some(TerminalReason::FrustrationExit));
    assert_eq!(d.recommended_tone, None);
    assert_eq!(session.phase(), SessionPhase::FrustrationExit);
}

/// A configured threshold replaces the default
#[test]
fn test_frustration_threshold_from_config() {
    let config = EngineConfig::from_toml("frustration_threshold = 5").unwrap();
    let mut session = CallSession::new("session_patient", profile(1200, 5), &config).unwrap();
    let poor = TurnInput::new(5).with_performance(TurnPerformance::Poor);
    for _ in 0..4 {
        assert!(!session.process_turn(&poor).unwrap().session_terminal);
    }
    assert!(session.process_turn(&poor).unwrap().session_terminal);
}

/// Full call: objections raised in order, handled, then closed
#[test]
fn test_call_to_close() {
    let mut session = start(1850, 21);
    let objections = session.profile().objections.clone();
    assert_eq!(objections.len(), 3);

    let d = session.process_turn(&turn(20, &[Trigger::AsksOpenQuestion])).unwrap();
    assert_eq!(d.active_objection, Some(objections[0]));
    assert_eq!(d.reason, ReasonCode::R201_OBJECTION_RAISED);

    let d = session.process_turn(&turn(20, &[Trigger::HandlesObjectionGracefully])).unwrap();
    assert_eq!(d.gate_state, Some(GateState::Cleared));
    assert_eq!(d.close_permitted, Some(true));
    assert_eq!(d.reason, ReasonCode::R204_GATE_CLEARED);

    let d = session.process_turn(&turn(20, &[Trigger::MirrorsDisc, Trigger::AttemptsClose])).unwrap();
    assert_eq!(d.termination_reason, Some(TerminalReason::Closed));
    assert_eq!(d.top_two_emotions, None);
    assert_eq!(d.active_objection, None);
    assert_eq!(session.phase(), SessionPhase::Closed);
}

/// Snapshot JSON carries every field back unchanged
#[test]
fn test_snapshot_json_round_trip() {
    let mut session = start(2000, 8);
    session.process_turn(&turn(15, &[Trigger::Interrupts])).unwrap();
    session.process_turn(&turn(15, &[Trigger::AttemptsClose])).unwrap();
    let snapshot = session.snapshot();

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
    assert_eq!(back.pending_penalties, 1);
    assert_eq!(back.turn_index, 2);
}

/// Save to disk, resume from the file, and both copies keep agreeing
#[test]
fn test_save_resume_continues_identically() {
    let dir = tempfile::tempdir().unwrap();
    let mut original = start(2300, 13);
    original.process_turn(&turn(20, &[Trigger::PushesPriceEarly])).unwrap();
    original.process_turn(&turn(20, &[Trigger::HandlesObjectionGracefully, Trigger::AttemptsClose])).unwrap();

    let path = save_snapshot(original.profile(), &original.snapshot(), dir.path().to_str().unwrap()).unwrap();
    let envelope = load_and_validate_snapshot(&path).unwrap();
    let mut resumed = CallSession::restore(envelope.profile, &EngineConfig::default(), &envelope.snapshot).unwrap();
    assert_eq!(resumed.snapshot(), original.snapshot());

    let script = [
        turn(10, &[Trigger::ActiveListening]),
        turn(10, &[Trigger::HandlesObjectionGracefully]),
        turn(10, &[Trigger::IgnoresObjection, Trigger::AttemptsClose]),
    ];
    for input in &script {
        let a = original.process_turn(input).unwrap();
        let b = resumed.process_turn(input).unwrap();
        assert_eq!(a.snapshot, b.snapshot);
        assert_eq!(a.active_objection, b.active_objection);
    }
}

/// A hand-edited file fails the digest check
#[test]
fn test_tampered_snapshot_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = start(1000, 4);
    session.process_turn(&turn(10, &[Trigger::ActiveListening])).unwrap();
    let path = save_snapshot(session.profile(), &session.snapshot(), dir.path().to_str().unwrap()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let edited = text.replacen("\"turn_index\": 1", "\"turn_index\": 7", 1);
    assert_ne!(text, edited);
    std::fs::write(&path, edited).unwrap();

    assert_eq!(
        load_and_validate_snapshot(&path).unwrap_err(),
        SnapshotReason::R305_SNAPSHOT_DIGEST_MISMATCH
    );
}
