//! prospect-sim: deterministic prospect behavior engine for sales-call roleplay
//!
//! The engine decides *how* a simulated prospect feels and whether it may agree
//! to a next step. Rendering those decisions into spoken words is left to an
//! external language-generation collaborator that consumes [`types::TurnDirective`].
//!
//! Flow per representative turn:
//! classified triggers → EmotionEngine → ObjectionGate → CallSession → directive

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{EngineError, GateError};

// =============================================================================
// EMOTION VECTOR
// =============================================================================

/// Every emotion vector sums to exactly this many points
pub const EMOTION_TOTAL: u8 = 100;

/// Neutral baseline, in bucket priority order
/// (CALM, CURIOUS, ENGAGED, SKEPTICAL, FRUSTRATED, STRESSED, DEFENSIVE)
pub const BASELINE_EMOTIONS: [u8; 7] = [35, 20, 15, 15, 10, 5, 0];

/// Forced delta injected after a premature close attempt
pub const EARLY_CLOSE_SKEPTICAL_DELTA: i16 = 10;
pub const EARLY_CLOSE_DEFENSIVE_DELTA: i16 = 10;

// =============================================================================
// SESSION
// =============================================================================

/// Consecutive "poor" turns before the prospect hangs up
pub const DEFAULT_FRUSTRATION_THRESHOLD: u32 = 3;

/// Toughness hints accepted by persona intake
pub const TOUGHNESS_HINT_MIN: u8 = 1;
pub const TOUGHNESS_HINT_MAX: u8 = 10;

// =============================================================================
// TERMINATION MARKERS [fixed, never free text]
// =============================================================================

pub const MARKER_CLOSED: &str = "[PROSPECT_AGREES_NEXT_STEP]";
pub const MARKER_FRUSTRATION_EXIT: &str = "[PROSPECT_HANGS_UP]";
pub const MARKER_PATIENCE_EXHAUSTED: &str = "[PROSPECT_OUT_OF_TIME]";
pub const MARKER_CANCELLED: &str = "[CALL_CANCELLED]";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
