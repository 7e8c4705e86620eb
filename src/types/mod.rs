//! Core types for the prospect engine

mod emotion;
mod trigger;
mod tier;
mod disc;
mod objection;
mod session;
mod reason;
mod directive;
mod snapshot;
mod persona;

pub use emotion::{Emotion, EmotionVector};
pub use trigger::{Trigger, TriggerInput};
pub use tier::{Tier, TierConfig, ObjectionLayers, BiasMode, Tactic};
pub use disc::{DiscAxis, DiscProfile, DiscTraits, DecisionStyle, PushbackReaction};
pub use objection::{ObjectionKind, GateState};
pub use session::{TerminalReason, SessionPhase, TurnPerformance, TurnInput};
pub use reason::ReasonCode;
pub use directive::{TurnDirective, Pace, Tone};
pub use snapshot::{SessionSnapshot, SnapshotEnvelope, SnapshotReason};
pub use persona::{
    PersonaRequest, ProspectProfile, ProspectIdentity, BiasSplit,
    FitStrictness, CallType, ToneHint, PersonaBrief,
};
