//! Objection identifiers and gate states

use serde::{Deserialize, Serialize};

/// Objections a prospect can voice.
///
/// Persona intake names one as the focus; the rest of a profile's layers are
/// drawn from this pool without replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectionKind {
    /// "It's too expensive"
    Price,
    /// "I don't know you / this sounds too good"
    Trust,
    /// "Not the right time"
    Timing,
    /// "I need to run this by my partner"
    Authority,
    /// "We're fine as we are"
    Need,
    /// "We already work with someone"
    Competition,
    /// "This sounds like a lot of work"
    Complexity,
}

impl ObjectionKind {
    pub const ALL: [ObjectionKind; 7] = [
        ObjectionKind::Price,
        ObjectionKind::Trust,
        ObjectionKind::Timing,
        ObjectionKind::Authority,
        ObjectionKind::Need,
        ObjectionKind::Competition,
        ObjectionKind::Complexity,
    ];

    /// Parse a wire/CLI name (case-insensitive)
    pub fn parse(name: &str) -> Option<ObjectionKind> {
        let lower = name.trim().to_ascii_lowercase();
        ObjectionKind::ALL.iter().copied().find(|k| k.name() == lower)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObjectionKind::Price => "price",
            ObjectionKind::Trust => "trust",
            ObjectionKind::Timing => "timing",
            ObjectionKind::Authority => "authority",
            ObjectionKind::Need => "need",
            ObjectionKind::Competition => "competition",
            ObjectionKind::Complexity => "complexity",
        }
    }
}

impl std::fmt::Display for ObjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Objection gate states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateState {
    /// Nothing resolved yet
    Gated,
    /// Some objections resolved, tier policy not yet satisfied
    PartiallyCleared,
    /// Close permitted
    Cleared,
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GateState::Gated => "GATED",
            GateState::PartiallyCleared => "PARTIALLY_CLEARED",
            GateState::Cleared => "CLEARED",
        };
        write!(f, "{}", name)
    }
}
