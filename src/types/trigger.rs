//! Classified conversational triggers
//!
//! Mapping raw speech to this vocabulary is done upstream by a classifier;
//! the engine only sees identifiers.

use serde::{Deserialize, Serialize};
use crate::types::Emotion;

/// Recognized trigger vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    ActiveListening,
    Interrupts,
    #[serde(rename = "provesROI")]
    ProvesRoi,
    IgnoresObjection,
    #[serde(rename = "mirrorsDISC")]
    MirrorsDisc,
    PushesPriceEarly,
    HandlesObjectionGracefully,
    PoorDiscovery,
    AsksOpenQuestion,
    AttemptsClose,
}

impl Trigger {
    pub const ALL: [Trigger; 10] = [
        Trigger::ActiveListening,
        Trigger::Interrupts,
        Trigger::ProvesRoi,
        Trigger::IgnoresObjection,
        Trigger::MirrorsDisc,
        Trigger::PushesPriceEarly,
        Trigger::HandlesObjectionGracefully,
        Trigger::PoorDiscovery,
        Trigger::AsksOpenQuestion,
        Trigger::AttemptsClose,
    ];

    /// Wire identifier
    pub fn id(&self) -> &'static str {
        match self {
            Trigger::ActiveListening => "activeListening",
            Trigger::Interrupts => "interrupts",
            Trigger::ProvesRoi => "provesROI",
            Trigger::IgnoresObjection => "ignoresObjection",
            Trigger::MirrorsDisc => "mirrorsDISC",
            Trigger::PushesPriceEarly => "pushesPriceEarly",
            Trigger::HandlesObjectionGracefully => "handlesObjectionGracefully",
            Trigger::PoorDiscovery => "poorDiscovery",
            Trigger::AsksOpenQuestion => "asksOpenQuestion",
            Trigger::AttemptsClose => "attemptsClose",
        }
    }

    /// Look up a wire identifier (exact match)
    pub fn from_id(id: &str) -> Option<Trigger> {
        Trigger::ALL.iter().copied().find(|t| t.id() == id)
    }

    /// Signed deltas applied to the emotion vector
    pub fn deltas(&self) -> &'static [(Emotion, i16)] {
        use Emotion::*;
        match self {
            Trigger::ActiveListening => &[(Calm, 10), (Skeptical, -10)],
            Trigger::Interrupts => &[(Frustrated, 15), (Calm, -15)],
            Trigger::ProvesRoi => &[(Engaged, 10), (Skeptical, -10)],
            Trigger::IgnoresObjection => &[(Skeptical, 10), (Defensive, 10), (Engaged, -20)],
            Trigger::MirrorsDisc => &[(Curious, 10), (Defensive, -10)],
            Trigger::PushesPriceEarly => &[(Skeptical, 10), (Stressed, 10), (Curious, -20)],
            Trigger::HandlesObjectionGracefully => &[(Calm, 10), (Frustrated, -10)],
            Trigger::PoorDiscovery => &[(Stressed, 10), (Frustrated, 10), (Calm, -20)],
            Trigger::AsksOpenQuestion => &[(Curious, 10), (Stressed, -10)],
            // Close attempts act through the objection gate
            Trigger::AttemptsClose => &[],
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One trigger as it arrives from the classifier.
///
/// Accepts a bare identifier (`"interrupts"`) or an event object
/// (`{"trigger": "interrupts"}`). Anything else is kept as `Malformed` so the
/// session can log it and carry on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerInput {
    Name(String),
    Event { trigger: String },
    Malformed(serde_json::Value),
}

impl TriggerInput {
    /// The identifier, if the input has a recognizable shape
    pub fn identifier(&self) -> Option<&str> {
        match self {
            TriggerInput::Name(id) => Some(id.as_str()),
            TriggerInput::Event { trigger } => Some(trigger.as_str()),
            TriggerInput::Malformed(_) => None,
        }
    }
}

impl From<&str> for TriggerInput {
    fn from(id: &str) -> Self {
        TriggerInput::Name(id.to_string())
    }
}

impl From<Trigger> for TriggerInput {
    fn from(trigger: Trigger) -> Self {
        TriggerInput::Name(trigger.id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for t in Trigger::ALL {
            assert_eq!(Trigger::from_id(t.id()), Some(t));
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.id()));
        }
        assert_eq!(Trigger::from_id("telepathy"), None);
    }

    #[test]
    fn test_interrupts_deltas_are_zero_sum() {
        let net: i16 = Trigger::Interrupts.deltas().iter().map(|(_, d)| d).sum();
        assert_eq!(net, 0);
    }

    #[test]
    fn test_trigger_input_shapes() {
        let inputs: Vec<TriggerInput> =
            serde_json::from_str(r#"["interrupts", {"trigger": "provesROI"}, 42, {"kind": "x"}]"#)
                .unwrap();
        assert_eq!(inputs[0].identifier(), Some("interrupts"));
        assert_eq!(inputs[1].identifier(), Some("provesROI"));
        assert_eq!(inputs[2].identifier(), None);
        assert_eq!(inputs[3].identifier(), None);
    }
}
