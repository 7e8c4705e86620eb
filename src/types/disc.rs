//! DISC communication-style profile

use serde::{Deserialize, Serialize};

/// The four DISC axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscAxis {
    D,
    I,
    S,
    C,
}

impl DiscAxis {
    pub const ALL: [DiscAxis; 4] = [DiscAxis::D, DiscAxis::I, DiscAxis::S, DiscAxis::C];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Decision archetype associated with this axis
    pub fn decision_style(&self) -> DecisionStyle {
        match self {
            DiscAxis::D => DecisionStyle::Decisive,
            DiscAxis::I => DecisionStyle::Spontaneous,
            DiscAxis::S => DecisionStyle::Relational,
            DiscAxis::C => DecisionStyle::Cautious,
        }
    }

    /// How this axis reacts when the representative pushes back
    pub fn pushback_reaction(&self) -> PushbackReaction {
        match self {
            DiscAxis::D => PushbackReaction::Confronts,
            DiscAxis::I => PushbackReaction::Sensitive,
            DiscAxis::S => PushbackReaction::Withdraws,
            DiscAxis::C => PushbackReaction::Defends,
        }
    }
}

impl std::fmt::Display for DiscAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiscAxis::D => "D",
            DiscAxis::I => "I",
            DiscAxis::S => "S",
            DiscAxis::C => "C",
        };
        write!(f, "{}", name)
    }
}

/// 100-point split across D/I/S/C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct DiscProfile {
    pub d: u8,
    pub i: u8,
    pub s: u8,
    pub c: u8,
}

impl DiscProfile {
    pub fn new(d: u8, i: u8, s: u8, c: u8) -> Self {
        Self { d, i, s, c }
    }

    pub fn from_array(values: [u8; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    pub fn to_array(&self) -> [u8; 4] {
        [self.d, self.i, self.s, self.c]
    }

    pub fn get(&self, axis: DiscAxis) -> u8 {
        self.to_array()[axis.index()]
    }

    pub fn sum(&self) -> u32 {
        self.to_array().iter().map(|v| *v as u32).sum()
    }

    /// The unique highest axis, if there is one
    pub fn dominant(&self) -> Option<DiscAxis> {
        let max = *self.to_array().iter().max()?;
        let mut at_max = DiscAxis::ALL.iter().filter(|a| self.get(**a) == max);
        let first = at_max.next().copied();
        if at_max.next().is_some() {
            None
        } else {
            first
        }
    }
}

impl std::fmt::Display for DiscProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "D{} I{} S{} C{}", self.d, self.i, self.s, self.c)
    }
}

/// Decision-making archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStyle {
    Decisive,
    Spontaneous,
    Relational,
    Cautious,
}

/// Push-back reaction archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushbackReaction {
    Confronts,
    Sensitive,
    Withdraws,
    Defends,
}

/// Behavioral tendencies derived from a [`DiscProfile`].
///
/// Recomputed on demand and handed to the renderer; never stored in session
/// state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscTraits {
    pub dominant: DiscAxis,
    /// (I + 0.5·S) / 100
    pub small_talk: f64,
    /// Blunt/fast objection weight, D / 100
    pub blunt_weight: f64,
    /// Analytic objection weight, C / 100
    pub analytic_weight: f64,
    /// C ≥ 30
    pub analytic_framing: bool,
    /// ((D + I) − (S + C)) / 100; positive is faster
    pub pace_weight: f64,
    /// Mixing weights, heaviest first
    pub decision_style: Vec<(DecisionStyle, f64)>,
    pub pushback: Vec<(PushbackReaction, f64)>,
}

impl DiscTraits {
    pub fn primary_decision_style(&self) -> DecisionStyle {
        self.decision_style[0].0
    }

    pub fn primary_pushback(&self) -> PushbackReaction {
        self.pushback[0].0
    }
}
