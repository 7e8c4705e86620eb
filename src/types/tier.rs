//! Difficulty tier definitions

use serde::{Deserialize, Serialize};

/// Ten difficulty bands, T0 (easiest) to T9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    T0,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    T7,
    T8,
    T9,
}

impl Tier {
    pub const ALL: [Tier; 10] = [
        Tier::T0,
        Tier::T1,
        Tier::T2,
        Tier::T3,
        Tier::T4,
        Tier::T5,
        Tier::T6,
        Tier::T7,
        Tier::T8,
        Tier::T9,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// T7 and above only clear the gate once every objection is resolved
    pub fn requires_all_objections(&self) -> bool {
        *self >= Tier::T7
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.index())
    }
}

/// Objection layers for a tier: fixed, or a range resolved once per profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectionLayers {
    Fixed(u8),
    Range(u8, u8),
}

impl ObjectionLayers {
    pub fn min(&self) -> u8 {
        match self {
            ObjectionLayers::Fixed(n) => *n,
            ObjectionLayers::Range(lo, _) => *lo,
        }
    }

    pub fn max(&self) -> u8 {
        match self {
            ObjectionLayers::Fixed(n) => *n,
            ObjectionLayers::Range(_, hi) => *hi,
        }
    }

    pub fn contains(&self, n: u8) -> bool {
        n >= self.min() && n <= self.max()
    }
}

impl std::fmt::Display for ObjectionLayers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectionLayers::Fixed(n) => write!(f, "{}", n),
            ObjectionLayers::Range(lo, hi) => write!(f, "{}-{}", lo, hi),
        }
    }
}

/// How volatility bias points are spread across the negative buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasMode {
    /// No bias points
    None,
    /// Even split across SKEPTICAL, FRUSTRATED, DEFENSIVE
    Even,
    /// Random split (seeded) across the same three buckets
    Neg,
}

/// Prospect tactics, unlocked cumulatively by tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    VagueAnswers,
    TimePressure,
    PriceAnchoring,
    CompetitorMention,
    Stalling,
    AuthorityDeferral,
    SilentTreatment,
    FalseObjection,
    WalkAwayThreat,
}

/// One row of the static tier table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierConfig {
    pub tier: Tier,
    pub label: &'static str,
    /// Inclusive lower bound of the rating band
    pub min_rating: u32,
    pub toughness: u8,
    pub objection_layers: ObjectionLayers,
    /// Points moved into the negative buckets at session start (0..=45)
    pub volatility_bias: u8,
    pub bias_mode: BiasMode,
    /// Patience budget in seconds of representative talk time
    pub patience_secs: u32,
    /// How many rungs of [`TACTIC_LADDER`] this tier has unlocked
    pub tactic_count: u8,
    /// Prospect hedges even when the close is permitted
    pub hedge_on_close: bool,
}

/// Tactics in unlock order; tier Tn has the first n
pub static TACTIC_LADDER: [Tactic; 9] = [
    Tactic::VagueAnswers,
    Tactic::TimePressure,
    Tactic::PriceAnchoring,
    Tactic::CompetitorMention,
    Tactic::Stalling,
    Tactic::AuthorityDeferral,
    Tactic::SilentTreatment,
    Tactic::FalseObjection,
    Tactic::WalkAwayThreat,
];

impl TierConfig {
    pub fn unlocked_tactics(&self) -> &'static [Tactic] {
        &TACTIC_LADDER[..self.tactic_count as usize]
    }
}
