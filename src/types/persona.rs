//! Persona intake parameters and the resulting prospect profile

use serde::{Deserialize, Serialize};
use crate::types::{DiscAxis, DiscProfile, DiscTraits, ObjectionKind, Tactic, Tier, TierConfig};

/// How closely the prospect matches the business's ideal customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStrictness {
    Loose,
    #[default]
    Moderate,
    Strict,
}

/// Kind of call being rehearsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    #[default]
    Discovery,
    Demo,
    Closing,
    FollowUp,
}

/// Requested prospect tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneHint {
    Direct,
    #[default]
    Friendly,
    Reserved,
    Analytical,
}

impl ToneHint {
    /// DISC axis this tone leans toward when sampling a profile
    pub fn disc_lean(&self) -> DiscAxis {
        match self {
            ToneHint::Direct => DiscAxis::D,
            ToneHint::Friendly => DiscAxis::I,
            ToneHint::Reserved => DiscAxis::S,
            ToneHint::Analytical => DiscAxis::C,
        }
    }
}

/// Descriptive identity; opaque to the engine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProspectIdentity {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub location: Option<String>,
    pub firm_size: Option<String>,
    /// cold / warm / hot, free-form
    pub lead_warmth: Option<String>,
    pub buyer_stage: Option<String>,
}

/// Volatility bias points per negative bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BiasSplit {
    pub skeptical: u8,
    pub frustrated: u8,
    pub defensive: u8,
}

impl BiasSplit {
    pub fn total(&self) -> u8 {
        self.skeptical + self.frustrated + self.defensive
    }
}

/// Persona intake request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaRequest {
    /// Business description (e.g. extracted sales-deck text); carried through
    #[serde(default)]
    pub business_description: String,
    #[serde(default)]
    pub fit_strictness: FitStrictness,
    pub objection_focus: ObjectionKind,
    /// 1 (gentle) to 10 (brutal); used when no explicit rating is given
    #[serde(default = "default_toughness_hint")]
    pub toughness_hint: u8,
    #[serde(default)]
    pub call_type: CallType,
    #[serde(default)]
    pub tone: ToneHint,
    /// Explicit skill rating; overrides `toughness_hint`
    #[serde(default)]
    pub difficulty_rating: Option<i64>,
    /// Explicit DISC split; validated and used as-is
    #[serde(default)]
    pub disc: Option<DiscProfile>,
    #[serde(default)]
    pub identity: Option<ProspectIdentity>,
    /// Fixes every random draw for this profile
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_toughness_hint() -> u8 {
    5
}

impl PersonaRequest {
    pub fn new(objection_focus: ObjectionKind) -> Self {
        Self {
            business_description: String::new(),
            fit_strictness: FitStrictness::default(),
            objection_focus,
            toughness_hint: default_toughness_hint(),
            call_type: CallType::default(),
            tone: ToneHint::default(),
            difficulty_rating: None,
            disc: None,
            identity: None,
            seed: None,
        }
    }

    pub fn with_rating(mut self, rating: i64) -> Self {
        self.difficulty_rating = Some(rating);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_disc(mut self, disc: DiscProfile) -> Self {
        self.disc = Some(disc);
        self
    }
}

/// A generated prospect. Immutable for the life of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectProfile {
    pub identity: ProspectIdentity,
    pub disc: DiscProfile,
    pub difficulty_rating: u32,
    /// Cached at creation; never recomputed mid-session
    pub tier: Tier,
    /// Voiced in this order; length is the resolved objection-layer count
    pub objections: Vec<ObjectionKind>,
    pub bias_split: BiasSplit,
    pub fit_strictness: FitStrictness,
    pub call_type: CallType,
    pub tone: ToneHint,
    pub business_description: String,
    /// Seed every random draw was taken from
    pub seed: u64,
}

impl ProspectProfile {
    pub fn objection_count(&self) -> u8 {
        self.objections.len() as u8
    }
}

/// What a language renderer needs to voice the prospect: the tier row's
/// behavior knobs plus the DISC-derived tendencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonaBrief {
    pub label: &'static str,
    pub toughness: u8,
    pub patience_secs: u32,
    pub hedge_on_close: bool,
    /// Unlocked in ladder order
    pub tactics: Vec<Tactic>,
    pub traits: DiscTraits,
}

impl PersonaBrief {
    pub fn new(tier: &TierConfig, traits: DiscTraits) -> Self {
        Self {
            label: tier.label,
            toughness: tier.toughness,
            patience_secs: tier.patience_secs,
            hedge_on_close: tier.hedge_on_close,
            tactics: tier.unlocked_tactics().to_vec(),
            traits,
        }
    }
}
