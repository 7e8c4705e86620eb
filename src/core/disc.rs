//! DISC profile generation and trait derivation
//!
//! Invariant for every profile leaving this module:
//! - D + I + S + C == 100
//! - exactly one dominant axis, with value ≥ 40

use rand::Rng;
use crate::error::EngineError;
use crate::types::{DiscAxis, DiscProfile, DiscTraits};

/// Minimum value of the dominant axis
pub const DISC_DOMINANT_MIN: u8 = 40;

/// Upper bound for a sampled dominant axis
pub const DISC_DOMINANT_MAX: u8 = 70;

/// Analytic framing kicks in at this C value
pub const DISC_ANALYTIC_THRESHOLD: u8 = 30;

/// Attempts at a random split before falling back to an even one
const MAX_SPLIT_ATTEMPTS: usize = 8;

/// DISC sampler and validator
#[derive(Debug, Default)]
pub struct DiscGenerator;

impl DiscGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Validate an explicit distribution and return it unchanged
    pub fn validate(&self, profile: DiscProfile) -> Result<DiscProfile, EngineError> {
        if profile.sum() != 100 {
            return Err(EngineError::configuration(format!(
                "DISC split must sum to 100, got {} ({})",
                profile.sum(),
                profile
            )));
        }
        let dominant = profile.dominant().ok_or_else(|| {
            EngineError::configuration(format!("DISC split has no unique dominant axis ({})", profile))
        })?;
        if profile.get(dominant) < DISC_DOMINANT_MIN {
            return Err(EngineError::configuration(format!(
                "dominant DISC axis must be >= {}, got {}={}",
                DISC_DOMINANT_MIN,
                dominant,
                profile.get(dominant)
            )));
        }
        Ok(profile)
    }

    /// Sample a distribution.
    ///
    /// `lean` picks the dominant axis; without it the axis is uniform.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, lean: Option<DiscAxis>) -> DiscProfile {
        let dominant = lean.unwrap_or_else(|| DiscAxis::ALL[rng.gen_range(0..4)]);
        let dominant_value = rng.gen_range(DISC_DOMINANT_MIN..=DISC_DOMINANT_MAX);
        let rest = 100 - dominant_value;

        let mut parts = even_split(rest);
        for _ in 0..MAX_SPLIT_ATTEMPTS {
            let a = rng.gen_range(0..=rest);
            let b = rng.gen_range(0..=rest);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let candidate = [lo, hi - lo, rest - hi];
            if candidate.iter().all(|p| *p < dominant_value) {
                parts = candidate;
                break;
            }
        }

        let mut values = [0u8; 4];
        values[dominant.index()] = dominant_value;
        let others = DiscAxis::ALL.iter().filter(|a| **a != dominant);
        for (axis, part) in others.zip(parts) {
            values[axis.index()] = part;
        }
        DiscProfile::from_array(values)
    }

    /// Derive behavioral weights from a (valid) profile
    pub fn traits(&self, profile: &DiscProfile) -> DiscTraits {
        let pct = |axis: DiscAxis| profile.get(axis) as f64 / 100.0;
        let (d, i, s, c) = (pct(DiscAxis::D), pct(DiscAxis::I), pct(DiscAxis::S), pct(DiscAxis::C));

        let mut decision_style: Vec<_> = DiscAxis::ALL
            .iter()
            .map(|a| (a.decision_style(), pct(*a)))
            .collect();
        decision_style.sort_by(|x, y| y.1.total_cmp(&x.1));

        let mut pushback: Vec<_> = DiscAxis::ALL
            .iter()
            .map(|a| (a.pushback_reaction(), pct(*a)))
            .collect();
        pushback.sort_by(|x, y| y.1.total_cmp(&x.1));

        DiscTraits {
            dominant: profile.dominant().unwrap_or(DiscAxis::D),
            small_talk: i + 0.5 * s,
            blunt_weight: d,
            analytic_weight: c,
            analytic_framing: profile.c >= DISC_ANALYTIC_THRESHOLD,
            pace_weight: (d + i) - (s + c),
            decision_style,
            pushback,
        }
    }
}

/// Split `rest` into three near-equal parts (remainder to the first)
fn even_split(rest: u8) -> [u8; 3] {
    let base = rest / 3;
    let extra = rest % 3;
    [base + extra, base, base]
}

// =============================================================================
// TESTS
// =============================================================================
