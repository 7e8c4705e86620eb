//! Difficulty tier table: skill rating → tier configuration
//!
//! Bands are 200 points wide starting at 800:
//! - T0: < 800
//! - T1..T8: 800, 1000, ... 2200 (inclusive lower bounds)
//! - T9: ≥ 2400

use rand::Rng;
use crate::error::EngineError;
use crate::types::{BiasMode, ObjectionLayers, Tier, TierConfig};

#[allow(clippy::too_many_arguments)]
const fn row(
    tier: Tier,
    label: &'static str,
    min_rating: u32,
    toughness: u8,
    objection_layers: ObjectionLayers,
    volatility_bias: u8,
    bias_mode: BiasMode,
    patience_secs: u32,
    tactic_count: u8,
    hedge_on_close: bool,
) -> TierConfig {
    TierConfig {
        tier,
        label,
        min_rating,
        toughness,
        objection_layers,
        volatility_bias,
        bias_mode,
        patience_secs,
        tactic_count,
        hedge_on_close,
    }
}

/// The static tier table, ordered by tier
pub static TIER_TABLE: [TierConfig; 10] = [
    row(Tier::T0, "Rookie", 0, 1, ObjectionLayers::Fixed(1), 0, BiasMode::None, 360, 0, false),
    row(Tier::T1, "Novice", 800, 2, ObjectionLayers::Fixed(1), 5, BiasMode::Even, 360, 1, false),
    row(Tier::T2, "Apprentice", 1000, 3, ObjectionLayers::Fixed(1), 10, BiasMode::Even, 330, 2, false),
    row(Tier::T3, "Practitioner", 1200, 4, ObjectionLayers::Fixed(2), 15, BiasMode::Even, 300, 3, false),
    row(Tier::T4, "Skilled", 1400, 5, ObjectionLayers::Fixed(2), 20, BiasMode::Even, 300, 4, false),
    row(Tier::T5, "Advanced", 1600, 7, ObjectionLayers::Range(2, 3), 25, BiasMode::Neg, 270, 5, false),
    row(Tier::T6, "Expert", 1800, 8, ObjectionLayers::Fixed(3), 30, BiasMode::Neg, 240, 6, false),
    row(Tier::T7, "Veteran", 2000, 10, ObjectionLayers::Range(3, 4), 35, BiasMode::Neg, 210, 7, false),
    row(Tier::T8, "Master", 2200, 11, ObjectionLayers::Fixed(4), 40, BiasMode::Neg, 195, 8, false),
    row(Tier::T9, "Grandmaster", 2400, 13, ObjectionLayers::Fixed(5), 45, BiasMode::Neg, 180, 9, true),
];

/// Static lookup over [`TIER_TABLE`]
pub struct TierTable;

impl TierTable {
    /// Resolve a rating to its tier row.
    ///
    /// Ratings are signed at this boundary so that negative input from the
    /// wire can be rejected rather than wrapped.
    pub fn lookup(rating: i64) -> Result<&'static TierConfig, EngineError> {
        if rating < 0 {
            return Err(EngineError::configuration(format!(
                "difficulty rating must be non-negative, got {}",
                rating
            )));
        }
        let rating = u32::try_from(rating).map_err(|_| {
            EngineError::configuration(format!("difficulty rating {} out of range", rating))
        })?;
        Ok(TIER_TABLE
            .iter()
            .rev()
            .find(|row| rating >= row.min_rating)
            .unwrap_or(&TIER_TABLE[0]))
    }

    /// Row for an already-resolved tier
    pub fn config(tier: Tier) -> &'static TierConfig {
        &TIER_TABLE[tier.index()]
    }

    /// Representative rating for a 1–10 toughness hint (middle of band h−1)
    pub fn rating_for_hint(hint: u8) -> Result<u32, EngineError> {
        if !(crate::TOUGHNESS_HINT_MIN..=crate::TOUGHNESS_HINT_MAX).contains(&hint) {
            return Err(EngineError::configuration(format!(
                "toughness hint must be {}-{}, got {}",
                crate::TOUGHNESS_HINT_MIN,
                crate::TOUGHNESS_HINT_MAX,
                hint
            )));
        }
        let row = &TIER_TABLE[(hint - 1) as usize];
        Ok(if row.tier == Tier::T0 { 700 } else { row.min_rating + 100 })
    }
}

impl ObjectionLayers {
    /// Pick a concrete layer count (uniform over a range)
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        match *self {
            ObjectionLayers::Fixed(n) => n,
            ObjectionLayers::Range(lo, hi) => rng.gen_range(lo..=hi),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_band_edges() {
        assert_eq!(TierTable::lookup(0).unwrap().tier, Tier::T0);
        assert_eq!(TierTable::lookup(799).unwrap().tier, Tier::T0);
        assert_eq!(TierTable::lookup(800).unwrap().tier, Tier::T1);
        assert_eq!(TierTable::lookup(1199).unwrap().tier, Tier::T2);
        assert_eq!(TierTable::lookup(2399).unwrap().tier, Tier::T8);
        assert_eq!(TierTable::lookup(2400).unwrap().tier, Tier::T9);
        assert_eq!(TierTable::lookup(9_999).unwrap().tier, Tier::T9);
    }

    #[test]
    fn test_negative_rating_rejected() {
        let err = TierTable::lookup(-1).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_table_is_monotonic() {
        for pair in TIER_TABLE.windows(2) {
            assert!(pair[1].min_rating > pair[0].min_rating);
            assert!(pair[1].toughness > pair[0].toughness);
            assert!(pair[1].objection_layers.min() >= pair[0].objection_layers.min());
            assert!(pair[1].volatility_bias > pair[0].volatility_bias);
            assert!(pair[1].patience_secs <= pair[0].patience_secs);
            assert!(pair[1].unlocked_tactics().len() > pair[0].unlocked_tactics().len());
        }
        assert_eq!(TIER_TABLE[0].toughness, 1);
        assert_eq!(TIER_TABLE[9].toughness, 13);
        assert_eq!(TIER_TABLE[0].patience_secs, 360);
        assert_eq!(TIER_TABLE[9].patience_secs, 180);
        assert_eq!(TIER_TABLE[9].volatility_bias, 45);
    }

    #[test]
    fn test_only_t9_hedges() {
        for row in TIER_TABLE.iter() {
            assert_eq!(row.hedge_on_close, row.tier == Tier::T9);
        }
    }

    #[test]
    fn test_range_resolution_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let layers = TierTable::config(Tier::T7).objection_layers;
        let mut seen = [false; 2];
        for _ in 0..200 {
            let n = layers.resolve(&mut rng);
            assert!(layers.contains(n));
            seen[(n - 3) as usize] = true;
        }
        assert!(seen[0] && seen[1], "both ends of 3-4 should be drawn");
    }

    #[test]
    fn test_hint_mapping() {
        assert_eq!(TierTable::rating_for_hint(1).unwrap(), 700);
        assert_eq!(TierTable::lookup(TierTable::rating_for_hint(7).unwrap() as i64).unwrap().tier, Tier::T6);
        assert_eq!(TierTable::lookup(TierTable::rating_for_hint(10).unwrap() as i64).unwrap().tier, Tier::T9);
        assert!(TierTable::rating_for_hint(0).is_err());
        assert!(TierTable::rating_for_hint(11).is_err());
    }
}
