//! Persona intake: PersonaRequest → ProspectProfile
//!
//! Random draws happen in a fixed order from one seeded RNG, so the same
//! request and seed always yield the same profile:
//! 1. objection-layer count (range tiers only)
//! 2. DISC split (unless explicit)
//! 3. extra objections beyond the focus
//! 4. volatility bias split ("neg" tiers only)

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use crate::core::disc::DiscGenerator;
use crate::core::emotion::bias_split;
use crate::core::tier_table::TierTable;
use crate::error::EngineError;
use crate::types::{ObjectionKind, PersonaRequest, ProspectProfile};

/// Build a profile from an intake request.
///
/// `default_seed` is used when the request carries none; without either a
/// fresh seed is drawn and recorded on the profile.
pub fn build_profile(
    request: &PersonaRequest,
    default_seed: Option<u64>,
) -> Result<ProspectProfile, EngineError> {
    let seed = request.seed.or(default_seed).unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let rating = match request.difficulty_rating {
        Some(r) => r,
        None => TierTable::rating_for_hint(request.toughness_hint)? as i64,
    };
    let tier = TierTable::lookup(rating)?;
    let layer_count = tier.objection_layers.resolve(&mut rng);

    let disc_gen = DiscGenerator::new();
    let disc = match request.disc {
        Some(explicit) => disc_gen.validate(explicit)?,
        None => disc_gen.generate(&mut rng, Some(request.tone.disc_lean())),
    };

    let objections = pick_objections(request.objection_focus, layer_count, &mut rng)?;
    let bias = bias_split(tier, &mut rng);

    let profile = ProspectProfile {
        identity: request.identity.clone().unwrap_or_default(),
        disc,
        difficulty_rating: rating as u32,
        tier: tier.tier,
        objections,
        bias_split: bias,
        fit_strictness: request.fit_strictness,
        call_type: request.call_type,
        tone: request.tone,
        business_description: request.business_description.clone(),
        seed,
    };

    info!(
        tier = %profile.tier,
        rating = profile.difficulty_rating,
        disc = %profile.disc,
        objections = profile.objections.len(),
        seed,
        "prospect profile created"
    );
    Ok(profile)
}

/// Focus first, then distinct draws from the rest of the pool
fn pick_objections(
    focus: ObjectionKind,
    count: u8,
    rng: &mut StdRng,
) -> Result<Vec<ObjectionKind>, EngineError> {
    let count = count as usize;
    if count == 0 || count > ObjectionKind::ALL.len() {
        return Err(EngineError::configuration(format!(
            "objection layer count must be 1-{}, got {}",
            ObjectionKind::ALL.len(),
            count
        )));
    }
    let rest: Vec<ObjectionKind> = ObjectionKind::ALL
        .iter()
        .copied()
        .filter(|k| *k != focus)
        .collect();

    let mut objections = Vec::with_capacity(count);
    objections.push(focus);
    objections.extend(rest.choose_multiple(rng, count - 1).copied());
    Ok(objections)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscAxis, DiscProfile, Tier, ToneHint};
    use std::collections::HashSet;

    #[test]
    fn test_rating_1850_is_expert() {
        let profile = build_profile(&PersonaRequest::new(ObjectionKind::Price).with_rating(1850).with_seed(1), None)
            .unwrap();
        assert_eq!(profile.tier, Tier::T6);
        let cfg = TierTable::config(profile.tier);
        assert_eq!(cfg.label, "Expert");
        assert_eq!(cfg.toughness, 8);
        assert_eq!(cfg.patience_secs, 240);
        assert_eq!(profile.objection_count(), 3);
        assert_eq!(profile.objections[0], ObjectionKind::Price);
    }

    #[test]
    fn test_objections_are_distinct() {
        for seed in 0..50 {
            let req = PersonaRequest::new(ObjectionKind::Trust).with_rating(2500).with_seed(seed);
            let profile = build_profile(&req, None).unwrap();
            assert_eq!(profile.objections.len(), 5);
            let unique: HashSet<_> = profile.objections.iter().collect();
            assert_eq!(unique.len(), 5);
        }
    }

    #[test]
    fn test_same_seed_same_profile() {
        let req = PersonaRequest::new(ObjectionKind::Timing).with_rating(2050);
        let a = build_profile(&req, Some(77)).unwrap();
        let b = build_profile(&req, Some(77)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, 77);
    }

    #[test]
    fn test_request_seed_wins_over_default() {
        let req = PersonaRequest::new(ObjectionKind::Need).with_seed(5);
        assert_eq!(build_profile(&req, Some(9)).unwrap().seed, 5);
    }

    #[test]
    fn test_toughness_hint_drives_rating() {
        let mut req = PersonaRequest::new(ObjectionKind::Price);
        req.toughness_hint = 1;
        assert_eq!(build_profile(&req, Some(0)).unwrap().tier, Tier::T0);
        req.toughness_hint = 10;
        assert_eq!(build_profile(&req, Some(0)).unwrap().tier, Tier::T9);
        req.toughness_hint = 0;
        assert!(matches!(build_profile(&req, Some(0)), Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_explicit_rating_overrides_hint() {
        let mut req = PersonaRequest::new(ObjectionKind::Price).with_rating(900);
        req.toughness_hint = 10;
        assert_eq!(build_profile(&req, Some(0)).unwrap().tier, Tier::T1);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let req = PersonaRequest::new(ObjectionKind::Price).with_rating(-5);
        assert!(matches!(build_profile(&req, Some(0)), Err(EngineError::Configuration(_))));

        let req = PersonaRequest::new(ObjectionKind::Price).with_disc(DiscProfile::new(30, 30, 20, 20));
        assert!(matches!(build_profile(&req, Some(0)), Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_explicit_disc_used_as_is() {
        let disc = DiscProfile::new(10, 10, 15, 65);
        let req = PersonaRequest::new(ObjectionKind::Price).with_disc(disc);
        assert_eq!(build_profile(&req, Some(3)).unwrap().disc, disc);
    }

    #[test]
    fn test_tone_leans_disc() {
        let mut req = PersonaRequest::new(ObjectionKind::Price);
        req.tone = ToneHint::Direct;
        for seed in 0..20 {
            assert_eq!(build_profile(&req, Some(seed)).unwrap().disc.dominant(), Some(DiscAxis::D));
        }
    }
}
