//! Emotion engine: trigger deltas, clamping and renormalization
//!
//! Update cycle:
//! 1. pending early-close penalties + trigger deltas are summed per bucket
//! 2. each bucket is clamped to [0,100]
//! 3. the vector is rescaled to sum to exactly 100 (largest buckets take the
//!    rounding remainder, so no bucket overtakes a larger one)
//! 4. an all-zero vector resets to the neutral baseline

use rand::Rng;
use tracing::{debug, warn};
use crate::{BASELINE_EMOTIONS, EARLY_CLOSE_DEFENSIVE_DELTA, EARLY_CLOSE_SKEPTICAL_DELTA, EMOTION_TOTAL};
use crate::types::{BiasMode, BiasSplit, Emotion, EmotionVector, TierConfig, Trigger};

/// Owns one session's emotion vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionEngine {
    vector: EmotionVector,
    pending_penalties: u32,
}

impl Default for EmotionEngine {
    fn default() -> Self {
        Self::new(BiasSplit::default())
    }
}

impl EmotionEngine {
    /// Start from the baseline shifted by a volatility bias split
    pub fn new(bias: BiasSplit) -> Self {
        Self {
            vector: initial_vector(bias),
            pending_penalties: 0,
        }
    }

    /// Resume from persisted state (vector must already be normalized)
    pub fn restore(vector: EmotionVector, pending_penalties: u32) -> Self {
        Self { vector, pending_penalties }
    }

    pub fn vector(&self) -> EmotionVector {
        self.vector
    }

    pub fn pending_penalties(&self) -> u32 {
        self.pending_penalties
    }

    pub fn top_two(&self) -> [Emotion; 2] {
        self.vector.top_two()
    }

    /// Queue the early-close penalty for the next update cycle
    pub fn schedule_early_close_penalty(&mut self) {
        self.pending_penalties = self.pending_penalties.saturating_add(1);
        debug!(pending = self.pending_penalties, "early-close penalty scheduled");
    }

    /// Apply a trigger by wire identifier. Unknown identifiers are a logged
    /// no-op and leave pending penalties queued.
    pub fn apply_trigger_id(&mut self, id: &str) -> Option<Trigger> {
        match Trigger::from_id(id) {
            Some(trigger) => {
                self.apply_trigger(trigger);
                Some(trigger)
            }
            None => {
                warn!(trigger = id, "unrecognized trigger ignored");
                None
            }
        }
    }

    /// Apply one trigger (plus any pending penalties) and renormalize
    pub fn apply_trigger(&mut self, trigger: Trigger) {
        let mut raw = self.take_pending_deltas();
        for (emotion, delta) in trigger.deltas() {
            raw[emotion.index()] = raw[emotion.index()].saturating_add(*delta as i32);
        }
        self.vector = renormalize(raw);
        debug!(%trigger, vector = %self.vector, "trigger applied");
    }

    /// Current vector as signed values with pending penalties folded in
    fn take_pending_deltas(&mut self) -> [i32; 7] {
        let mut raw = self.vector.to_array().map(|v| v as i32);
        // anything past the bucket ceiling clamps to 100 anyway
        let n = i32::try_from(self.pending_penalties).unwrap_or(i32::MAX);
        let skeptical = &mut raw[Emotion::Skeptical.index()];
        *skeptical = skeptical.saturating_add(n.saturating_mul(EARLY_CLOSE_SKEPTICAL_DELTA as i32));
        let defensive = &mut raw[Emotion::Defensive.index()];
        *defensive = defensive.saturating_add(n.saturating_mul(EARLY_CLOSE_DEFENSIVE_DELTA as i32));
        self.pending_penalties = 0;
        raw
    }
}

/// Clamp every bucket to [0,100] and rescale to sum to 100.
///
/// Rescaling floors `v·100/sum`; the leftover points go one each to the
/// largest clamped buckets (priority order on ties). Since floor is monotone
/// and bigger buckets are served first, relative order never inverts.
pub fn renormalize(raw: [i32; 7]) -> EmotionVector {
    let total = EMOTION_TOTAL as i64;
    let clamped = raw.map(|v| v.clamp(0, total as i32) as i64);
    let sum: i64 = clamped.iter().sum();

    if sum == 0 {
        warn!("emotion vector degenerated to zero; resetting to baseline");
        return EmotionVector::from_array(BASELINE_EMOTIONS);
    }

    let mut scaled = clamped.map(|v| v * total / sum);
    let remainder = total - scaled.iter().sum::<i64>();

    let mut order = Emotion::ALL;
    order.sort_by(|a, b| clamped[b.index()].cmp(&clamped[a.index()]).then(a.cmp(b)));
    for emotion in order.iter().take(remainder as usize) {
        scaled[emotion.index()] += 1;
    }

    EmotionVector::from_array(scaled.map(|v| v as u8))
}

/// Baseline plus a volatility bias.
///
/// Bias points land on SKEPTICAL/FRUSTRATED/DEFENSIVE; the same number of
/// points is taken from the other four buckets in proportion to their
/// baseline values (largest remainder).
pub fn initial_vector(bias: BiasSplit) -> EmotionVector {
    let mut values = BASELINE_EMOTIONS.map(|v| v as u32);
    let points = bias.total() as u32;
    if points == 0 {
        return EmotionVector::from_array(BASELINE_EMOTIONS);
    }

    let donors = Emotion::ALL.iter().filter(|e| !e.is_negative());
    let donor_total: u32 = donors.clone().map(|e| values[e.index()]).sum();
    let mut shares: Vec<(Emotion, u32, u32)> = donors
        .map(|e| {
            let exact = points * values[e.index()];
            (*e, exact / donor_total, exact % donor_total)
        })
        .collect();
    let mut leftover = points - shares.iter().map(|(_, q, _)| q).sum::<u32>();
    shares.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    for share in shares.iter_mut() {
        if leftover == 0 {
            break;
        }
        share.1 += 1;
        leftover -= 1;
    }
    for (emotion, take, _) in shares {
        values[emotion.index()] -= take;
    }

    values[Emotion::Skeptical.index()] += bias.skeptical as u32;
    values[Emotion::Frustrated.index()] += bias.frustrated as u32;
    values[Emotion::Defensive.index()] += bias.defensive as u32;

    EmotionVector::from_array(values.map(|v| v as u8))
}

/// Split a tier's bias points across the negative buckets
pub fn bias_split<R: Rng + ?Sized>(tier: &TierConfig, rng: &mut R) -> BiasSplit {
    let points = tier.volatility_bias;
    match tier.bias_mode {
        BiasMode::None => BiasSplit::default(),
        BiasMode::Even => {
            let base = points / 3;
            let extra = points % 3;
            BiasSplit {
                skeptical: base + (extra > 0) as u8,
                frustrated: base + (extra > 1) as u8,
                defensive: base,
            }
        }
        BiasMode::Neg => {
            let a = rng.gen_range(0..=points);
            let b = rng.gen_range(0..=points);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            BiasSplit {
                skeptical: lo,
                frustrated: hi - lo,
                defensive: points - hi,
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
