//! Pace and tone recommendation for the renderer

use crate::types::{DiscTraits, Emotion, EmotionVector, Pace, Tone};

/// Pace score above this is Fast, below the negation is Slow
const PACE_BAND: f64 = 0.25;

/// Added to the pace score when STRESSED or FRUSTRATED leads
const PACE_AGITATED_PUSH: f64 = 0.3;

/// Subtracted when CALM leads
const PACE_CALM_PULL: f64 = 0.2;

/// D share (0..1) at which push-back turns blunt
const BLUNT_D_SHARE: f64 = 0.40;

/// Recommend a speaking pace from DISC tempo and the leading emotion
pub fn recommend_pace(traits: &DiscTraits, emotions: &EmotionVector) -> Pace {
    let mut score = traits.pace_weight;
    match emotions.top_two()[0] {
        Emotion::Stressed | Emotion::Frustrated => score += PACE_AGITATED_PUSH,
        Emotion::Calm => score -= PACE_CALM_PULL,
        _ => {}
    }

    if score > PACE_BAND {
        Pace::Fast
    } else if score < -PACE_BAND {
        Pace::Slow
    } else {
        Pace::Moderate
    }
}

/// Recommend a tone from the leading emotion, colored by DISC push-back style
pub fn recommend_tone(traits: &DiscTraits, emotions: &EmotionVector) -> Tone {
    let base = match emotions.top_two()[0] {
        Emotion::Calm => Tone::Relaxed,
        Emotion::Curious => Tone::Inquisitive,
        Emotion::Engaged => Tone::Warm,
        Emotion::Skeptical => Tone::Guarded,
        Emotion::Frustrated => Tone::Curt,
        Emotion::Stressed => Tone::Hurried,
        Emotion::Defensive => Tone::Defensive,
    };

    match base {
        Tone::Guarded | Tone::Curt if traits.blunt_weight >= BLUNT_D_SHARE => Tone::Blunt,
        Tone::Guarded if traits.analytic_framing => Tone::Analytical,
        other => other,
    }
}
