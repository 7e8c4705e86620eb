//! Emotion buckets and the 7-bucket vector

use serde::{Deserialize, Serialize};

/// The seven hidden emotion buckets.
///
/// Declaration order is the tie-break priority used by `top_two()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    Calm,
    Curious,
    Engaged,
    Skeptical,
    Frustrated,
    Stressed,
    Defensive,
}

impl Emotion {
    /// All buckets in priority order
    pub const ALL: [Emotion; 7] = [
        Emotion::Calm,
        Emotion::Curious,
        Emotion::Engaged,
        Emotion::Skeptical,
        Emotion::Frustrated,
        Emotion::Stressed,
        Emotion::Defensive,
    ];

    /// Index into priority order (0 = highest priority)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Negative buckets receive the tier's volatility bias
    pub fn is_negative(&self) -> bool {
        matches!(self, Emotion::Skeptical | Emotion::Frustrated | Emotion::Defensive)
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Emotion::Calm => "CALM",
            Emotion::Curious => "CURIOUS",
            Emotion::Engaged => "ENGAGED",
            Emotion::Skeptical => "SKEPTICAL",
            Emotion::Frustrated => "FRUSTRATED",
            Emotion::Stressed => "STRESSED",
            Emotion::Defensive => "DEFENSIVE",
        };
        write!(f, "{}", name)
    }
}

/// Seven bucket values, each in [0,100].
///
/// The engine keeps the sum at exactly 100; a vector read from the wire is
/// only trusted after [`EmotionVector::is_normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EmotionVector {
    pub calm: u8,
    pub curious: u8,
    pub engaged: u8,
    pub skeptical: u8,
    pub frustrated: u8,
    pub stressed: u8,
    pub defensive: u8,
}

impl EmotionVector {
    /// Build from values in priority order
    pub fn from_array(values: [u8; 7]) -> Self {
        Self {
            calm: values[0],
            curious: values[1],
            engaged: values[2],
            skeptical: values[3],
            frustrated: values[4],
            stressed: values[5],
            defensive: values[6],
        }
    }

    /// Values in priority order
    pub fn to_array(&self) -> [u8; 7] {
        [
            self.calm,
            self.curious,
            self.engaged,
            self.skeptical,
            self.frustrated,
            self.stressed,
            self.defensive,
        ]
    }

    pub fn get(&self, emotion: Emotion) -> u8 {
        self.to_array()[emotion.index()]
    }

    pub fn sum(&self) -> u32 {
        self.to_array().iter().map(|v| *v as u32).sum()
    }

    /// Sum is 100 and every bucket is in range
    pub fn is_normalized(&self) -> bool {
        self.sum() == crate::EMOTION_TOTAL as u32
            && self.to_array().iter().all(|v| *v <= crate::EMOTION_TOTAL)
    }

    /// Buckets ordered by value (descending), ties by priority
    pub fn ranked(&self) -> [Emotion; 7] {
        let mut ranked = Emotion::ALL;
        ranked.sort_by(|a, b| self.get(*b).cmp(&self.get(*a)).then(a.cmp(b)));
        ranked
    }

    /// The two highest buckets, deterministic for identical vectors
    pub fn top_two(&self) -> [Emotion; 2] {
        let ranked = self.ranked();
        [ranked[0], ranked[1]]
    }

    /// Share of `emotion` relative to `other` (None when `other` is empty)
    pub fn ratio(&self, emotion: Emotion, other: Emotion) -> Option<f64> {
        let denom = self.get(other);
        if denom == 0 {
            None
        } else {
            Some(self.get(emotion) as f64 / denom as f64)
        }
    }
}

impl Default for EmotionVector {
    fn default() -> Self {
        Self::from_array(crate::BASELINE_EMOTIONS)
    }
}

impl std::fmt::Display for EmotionVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = Emotion::ALL
            .iter()
            .map(|e| format!("{}={}", e, self.get(*e)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_normalized() {
        let v = EmotionVector::default();
        assert!(v.is_normalized());
        assert_eq!(v.calm, 35);
        assert_eq!(v.defensive, 0);
    }

    #[test]
    fn test_top_two_tie_break_by_priority() {
        // CURIOUS and ENGAGED tie behind CALM; CURIOUS wins on priority
        let v = EmotionVector::from_array([30, 20, 20, 10, 10, 10, 0]);
        assert_eq!(v.top_two(), [Emotion::Calm, Emotion::Curious]);

        // Full tie at the top: priority decides both slots
        let v = EmotionVector::from_array([0, 0, 0, 0, 50, 0, 50]);
        assert_eq!(v.top_two(), [Emotion::Frustrated, Emotion::Defensive]);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&EmotionVector::default()).unwrap();
        assert!(json.contains("\"CALM\":35"));
        assert!(json.contains("\"DEFENSIVE\":0"));
        assert_eq!(serde_json::to_string(&Emotion::Skeptical).unwrap(), "\"SKEPTICAL\"");
    }
}
