// src/presenter/tone.rs
use serde::{Deserialize, Serialize};

/// Lower bound (exclusive) for the `High` bucket.
pub const HIGH_ABOVE: f64 = 0.75;
/// Lower bound (exclusive) for the `Medium` bucket.
pub const MEDIUM_ABOVE: f64 = 0.5;

/// Discrete confidence bucket used for display styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    High,
    Medium,
    Low,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a raw confidence score. Total over every `f64`: anything that is not
/// strictly above a threshold (NaN included) lands in `Low`.
pub fn classify_tone(confidence: f64) -> Tone {
    if confidence > HIGH_ABOVE {
        Tone::High
    } else if confidence > MEDIUM_ABOVE {
        Tone::Medium
    } else {
        Tone::Low
    }
}

/// Display percentage: `confidence * 100` rounded half away from zero.
/// Not clamped; NaN maps to 0 and infinities saturate.
pub fn meter_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(classify_tone(0.76), Tone::High);
        assert_eq!(classify_tone(0.75), Tone::Medium);
        assert_eq!(classify_tone(0.51), Tone::Medium);
        assert_eq!(classify_tone(0.5), Tone::Low);
        assert_eq!(classify_tone(-1.0), Tone::Low);
    }

    #[test]
    fn non_finite_inputs() {
        assert_eq!(classify_tone(f64::NAN), Tone::Low);
        assert_eq!(classify_tone(f64::NEG_INFINITY), Tone::Low);
        assert_eq!(classify_tone(f64::INFINITY), Tone::High);
        assert_eq!(meter_percent(f64::NAN), 0);
        assert_eq!(meter_percent(f64::INFINITY), i64::MAX);
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(meter_percent(0.125), 13);
        assert_eq!(meter_percent(0.82), 82);
        assert_eq!(meter_percent(0.005), 1);
        assert_eq!(meter_percent(-0.005), -1);
        assert_eq!(meter_percent(1.3), 130);
    }

    #[test]
    fn serializes_lowercase() {
        let v = serde_json::to_value(Tone::Medium).unwrap();
        assert_eq!(v, serde_json::json!("medium"));
    }
}
