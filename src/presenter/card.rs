// src/presenter/card.rs
use std::fmt;

use crate::narrative::{extract, ExtractedNarrative};
use crate::types::Prediction;

use super::reveal::{RevealKey, RevealTimer};
use super::tone::{classify_tone, Tone};

pub const NO_PRECAUTIONS_TEXT: &str = "No specific precautions recorded.";
const METER_CELLS: i64 = 20;

/// Reconciliation key of a displayed card: disease label + position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardKey {
    pub disease: String,
    pub index: usize,
}

/// Display model for one prediction. Owns its reveal timer; dropping the card
/// cancels a pending reveal.
#[derive(Debug)]
pub struct DiagnosisCard {
    index: usize,
    disease: String,
    confidence: f64,
    tone: Tone,
    narrative: ExtractedNarrative,
    precautions: Vec<String>,
    reveal: RevealTimer,
}

impl DiagnosisCard {
    /// Build the card and start its reveal timer (requires a tokio runtime).
    pub fn mount(prediction: &Prediction, index: usize) -> Self {
        let reveal = RevealTimer::schedule(RevealKey::new(
            prediction.description.as_str(),
            index,
            prediction.confidence,
        ));
        Self {
            index,
            disease: prediction.disease.clone(),
            confidence: prediction.confidence,
            tone: classify_tone(prediction.confidence),
            narrative: extract(&prediction.description),
            precautions: prediction.precautions.clone(),
            reveal,
        }
    }

    /// Refresh from a prediction that kept the same key. Returns `true` if
    /// the reveal had to be restarted.
    pub fn update(&mut self, prediction: &Prediction, index: usize) -> bool {
        if prediction.description != self.reveal.key().description {
            self.narrative = extract(&prediction.description);
        }
        self.index = index;
        self.disease = prediction.disease.clone();
        self.confidence = prediction.confidence;
        self.tone = classify_tone(prediction.confidence);
        self.precautions = prediction.precautions.clone();
        self.reveal.rekey(RevealKey::new(
            prediction.description.as_str(),
            index,
            prediction.confidence,
        ))
    }

    pub fn key(&self) -> CardKey {
        CardKey {
            disease: self.disease.clone(),
            index: self.index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn disease(&self) -> &str {
        &self.disease
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn summary(&self) -> &str {
        &self.narrative.summary
    }

    pub fn symptoms(&self) -> &[String] {
        &self.narrative.symptoms
    }

    pub fn precautions(&self) -> &[String] {
        &self.precautions
    }

    /// Current meter value (0 until revealed).
    pub fn meter(&self) -> i64 {
        self.reveal.value()
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.is_revealed()
    }

    pub fn reveal(&self) -> &RevealTimer {
        &self.reveal
    }

    pub async fn revealed(&mut self) -> Option<i64> {
        self.reveal.revealed().await
    }

    /// `[#######.............]` for the current meter; the bar alone is
    /// clamped to 0..=100, the number is not.
    pub fn meter_bar(&self) -> String {
        let filled = self.meter().clamp(0, 100) * METER_CELLS / 100;
        let mut bar = String::with_capacity(METER_CELLS as usize + 2);
        bar.push('[');
        for cell in 0..METER_CELLS {
            bar.push(if cell < filled { '#' } else { '.' });
        }
        bar.push(']');
        bar
    }
}

impl fmt::Display for DiagnosisCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Likely condition")?;
        writeln!(f, "  {}  ({}% match, {})", self.disease, self.meter(), self.tone)?;
        writeln!(f, "  {}", self.summary())?;

        if !self.symptoms().is_empty() {
            writeln!(f, "Symptom pattern")?;
            writeln!(f, "  {}", self.symptoms().join(" | "))?;
        }

        writeln!(f, "  {}", self.meter_bar())?;

        writeln!(f, "Suggested precautions")?;
        if self.precautions.is_empty() {
            writeln!(f, "  {NO_PRECAUTIONS_TEXT}")?;
        } else {
            for (i, item) in self.precautions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, item)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flu() -> Prediction {
        Prediction {
            disease: "Flu".into(),
            confidence: 0.82,
            description: "Flu. symptoms: cough, fever.".into(),
            precautions: vec!["rest".into(), "hydrate".into()],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mount_derives_display_fields() {
        let mut card = DiagnosisCard::mount(&flu(), 0);
        assert_eq!(card.tone(), Tone::High);
        assert_eq!(card.summary(), "Flu");
        assert_eq!(card.symptoms(), ["Cough", "Fever"]);
        assert_eq!(card.meter(), 0);
        assert_eq!(card.meter_bar(), format!("[{}]", ".".repeat(20)));

        assert_eq!(card.revealed().await, Some(82));
        assert_eq!(card.meter_bar(), format!("[{}{}]", "#".repeat(16), ".".repeat(4)));
    }

    #[tokio::test(start_paused = true)]
    async fn render_lists_precautions_or_fallback() {
        let mut card = DiagnosisCard::mount(&flu(), 0);
        card.revealed().await;
        let text = card.to_string();
        assert!(text.contains("Flu  (82% match, high)"));
        assert!(text.contains("Cough | Fever"));
        assert!(text.contains("1. rest"));
        assert!(text.contains("2. hydrate"));

        let mut bare = flu();
        bare.precautions.clear();
        bare.description = "Plain text".into();
        let card = DiagnosisCard::mount(&bare, 1);
        let text = card.to_string();
        assert!(text.contains(NO_PRECAUTIONS_TEXT));
        assert!(!text.contains("Symptom pattern"));
    }

    #[tokio::test(start_paused = true)]
    async fn update_with_new_index_restarts_reveal() {
        let mut card = DiagnosisCard::mount(&flu(), 0);
        card.revealed().await;
        assert_eq!(card.meter(), 82);

        assert!(card.update(&flu(), 1));
        assert_eq!(card.meter(), 0);
        assert_eq!(card.revealed().await, Some(82));

        assert!(!card.update(&flu(), 1));
        assert_eq!(card.meter(), 82);
    }
}
