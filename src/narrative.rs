//! # Narrative extraction
//! Turns the loosely formatted `description` returned by the diagnosis service
//! into a display summary plus an ordered list of normalized symptom labels.
//!
//! Expected shape (everything optional):
//! `"<summary>[, ] symptoms: <item>[,;]<item>...[.]"`
//!
//! Extraction never fails: text without a `symptoms:` marker is returned
//! whole as the summary with no symptom tags.

use serde::{Deserialize, Serialize};

/// Literal marker, matched ASCII case-insensitively.
pub const SYMPTOMS_MARKER: &str = "symptoms:";

/// Summary + symptom labels derived from one description string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedNarrative {
    pub summary: String,
    pub symptoms: Vec<String>,
}

/// Split a description into summary and normalized symptom labels.
///
/// Only the first marker counts. Any later `symptoms:` text is part of the
/// tail and ends up inside an ordinary fragment.
pub fn extract(description: &str) -> ExtractedNarrative {
    if description.is_empty() {
        return ExtractedNarrative::default();
    }

    let Some(at) = find_marker(description) else {
        return ExtractedNarrative {
            summary: description.to_string(),
            symptoms: Vec::new(),
        };
    };

    let head = &description[..at];
    let tail = &description[at + SYMPTOMS_MARKER.len()..];

    let summary = trim_summary(head);
    let summary = if summary.is_empty() {
        description.to_string()
    } else {
        summary.to_string()
    };

    let tail = tail.trim_start();
    let tail = tail.strip_suffix('.').unwrap_or(tail);
    let symptoms = split_fragments(tail)
        .map(normalize_symptom)
        .filter(|s| !s.is_empty())
        .collect();

    ExtractedNarrative { summary, symptoms }
}

/// Byte offset of the first case-insensitive `symptoms:` occurrence.
///
/// The marker is pure ASCII, so every match starts on a char boundary.
fn find_marker(text: &str) -> Option<usize> {
    let needle = SYMPTOMS_MARKER.as_bytes();
    let hay = text.as_bytes();
    if hay.len() < needle.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Trailing whitespace, then at most one trailing `,` `:` or `.` separator.
///
/// The period is included so that "Flu. symptoms: ..." yields "Flu".
fn trim_summary(head: &str) -> &str {
    let head = head.trim_end();
    head.strip_suffix([',', ':', '.']).unwrap_or(head)
}

/// Raw fragments between `,`/`;` separators. A run of separators acts as a
/// single split point; the empty pieces it would produce are skipped here.
fn split_fragments(list: &str) -> impl Iterator<Item = &str> {
    list.split([',', ';']).filter(|piece| !piece.is_empty())
}

/// Normalize one symptom fragment into a title-cased label.
///
/// `_` becomes a space, whitespace runs collapse to one space, the result is
/// trimmed, lowercased, and the first character of every word is uppercased.
/// Idempotent on its own output.
pub fn normalize_symptom(fragment: &str) -> String {
    let spaced = fragment.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    for word in spaced.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        push_title_word(&mut out, word);
    }
    out
}

fn push_title_word(out: &mut String, word: &str) {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_description_yields_nothing() {
        assert_eq!(extract(""), ExtractedNarrative::default());
    }

    #[test]
    fn marker_is_case_insensitive() {
        let out = extract("Migraine, SYMPTOMS: Headache");
        assert_eq!(out.summary, "Migraine");
        assert_eq!(out.symptoms, vec!["Headache"]);
    }

    #[test]
    fn summary_falls_back_when_marker_leads() {
        let out = extract("symptoms: itching, skin_rash");
        assert_eq!(out.summary, "symptoms: itching, skin_rash");
        assert_eq!(out.symptoms, vec!["Itching", "Skin Rash"]);
    }

    #[test]
    fn marker_with_empty_tail_has_no_symptoms() {
        let out = extract("Allergy: symptoms:");
        assert_eq!(out.summary, "Allergy");
        assert!(out.symptoms.is_empty());
    }

    #[test]
    fn second_marker_stays_in_tail() {
        let out = extract("A symptoms: cough, symptoms: fever");
        assert_eq!(out.summary, "A");
        assert_eq!(out.symptoms, vec!["Cough", "Symptoms: Fever"]);
    }

    #[test]
    fn separator_runs_collapse() {
        let out = extract("B symptoms: a,,;b ;; c");
        assert_eq!(out.symptoms, vec!["A", "B", "C"]);
    }

    #[test]
    fn only_one_trailing_period_is_removed() {
        let out = extract("C symptoms: fatigue..");
        assert_eq!(out.symptoms, vec!["Fatigue."]);
    }

    #[test]
    fn normalize_collapses_and_titles() {
        assert_eq!(normalize_symptom("  HIGH__fever\t now "), "High Fever Now");
        assert_eq!(normalize_symptom("   "), "");
        assert_eq!(normalize_symptom("Dry Cough"), "Dry Cough");
    }

    #[test]
    fn non_ascii_text_does_not_split_chars() {
        let out = extract("Grippe é Symptoms: ÉTÉ_fièvre");
        assert_eq!(out.summary, "Grippe é");
        assert_eq!(out.symptoms, vec!["Été Fièvre"]);
    }
}
