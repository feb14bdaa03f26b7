// tests/narrative_extract.rs
use symptom_insight::{extract, normalize_symptom, ExtractedNarrative};

#[test]
fn empty_is_ok() {
    assert_eq!(
        extract(""),
        ExtractedNarrative {
            summary: String::new(),
            symptoms: vec![],
        }
    );
}

#[test]
fn flu_description_splits_summary_and_tags() {
    let out = extract("Flu. symptoms: high_fever, dry cough; chills.");
    assert_eq!(out.summary, "Flu");
    assert_eq!(out.symptoms, vec!["High Fever", "Dry Cough", "Chills"]);
}

#[test]
fn no_marker_keeps_whole_text() {
    let out = extract("No marker present here");
    assert_eq!(out.summary, "No marker present here");
    assert!(out.symptoms.is_empty());
}

#[test]
fn empty_fragments_are_dropped() {
    let out = extract("X, symptoms: , ,");
    assert_eq!(out.summary, "X");
    assert!(out.symptoms.is_empty());
}

#[test]
fn extraction_is_idempotent_and_pure() {
    let text = "Typhoid, Symptoms: belly_pain;  toxic_look_(typhos)";
    let a = extract(text);
    let b = extract(text);
    assert_eq!(a, b);
    assert_eq!(a.symptoms, vec!["Belly Pain", "Toxic Look (typhos)"]);
}

#[test]
fn normalized_labels_are_fixed_points() {
    for label in ["Dry Cough", "High Fever", "Chills", "Skin Rash"] {
        assert_eq!(normalize_symptom(label), label);
        assert_eq!(normalize_symptom(&normalize_symptom(label)), label);
    }
}

#[test]
fn newlines_in_tail_are_whitespace() {
    let out = extract("Cold:\nsymptoms: runny\nnose, sneezing");
    assert_eq!(out.summary, "Cold");
    assert_eq!(out.symptoms, vec!["Runny Nose", "Sneezing"]);
}
