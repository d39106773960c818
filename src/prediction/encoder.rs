use crate::reference::SymptomVocabulary;

use super::types::SymptomSet;

/// Presence vector aligned to a [`SymptomVocabulary`]: 1.0 where the
/// vocabulary symptom was selected, 0.0 elsewhere.
pub type EncodedVector = Vec<f32>;

/// Encode `selected` against `vocabulary`. Names absent from the
/// vocabulary are ignored; an empty selection yields all zeros.
pub fn encode(selected: &SymptomSet, vocabulary: &SymptomVocabulary) -> EncodedVector {
    let mut vector = vec![0.0; vocabulary.len()];
    for position in selected.iter().filter_map(|name| vocabulary.position(name)) {
        vector[position] = 1.0;
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> SymptomVocabulary {
        SymptomVocabulary::new(["itching", "skin_rash", "chills", "cough"]).unwrap()
    }

    #[test]
    fn marks_selected_positions() {
        let selected: SymptomSet = ["skin_rash", "cough"].into_iter().collect();
        assert_eq!(encode(&selected, &vocabulary()), vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn empty_selection_is_all_zero() {
        let encoded = encode(&SymptomSet::new(), &vocabulary());
        assert_eq!(encoded.len(), 4);
        assert!(encoded.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn unrecognized_names_are_ignored() {
        let vocab = vocabulary();
        let known: SymptomSet = ["itching"].into_iter().collect();
        let with_noise: SymptomSet = ["itching", "purple_ears", ""].into_iter().collect();
        assert_eq!(encode(&known, &vocab), encode(&with_noise, &vocab));
    }

    #[test]
    fn length_and_membership_hold_for_every_position() {
        let vocab = vocabulary();
        let selected: SymptomSet = ["chills", "itching", "fever"].into_iter().collect();
        let encoded = encode(&selected, &vocab);

        assert_eq!(encoded.len(), vocab.len());
        for (name, value) in vocab.names().iter().zip(&encoded) {
            let expected = if selected.contains(name) { 1.0 } else { 0.0 };
            assert_eq!(*value, expected, "position of {name}");
        }
    }
}
