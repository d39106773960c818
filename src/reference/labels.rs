/// Name reported when a class index has no label.
pub const UNKNOWN_DISEASE: &str = "Unknown Disease";

/// Class index → disease name, in classifier output order.
pub const DISEASE_LABELS: [&str; 28] = [
    "Tuberculosis",
    "Cold",
    "Influenza",
    "Drug Reaction",
    "Malaria",
    "Allergy",
    "Hypothyroidism",
    "Psoriasis",
    "GERD",
    "Chronic cholestasis",
    "Hepatitis A",
    "Osteoarthritis",
    "(Vertigo) Paroymsal Positional Vertigo",
    "Hypoglycemia",
    "Acne",
    "Diabetes",
    "Impetigo",
    "Hypertension",
    "Peptic ulcer disease",
    "Dimorphic hemorrhoids (piles)",
    "Common Cold",
    "Chicken pox",
    "Cervical spondylosis",
    "Hyperthyroidism",
    "Urinary tract infection",
    "Varicose veins",
    "AIDS",
    "Paralysis (brain hemorrhage)",
];

/// Resolves predicted class indices to disease names.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiseaseLabels;

impl DiseaseLabels {
    pub fn lookup(&self, index: usize) -> &'static str {
        DISEASE_LABELS.get(index).copied().unwrap_or(UNKNOWN_DISEASE)
    }

    /// Number of classes the classifier must output.
    pub fn len(&self) -> usize {
        DISEASE_LABELS.len()
    }

    pub fn is_empty(&self) -> bool {
        DISEASE_LABELS.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_indices_resolve_to_literal_names() {
        let labels = DiseaseLabels;
        assert_eq!(labels.lookup(0), "Tuberculosis");
        assert_eq!(labels.lookup(14), "Acne");
        assert_eq!(labels.lookup(15), "Diabetes");
        assert_eq!(labels.lookup(27), "Paralysis (brain hemorrhage)");
    }

    #[test]
    fn out_of_range_index_is_unknown() {
        assert_eq!(DiseaseLabels.lookup(28), UNKNOWN_DISEASE);
        assert_eq!(DiseaseLabels.lookup(99), "Unknown Disease");
    }

    #[test]
    fn table_has_28_classes() {
        assert_eq!(DiseaseLabels.len(), 28);
    }
}
