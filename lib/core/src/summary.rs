use crate::{InterestVector, Vocabulary};

/// Shown instead of an interest list when nothing is selected
pub const NO_SHARED_INTERESTS: &str = "Sin intereses comunes";

/// Comma-separated labels selected in `interests`, or [`NO_SHARED_INTERESTS`]
pub fn interests_summary(vocabulary: &Vocabulary, interests: &InterestVector) -> String {
    let labels: Vec<&str> = vocabulary.selected_labels(interests).collect();
    if labels.is_empty() {
        NO_SHARED_INTERESTS.to_string()
    } else {
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_labels_in_order() {
        let vocab = Vocabulary::new(["Startups", "Fintech", "Criptomonedas"]).unwrap();
        let v = InterestVector::from_flags(&[1, 0, 1]);
        assert_eq!(interests_summary(&vocab, &v), "Startups, Criptomonedas");
    }

    #[test]
    fn test_summary_sentinel() {
        let vocab = Vocabulary::new(["a", "b"]).unwrap();
        let v = InterestVector::from_flags(&[0, 0]);
        assert_eq!(interests_summary(&vocab, &v), NO_SHARED_INTERESTS);
    }
}
