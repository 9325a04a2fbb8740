//! Participants who share nothing with the rest of their table.

use crate::{InterestVector, Participant};

/// Indices of participants whose interests miss every other member's
///
/// A participant is flagged when they selected at least one interest and
/// none of those appears in the union of their tablemates' interests.
/// Results follow input order. Must run on final labels.
pub fn deficient_indices(interests: &[InterestVector], labels: &[usize]) -> Vec<usize> {
    debug_assert_eq!(interests.len(), labels.len());
    let dim = interests.first().map(InterestVector::dim).unwrap_or(0);

    (0..interests.len())
        .filter(|&i| {
            if interests[i].is_blank() {
                return false;
            }
            let mut tablemates = InterestVector::new(vec![false; dim]);
            for (j, other) in interests.iter().enumerate() {
                if j != i && labels[j] == labels[i] {
                    tablemates.union_with(other);
                }
            }
            !interests[i].intersects(&tablemates)
        })
        .collect()
}

/// Names of participants with no shared interest at their table
pub fn detect_deficient(participants: &[Participant], labels: &[usize]) -> Vec<String> {
    let interests: Vec<InterestVector> = participants.iter().map(|p| p.interests.clone()).collect();
    deficient_indices(&interests, labels)
        .into_iter()
        .map(|i| participants[i].name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, flags: &[u8]) -> Participant {
        Participant::new(name, format!("{}@example.com", name), InterestVector::from_flags(flags))
    }

    #[test]
    fn test_flags_isolated_member() {
        let people = vec![
            person("ana", &[1, 1, 0, 0]),
            person("bruno", &[1, 0, 1, 0]),
            person("carla", &[0, 0, 0, 1]),
        ];
        assert_eq!(detect_deficient(&people, &[0, 0, 0]), vec!["carla".to_string()]);
    }

    #[test]
    fn test_union_of_tablemates_counts() {
        // Ana shares one interest with Bruno and another with Carla.
        let people = vec![
            person("ana", &[1, 1, 0]),
            person("bruno", &[1, 0, 0]),
            person("carla", &[0, 1, 0]),
        ];
        assert!(detect_deficient(&people, &[0, 0, 0]).is_empty());
    }

    #[test]
    fn test_blank_vector_never_flagged() {
        let people = vec![person("ana", &[0, 0]), person("bruno", &[1, 0])];
        assert_eq!(detect_deficient(&people, &[0, 0]), vec!["bruno".to_string()]);
    }

    #[test]
    fn test_alone_at_table_is_flagged() {
        let people = vec![person("ana", &[1, 0]), person("bruno", &[1, 0]), person("carla", &[0, 1])];
        assert_eq!(detect_deficient(&people, &[0, 0, 1]), vec!["carla".to_string()]);
    }

    #[test]
    fn test_other_tables_do_not_count() {
        let people = vec![person("ana", &[1, 0]), person("bruno", &[0, 1]), person("carla", &[1, 0])];
        let flagged = deficient_indices(
            &people.iter().map(|p| p.interests.clone()).collect::<Vec<_>>(),
            &[0, 0, 1],
        );
        assert_eq!(flagged, vec![0, 1, 2]);
    }
}
