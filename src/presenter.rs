//! Plain-text rendering of registrations and table assignments.

use seatx_core::{Participant, PartitionResult, Vocabulary};
use std::fmt::Write;

/// Tables are shown side by side in rows of this many
pub const TABLES_PER_ROW: usize = 3;

pub struct TextPresenter<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> TextPresenter<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn participants(&self, participants: &[Participant]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Participantes registrados: {}", participants.len());
        for p in participants {
            let interests: Vec<&str> = self.vocabulary.selected_labels(&p.interests).collect();
            let _ = writeln!(out, "  {} <{}>: {}", p.name, p.email, interests.join(", "));
        }
        out
    }

    /// Tables numbered from 1, then any warnings
    pub fn result(&self, result: &PartitionResult) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Distribución de participantes en mesas");

        let tables: Vec<_> = result.iter_tables().collect();
        for row in tables.chunks(TABLES_PER_ROW) {
            let _ = writeln!(out);
            for table in row {
                let _ = writeln!(
                    out,
                    "Mesa {} ({}/{})",
                    table.label + 1,
                    table.len(),
                    result.config.capacity
                );
                for member in &table.members {
                    let _ = writeln!(out, "  - {}: {}", member.participant.name, member.summary);
                }
            }
        }

        if result.has_capacity_warning() {
            let over: Vec<String> = result
                .balance
                .over_capacity
                .iter()
                .map(|label| (label + 1).to_string())
                .collect();
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Aviso: no se pudo respetar la capacidad de {} por mesa; {} persona(s) de más en la(s) mesa(s) {}",
                result.config.capacity,
                result.balance.unresolved_excess,
                over.join(", ")
            );
        }

        if !result.deficient.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Aviso: estas personas no tienen intereses en común con nadie en su mesa: {}",
                result.deficient.join(", ")
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatx_core::{InterestVector, PartitionConfig, Partitioner};

    #[test]
    fn test_renders_tables_and_warnings() {
        let vocab = Vocabulary::new(["a", "b", "c"]).unwrap();
        let people: Vec<Participant> = [[1u8, 0, 0], [1, 0, 0], [1, 0, 0], [0, 0, 1], [0, 0, 1]]
            .iter()
            .enumerate()
            .map(|(i, f)| {
                Participant::new(format!("p{}", i), format!("p{}@x.y", i), InterestVector::from_flags(f))
            })
            .collect();
        let result = Partitioner::new(vocab.clone(), PartitionConfig::new(2, 2))
            .partition(&people)
            .unwrap();

        let text = TextPresenter::new(&vocab).result(&result);
        assert!(text.contains("Mesa 1"));
        assert!(text.contains("Mesa 2"));
        assert!(text.contains("1 persona(s) de más"));
    }

    #[test]
    fn test_renders_participants() {
        let vocab = Vocabulary::new(["a", "b"]).unwrap();
        let people = vec![Participant::new("Ana", "ana@x.y", InterestVector::from_flags(&[1, 1]))];
        let text = TextPresenter::new(&vocab).participants(&people);
        assert!(text.contains("Ana <ana@x.y>: a, b"));
    }
}
