// Table assignment output file
use anyhow::{Context, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use seatx_core::{PartitionResult, Vocabulary};
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::registrations::{header_for, row_for};

pub const TABLE_COLUMN: &str = "Mesa";
pub const SUMMARY_COLUMN: &str = "Intereses";

/// Writes a [`PartitionResult`] as CSV: the registration columns plus the
/// table label and the interest summary. Replaces the file atomically.
pub struct AssignmentWriter {
    path: PathBuf,
}

impl AssignmentWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the CSV into memory
    pub fn render(&self, vocabulary: &Vocabulary, result: &PartitionResult) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = header_for(vocabulary);
        header.push(TABLE_COLUMN.to_string());
        header.push(SUMMARY_COLUMN.to_string());
        writer.write_record(&header)?;

        for assignment in &result.assignments {
            let mut row = row_for(&assignment.participant);
            row.push(assignment.table.to_string());
            row.push(assignment.summary.clone());
            writer.write_record(&row)?;
        }

        writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV buffer: {}", e.error()))
    }

    pub fn write(&self, vocabulary: &Vocabulary, result: &PartitionResult) -> Result<()> {
        let data = self.render(vocabulary, result)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&data))
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatx_core::{InterestVector, Participant, PartitionConfig, Partitioner};

    fn result() -> (Vocabulary, PartitionResult) {
        let vocab = Vocabulary::new(["a", "b"]).unwrap();
        let people = vec![
            Participant::new("Ana", "ana@x.y", InterestVector::from_flags(&[1, 0])),
            Participant::new("Luis", "luis@x.y", InterestVector::from_flags(&[1, 0])),
            Participant::new("Eva", "eva@x.y", InterestVector::from_flags(&[0, 1])),
            Participant::new("Raúl", "raul@x.y", InterestVector::from_flags(&[0, 0])),
        ];
        let result = Partitioner::new(vocab.clone(), PartitionConfig::new(2, 2))
            .partition(&people)
            .unwrap();
        (vocab, result)
    }

    #[test]
    fn test_render_columns() {
        let (vocab, result) = result();
        let writer = AssignmentWriter::new("unused.csv");
        let text = String::from_utf8(writer.render(&vocab, &result).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Nombre,Email,a,b,Mesa,Intereses");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("Ana,ana@x.y,1,0,"));
        assert!(lines[1].ends_with(",a"));
        assert!(lines[4].ends_with(",Sin intereses comunes"));
    }

    #[test]
    fn test_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("asignacion.csv");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale").unwrap();

        let (vocab, result) = result();
        AssignmentWriter::new(&path).write(&vocab, &result).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Nombre,Email"));
        assert!(!text.contains("stale"));
    }
}
