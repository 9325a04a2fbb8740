//! Append-only CSV store of registrations.
//!
//! Layout: a header row `Nombre,Email,<label>...` followed by one row per
//! participant with `0`/`1` under every interest label. The header must
//! match the configured vocabulary exactly.

use parking_lot::Mutex;
use seatx_core::{Error, InterestVector, Participant, Registration, Result, Vocabulary};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const NAME_COLUMN: &str = "Nombre";
pub const EMAIL_COLUMN: &str = "Email";

/// Where registrations live
pub trait RegistrationStore {
    /// Vocabulary every stored row is encoded against
    fn vocabulary(&self) -> &Vocabulary;

    fn exists(&self, email: &str) -> Result<bool>;

    fn append(&self, participant: &Participant) -> Result<()>;

    /// Snapshot of every stored participant, in insertion order
    fn read_all(&self) -> Result<Vec<Participant>>;

    /// Validate a form and store it unless the email is already taken
    fn register(&self, registration: &Registration) -> Result<Participant> {
        let participant = registration.validate(self.vocabulary())?;
        if self.exists(&participant.email)? {
            return Err(Error::DuplicateEmail(participant.email));
        }
        self.append(&participant)?;
        Ok(participant)
    }
}

pub(crate) fn csv_error(e: csv::Error) -> Error {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => Error::Io(io),
            other => Error::Storage(format!("{:?}", other)),
        }
    } else {
        Error::Storage(e.to_string())
    }
}

/// Header row for a vocabulary: name, email, then every label
pub fn header_for(vocabulary: &Vocabulary) -> Vec<String> {
    let mut header = Vec::with_capacity(vocabulary.len() + 2);
    header.push(NAME_COLUMN.to_string());
    header.push(EMAIL_COLUMN.to_string());
    header.extend(vocabulary.labels().iter().cloned());
    header
}

/// Cells for one participant, matching [`header_for`]
pub fn row_for(participant: &Participant) -> Vec<String> {
    let mut row = Vec::with_capacity(participant.interests.dim() + 2);
    row.push(participant.name.clone());
    row.push(participant.email.clone());
    row.extend(
        participant
            .interests
            .as_slice()
            .iter()
            .map(|&b| if b { "1" } else { "0" }.to_string()),
    );
    row
}

/// CSV-file registration store
pub struct CsvRegistrationStore {
    path: PathBuf,
    vocabulary: Vocabulary,
    write_lock: Mutex<()>,
}

impl CsvRegistrationStore {
    pub fn new<P: AsRef<Path>>(path: P, vocabulary: Vocabulary) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            vocabulary,
            write_lock: Mutex::new(()),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn has_data(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() > 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn check_header(&self, header: &csv::StringRecord) -> Result<()> {
        let fixed = [NAME_COLUMN, EMAIL_COLUMN];
        for (column, expected) in fixed.iter().enumerate() {
            let found = header.get(column).unwrap_or("");
            if found != *expected {
                return Err(Error::VocabularyMismatch {
                    column,
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }
        let labels: Vec<&str> = header.iter().skip(fixed.len()).collect();
        self.vocabulary
            .check_columns(labels.as_slice())
            .map_err(|e| match e {
                Error::VocabularyMismatch { column, expected, found } => Error::VocabularyMismatch {
                    column: column + fixed.len(),
                    expected,
                    found,
                },
                other => other,
            })
    }

    fn parse_row(&self, record: &csv::StringRecord) -> Result<Participant> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let expected = self.vocabulary.len() + 2;
        if record.len() != expected {
            return Err(Error::MalformedRecord {
                line,
                reason: format!("expected {} fields, found {}", expected, record.len()),
            });
        }

        let name = record.get(0).unwrap_or("").trim();
        let email = record.get(1).unwrap_or("").trim();
        if email.is_empty() {
            return Err(Error::MalformedRecord {
                line,
                reason: "empty email".to_string(),
            });
        }

        let mut bits = Vec::with_capacity(self.vocabulary.len());
        for (i, label) in self.vocabulary.labels().iter().enumerate() {
            let cell = record.get(i + 2).unwrap_or("").trim();
            let bit = match cell {
                "0" => false,
                "1" => true,
                _ => {
                    return Err(Error::InvalidInterestCell {
                        line,
                        column: label.clone(),
                        value: cell.to_string(),
                    })
                }
            };
            bits.push(bit);
        }

        Ok(Participant::new(name, email, InterestVector::new(bits)))
    }
}

impl RegistrationStore for CsvRegistrationStore {
    fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn exists(&self, email: &str) -> Result<bool> {
        let email = email.trim();
        Ok(self.read_all()?.iter().any(|p| p.email == email))
    }

    fn append(&self, participant: &Participant) -> Result<()> {
        if participant.interests.dim() != self.vocabulary.len() {
            return Err(Error::InvalidDimension {
                expected: self.vocabulary.len(),
                actual: participant.interests.dim(),
            });
        }

        let write_header = !self.has_data()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        if write_header {
            writer.write_record(header_for(&self.vocabulary)).map_err(csv_error)?;
        }
        writer.write_record(row_for(participant)).map_err(csv_error)?;
        writer.flush()?;

        debug!("Appended registration for {}", participant.email);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Participant>> {
        if !self.has_data()? {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(csv_error)?;

        let header = reader.headers().map_err(csv_error)?.clone();
        self.check_header(&header)?;

        let mut participants = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            participants.push(self.parse_row(&record)?);
        }
        Ok(participants)
    }

    /// Holds the write lock across the duplicate check and the append
    fn register(&self, registration: &Registration) -> Result<Participant> {
        let _guard = self.write_lock.lock();
        let participant = registration.validate(&self.vocabulary)?;
        if self.exists(&participant.email)? {
            return Err(Error::DuplicateEmail(participant.email));
        }
        self.append(&participant)?;
        info!("Registered {} <{}>", participant.name, participant.email);
        Ok(participant)
    }
}
