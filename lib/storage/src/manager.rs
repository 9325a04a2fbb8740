use seatx_core::{Error, Participant, PartitionResult, Registration, Result, Vocabulary};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::assignments::AssignmentWriter;
use crate::registrations::{CsvRegistrationStore, RegistrationStore};

/// File locations under the data directory
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_registrations_file")]
    pub registrations_file: String,
    #[serde(default = "default_assignments_file")]
    pub assignments_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            registrations_file: default_registrations_file(),
            assignments_file: default_assignments_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_registrations_file() -> String {
    "participantes.csv".to_string()
}

fn default_assignments_file() -> String {
    "asignacion_mesas.csv".to_string()
}

/// Owns the registration store and the assignment output file
pub struct StorageManager {
    data_dir: PathBuf,
    registrations: CsvRegistrationStore,
    assignments: AssignmentWriter,
}

impl StorageManager {
    pub fn new(config: &StorageConfig, vocabulary: Vocabulary) -> Result<Self> {
        let data_dir = config.data_dir.clone();
        std::fs::create_dir_all(&data_dir)?;

        let registrations =
            CsvRegistrationStore::new(data_dir.join(&config.registrations_file), vocabulary);
        let assignments = AssignmentWriter::new(data_dir.join(&config.assignments_file));

        Ok(Self {
            data_dir,
            registrations,
            assignments,
        })
    }

    /// Manager with default file names under `data_dir`
    pub fn open<P: AsRef<Path>>(data_dir: P, vocabulary: Vocabulary) -> Result<Self> {
        let config = StorageConfig {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..StorageConfig::default()
        };
        Self::new(&config, vocabulary)
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.registrations.vocabulary()
    }

    #[inline]
    pub fn registrations(&self) -> &CsvRegistrationStore {
        &self.registrations
    }

    #[inline]
    pub fn assignments_path(&self) -> &Path {
        self.assignments.path()
    }

    pub fn register(&self, registration: &Registration) -> Result<Participant> {
        self.registrations.register(registration)
    }

    pub fn participants(&self) -> Result<Vec<Participant>> {
        self.registrations.read_all()
    }

    pub fn email_exists(&self, email: &str) -> Result<bool> {
        self.registrations.exists(email)
    }

    /// Persist a finished table assignment
    pub fn save_assignment(&self, result: &PartitionResult) -> Result<()> {
        self.assignments
            .write(self.vocabulary(), result)
            .map_err(|e| Error::Storage(e.to_string()))?;
        info!(
            "Table assignment saved to {:?} ({} participants)",
            self.assignments.path(),
            result.assignments.len()
        );
        Ok(())
    }
}
