pub mod manager;
pub mod registrations;
pub mod assignments;

pub use manager::{StorageConfig, StorageManager};
pub use registrations::{CsvRegistrationStore, RegistrationStore};
pub use assignments::AssignmentWriter;
