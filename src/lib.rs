//! # SeatX
//!
//! Event registration and interest-based table planning.
//!
//! Attendees register with a name, an email and three to five interests.
//! SeatX then splits them into tables so that people sharing interests sit
//! together, keeps every table within a capacity limit, and reports anyone
//! left without a common interest at their table.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! seatx register --name "Ana" --email ana@example.com \
//!     --interest Startups --interest Fintech --interest Criptomonedas
//! seatx assign --tables 4 --capacity 6
//! seatx serve --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use seatx::prelude::*;
//!
//! let storage = StorageManager::open("./data", Vocabulary::default()).unwrap();
//! let participants = storage.participants().unwrap();
//!
//! let result = Partitioner::new(Vocabulary::default(), PartitionConfig::new(4, 6))
//!     .partition(&participants)
//!     .unwrap();
//! storage.save_assignment(&result).unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - [`seatx-core`](https://docs.rs/seatx-core) - Vocabulary, interest vectors, k-means, balancing, affinity report
//! - [`seatx-storage`](https://docs.rs/seatx-storage) - CSV registration store and assignment output
//! - [`seatx-api`](https://docs.rs/seatx-api) - REST API

pub mod config;
pub mod presenter;

// Re-export core types
pub use seatx_core::{
    Vocabulary, InterestVector, Participant, Registration,
    PartitionConfig, PartitionResult, Partitioner, Assignment,
    BalanceReport, Workflow,
    Error, Result,
};

// Re-export storage
pub use seatx_storage::{StorageConfig, StorageManager, RegistrationStore};

// Re-export API
pub use seatx_api::{ApiState, RestApi};

pub use config::AppConfig;
pub use presenter::TextPresenter;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Vocabulary, InterestVector, Participant, Registration,
        PartitionConfig, PartitionResult, Partitioner, Assignment,
        BalanceReport, Workflow,
        Error, Result,
        StorageConfig, StorageManager, RegistrationStore,
        ApiState, RestApi,
        AppConfig, TextPresenter,
    };
}
