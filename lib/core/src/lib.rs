//! # SeatX Core
//!
//! Core library for the SeatX table planner.
//!
//! This crate provides the data model and the seating algorithms:
//!
//! - [`Vocabulary`] - Fixed, ordered interest labels
//! - [`InterestVector`] - A participant's binary interest selections
//! - [`Participant`] / [`Registration`] - Registered attendees and form validation
//! - [`KMeans`] - Seeded k-means used for the initial split
//! - [`balance()`] - Capacity balancing by least affinity
//! - [`Partitioner`] - Clustering, balancing and affinity report in one run
//! - [`Workflow`] - Configure, then review, a table assignment
//!
//! ## Example
//!
//! ```rust
//! use seatx_core::{Participant, PartitionConfig, Partitioner, Vocabulary};
//!
//! let vocab = Vocabulary::new(["Startups", "Fintech", "Criptomonedas"]).unwrap();
//! let people = vec![
//!     Participant::new("Ana", "ana@example.com", vocab.encode(&["Startups", "Fintech"]).unwrap()),
//!     Participant::new("Luis", "luis@example.com", vocab.encode(&["Startups"]).unwrap()),
//!     Participant::new("Eva", "eva@example.com", vocab.encode(&["Criptomonedas"]).unwrap()),
//!     Participant::new("Raúl", "raul@example.com", vocab.encode(&["Criptomonedas"]).unwrap()),
//! ];
//!
//! let result = Partitioner::new(vocab, PartitionConfig::new(2, 2))
//!     .partition(&people)
//!     .unwrap();
//! assert_eq!(result.assignments.len(), 4);
//! assert!(result.deficient.is_empty());
//! ```

pub mod error;
pub mod vector;
pub mod interests;
pub mod vocabulary;
pub mod participant;
pub mod kmeans;
pub mod balance;
pub mod deficiency;
pub mod summary;
pub mod partition;
pub mod workflow;

pub use error::{Error, Result};
pub use vector::Vector;
pub use interests::InterestVector;
pub use vocabulary::{Vocabulary, DEFAULT_INTERESTS};
pub use participant::{Participant, Registration, MIN_INTERESTS, MAX_INTERESTS};
pub use kmeans::{Clustering, KMeans, KMeansConfig};
pub use balance::{balance, BalanceReport, Relocation};
pub use deficiency::detect_deficient;
pub use summary::{interests_summary, NO_SHARED_INTERESTS};
pub use partition::{Assignment, PartitionConfig, PartitionResult, Partitioner, Table};
pub use workflow::Workflow;
