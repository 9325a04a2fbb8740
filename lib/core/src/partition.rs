use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::balance::{balance, group_sizes, BalanceReport};
use crate::deficiency::detect_deficient;
use crate::kmeans::{KMeans, KMeansConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_N_INIT, DEFAULT_SEED};
use crate::summary::interests_summary;
use crate::{Error, InterestVector, Participant, Result, Vector, Vocabulary};

/// Fewest registrations a table assignment will run on
pub const MIN_PARTICIPANTS: usize = 2;
/// Fewest tables a run may ask for
pub const MIN_TABLES: usize = 2;

/// Parameters for one table assignment run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Number of tables (K)
    pub tables: usize,
    /// Maximum participants per table (C)
    pub capacity: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_n_init")]
    pub n_init: usize,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_n_init() -> usize {
    DEFAULT_N_INIT
}

impl PartitionConfig {
    pub fn new(tables: usize, capacity: usize) -> Self {
        Self {
            tables,
            capacity,
            seed: DEFAULT_SEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            n_init: DEFAULT_N_INIT,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Defaults offered before the organiser picks: a table per four
    /// guests and room for an even share, both clamped to `participants`.
    pub fn suggested(participants: usize) -> Self {
        let n = participants.max(1);
        let tables = (n / 4).max(MIN_TABLES).min(n);
        let capacity = (n / tables.max(1)).max(3).min(n);
        Self::new(tables, capacity)
    }

    /// Check K and C against the participant count
    pub fn validate(&self, participants: usize) -> Result<()> {
        if participants == 0 {
            return Err(Error::NoRegistrations);
        }
        if participants < MIN_PARTICIPANTS {
            return Err(Error::TooFewParticipants {
                required: MIN_PARTICIPANTS,
                actual: participants,
            });
        }
        if self.tables < MIN_TABLES || self.tables > participants {
            return Err(Error::InvalidTableCount {
                tables: self.tables,
                participants,
            });
        }
        if self.capacity < 1 || self.capacity > participants {
            return Err(Error::InvalidCapacity {
                capacity: self.capacity,
                participants,
            });
        }
        Ok(())
    }

    fn kmeans(&self) -> KMeansConfig {
        KMeansConfig {
            k: self.tables,
            seed: self.seed,
            max_iterations: self.max_iterations,
            n_init: self.n_init,
        }
    }
}

/// A participant with their final table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub participant: Participant,
    /// Final table label in `[0, tables)`
    pub table: usize,
    /// Human-readable interest list
    pub summary: String,
}

/// Borrowed view of one table in a [`PartitionResult`]
#[derive(Debug, Clone, Serialize)]
pub struct Table<'a> {
    pub label: usize,
    pub members: Vec<&'a Assignment>,
}

impl Table<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Outcome of one table assignment run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartitionResult {
    pub config: PartitionConfig,
    /// One entry per participant, in input order
    pub assignments: Vec<Assignment>,
    /// Labels straight out of clustering, before balancing
    pub initial_labels: Vec<usize>,
    pub balance: BalanceReport,
    /// Names of participants sharing no interest with their table
    pub deficient: Vec<String>,
}

impl PartitionResult {
    #[inline]
    pub fn tables(&self) -> usize {
        self.config.tables
    }

    #[inline]
    pub fn labels(&self) -> Vec<usize> {
        self.assignments.iter().map(|a| a.table).collect()
    }

    pub fn table(&self, label: usize) -> Table<'_> {
        Table {
            label,
            members: self.assignments.iter().filter(|a| a.table == label).collect(),
        }
    }

    /// Every table in label order, empty ones included
    pub fn iter_tables(&self) -> impl Iterator<Item = Table<'_>> + '_ {
        (0..self.tables()).map(move |label| self.table(label))
    }

    pub fn sizes(&self) -> Vec<usize> {
        group_sizes(&self.labels(), self.tables())
    }

    /// Capacity could not be met for every table
    #[inline]
    pub fn has_capacity_warning(&self) -> bool {
        !self.balance.is_satisfied()
    }
}

/// Splits participants into tables by shared interests
pub struct Partitioner {
    vocabulary: Vocabulary,
    config: PartitionConfig,
}

impl Partitioner {
    pub fn new(vocabulary: Vocabulary, config: PartitionConfig) -> Self {
        Self { vocabulary, config }
    }

    #[inline]
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn partition(&self, participants: &[Participant]) -> Result<PartitionResult> {
        let n = participants.len();
        self.config.validate(n)?;

        let dim = self.vocabulary.len();
        if let Some(bad) = participants.iter().find(|p| p.interests.dim() != dim) {
            return Err(Error::InvalidDimension {
                expected: dim,
                actual: bad.interests.dim(),
            });
        }

        info!(
            "Assigning {} participants to {} tables (capacity {})",
            n, self.config.tables, self.config.capacity
        );

        let interests: Vec<InterestVector> = participants.iter().map(|p| p.interests.clone()).collect();
        let points: Vec<Vector> = interests.iter().map(InterestVector::to_dense).collect();

        let clustering = KMeans::new(self.config.kmeans()).fit(&points)?;
        debug!(
            "clustering done: sizes={:?} inertia={:.4}",
            clustering.sizes(),
            clustering.inertia
        );

        let initial_labels = clustering.labels;
        let mut labels = initial_labels.clone();
        let report = balance(&mut labels, &interests, self.config.tables, self.config.capacity);
        debug!(
            "balancing done: {} move(s), sizes={:?}",
            report.moves.len(),
            group_sizes(&labels, self.config.tables)
        );

        let deficient = detect_deficient(participants, &labels);
        if !deficient.is_empty() {
            warn!("{} participant(s) share no interest with their table", deficient.len());
        }

        let assignments = participants
            .iter()
            .zip(labels)
            .map(|(p, table)| Assignment {
                participant: p.clone(),
                table,
                summary: interests_summary(&self.vocabulary, &p.interests),
            })
            .collect();

        Ok(PartitionResult {
            config: self.config,
            assignments,
            initial_labels,
            balance: report,
            deficient,
        })
    }
}
