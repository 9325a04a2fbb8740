//! Two-phase table assignment flow.
//!
//! An organiser first configures a run (`Configuring`), then reviews the
//! computed tables (`Result`). Going back discards the result; every new
//! run starts from scratch.

use serde::Serialize;
use tracing::info;
use crate::{PartitionConfig, PartitionResult, Participant, Partitioner, Result, Vocabulary};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Workflow {
    Configuring { suggested: PartitionConfig },
    Result { result: PartitionResult },
}

impl Workflow {
    /// Start configuring with defaults suggested for `participants` registrations
    pub fn configuring(participants: usize) -> Self {
        Workflow::Configuring {
            suggested: PartitionConfig::suggested(participants),
        }
    }

    /// Run the partitioner and move to the result phase
    ///
    /// On error the workflow is left unchanged.
    pub fn assign(
        &mut self,
        vocabulary: &Vocabulary,
        config: PartitionConfig,
        participants: &[Participant],
    ) -> Result<()> {
        self.assign_with(vocabulary, config, participants, |_| Ok(()))
    }

    /// Like [`assign`](Self::assign), but hands the result to `commit`
    /// (typically a save) before switching phase
    ///
    /// If partitioning or `commit` fails, the workflow is left unchanged.
    pub fn assign_with<F>(
        &mut self,
        vocabulary: &Vocabulary,
        config: PartitionConfig,
        participants: &[Participant],
        commit: F,
    ) -> Result<()>
    where
        F: FnOnce(&PartitionResult) -> Result<()>,
    {
        let result = Partitioner::new(vocabulary.clone(), config).partition(participants)?;
        commit(&result)?;
        info!("Table assignment ready ({} tables)", result.tables());
        *self = Workflow::Result { result };
        Ok(())
    }

    /// Drop the current result and go back to configuring
    pub fn reset(&mut self, participants: usize) {
        *self = Workflow::configuring(participants);
    }

    #[inline]
    pub fn result(&self) -> Option<&PartitionResult> {
        match self {
            Workflow::Result { result } => Some(result),
            Workflow::Configuring { .. } => None,
        }
    }

    #[inline]
    pub fn is_configuring(&self) -> bool {
        matches!(self, Workflow::Configuring { .. })
    }
}
