//! Capacity balancing.
//!
//! Moves the least fitting member out of an over-full table into the open
//! table whose mean interests suit them best, one participant at a time.
//!
//! Tie-breaking:
//! - the over-capacity table with the lowest label is fixed first
//! - among equally poor fits, the earliest participant (input order) moves
//! - among equally good targets, the lowest label wins
//!
//! Tables below capacity are valid targets even when empty; an empty
//! table's mean is the zero vector.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::{InterestVector, Vector};

/// One relocation made by the balancer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relocation {
    /// Index into the participant slice
    pub participant: usize,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceReport {
    pub moves: Vec<Relocation>,
    /// Participants still above capacity, summed over all tables
    pub unresolved_excess: usize,
    /// Labels of tables still above capacity
    pub over_capacity: Vec<usize>,
}

impl BalanceReport {
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        self.unresolved_excess == 0
    }
}

/// Table sizes for `labels` over `k` tables
pub fn group_sizes(labels: &[usize], k: usize) -> Vec<usize> {
    let mut sizes = vec![0; k];
    for &label in labels {
        sizes[label] += 1;
    }
    sizes
}

/// Sum of shared interests between `member` and every other participant in `members`
pub fn affinity_to_group(interests: &[InterestVector], member: usize, members: &[usize]) -> u32 {
    members
        .iter()
        .filter(|&&other| other != member)
        .map(|&other| interests[member].affinity(&interests[other]))
        .sum()
}

fn members_of(labels: &[usize], group: usize) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter(|&(_, &l)| l == group)
        .map(|(i, _)| i)
        .collect()
}

/// Rebalance `labels` in place so no table holds more than `capacity`.
///
/// Stops early when every table under capacity is gone; what remains is
/// reported as unresolved excess. At most `labels.len()` moves are made.
pub fn balance(
    labels: &mut [usize],
    interests: &[InterestVector],
    k: usize,
    capacity: usize,
) -> BalanceReport {
    debug_assert_eq!(labels.len(), interests.len());
    let n = labels.len();
    let dim = interests.first().map(InterestVector::dim).unwrap_or(0);
    let dense: Vec<Vector> = interests.iter().map(InterestVector::to_dense).collect();
    let mut sizes = group_sizes(labels, k);
    let mut report = BalanceReport::default();

    for _ in 0..n {
        let Some(over) = (0..k).find(|&g| sizes[g] > capacity) else {
            break;
        };

        let members = members_of(labels, over);
        let Some(candidate) = members
            .iter()
            .copied()
            .min_by_key(|&m| affinity_to_group(interests, m, &members))
        else {
            break;
        };

        let mut target: Option<(usize, f32)> = None;
        for group in (0..k).filter(|&g| sizes[g] < capacity) {
            let mean = Vector::mean(
                labels
                    .iter()
                    .zip(dense.iter())
                    .filter(|&(&l, _)| l == group)
                    .map(|(_, v)| v),
                dim,
            );
            let score = interests[candidate].dot(&mean);
            match target {
                Some((_, best)) if score <= best => {}
                _ => target = Some((group, score)),
            }
        }

        let Some((to, score)) = target else {
            debug!("no table below capacity {}, stopping", capacity);
            break;
        };

        debug!(
            "moving participant {} from table {} to table {} (affinity {:.3})",
            candidate, over, to, score
        );
        labels[candidate] = to;
        sizes[over] -= 1;
        sizes[to] += 1;
        report.moves.push(Relocation {
            participant: candidate,
            from: over,
            to,
        });
    }

    report.over_capacity = (0..k).filter(|&g| sizes[g] > capacity).collect();
    report.unresolved_excess = sizes.iter().map(|&s| s.saturating_sub(capacity)).sum();

    if report.unresolved_excess > 0 {
        warn!(
            "capacity {} cannot be met: {} participant(s) over capacity in tables {:?}",
            capacity, report.unresolved_excess, report.over_capacity
        );
    }

    report
}
