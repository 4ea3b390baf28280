//! Randomized ratio-based partitioning of a file list into named groups.
//!
//! The list is shuffled once, then cut: the first group takes
//! `round(ratio[0] * n)` items, and with three groups the remainder is cut
//! again using the second group's relative share of what is left.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::config::SplitSpec;
use crate::core::dataset::LabeledFile;

/// Files assigned to one group, in shuffled order
#[derive(Debug, Clone)]
pub struct GroupFiles {
    pub name: String,
    pub files: Vec<LabeledFile>,
}

/// Exhaustive, disjoint assignment of every input file to exactly one group.
/// Groups keep the order given in the [`SplitSpec`].
#[derive(Debug, Clone)]
pub struct GroupAssignment {
    groups: Vec<GroupFiles>,
}

impl GroupAssignment {
    pub fn groups(&self) -> &[GroupFiles] {
        &self.groups
    }

    /// Total number of files over all groups
    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }
}

/// Number of items taken from `total` for `fraction`, rounded half away
/// from zero and clamped to `[0, total]`.
pub fn split_count(total: usize, fraction: f64) -> usize {
    let count = (total as f64 * fraction).round();
    if count <= 0.0 {
        0
    } else {
        (count as usize).min(total)
    }
}

/// Cut the front `fraction` off `items`, returning (front, rest).
fn split_front<T>(mut items: Vec<T>, fraction: f64) -> (Vec<T>, Vec<T>) {
    let split_at = split_count(items.len(), fraction);
    let rest = items.split_off(split_at);
    (items, rest)
}

/// Shuffle `files` with `rng` and partition them according to `spec`.
///
/// With two groups the second group receives everything not taken by the
/// first; its own ratio is not used.
pub fn partition<R: Rng + ?Sized>(
    mut files: Vec<LabeledFile>,
    spec: &SplitSpec,
    rng: &mut R,
) -> GroupAssignment {
    let total = files.len();
    files.shuffle(rng);

    let groups = spec.groups();
    let (first, remainder) = split_front(files, groups[0].ratio);

    let mut parts = vec![first];
    match spec.remainder_fraction() {
        Some(fraction) => {
            let (second, third) = split_front(remainder, fraction);
            parts.push(second);
            parts.push(third);
        }
        None => parts.push(remainder),
    }

    let groups: Vec<GroupFiles> = groups
        .iter()
        .zip(parts)
        .map(|(group, files)| GroupFiles {
            name: group.name.clone(),
            files,
        })
        .collect();

    for group in &groups {
        debug!(
            "Group '{}': {} of {} files",
            group.name,
            group.files.len(),
            total
        );
        if total > 0 && group.files.is_empty() {
            warn!("Group '{}' received no files out of {}", group.name, total);
        }
    }

    GroupAssignment { groups }
}
