use std::path::{Component, Path};
use tracing::warn;

use crate::error::{SplitError, SplitResult};

const SEPARATOR: char = '-';
const SUM_TOLERANCE: f64 = 1e-6;

/// One named group and the share of the dataset it should receive
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub ratio: f64,
}

/// Ordered list of 2 or 3 groups.
///
/// Only the shape is enforced (matching counts, 2 or 3 groups, distinct
/// non-empty names, each ratio within [0, 1]). Ratios are not required to
/// sum to 1; in the 2-group case the second ratio is not used for sizing.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSpec {
    groups: Vec<Group>,
}

impl SplitSpec {
    /// Parse dash-separated names and ratios, e.g. `training-validation-test`
    /// and `0.8-0.1-0.1`.
    pub fn parse(names: &str, ratios: &str) -> SplitResult<Self> {
        let names: Vec<String> = names.split(SEPARATOR).map(str::to_string).collect();
        let ratios = ratios
            .split(SEPARATOR)
            .map(|r| {
                r.trim()
                    .parse::<f64>()
                    .map_err(|_| SplitError::InvalidRatio(r.to_string()))
            })
            .collect::<SplitResult<Vec<f64>>>()?;

        Self::from_parts(names, ratios)
    }

    pub fn from_parts(names: Vec<String>, ratios: Vec<f64>) -> SplitResult<Self> {
        if names.len() != ratios.len() {
            return Err(SplitError::NameRatioMismatch { names, ratios });
        }
        if !(2..=3).contains(&names.len()) {
            return Err(SplitError::InvalidGroupCount(names.len()));
        }

        for (idx, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(SplitError::EmptyGroupName(names.join("-")));
            }
            if !is_plain_dir_name(name) {
                return Err(SplitError::InvalidGroupName(name.clone()));
            }
            if names[..idx].contains(name) {
                return Err(SplitError::DuplicateGroupName(name.clone()));
            }
        }

        for ratio in &ratios {
            if !ratio.is_finite() || !(0.0..=1.0).contains(ratio) {
                return Err(SplitError::InvalidRatio(ratio.to_string()));
            }
        }

        if ratios.len() == 3 && ratios[1] + ratios[2] <= 0.0 {
            return Err(SplitError::ZeroRemainderRatio);
        }

        let sum: f64 = ratios.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            warn!("Split ratios {:?} sum to {}, not 1.0", ratios, sum);
        }
        if ratios.len() == 2 && (ratios[1] - (1.0 - ratios[0])).abs() > SUM_TOLERANCE {
            warn!(
                "Ratio {} for '{}' is ignored; it receives the remaining {:.4}",
                ratios[1],
                names[1],
                1.0 - ratios[0]
            );
        }

        let groups = names
            .into_iter()
            .zip(ratios)
            .map(|(name, ratio)| Group { name, ratio })
            .collect();

        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Fraction of the remainder (after the first group) that goes to the
    /// second group when there are three groups.
    pub fn remainder_fraction(&self) -> Option<f64> {
        match self.groups.as_slice() {
            [_, second, third] => Some(second.ratio / (second.ratio + third.ratio)),
            _ => None,
        }
    }
}

/// A single normal path component, so the group directory stays directly
/// under the output root: no `.`, `..`, separators or absolute paths.
fn is_plain_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            groups: vec![
                Group {
                    name: "training".to_string(),
                    ratio: 0.9,
                },
                Group {
                    name: "test".to_string(),
                    ratio: 0.1,
                },
            ],
        }
    }
}
