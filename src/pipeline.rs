use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::SplitConfig;
use crate::core::dataset::Dataset;
use crate::core::operations::{create_output_tree, materialize_group, GroupLayout};
use crate::core::partition::partition;
use crate::error::{SplitError, SplitResult};

/// Output count of one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub name: String,
    pub count: usize,
    pub path: PathBuf,
}

/// Result of a completed split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub total: usize,
    pub seed: u64,
    pub groups: Vec<GroupSummary>,
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(50))?;
        writeln!(f, "Total datasets count: {}", self.total)?;
        for group in &self.groups {
            writeln!(f, "'{}' group's data count: {}", group.name, group.count)?;
        }
        Ok(())
    }
}

/// Run the whole split: read and validate the input, create the output
/// tree, partition, then copy every group.
///
/// All input checks happen before the output root is created. A failure
/// while copying leaves whatever was already written in place.
pub fn run(config: &SplitConfig) -> SplitResult<SplitSummary> {
    let spec = &config.spec;
    info!(
        "Splitting {:?} into {:?} ({})",
        config.input_path,
        config.output_path,
        spec.groups()
            .iter()
            .map(|g| format!("{}={}", g.name, g.ratio))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let dataset = Dataset::load(&config.input_path, config.labels_file_name, config.strict_labels)?;
    let total = dataset.len();
    let files = dataset.into_labeled_files()?;

    let group_dirs = create_output_tree(&config.output_path, spec.names(), config.images_dir_name)?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let assignment = partition(files, spec, &mut rng);
    info!("Partitioned {} files into {} groups", assignment.total(), spec.len());

    let layout = GroupLayout {
        gt_file_name: config.gt_file_name,
        images_dir_name: config.images_dir_name,
        progress_interval: config.progress_interval,
    };

    let mut groups = Vec::with_capacity(assignment.groups().len());
    for group in assignment.groups() {
        let group_dir = &group_dirs[&group.name];
        println!("split group: {}", group.name);
        let count = materialize_group(group, group_dir, &layout)?;
        groups.push(GroupSummary {
            name: group.name.clone(),
            count,
            path: group_dir.clone(),
        });
    }

    Ok(SplitSummary { total, seed, groups })
}

/// Write the summary as pretty-printed JSON
pub fn write_summary_json(summary: &SplitSummary, path: &Path) -> SplitResult<()> {
    let file = File::create(path).map_err(|e| SplitError::io(path, e))?;
    serde_json::to_writer_pretty(file, summary).map_err(|e| SplitError::io(path, e.into()))?;
    info!("Summary written to {:?}", path);
    Ok(())
}
