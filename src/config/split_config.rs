use std::path::PathBuf;

use super::SplitSpec;

/// Run configuration for one split.
///
/// Centralizes the file and directory names of the input and output layouts
/// together with the values supplied on the command line.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub spec: SplitSpec,
    /// Fixed RNG seed; a fresh one is drawn and reported when absent
    pub seed: Option<u64>,
    /// Fail on repeated filenames in the manifest instead of keeping the last
    pub strict_labels: bool,
    pub summary_json: Option<PathBuf>,
    pub labels_file_name: &'static str,
    pub gt_file_name: &'static str,
    pub images_dir_name: &'static str,
    pub progress_interval: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("./input"),
            output_path: PathBuf::from("./output"),
            spec: SplitSpec::default(),
            seed: None,
            strict_labels: false,
            summary_json: None,
            labels_file_name: "labels.txt",
            gt_file_name: "gt.txt",
            images_dir_name: "images",
            progress_interval: 100,
        }
    }
}

impl SplitConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>, spec: SplitSpec) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            spec,
            ..Self::default()
        }
    }
}
