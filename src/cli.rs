use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{SplitConfig, SplitSpec};
use crate::pipeline;

/// Split a labeled image dataset into training/validation/test groups.
///
/// Input: a directory of files plus `labels.txt` with `<filename>\t<label>` lines.
/// Output: `<output_path>/<group>/images/<filename>` and `<output_path>/<group>/gt.txt`.
#[derive(Parser, Debug)]
#[command(name = "dataset-split", version)]
pub struct Cli {
    /// Path of the raw datasets
    #[arg(long = "input_path")]
    pub input_path: PathBuf,

    /// Path of the split datasets; must not exist yet
    #[arg(long = "output_path")]
    pub output_path: PathBuf,

    /// Name of each group to be split, dash-separated (2 or 3 names)
    #[arg(long = "split_name", default_value = "training-test")]
    pub split_name: String,

    /// Ratio assigned to each group, dash-separated
    #[arg(long = "split_ratio", default_value = "0.9-0.1")]
    pub split_ratio: String,

    /// Seed for the shuffle; a random one is used and reported when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fail when a filename appears more than once in labels.txt
    #[arg(long = "strict_labels")]
    pub strict_labels: bool,

    /// Also write a timestamped log file into this directory
    #[arg(long = "log_dir")]
    pub log_dir: Option<PathBuf>,

    /// Write the final summary as JSON to this file
    #[arg(long = "summary_json")]
    pub summary_json: Option<PathBuf>,
}

impl Cli {
    /// Validate the split, then run the pipeline and print the summary
    pub fn run(self) -> Result<()> {
        let config = self.into_config()?;

        let summary = pipeline::run(&config)?;
        print!("{}", summary);

        if let Some(path) = &config.summary_json {
            pipeline::write_summary_json(&summary, path)?;
        }
        Ok(())
    }

    /// Convert arguments into a [`SplitConfig`]; the split names and ratios
    /// are validated here, before anything touches the filesystem.
    pub fn into_config(self) -> Result<SplitConfig> {
        let spec = SplitSpec::parse(&self.split_name, &self.split_ratio)?;
        Ok(SplitConfig {
            seed: self.seed,
            strict_labels: self.strict_labels,
            summary_json: self.summary_json,
            ..SplitConfig::new(self.input_path, self.output_path, spec)
        })
    }
}
