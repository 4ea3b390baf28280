use std::path::PathBuf;
use thiserror::Error;

/// Result type for every stage of the split pipeline
pub type SplitResult<T> = Result<T, SplitError>;

/// Error types for the split pipeline.
///
/// Every variant is fatal for the current run. Variants are grouped the same
/// way they are detected: configuration first, then the input dataset, then
/// the output tree.
#[derive(Debug, Error)]
pub enum SplitError {
    // Configuration
    #[error("split_name list {names:?} and split_ratio list {ratios:?} are not same.")]
    NameRatioMismatch { names: Vec<String>, ratios: Vec<f64> },

    #[error("Invalid split count: {0} (expected 2 or 3 groups).")]
    InvalidGroupCount(usize),

    #[error("Invalid split ratio '{0}'.")]
    InvalidRatio(String),

    #[error("Empty group name in '{0}'.")]
    EmptyGroupName(String),

    #[error("Group name '{0}' must be a plain directory name.")]
    InvalidGroupName(String),

    #[error("Group name '{0}' is used more than once.")]
    DuplicateGroupName(String),

    #[error("Ratios of the last two groups sum to zero; cannot split the remainder.")]
    ZeroRemainderRatio,

    // Missing input
    #[error("Can't find '{0}' directory.")]
    MissingInputDir(PathBuf),

    #[error("Can't find '{0}' file.")]
    MissingManifest(PathBuf),

    // Consistency
    #[error("Number of files ({files}) and number of labels ({labels}) are not the same.")]
    CountMismatch { files: usize, labels: usize },

    #[error("Malformed line {line} in '{path}': expected '<filename>\\t<label>'.")]
    MalformedManifest { path: PathBuf, line: usize },

    #[error("Label for '{0}' is listed more than once.")]
    DuplicateLabel(String),

    #[error("No label found for '{0}'.")]
    MissingLabel(String),

    // Collision
    #[error("'{0}' directory is already exists.")]
    OutputExists(PathBuf),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SplitError::Io {
            path: path.into(),
            source,
        }
    }
}
