use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{SplitError, SplitResult};

/// Mapping from basename to label, read from a `filename<TAB>label` manifest
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    labels: HashMap<String, String>,
}

impl LabelTable {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, filename: &str) -> Option<&str> {
        self.labels.get(filename).map(String::as_str)
    }

    /// Insert a label. Returns the previous label if the filename was present.
    pub fn insert(&mut self, filename: String, label: String) -> Option<String> {
        self.labels.insert(filename, label)
    }
}

/// Parse a manifest file.
///
/// Each non-empty line must be `<filename>\t<label>`; the label may be empty.
/// A repeated filename replaces the earlier label, or is rejected when
/// `strict` is set.
///
/// # Arguments
/// * `path` - Path to the manifest (`labels.txt`)
/// * `strict` - Reject repeated filenames
pub fn parse_manifest(path: &Path, strict: bool) -> SplitResult<LabelTable> {
    if !path.is_file() {
        return Err(SplitError::MissingManifest(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| SplitError::io(path, e))?;
    parse_manifest_str(&content, path, strict)
}

pub(crate) fn parse_manifest_str(content: &str, path: &Path, strict: bool) -> SplitResult<LabelTable> {
    let mut table = LabelTable::default();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let (filename, label) = match (fields.next(), fields.next(), fields.next()) {
            (Some(filename), Some(label), None) if !filename.is_empty() => (filename, label),
            _ => {
                return Err(SplitError::MalformedManifest {
                    path: PathBuf::from(path),
                    line: idx + 1,
                })
            }
        };

        if let Some(previous) = table.insert(filename.to_string(), label.to_string()) {
            if strict {
                return Err(SplitError::DuplicateLabel(filename.to_string()));
            }
            warn!(
                "'{}' is listed more than once; replacing label '{}' with '{}'",
                filename, previous, label
            );
        }
    }

    debug!("Parsed {} labels from {:?}", table.len(), path);
    Ok(table)
}
