use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::label::{parse_manifest, LabelTable};
use crate::error::{SplitError, SplitResult};

/// A data file together with its label from the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledFile {
    pub path: PathBuf,
    pub label: String,
}

impl LabeledFile {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }

    /// Basename of the file, which is also its key in the manifest
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

/// Raw input dataset: data files plus the label table
#[derive(Debug)]
pub struct Dataset {
    files: Vec<PathBuf>,
    labels: LabelTable,
}

impl Dataset {
    /// Load and validate a dataset directory.
    ///
    /// # Arguments
    /// * `root` - Input directory containing the data files and the manifest
    /// * `manifest_name` - File name of the manifest (`labels.txt`)
    /// * `strict_labels` - Reject repeated filenames in the manifest
    ///
    /// # Returns
    /// * `Ok(Dataset)` if the number of files equals the number of labels
    /// * `Err(SplitError)` for a missing directory or manifest, or a count mismatch
    pub fn load(root: &Path, manifest_name: &str, strict_labels: bool) -> SplitResult<Self> {
        if !root.is_dir() {
            return Err(SplitError::MissingInputDir(root.to_path_buf()));
        }

        let files = list_data_files(root, manifest_name)?;
        let labels = parse_manifest(&root.join(manifest_name), strict_labels)?;

        if files.len() != labels.len() {
            return Err(SplitError::CountMismatch {
                files: files.len(),
                labels: labels.len(),
            });
        }

        info!("Found {} files and {} labels in {:?}", files.len(), labels.len(), root);
        Ok(Self { files, labels })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Pair every file with its label, looked up by basename.
    ///
    /// Equal counts do not guarantee that every file is listed, so a file
    /// without a label is reported here, before anything is written.
    pub fn into_labeled_files(self) -> SplitResult<Vec<LabeledFile>> {
        let Dataset { files, labels } = self;
        files
            .into_iter()
            .map(|path| {
                let name = file_name_of(&path);
                match labels.get(&name) {
                    Some(label) => Ok(LabeledFile::new(path, label)),
                    None => Err(SplitError::MissingLabel(name)),
                }
            })
            .collect()
    }
}

/// List regular files directly inside `root`, skipping hidden entries and
/// the manifest itself. Sorted for a stable order before shuffling.
fn list_data_files(root: &Path, manifest_name: &str) -> SplitResult<Vec<PathBuf>> {
    let entries = fs::read_dir(root).map_err(|e| SplitError::io(root, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SplitError::io(root, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || name == manifest_name {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            debug!("Skipping non-file entry {:?}", path);
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dataset(dir: &Path, files: &[&str], manifest: Option<&str>) {
        for name in files {
            fs::write(dir.join(name), name.as_bytes()).unwrap();
        }
        if let Some(content) = manifest {
            fs::write(dir.join("labels.txt"), content).unwrap();
        }
    }

    #[test]
    fn test_load_skips_manifest_hidden_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            &["b.jpg", "a.jpg", ".DS_Store"],
            Some("a.jpg\tcat\nb.jpg\tdog\n"),
        );
        fs::create_dir(dir.path().join("nested")).unwrap();

        let dataset = Dataset::load(dir.path(), "labels.txt", false).unwrap();
        assert_eq!(dataset.len(), 2);
        let labeled = dataset.into_labeled_files().unwrap();
        let names: Vec<String> = labeled.iter().map(LabeledFile::file_name).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
        assert_eq!(labeled[0].label, "cat");
        assert_eq!(labeled[1].label, "dog");
        assert_eq!(labeled[1].file_name(), "b.jpg");
    }

    #[test]
    fn test_missing_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = Dataset::load(&missing, "labels.txt", false).unwrap_err();
        assert!(matches!(err, SplitError::MissingInputDir(p) if p == missing));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), &["a.jpg"], None);
        let err = Dataset::load(dir.path(), "labels.txt", false).unwrap_err();
        assert!(matches!(err, SplitError::MissingManifest(_)));
    }

    #[test]
    fn test_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), &["a.jpg", "b.jpg"], Some("a.jpg\tcat\n"));
        let err = Dataset::load(dir.path(), "labels.txt", false).unwrap_err();
        assert!(matches!(err, SplitError::CountMismatch { files: 2, labels: 1 }));
    }

    #[test]
    fn test_equal_counts_but_unlisted_file() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), &["a.jpg", "b.jpg"], Some("a.jpg\tcat\nc.jpg\tdog\n"));
        let dataset = Dataset::load(dir.path(), "labels.txt", false).unwrap();
        let err = dataset.into_labeled_files().unwrap_err();
        assert!(matches!(err, SplitError::MissingLabel(name) if name == "b.jpg"));
    }

    #[test]
    fn test_duplicate_key_shrinks_label_count() {
        // Last-write-wins leaves one label for two lines, so the counts differ
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), &["a.jpg", "b.jpg"], Some("a.jpg\tcat\na.jpg\tdog\n"));
        let err = Dataset::load(dir.path(), "labels.txt", false).unwrap_err();
        assert!(matches!(err, SplitError::CountMismatch { files: 2, labels: 1 }));
    }
}
