use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::error::{SplitError, SplitResult};

/// Copy a file into `dest_dir`, keeping its basename.
///
/// An existing file with the same name in `dest_dir` is overwritten.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest_dir` - Directory to copy into
///
/// # Returns
/// * `Ok(PathBuf)` with the destination path
/// * `Err(SplitError::Io)` if the copy failed
pub fn copy_into(src: &Path, dest_dir: &Path) -> SplitResult<PathBuf> {
    let file_name = src
        .file_name()
        .ok_or_else(|| SplitError::io(src, std::io::ErrorKind::InvalidInput.into()))?;
    let dest = dest_dir.join(file_name);

    if dest.exists() {
        debug!("Overwriting {:?} with {:?}", dest, src);
    }

    if let Err(e) = fs::copy(src, &dest) {
        error!("Failed to copy file from {:?} to {:?}: {}", src, dest, e);
        return Err(SplitError::io(src, e));
    }

    Ok(dest)
}

/// Create the output tree `root/{group}/{images_dir}` for every group.
///
/// Missing parents of `root` are created. Nothing is created when `root`
/// already exists, and every group directory must be new.
///
/// # Returns
/// * `Ok(HashMap)` mapping each group name to its directory
/// * `Err(SplitError::OutputExists)` if `root` exists
pub fn create_output_tree<'a>(
    root: &Path,
    groups: impl IntoIterator<Item = &'a str>,
    images_dir: &str,
) -> SplitResult<HashMap<String, PathBuf>> {
    if root.exists() {
        return Err(SplitError::OutputExists(root.to_path_buf()));
    }

    fs::create_dir_all(root).map_err(|e| SplitError::io(root, e))?;

    let mut group_dirs = HashMap::new();
    for group in groups {
        let group_dir = root.join(group);
        let images = group_dir.join(images_dir);
        fs::create_dir(&group_dir).map_err(|e| SplitError::io(&group_dir, e))?;
        fs::create_dir(&images).map_err(|e| SplitError::io(&images, e))?;
        group_dirs.insert(group.to_string(), group_dir);
    }

    info!("Created output tree at {:?} for {} groups", root, group_dirs.len());
    Ok(group_dirs)
}
