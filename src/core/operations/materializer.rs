use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{info, info_span};

use super::file_ops::copy_into;
use crate::core::partition::GroupFiles;
use crate::error::{SplitError, SplitResult};

/// Names used inside each group directory
#[derive(Debug, Clone, Copy)]
pub struct GroupLayout<'a> {
    pub gt_file_name: &'a str,
    pub images_dir_name: &'a str,
    /// Print progress every this many files; 0 disables progress output
    pub progress_interval: usize,
}

/// Carriage-return progress line, `\r  100 / 1234 Processing !!`
struct Progress<W: Write> {
    out: W,
    total: usize,
    interval: usize,
    width: usize,
}

impl<W: Write> Progress<W> {
    fn new(out: W, total: usize, interval: usize) -> Self {
        Self {
            out,
            total,
            interval,
            width: total.to_string().len(),
        }
    }

    fn tick(&mut self, done: usize) -> io::Result<()> {
        if self.interval == 0 || done % self.interval != 0 {
            return Ok(());
        }
        write!(
            self.out,
            "\r{:>w$} / {:>w$} Processing !!",
            done,
            self.total,
            w = self.width
        )?;
        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.interval == 0 {
            return Ok(());
        }
        writeln!(self.out)
    }
}

/// Copy every file of one group into `group_dir/images` and write the
/// group's ground-truth manifest.
///
/// Files are processed in the group's (shuffled) order. Each file produces
/// the manifest line `images/<basename>\t<label>`. Two files sharing a
/// basename end up as one image (the later copy wins) but two manifest lines.
///
/// # Returns
/// * `Ok(usize)` with the number of files written
/// * `Err(SplitError::Io)` on the first failed copy or write; earlier output stays in place
pub fn materialize_group(group: &GroupFiles, group_dir: &Path, layout: &GroupLayout) -> SplitResult<usize> {
    materialize_group_with_progress(group, group_dir, layout, io::stdout())
}

pub(crate) fn materialize_group_with_progress<W: Write>(
    group: &GroupFiles,
    group_dir: &Path,
    layout: &GroupLayout,
    progress_out: W,
) -> SplitResult<usize> {
    let _span = info_span!("group", name = %group.name).entered();

    let images_dir = group_dir.join(layout.images_dir_name);
    let gt_path = group_dir.join(layout.gt_file_name);
    let gt_file = File::create(&gt_path).map_err(|e| SplitError::io(&gt_path, e))?;
    let mut gt = BufWriter::new(gt_file);

    info!("Writing {} files into {:?}", group.files.len(), images_dir);
    let mut progress = Progress::new(progress_out, group.files.len(), layout.progress_interval);

    for (idx, item) in group.files.iter().enumerate() {
        let name = item.file_name();

        writeln!(gt, "{}/{}\t{}", layout.images_dir_name, name, item.label)
            .map_err(|e| SplitError::io(&gt_path, e))?;
        copy_into(&item.path, &images_dir)?;

        progress
            .tick(idx + 1)
            .map_err(|e| SplitError::io("<stdout>", e))?;
    }

    gt.flush().map_err(|e| SplitError::io(&gt_path, e))?;
    progress.finish().map_err(|e| SplitError::io("<stdout>", e))?;

    info!("Wrote {} entries to {:?}", group.files.len(), gt_path);
    Ok(group.files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::LabeledFile;
    use std::fs;

    const LAYOUT: GroupLayout<'static> = GroupLayout {
        gt_file_name: "gt.txt",
        images_dir_name: "images",
        progress_interval: 2,
    };

    fn group_dir(root: &Path) -> std::path::PathBuf {
        let dir = root.join("out/training");
        fs::create_dir_all(dir.join("images")).unwrap();
        dir
    }

    #[test]
    fn test_copies_files_and_writes_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.jpg"), b"A").unwrap();
        fs::write(src.join("b.jpg"), b"B").unwrap();

        let group = GroupFiles {
            name: "training".to_string(),
            files: vec![
                LabeledFile::new(src.join("b.jpg"), "bee"),
                LabeledFile::new(src.join("a.jpg"), "ant"),
            ],
        };
        let dir = group_dir(tmp.path());

        let mut progress: Vec<u8> = Vec::new();
        let count = materialize_group_with_progress(&group, &dir, &LAYOUT, &mut progress).unwrap();
        assert_eq!(count, 2);

        assert_eq!(fs::read(dir.join("images/a.jpg")).unwrap(), b"A");
        assert_eq!(fs::read(dir.join("images/b.jpg")).unwrap(), b"B");
        assert_eq!(
            fs::read_to_string(dir.join("gt.txt")).unwrap(),
            "images/b.jpg\tbee\nimages/a.jpg\tant\n"
        );
        assert_eq!(String::from_utf8(progress).unwrap(), "\r2 / 2 Processing !!\n");
    }

    #[test]
    fn test_basename_collision_overwrites_earlier_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let first = tmp.path().join("one");
        let second = tmp.path().join("two");
        fs::create_dir(&first).unwrap();
        fs::create_dir(&second).unwrap();
        fs::write(first.join("same.jpg"), b"first").unwrap();
        fs::write(second.join("same.jpg"), b"second").unwrap();

        let group = GroupFiles {
            name: "training".to_string(),
            files: vec![
                LabeledFile::new(first.join("same.jpg"), "x"),
                LabeledFile::new(second.join("same.jpg"), "y"),
            ],
        };
        let dir = group_dir(tmp.path());

        materialize_group_with_progress(&group, &dir, &LAYOUT, io::sink()).unwrap();

        assert_eq!(fs::read(dir.join("images/same.jpg")).unwrap(), b"second");
        assert_eq!(fs::read_dir(dir.join("images")).unwrap().count(), 1);
        assert_eq!(
            fs::read_to_string(dir.join("gt.txt")).unwrap(),
            "images/same.jpg\tx\nimages/same.jpg\ty\n"
        );
    }

    #[test]
    fn test_missing_source_aborts_with_partial_output() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.jpg"), b"A").unwrap();

        let group = GroupFiles {
            name: "training".to_string(),
            files: vec![
                LabeledFile::new(src.join("a.jpg"), "ant"),
                LabeledFile::new(src.join("missing.jpg"), "moth"),
            ],
        };
        let dir = group_dir(tmp.path());

        let err = materialize_group_with_progress(&group, &dir, &LAYOUT, io::sink()).unwrap_err();
        assert!(matches!(err, SplitError::Io { .. }));
        assert!(dir.join("images/a.jpg").exists());
    }

    #[test]
    fn test_progress_every_interval() {
        let mut out: Vec<u8> = Vec::new();
        let mut progress = Progress::new(&mut out, 250, 100);
        for done in 1..=250 {
            progress.tick(done).unwrap();
        }
        progress.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\r100 / 250 Processing !!\r200 / 250 Processing !!\n"
        );
    }
}
