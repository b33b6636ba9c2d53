//! Making the rewritten copy the file of record.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tempfile::{NamedTempFile, TempPath};

use super::copier;
use super::error::{Result, TagError};
use super::layout::STAGED_FILE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CommitMode {
    /// Stage next to the source and rename over it.
    #[default]
    Rename,
    /// Stage to `Modified.mp3`, then copy the bytes back into the source.
    /// The staged file is left in place.
    CopyBack,
}

/// Where the rewritten copy is being written before commit.
#[derive(Debug)]
pub enum StagedOutput {
    /// Removed automatically if dropped without being committed.
    Temp(TempPath),
    Fixed(PathBuf),
}

impl StagedOutput {
    pub fn path(&self) -> &Path {
        match self {
            StagedOutput::Temp(p) => &**p,
            StagedOutput::Fixed(p) => p.as_path(),
        }
    }
}

/// Create the output file the rewriter writes into.
pub fn stage(mode: CommitMode, source: &Path, staging_dir: &Path) -> Result<(File, StagedOutput)> {
    match mode {
        CommitMode::Rename => {
            let dir = parent_dir(source);
            let tmp = NamedTempFile::new_in(dir).map_err(|e| TagError::open(dir, e))?;
            let (file, path) = tmp.into_parts();
            Ok((file, StagedOutput::Temp(path)))
        }
        CommitMode::CopyBack => {
            let path = staging_dir.join(STAGED_FILE_NAME);
            let file = File::create(&path).map_err(|e| TagError::open(&path, e))?;
            Ok((file, StagedOutput::Fixed(path)))
        }
    }
}

/// Replace `source` with the staged copy. The staged file's handle must
/// already be closed. Returns the staged file if it stays on disk.
pub fn commit(staged: StagedOutput, source: &Path) -> Result<Option<PathBuf>> {
    match staged {
        StagedOutput::Temp(path) => {
            // Temp files are created private; keep the source's permissions.
            let perms = fs::metadata(source)?.permissions();
            fs::set_permissions(&path, perms)?;
            path.persist(source).map_err(|e| TagError::IoFailure(e.error))?;
            Ok(None)
        }
        StagedOutput::Fixed(path) => {
            copy_back(&path, source)?;
            Ok(Some(path))
        }
    }
}

/// Truncate `source` and refill it from `staged`.
///
/// Not atomic: if the staged file cannot be opened after `source` has been
/// truncated, `source` is left empty.
pub fn copy_back(staged: &Path, source: &Path) -> Result<u64> {
    let dst = File::create(source).map_err(|e| TagError::open(source, e))?;
    let src = File::open(staged).map_err(|e| TagError::open(staged, e))?;

    let mut reader = BufReader::new(src);
    let mut writer = BufWriter::new(dst);
    let copied = copier::copy_to_end(&mut reader, &mut writer)?;
    writer.flush()?;
    Ok(copied)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_replaces_source_and_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("song.mp3");
        fs::write(&source, b"old").unwrap();

        let (mut file, staged) = stage(CommitMode::Rename, &source, dir.path()).unwrap();
        let staged_path = staged.path().to_path_buf();
        file.write_all(b"new contents").unwrap();
        drop(file);

        let leftover = commit(staged, &source).unwrap();
        assert!(leftover.is_none());
        assert_eq!(fs::read(&source).unwrap(), b"new contents");
        assert!(!staged_path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn dropped_temp_stage_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("song.mp3");
        fs::write(&source, b"old").unwrap();

        let (file, staged) = stage(CommitMode::Rename, &source, dir.path()).unwrap();
        let staged_path = staged.path().to_path_buf();
        drop(file);
        drop(staged);
        assert!(!staged_path.exists());
        assert_eq!(fs::read(&source).unwrap(), b"old");
    }

    #[test]
    fn copy_back_keeps_the_staged_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let source = dir.path().join("song.mp3");
        fs::write(&source, b"a much longer original body").unwrap();

        let (mut file, staged) = stage(CommitMode::CopyBack, &source, staging.path()).unwrap();
        assert_eq!(staged.path(), staging.path().join(STAGED_FILE_NAME));
        file.write_all(b"short").unwrap();
        drop(file);

        let artifact = commit(staged, &source).unwrap().unwrap();
        assert_eq!(fs::read(&source).unwrap(), b"short");
        assert_eq!(fs::read(&artifact).unwrap(), b"short");
    }

    #[test]
    fn copy_back_reports_missing_stage() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("song.mp3");
        fs::write(&source, b"old").unwrap();

        let err = copy_back(&dir.path().join("missing.mp3"), &source).unwrap_err();
        assert!(matches!(err, TagError::FileOpenFailure { .. }));
        // The source was already truncated when the read side failed.
        assert_eq!(fs::read(&source).unwrap(), b"");
    }

    #[test]
    fn bare_file_names_stage_in_current_dir() {
        assert_eq!(parent_dir(Path::new("song.mp3")), Path::new("."));
        assert_eq!(parent_dir(Path::new("a/song.mp3")), Path::new("a"));
    }
}
