//! View and edit sessions over a file on disk.
//!
//! A session owns every handle it opens. `EditSession::rewrite` consumes the
//! session, so the source and staged handles are closed before the commit
//! step reopens any path.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::tag::commit::{self, CommitMode, StagedOutput};
use crate::tag::layout::{MP3_EXTENSION, STAGED_FILE_NAME};
use crate::tag::{header, rewriter, scanner};
use crate::tag::{EditRequest, Field, Result, RewriteSummary, TagError, TagHeader, TagReport};

/// Reject paths that do not end in `.mp3` before touching the filesystem.
pub fn check_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext == MP3_EXTENSION => Ok(()),
        _ => Err(TagError::InvalidExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Runtime settings for an edit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditConfig {
    pub commit: CommitMode,
    pub staging_dir: PathBuf,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            commit: CommitMode::Rename,
            staging_dir: PathBuf::from("."),
        }
    }
}

/// Open `path` and validate its tag header, leaving the reader at the first
/// frame.
fn open_validated(path: &Path) -> Result<(BufReader<File>, TagHeader)> {
    let file = File::open(path).map_err(|e| TagError::open(path, e))?;
    let mut src = BufReader::new(file);
    let header = header::validate(&mut src)?;
    Ok((src, header))
}

pub struct ViewSession {
    src: BufReader<File>,
    header: TagHeader,
}

impl ViewSession {
    pub fn open(path: &Path) -> Result<Self> {
        check_extension(path)?;
        let (src, header) = open_validated(path)?;
        Ok(Self { src, header })
    }

    pub fn read(mut self) -> TagReport {
        let fields = scanner::scan(&mut self.src);
        TagReport {
            header: self.header,
            fields,
        }
    }
}

/// Read all six known fields of `path`.
pub fn view(path: &Path) -> Result<TagReport> {
    Ok(ViewSession::open(path)?.read())
}

/// A source file and the staged copy being written from it.
///
/// `source` is the path as given; `target` is the file it resolves to, so a
/// symlinked source is edited through the link instead of replaced.
pub struct EditSession {
    source: PathBuf,
    target: PathBuf,
    src: BufReader<File>,
    out: BufWriter<File>,
    staged: StagedOutput,
}

impl EditSession {
    pub fn open(path: &Path, config: &EditConfig) -> Result<Self> {
        check_extension(path)?;
        let target = fs::canonicalize(path).map_err(|e| TagError::open(path, e))?;
        let (src, _) = open_validated(&target)?;
        guard_staging_target(&target, config)?;
        let (file, staged) = commit::stage(config.commit, &target, &config.staging_dir)?;
        Ok(Self {
            source: path.to_path_buf(),
            target,
            src,
            out: BufWriter::new(file),
            staged,
        })
    }

    /// Write the edited copy and close both handles.
    pub fn rewrite(self, request: &EditRequest) -> Result<StagedEdit> {
        let EditSession {
            source,
            target,
            mut src,
            mut out,
            staged,
        } = self;

        rewriter::copy_header(&mut src, &mut out)?;
        let summary = rewriter::rewrite_frames(&mut src, &mut out, request)?;

        let file = out.into_inner().map_err(|e| TagError::IoFailure(e.into_error()))?;
        file.sync_all()?;
        drop(file);
        drop(src);

        Ok(StagedEdit {
            source,
            target,
            staged,
            summary,
        })
    }
}

/// A fully written copy waiting to replace its source.
pub struct StagedEdit {
    source: PathBuf,
    target: PathBuf,
    staged: StagedOutput,
    summary: RewriteSummary,
}

impl StagedEdit {
    pub fn commit(self) -> Result<EditOutcome> {
        let artifact = commit::commit(self.staged, &self.target)?;
        Ok(EditOutcome {
            path: self.source,
            summary: self.summary,
            artifact,
        })
    }
}

#[derive(Debug)]
pub struct EditOutcome {
    pub path: PathBuf,
    pub summary: RewriteSummary,
    /// Staged copy left on disk by copy-back commits.
    pub artifact: Option<PathBuf>,
}

/// Replace `field` of `path` with `text` and commit the result.
pub fn edit(path: &Path, field: Field, text: &str, config: &EditConfig) -> Result<EditOutcome> {
    check_extension(path)?;
    let request = EditRequest::new(field, text)?;
    EditSession::open(path, config)?.rewrite(&request)?.commit()
}

/// Copy-back stages to a fixed name; refuse when that name is the source.
/// `target` must already be canonical.
fn guard_staging_target(target: &Path, config: &EditConfig) -> Result<()> {
    if config.commit != CommitMode::CopyBack {
        return Ok(());
    }
    let staged = config.staging_dir.join(STAGED_FILE_NAME);
    let same = fs::canonicalize(&staged).is_ok_and(|s| s == target);
    if same {
        return Err(TagError::open(
            staged,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "staged copy would overwrite the file being edited",
            ),
        ));
    }
    Ok(())
}
