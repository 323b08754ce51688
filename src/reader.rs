//! Locating and loading the `.dot` input files

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while collecting input files
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Not a DOT file (expected a .dot extension): {0}")]
    NotDot(PathBuf),

    #[error("Directory does not contain any .dot files: {0}")]
    NoDotFiles(PathBuf),

    #[error("Failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// One input file and its text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Read every input path, in the order given.
///
/// A file must carry the `.dot` extension. A directory contributes its
/// direct `.dot` children sorted by file name and must contain at least one.
pub fn read_inputs(paths: &[PathBuf]) -> Result<Vec<SourceFile>, ReaderError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(read_directory(path)?);
        } else if path.is_file() {
            files.push(read_single_file(path)?);
        } else {
            return Err(ReaderError::NotFound(path.clone()));
        }
    }
    Ok(files)
}

pub fn read_single_file(path: &Path) -> Result<SourceFile, ReaderError> {
    if !is_dot_file(path) {
        return Err(ReaderError::NotDot(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|e| ReaderError::Io(path.to_path_buf(), e))?;
    tracing::trace!("Read {} ({} bytes)", path.display(), bytes.len());

    Ok(SourceFile {
        path: path.to_path_buf(),
        // Doxygen may emit Latin-1 labels; keep going rather than fail.
        contents: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

pub fn read_directory(dir: &Path) -> Result<Vec<SourceFile>, ReaderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ReaderError::Io(dir.to_path_buf(), e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReaderError::Io(dir.to_path_buf(), e))?;
        let path = entry.path();
        if path.is_file() && is_dot_file(&path) {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(ReaderError::NoDotFiles(dir.to_path_buf()));
    }
    paths.sort();
    tracing::debug!("Found {} .dot files in {}", paths.len(), dir.display());

    paths.iter().map(|p| read_single_file(p)).collect()
}

fn is_dot_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "dot")
}
