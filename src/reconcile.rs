//! Decides what happens to the target directory before any file is written.
//!
//! The decision is made from two facts, whether the directory exists and
//! whether it is empty, plus the user's answer when it is not empty. All
//! of this finishes before materialization starts.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::ScaffoldError, trace};

/// Entry kept at the top of the target directory when clearing it.
pub const GIT_DIR: &str = ".git";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    Missing,
    Empty,
    Occupied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Create the directory, parents included.
    Create(PathBuf),
    /// Use the directory as it is.
    Reuse(PathBuf),
    /// Remove everything but `.git`, then use it.
    Clear(PathBuf),
}

/// Zero entries, or exactly one entry named `.git`.
///
/// # Errors
///
/// Returns an [`Err`] if `path` can not be read as a directory.
pub fn is_empty(path: &Path) -> Result<bool> {
    let mut names = Vec::new();

    for entry in path
        .read_dir()
        .with_context(|| format!("Failed to read directory {}", path.display()))?
    {
        names.push(entry?.file_name());
        if names.len() > 1 {
            return Ok(false);
        }
    }

    Ok(names.is_empty() || names[0] == GIT_DIR)
}

/// # Errors
///
/// Returns an [`Err`] if `path` exists but can not be read.
pub fn inspect(path: &Path) -> Result<DirState> {
    if !path.exists() {
        Ok(DirState::Missing)
    } else if is_empty(path)? {
        Ok(DirState::Empty)
    } else {
        Ok(DirState::Occupied)
    }
}

/// Turns the directory state and the overwrite answer into an action.
///
/// `overwrite` is only consulted for an occupied directory; a missing
/// answer there counts as a refusal.
///
/// # Errors
///
/// Returns [`ScaffoldError::Cancelled`] if an occupied directory may not be
/// overwritten.
pub fn plan(root: &Path, state: DirState, overwrite: Option<bool>) -> Result<Reconciliation> {
    let root = root.to_path_buf();

    match state {
        DirState::Missing => Ok(Reconciliation::Create(root)),
        DirState::Empty => Ok(Reconciliation::Reuse(root)),
        DirState::Occupied if overwrite == Some(true) => Ok(Reconciliation::Clear(root)),
        DirState::Occupied => Err(ScaffoldError::Cancelled.into()),
    }
}

/// Proof that a target directory went through reconciliation.
///
/// Only [`Reconciliation::apply`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDir(PathBuf);

impl PreparedDir {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.0
    }
}

/// Removes a file, a directory tree or a symlink without following it.
///
/// # Errors
///
/// Returns an [`Err`] if `path` does not exist or any IO error occurs.
pub fn remove_path(path: &Path) -> Result<()> {
    let file_type = path
        .symlink_metadata()
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .file_type();

    if file_type.is_symlink() {
        // Directory links on Windows need `remove_dir`.
        #[cfg(target_os = "windows")]
        if fs::remove_file(path).is_err() {
            fs::remove_dir(path)?;
        }

        #[cfg(not(target_os = "windows"))]
        fs::remove_file(path)?;
    } else if file_type.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }

    Ok(())
}

/// Removes every entry of `dir` except a top level `.git`.
///
/// Symlinks are removed themselves, never their targets.
///
/// # Errors
///
/// Returns an [`Err`] on any IO failure while listing or removing.
pub fn empty_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    let mut doomed = Vec::new();
    for entry in dir.read_dir()? {
        let entry = entry?;
        if entry.file_name() != GIT_DIR {
            doomed.push(entry.path());
        }
    }

    trace!("Removing {} entries from {}", doomed.len(), dir.display());

    for path in &doomed {
        remove_path(path).with_context(|| format!("Failed to clear {}", dir.display()))?;
    }

    Ok(())
}

impl Reconciliation {
    #[must_use]
    pub fn root(&self) -> &Path {
        match self {
            Self::Create(p) | Self::Reuse(p) | Self::Clear(p) => p,
        }
    }

    /// Carries out the action on disk.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] on any IO failure.
    pub fn apply(self) -> Result<PreparedDir> {
        trace!("Reconciling target directory: {self:?}");

        match &self {
            Self::Create(p) => fs_extra::dir::create_all(p, false)
                .with_context(|| format!("Failed to create {}", p.display()))?,
            Self::Reuse(_) => {}
            Self::Clear(p) => empty_dir(p)?,
        }

        Ok(match self {
            Self::Create(p) | Self::Reuse(p) | Self::Clear(p) => PreparedDir(p),
        })
    }
}
