//! generation
//!
//! Generation-state tracking: per-artifact classification and counters.
//!
//! # Classification
//!
//! Every artifact a driver finalizes is classified exactly once:
//!
//! - [`Disposition::Unchanged`]: the target already matches the generated content
//! - [`Disposition::Updated`]: the target existed and differs
//! - [`Disposition::Created`]: the target did not exist
//!
//! The classification is the system's externally visible diff signal; it
//! drives both logging and CI-style change detection. Only paths the driver
//! explicitly commits are classified; pre-existing files in the output
//! root are never scanned, so non-generated files are invisible to the
//! tally.
//!
//! # Example
//!
//! ```no_run
//! use metagen::generation::{commit, Disposition, OutputTally};
//! use std::path::Path;
//!
//! let mut tally = OutputTally::default();
//! let disposition = commit(Path::new("out/direction.hpp"), "// generated\n").unwrap();
//! tally.record(disposition);
//! assert_eq!(tally.total(), 1);
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::serialization::SerializationError;

/// Errors from generation-side filesystem work.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Output directory creation failed.
    #[error("failed to create output directory '{path}': {source}")]
    CreateDir {
        /// The directory path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An output target could not be read for classification.
    #[error("failed to read output target '{path}': {source}")]
    ReadTarget {
        /// The target path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An output target could not be written.
    #[error("failed to write output target '{path}': {source}")]
    WriteTarget {
        /// The target path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Loading a metadata source failed.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// How one finalized artifact relates to what was already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The target did not exist.
    Created,
    /// The target existed and differs from the generated content.
    Updated,
    /// The target already matches the generated content.
    Unchanged,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Created => write!(f, "created"),
            Disposition::Updated => write!(f, "updated"),
            Disposition::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Per-unit artifact counters.
///
/// Counters only move forward, one artifact at a time, and are queried
/// after the unit's generation pass completes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OutputTally {
    created: u32,
    updated: u32,
    unchanged: u32,
}

impl OutputTally {
    /// Record one classified artifact.
    pub fn record(&mut self, disposition: Disposition) {
        match disposition {
            Disposition::Created => self.increment_created(),
            Disposition::Updated => self.increment_updated(),
            Disposition::Unchanged => self.increment_unchanged(),
        }
    }

    /// Count one created artifact.
    pub fn increment_created(&mut self) {
        self.created += 1;
    }

    /// Count one updated artifact.
    pub fn increment_updated(&mut self) {
        self.updated += 1;
    }

    /// Count one unchanged artifact.
    pub fn increment_unchanged(&mut self) {
        self.unchanged += 1;
    }

    /// Artifacts that did not previously exist.
    pub fn created(&self) -> u32 {
        self.created
    }

    /// Artifacts that existed and were rewritten.
    pub fn updated(&self) -> u32 {
        self.updated
    }

    /// Artifacts left untouched.
    pub fn unchanged(&self) -> u32 {
        self.unchanged
    }

    /// Total artifacts classified so far.
    pub fn total(&self) -> u32 {
        self.created + self.updated + self.unchanged
    }
}

/// Classify generated content against its target file without writing.
///
/// # Errors
///
/// Returns `GenerationError::ReadTarget` for any read failure other than
/// the target being absent.
pub fn classify(target: &Path, content: &str) -> Result<Disposition, GenerationError> {
    match fs::read_to_string(target) {
        Ok(existing) if existing == content => Ok(Disposition::Unchanged),
        Ok(_) => Ok(Disposition::Updated),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Disposition::Created),
        Err(e) => Err(GenerationError::ReadTarget {
            path: target.to_path_buf(),
            source: e,
        }),
    }
}

/// Write generated content to its target if it is new or changed.
///
/// Unchanged targets are left untouched so their timestamps survive, which
/// keeps downstream incremental builds quiet.
pub fn commit(target: &Path, content: &str) -> Result<Disposition, GenerationError> {
    let disposition = classify(target, content)?;
    if disposition != Disposition::Unchanged {
        fs::write(target, content).map_err(|e| GenerationError::WriteTarget {
            path: target.to_path_buf(),
            source: e,
        })?;
    }
    debug!(path = %target.display(), %disposition, "committed output");
    Ok(disposition)
}

/// Render the header block prepended to generated source files.
///
/// Lines are emitted as `//` comments: the unit's copyright text (when
/// non-empty), then the generation stamp.
pub fn stamp_header(copyright: &str) -> String {
    let mut header = String::new();
    for line in copyright.lines() {
        if line.is_empty() {
            header.push_str("//\n");
        } else {
            header.push_str("// ");
            header.push_str(line);
            header.push('\n');
        }
    }
    if !header.is_empty() {
        header.push_str("//\n");
    }
    header.push_str(&format!(
        "// This file was generated automatically on {}.\n\
         // Editing this file manually is not recommended.\n\n",
        Utc::now().format("%Y-%m-%d")
    ));
    header
}
