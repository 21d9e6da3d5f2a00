// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifacts: named files produced during a run or iteration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Log,
    Meta,
    Data,
    Raw,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactScope {
    Run,
    Iteration,
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot add artifact because {0} does not exist")]
    MissingFile(PathBuf),
}

/// A named file produced during a run or iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub path: PathBuf,
    pub kind: ArtifactKind,
    pub scope: ArtifactScope,
    pub mandatory: bool,
    pub description: String,
}

impl Artifact {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        kind: ArtifactKind,
        scope: ArtifactScope,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            scope,
            mandatory: false,
            description: String::new(),
        }
    }

    pub fn mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Resolve `path` against `root`, requiring the resulting file to exist.
///
/// If `path` is already rooted under `root` it is accepted as-is
/// (absolute paths outside of any expected root are never implicitly
/// trusted); otherwise it is treated as a name relative to `root` and
/// must resolve to an existing file. This is a pre-registration check —
/// an artifact whose backing file is absent is a hard error, not a
/// warning surfaced later.
pub fn check_artifact_path(path: &Path, root: &Path) -> Result<PathBuf, ArtifactError> {
    if path.starts_with(root) {
        return Ok(path.to_path_buf());
    }
    let full_path = root.join(path);
    if !full_path.is_file() {
        return Err(ArtifactError::MissingFile(full_path));
    }
    Ok(full_path)
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
