// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource resolution: turning a named dependency (an APK, a binary,
//! a data file) into a path on disk.

use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait ResourceResolver: Send + Sync {
    /// Resolve `name` to a path, or `None` if it cannot be found. This
    /// deliberately isn't a `Result`: a missing resource is an ordinary,
    /// expected outcome that callers decide how to react to (some
    /// resources are optional).
    async fn resolve(&self, name: &str) -> Option<PathBuf>;
}

/// Resolves resources by searching a fixed list of directories in
/// order, first match wins.
pub struct FilesystemResolver {
    search_paths: Vec<PathBuf>,
}

impl FilesystemResolver {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }
}

#[async_trait]
impl ResourceResolver for FilesystemResolver {
    async fn resolve(&self, name: &str) -> Option<PathBuf> {
        for root in &self.search_paths {
            let candidate = root.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
