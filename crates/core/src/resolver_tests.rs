// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[tokio::test]
async fn resolves_first_match_across_search_paths() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    std::fs::write(second.path().join("payload.apk"), b"data").unwrap();

    let resolver = FilesystemResolver::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
    let resolved = resolver.resolve("payload.apk").await;
    assert_eq!(resolved, Some(second.path().join("payload.apk")));
}

#[tokio::test]
async fn missing_resource_resolves_to_none() {
    let dir = tempdir().unwrap();
    let resolver = FilesystemResolver::new(vec![dir.path().to_path_buf()]);
    assert_eq!(resolver.resolve("nonexistent.bin").await, None);
}
