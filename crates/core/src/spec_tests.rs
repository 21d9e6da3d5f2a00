// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::artifact::Artifact;
use crate::context::ExecutionContext;
use crate::error::WaError;
use async_trait::async_trait;

struct StubWorkload;

#[async_trait]
impl Workload for StubWorkload {
    fn name(&self) -> &str {
        "stub"
    }

    fn artifacts(&self) -> &[Artifact] {
        &[]
    }

    async fn setup(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        Ok(())
    }

    async fn run(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        Ok(())
    }
}

fn spec() -> WorkloadSpec {
    WorkloadSpec::new("spec-1", "stub", Arc::new(StubWorkload), 3)
}

#[test]
fn new_spec_is_enabled_by_default() {
    assert!(spec().enabled());
}

#[test]
fn disable_is_observed_through_shared_reference() {
    let spec = Arc::new(spec());
    let alias = spec.clone();
    spec.disable();
    assert!(!alias.enabled());
}

#[test]
fn display_includes_label_and_id() {
    let s = spec();
    let rendered = s.to_string();
    assert!(rendered.contains("stub"));
    assert!(rendered.contains("spec-1"));
}

#[test]
fn builder_methods_set_fields() {
    let mut params = ParameterMap::new();
    params.insert("cpus".into(), serde_json::json!(4));
    let s = spec()
        .with_section("section-a")
        .with_runtime_parameters(params.clone())
        .with_boot_parameters(params.clone())
        .with_flash(params.clone());
    assert_eq!(s.section_id.as_deref(), Some("section-a"));
    assert_eq!(s.runtime_parameters, params);
    assert_eq!(s.boot_parameters, params);
    assert_eq!(s.flash, Some(params));
}
