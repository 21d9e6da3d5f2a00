// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ExecutionContext`: the mutable state threaded through every hook of
//! a run — the current job, the run's accumulating result, and the
//! directories artifacts get written under.

use crate::artifact::{check_artifact_path, Artifact, ArtifactError, ArtifactKind, ArtifactScope};
use crate::config::Config;
use crate::device::Device;
use crate::job::Job;
use crate::resolver::ResourceResolver;
use crate::result::{Metric, RunInfo, RunResult};
use crate::spec::SpecId;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared run state. Only one job is ever in flight, so `current_job`
/// and the artifact lists are plain fields rather than behind a lock —
/// the Runner is the sole owner of a `&mut ExecutionContext` for the
/// duration of a hook call.
pub struct ExecutionContext {
    pub device_manager: Arc<dyn Device>,
    pub config: Arc<Config>,
    pub resolver: Arc<dyn ResourceResolver>,

    pub run_output_directory: PathBuf,
    pub output_directory: PathBuf,

    pub current_job: Option<Job>,
    pub run_result: RunResult,

    pub run_artifacts: Vec<Artifact>,
    pub iteration_artifacts: Vec<Artifact>,

    job_iteration_counts: HashMap<SpecId, u32>,
    pub aborted: bool,
}

impl ExecutionContext {
    pub fn new(
        device_manager: Arc<dyn Device>,
        config: Arc<Config>,
        resolver: Arc<dyn ResourceResolver>,
    ) -> Self {
        let run_output_directory = config.output_directory.clone();
        let mut run_artifacts = vec![Artifact::new(
            "runlog",
            "run.log",
            ArtifactKind::Log,
            ArtifactScope::Run,
        )
        .mandatory(true)
        .with_description("The log for the entire run.")];
        if let Some(agenda) = &config.agenda_filepath {
            run_artifacts.push(
                Artifact::new("agenda", agenda.clone(), ArtifactKind::Meta, ArtifactScope::Run)
                    .mandatory(true)
                    .with_description("The agenda that defined this run."),
            );
        }

        Self {
            device_manager,
            run_result: RunResult::new(RunInfo::new()),
            config,
            resolver,
            output_directory: run_output_directory.clone(),
            run_output_directory,
            current_job: None,
            run_artifacts,
            iteration_artifacts: Vec::new(),
            job_iteration_counts: HashMap::new(),
            aborted: false,
        }
    }

    /// Create the run's output directory. Called once, at the very start
    /// of the run.
    pub fn initialize(&mut self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.run_output_directory)?;
        std::fs::create_dir_all(&self.config.meta_directory)
    }

    /// Install `job` as the current job, assigning it an iteration number
    /// from the per-spec counter and preparing its output directory.
    pub fn next_job(&mut self, mut job: Job) -> std::io::Result<()> {
        let iteration = job.iteration.unwrap_or_else(|| {
            let counter = self.job_iteration_counts.entry(job.spec.id.clone()).or_insert(0);
            *counter += 1;
            *counter
        });
        job.iteration = Some(iteration);
        job.result.iteration = Some(iteration);

        self.output_directory = self
            .run_output_directory
            .join(format!("{}_{}_{}", job.spec.label, job.spec.id, iteration));
        std::fs::create_dir_all(&self.output_directory)?;
        job.result.output_directory = Some(self.output_directory.clone());

        self.iteration_artifacts = job.spec.workload.artifacts().to_vec();
        self.current_job = Some(job);
        Ok(())
    }

    /// Record the current job's outcome onto the run result and clear it.
    pub fn end_job(&mut self) {
        if let Some(mut job) = self.current_job.take() {
            job.result.artifacts = std::mem::take(&mut self.iteration_artifacts);
            if job.result.status == crate::status::Status::Aborted {
                self.aborted = true;
            }
            self.run_result.iteration_results.push(job.result);
        }
        self.output_directory = self.run_output_directory.clone();
    }

    pub fn current_iteration(&self) -> Option<u32> {
        self.current_job.as_ref().and_then(|j| j.iteration)
    }

    pub fn current_spec_label(&self) -> Option<&str> {
        self.current_job.as_ref().map(|j| j.spec.label.as_str())
    }

    pub fn job_status(&self) -> Option<crate::status::Status> {
        self.current_job.as_ref().map(|j| j.result.status)
    }

    /// Add a metric to the current job's result, or to the run as a
    /// whole when no job is active.
    pub fn add_metric(&mut self, metric: Metric) {
        match self.current_job.as_mut() {
            Some(job) => job.result.add_metric(metric),
            None => self.run_result.add_metric(metric),
        }
    }

    /// Pre-register an artifact, validating that its backing file exists
    /// (or will exist under the active output directory). Scoped to the
    /// current job if one is active, to the run otherwise.
    pub fn add_artifact(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        kind: ArtifactKind,
    ) -> Result<(), ArtifactError> {
        let path = path.into();
        if self.current_job.is_some() {
            let resolved = check_artifact_path(&path, &self.output_directory)?;
            self.iteration_artifacts.push(Artifact::new(
                name,
                resolved,
                kind,
                ArtifactScope::Iteration,
            ));
        } else {
            let resolved = check_artifact_path(&path, &self.run_output_directory)?;
            self.run_artifacts
                .push(Artifact::new(name, resolved, kind, ArtifactScope::Run));
        }
        Ok(())
    }

    pub fn get_artifact(&self, name: &str) -> Option<&Artifact> {
        self.iteration_artifacts
            .iter()
            .find(|a| a.name == name)
            .or_else(|| self.run_artifacts.iter().find(|a| a.name == name))
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
