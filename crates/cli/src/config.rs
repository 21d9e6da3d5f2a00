// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML agenda loading: translates a human-edited file into the core's
//! `Config` plus the `WorkloadSpec` list the Executor needs. Parsing and
//! agenda loading live here, not in `wa-core` — the core only ever
//! consumes an already-built `Config`.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use wa_core::{Config, ConfigError, ExecutionOrder, ParameterMap, RebootPolicy, Status, WorkloadSpec};

use crate::workload::ShellWorkload;

#[derive(Debug, Deserialize)]
pub struct AgendaFile {
    #[serde(default = "default_device")]
    pub device: String,
    #[serde(default)]
    pub execution_order: String,
    #[serde(default)]
    pub reboot_policy: String,
    pub output_directory: PathBuf,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub retry_on_status: Option<Vec<String>>,
    #[serde(default)]
    pub random_seed: Option<u64>,
    #[serde(default)]
    pub flashing_config: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    pub device_config: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub workloads: Vec<WorkloadEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WorkloadEntry {
    pub label: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub runtime_parameters: ParameterMap,
}

fn default_device() -> String {
    "fake".to_string()
}

fn default_iterations() -> u32 {
    1
}

#[derive(Debug, Error)]
pub enum AgendaError {
    #[error("failed to read agenda file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse agenda file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("agenda names unknown retry status {0:?}")]
    UnknownStatus(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub fn load(path: &Path) -> Result<AgendaFile, AgendaError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| AgendaError::Read { path: path.to_path_buf(), source })?;
    toml::from_str(&text).map_err(|source| AgendaError::Parse { path: path.to_path_buf(), source })
}

pub fn build_config(agenda: &AgendaFile, agenda_path: &Path) -> Result<Config, AgendaError> {
    let mut config = Config::new(agenda.output_directory.clone(), agenda.device.clone());

    config.execution_order = ExecutionOrder::parse(&agenda.execution_order)?;
    config.reboot_policy = if agenda.reboot_policy.is_empty() {
        RebootPolicy::default()
    } else {
        RebootPolicy::from_name(&agenda.reboot_policy)?
    };
    if let Some(max_retries) = agenda.max_retries {
        config.max_retries = max_retries;
    }
    if let Some(names) = &agenda.retry_on_status {
        let mut statuses = HashSet::with_capacity(names.len());
        for name in names {
            statuses.insert(parse_status(name).ok_or_else(|| AgendaError::UnknownStatus(name.clone()))?);
        }
        config.retry_on_status = statuses;
    }
    config.random_seed = agenda.random_seed;
    config.flashing_config = agenda.flashing_config.clone();
    config.device_config = agenda.device_config.clone();
    config.agenda_filepath = Some(agenda_path.to_path_buf());

    Ok(config)
}

fn parse_status(name: &str) -> Option<Status> {
    match name {
        "ok" => Some(Status::Ok),
        "partial" => Some(Status::Partial),
        "noncritical" => Some(Status::Noncritical),
        "failed" => Some(Status::Failed),
        "aborted" => Some(Status::Aborted),
        "skipped" => Some(Status::Skipped),
        _ => None,
    }
}

pub fn build_specs(agenda: &AgendaFile) -> Vec<Arc<WorkloadSpec>> {
    agenda
        .workloads
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let workload = Arc::new(ShellWorkload::new(entry.command.clone(), entry.args.clone()));
            let mut spec = WorkloadSpec::new(
                format!("w{index}"),
                entry.label.clone(),
                workload,
                entry.iterations,
            )
            .with_runtime_parameters(entry.runtime_parameters.clone());
            if let Some(section) = &entry.section {
                spec = spec.with_section(section.clone());
            }
            Arc::new(spec)
        })
        .collect()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
