// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration: scheduling policy, reboot policy, retry policy and
//! the filesystem layout for run output.

use crate::error::ConfigError;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Which scheduler orders the job queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionOrder {
    /// Round-robin across specs, one iteration of each per pass.
    ByIteration,
    /// All iterations of one spec before moving to the next.
    BySpec,
    /// Round-robin across sections; within a section, by spec.
    BySection,
    /// `BySpec` order, shuffled.
    Random,
}

impl Default for ExecutionOrder {
    fn default() -> Self {
        ExecutionOrder::ByIteration
    }
}

impl ExecutionOrder {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "by_iteration" | "" => Ok(ExecutionOrder::ByIteration),
            "by_spec" | "classic" => Ok(ExecutionOrder::BySpec),
            "by_section" => Ok(ExecutionOrder::BySection),
            "random" => Ok(ExecutionOrder::Random),
            other => Err(ConfigError::UnknownExecutionOrder(other.to_string())),
        }
    }
}

/// Controls when the device is rebooted between jobs, independent of the
/// error-recovery reboot path (which always reboots regardless of this
/// policy once it decides a reboot is needed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RebootPolicy {
    /// Boot the device once before the job loop starts.
    pub perform_initial_boot: bool,
    /// Whether the Runner is allowed to request a reboot at all (beyond
    /// the mandatory initial boot). `false` disables both the
    /// per-spec/per-iteration policies below and the flashing path.
    pub can_reboot: bool,
    pub reboot_on_each_spec: bool,
    pub reboot_on_each_iteration: bool,
}

impl RebootPolicy {
    /// Named presets matching the original configuration's policy names.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "as_needed" => Ok(Self {
                perform_initial_boot: true,
                can_reboot: true,
                reboot_on_each_spec: false,
                reboot_on_each_iteration: false,
            }),
            "initial" => Ok(Self {
                perform_initial_boot: true,
                can_reboot: false,
                reboot_on_each_spec: false,
                reboot_on_each_iteration: false,
            }),
            "each_spec" => Ok(Self {
                perform_initial_boot: true,
                can_reboot: true,
                reboot_on_each_spec: true,
                reboot_on_each_iteration: false,
            }),
            "each_iteration" => Ok(Self {
                perform_initial_boot: true,
                can_reboot: true,
                reboot_on_each_spec: true,
                reboot_on_each_iteration: true,
            }),
            other => Err(ConfigError::UnknownRebootPolicy(other.to_string())),
        }
    }
}

/// Top-level run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub execution_order: ExecutionOrder,
    pub reboot_policy: RebootPolicy,
    pub retry_on_status: HashSet<Status>,
    pub max_retries: u32,
    pub random_seed: Option<u64>,
    pub output_directory: PathBuf,
    pub meta_directory: PathBuf,
    pub log_file: PathBuf,
    pub instrumentation: HashMap<String, serde_json::Value>,
    pub result_processors: HashMap<String, serde_json::Value>,
    pub device: String,
    pub device_config: HashMap<String, serde_json::Value>,
    pub flashing_config: Option<HashMap<String, serde_json::Value>>,
    pub agenda_filepath: Option<PathBuf>,
}

impl Config {
    pub fn new(output_directory: PathBuf, device: impl Into<String>) -> Self {
        let meta_directory = output_directory.join("_meta");
        let log_file = output_directory.join("run.log");
        Self {
            execution_order: ExecutionOrder::default(),
            reboot_policy: RebootPolicy::default(),
            retry_on_status: [Status::Failed, Status::Partial].into_iter().collect(),
            max_retries: 3,
            random_seed: None,
            output_directory,
            meta_directory,
            log_file,
            instrumentation: HashMap::new(),
            result_processors: HashMap::new(),
            device: device.into(),
            device_config: HashMap::new(),
            flashing_config: None,
            agenda_filepath: None,
        }
    }

    pub fn should_retry(&self, status: Status) -> bool {
        self.retry_on_status.contains(&status)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
