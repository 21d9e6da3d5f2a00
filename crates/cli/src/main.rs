// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wa - the execution-core CLI front door.
//!
//! Loads an agenda from TOML, wires up a device and the bundled result
//! processor, then hands everything to [`wa_engine::Executor`] and
//! reports the outcome. Configuration parsing, agenda loading and
//! argument handling live here, not in the core: `wa-core` only ever
//! consumes an already-built `Config`. Target/device driver
//! implementation is likewise out of scope for the core — this binary
//! only ever drives the bundled `FakeDevice` test adapter, wrapped in
//! `TracedDevice` for observability, since no real backend ships with
//! this crate.

mod config;
mod workload;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wa_adapters::device::fake::FakeDevice;
use wa_adapters::{JsonLinesProcessor, TracedDevice};
use wa_core::{Device, FilesystemResolver, ResourceResolver};
use wa_engine::{Executor, ExecutorInputs, Interrupt, LogFlagLayer, SignalBus};

#[derive(Parser, Debug)]
#[command(name = "wa", about = "Run a workload agenda against a device")]
struct Cli {
    /// Path to the TOML agenda file.
    agenda: PathBuf,

    /// Override the agenda's output_directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directories to search for workload resources, first match wins.
    #[arg(long = "resource-path")]
    resource_paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_flags = SignalBus::new();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(LogFlagLayer::new(log_flags.clone()))
        .init();

    let code = match run(cli, log_flags.clone()).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {err:#}");
            1
        }
    };

    if log_flags.error_logged() || log_flags.warning_logged() {
        tracing::info!("errors or warnings were logged during this run; see above for details");
    }

    std::process::exit(code);
}

async fn run(cli: Cli, log_flags: SignalBus) -> Result<()> {
    let agenda = config::load(&cli.agenda).context("failed to load agenda")?;
    let mut cfg = config::build_config(&agenda, &cli.agenda).context("invalid agenda")?;
    if let Some(output) = cli.output {
        cfg.meta_directory = output.join("_meta");
        cfg.log_file = output.join("run.log");
        cfg.output_directory = output;
    }

    let specs = config::build_specs(&agenda);

    let device = TracedDevice::new(FakeDevice::new(cfg.device.clone()));
    let device: Arc<dyn Device> = Arc::new(device);
    let resolver: Arc<dyn ResourceResolver> = Arc::new(FilesystemResolver::new(cli.resource_paths));

    let inputs = ExecutorInputs {
        device,
        resolver,
        config: Arc::new(cfg),
        specs,
        instruments: Vec::new(),
        result_processors: vec![Arc::new(JsonLinesProcessor::default())],
        bus: log_flags,
    };

    let interrupt = Interrupt::new();
    let ctrl_c_interrupt = interrupt.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, draining remaining jobs");
            ctrl_c_interrupt.trigger();
        }
    });

    let ctx = Executor::run(inputs, interrupt).await.context("run failed")?;

    for (status, count) in ctx.run_result.status_histogram() {
        println!("{status}: {count}");
    }

    Ok(())
}
