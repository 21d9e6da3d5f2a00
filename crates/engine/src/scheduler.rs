// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler policies: pure functions from an ordered spec list to an
//! ordered job queue. Modeled as a trait with four zero-sized
//! implementations rather than an inheritance tree, since the policies
//! differ only in how they order the same flat set of jobs.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use wa_core::{Job, WorkloadSpec};

pub trait Scheduler: Send + Sync {
    fn schedule(&self, specs: &[Arc<WorkloadSpec>]) -> Vec<Job>;
}

/// All iterations of spec 1, then all of spec 2, in input order.
pub struct BySpecScheduler;

impl Scheduler for BySpecScheduler {
    fn schedule(&self, specs: &[Arc<WorkloadSpec>]) -> Vec<Job> {
        specs
            .iter()
            .flat_map(|spec| (0..spec.number_of_iterations).map(move |_| Job::new(spec.clone())))
            .collect()
    }
}

/// First iteration of every spec, then the second, and so on. Specs with
/// fewer iterations simply drop out of later rounds.
pub struct ByIterationScheduler;

impl Scheduler for ByIterationScheduler {
    fn schedule(&self, specs: &[Arc<WorkloadSpec>]) -> Vec<Job> {
        by_iteration_order(specs)
    }
}

fn by_iteration_order(specs: &[Arc<WorkloadSpec>]) -> Vec<Job> {
    let max_iterations = specs.iter().map(|s| s.number_of_iterations).max().unwrap_or(0);
    let mut jobs = Vec::new();
    for round in 0..max_iterations {
        for spec in specs {
            if round < spec.number_of_iterations {
                jobs.push(Job::new(spec.clone()));
            }
        }
    }
    jobs
}

/// Groups specs by `section_id` (first-seen order), round-robins across
/// sections by position within each section to produce a flat spec
/// order, then applies `ByIteration` over that order.
pub struct BySectionScheduler;

impl Scheduler for BySectionScheduler {
    fn schedule(&self, specs: &[Arc<WorkloadSpec>]) -> Vec<Job> {
        let mut sections: IndexMap<Option<String>, Vec<Arc<WorkloadSpec>>> = IndexMap::new();
        for spec in specs {
            sections.entry(spec.section_id.clone()).or_default().push(spec.clone());
        }

        let max_specs_per_section = sections.values().map(Vec::len).max().unwrap_or(0);
        let mut spec_order = Vec::with_capacity(specs.len());
        for position in 0..max_specs_per_section {
            for section_specs in sections.values() {
                if let Some(spec) = section_specs.get(position) {
                    spec_order.push(spec.clone());
                }
            }
        }

        by_iteration_order(&spec_order)
    }
}

/// `BySpec` order, uniformly shuffled with a seeded PRNG. The seed comes
/// from `config.random_seed` when present; otherwise one is drawn from
/// entropy and logged so the run stays reproducible after the fact.
pub struct RandomScheduler {
    seed: u64,
}

impl RandomScheduler {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        tracing::info!(seed, "random scheduler seed");
        Self { seed }
    }
}

impl Scheduler for RandomScheduler {
    fn schedule(&self, specs: &[Arc<WorkloadSpec>]) -> Vec<Job> {
        let mut jobs = BySpecScheduler.schedule(specs);
        let mut rng = StdRng::seed_from_u64(self.seed);
        jobs.shuffle(&mut rng);
        jobs
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
