//! Simulation runner
//!
//! Feeds the configured process sizes to a fresh Next-Fit allocator in
//! arrival order, numbering processes from 1, and records the outcome and
//! block state after every request.

use crate::allocator::{
    AllocationOutcome, AllocationRecord, Block, NextFitAllocator, PlacementPolicy, ProcessId,
    Request,
};
use crate::config::SimulationConfig;
use crate::error::{Result, SimError};
use crate::validation::checked_total;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One processed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStep {
    pub request: Request,
    pub outcome: AllocationOutcome,
    /// Block state right after this request
    pub blocks_after: Vec<Block>,
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: SimulationConfig,
    pub steps: Vec<SimulationStep>,
    pub final_blocks: Vec<Block>,
    pub history: Vec<AllocationRecord>,
}

impl SimulationReport {
    pub fn granted_count(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_granted()).count()
    }

    pub fn denied_count(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.is_denied()).count()
    }

    /// Processes that could not be placed, in arrival order
    pub fn denied_processes(&self) -> Vec<ProcessId> {
        self.steps
            .iter()
            .filter(|s| s.outcome.is_denied())
            .map(|s| s.request.id)
            .collect()
    }

    /// Sum of granted sizes
    pub fn total_allocated(&self) -> Result<u64> {
        checked_total(
            self.history.iter().map(|r| r.granted_size),
            "total allocated size",
        )
    }

    /// Free capacity left inside used blocks
    pub fn internal_fragmentation(&self) -> Result<u64> {
        checked_total(
            self.final_blocks
                .iter()
                .filter(|b| !b.is_free())
                .map(|b| b.capacity),
            "internal fragmentation",
        )
    }
}

/// Process ID for the request arriving after `taken` earlier ones
fn next_process_id(taken: usize) -> Result<ProcessId> {
    u32::try_from(taken)
        .ok()
        .and_then(|n| n.checked_add(1))
        .map(ProcessId::new)
        .ok_or_else(|| {
            SimError::Overflow(format!(
                "cannot number more than {} processes",
                u32::MAX
            ))
        })
}

/// A single simulation run
///
/// Owns its allocator exclusively; requests are processed strictly in the
/// order `step` is called.
pub struct Simulation {
    config: SimulationConfig,
    allocator: NextFitAllocator,
    steps: Vec<SimulationStep>,
}

impl Simulation {
    /// Validate the configuration and set up a fresh allocator
    ///
    /// The memory ceiling is checked before the allocator is built.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let allocator = NextFitAllocator::new(&config.blocks)?;

        Ok(Simulation {
            config,
            allocator,
            steps: Vec::new(),
        })
    }

    /// Process the next request of `size` KB
    ///
    /// The process ID is the 1-based arrival number.
    pub fn step(&mut self, size: u64) -> Result<&SimulationStep> {
        let id = next_process_id(self.steps.len())?;
        let request = Request::new(id, size);
        let outcome = self.allocator.allocate(request)?;

        self.steps.push(SimulationStep {
            request,
            outcome,
            blocks_after: self.allocator.snapshot(),
        });

        Ok(&self.steps[self.steps.len() - 1])
    }

    /// Process every configured request and produce the report
    pub fn run(mut self) -> Result<SimulationReport> {
        info!(
            "Running next-fit simulation: {} blocks, {} processes",
            self.config.blocks.len(),
            self.config.processes.len()
        );

        let sizes = self.config.processes.clone();
        for size in sizes {
            self.step(size)?;
        }

        let report = self.finish();
        info!(
            "Simulation finished: {} granted, {} denied",
            report.granted_count(),
            report.denied_count()
        );

        Ok(report)
    }

    /// Stop here and produce the report for the steps taken so far
    pub fn finish(self) -> SimulationReport {
        SimulationReport {
            final_blocks: self.allocator.snapshot(),
            history: self.allocator.history().to_vec(),
            steps: self.steps,
            config: self.config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn allocator(&self) -> &NextFitAllocator {
        &self.allocator
    }

    pub fn steps(&self) -> &[SimulationStep] {
        &self.steps
    }
}
