//! # nextfit-sim - Next-Fit Memory Allocation Simulator
//!
//! `nextfit-sim` simulates fixed-partition memory allocation with the
//! Next-Fit placement policy:
//!
//! - **Fixed block table**: blocks keep their position and are never freed
//! - **Next-Fit placement**: each search resumes after the last used block,
//!   wrapping around, and takes the first block large enough
//! - **Audit trail**: every grant is recorded in request order
//! - **Reports**: per-request memory state and a final allocation table,
//!   as text or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use nextfit_sim::{Simulation, SimulationConfig, Result};
//!
//! # fn main() -> Result<()> {
//! let config = SimulationConfig::from_lists("100, 500, 200, 300, 600", "212, 417, 112, 426")?;
//! let report = Simulation::new(config)?.run()?;
//!
//! assert_eq!(report.granted_count(), 3);
//! assert_eq!(report.denied_count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Driving the allocator directly
//!
//! ```rust
//! use nextfit_sim::{NextFitAllocator, PlacementPolicy, ProcessId, Request, Result};
//!
//! # fn main() -> Result<()> {
//! let mut alloc = NextFitAllocator::new(&[100, 500, 200])?;
//!
//! let outcome = alloc.allocate(Request::new(ProcessId::new(1), 212))?;
//! assert_eq!(outcome.block_index(), Some(1));
//! assert_eq!(alloc.blocks()[1].capacity, 288);
//! # Ok(())
//! # }
//! ```

pub mod core;

// Re-export core modules internally so crate:: paths in core still work
#[allow(unused_imports)]
pub(crate) use crate::core::{allocator, config, error, report, simulation, validation};

pub use crate::core::{
    allocator::{
        AllocationOutcome, AllocationRecord, Block, BlockState, NextFitAllocator,
        PlacementPolicy, ProcessId, Request,
    },
    config::SimulationConfig,
    error::{Result, SimError},
    report::{render_json, render_text},
    simulation::{Simulation, SimulationReport, SimulationStep},
    validation::{parse_size_list, DEFAULT_MEMORY_CEILING},
};

use tracing::info;

/// Builder for customizing a simulation run
///
/// # Examples
///
/// ```rust
/// use nextfit_sim::SimulationBuilder;
///
/// # fn main() -> nextfit_sim::Result<()> {
/// let report = SimulationBuilder::new()
///     .name("single block")
///     .blocks([50])
///     .processes([50, 1])
///     .memory_ceiling(1024)
///     .build()?
///     .run()?;
///
/// assert_eq!(report.denied_count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct SimulationBuilder {
    name: Option<String>,
    blocks: Vec<u64>,
    processes: Vec<u64>,
    memory_ceiling: u64,
}

impl SimulationBuilder {
    /// Create a new SimulationBuilder with default settings
    pub fn new() -> Self {
        SimulationBuilder {
            name: None,
            blocks: Vec::new(),
            processes: Vec::new(),
            memory_ceiling: DEFAULT_MEMORY_CEILING,
        }
    }

    /// Set the scenario name
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the block capacities (KB)
    pub fn blocks<I: IntoIterator<Item = u64>>(mut self, blocks: I) -> Self {
        self.blocks = blocks.into_iter().collect();
        self
    }

    /// Set the process sizes (KB) in arrival order
    pub fn processes<I: IntoIterator<Item = u64>>(mut self, processes: I) -> Self {
        self.processes = processes.into_iter().collect();
        self
    }

    /// Set the main memory ceiling (KB)
    pub fn memory_ceiling(mut self, memory_ceiling: u64) -> Self {
        self.memory_ceiling = memory_ceiling;
        self
    }

    /// Validate the configuration and build the Simulation
    pub fn build(self) -> Result<Simulation> {
        let mut config =
            SimulationConfig::new(self.blocks, self.processes).with_memory_ceiling(self.memory_ceiling);
        config.name = self.name;

        info!(
            "Building simulation with {} blocks and {} processes",
            config.blocks.len(),
            config.processes.len()
        );

        Simulation::new(config)
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a simulation with the default memory ceiling
pub fn simulate(blocks: &[u64], processes: &[u64]) -> Result<SimulationReport> {
    Simulation::new(SimulationConfig::new(blocks.to_vec(), processes.to_vec()))?.run()
}
