//! Human-readable and JSON rendering of simulation results
//!
//! Block numbers are shown 1-based ("Block 2" is index 1).

use crate::allocator::{AllocationOutcome, AllocationRecord, Block, Request};
use crate::error::Result;
use crate::simulation::SimulationReport;
use std::fmt;

/// Describe the outcome of one request
///
/// ```
/// use nextfit_sim::core::report::format_outcome;
/// use nextfit_sim::{AllocationOutcome, ProcessId, Request};
///
/// let request = Request::new(ProcessId::new(1), 212);
/// let outcome = AllocationOutcome::Granted { block_index: 1, granted_size: 212 };
/// assert_eq!(
///     format_outcome(&request, &outcome),
///     "Process 1 requiring 212 KB allocated to Block 2"
/// );
/// ```
pub fn format_outcome(request: &Request, outcome: &AllocationOutcome) -> String {
    match outcome {
        AllocationOutcome::Granted { block_index, .. } => format!(
            "Process {} requiring {} KB allocated to Block {}",
            request.id,
            request.size,
            block_index + 1
        ),
        AllocationOutcome::Denied => format!(
            "Process {} requiring {} KB could not be allocated.",
            request.id, request.size
        ),
    }
}

/// Describe one block's current state
pub fn format_block(index: usize, block: &Block) -> String {
    match block.allocated_to {
        None => format!("Block {}: {} KB (free)", index + 1, block.capacity),
        Some(process) if block.is_exhausted() => {
            format!("Block {}: Allocated to Process {}", index + 1, process)
        }
        Some(process) => format!(
            "Block {}: {} KB (free, remaining after allocation to Process {})",
            index + 1,
            block.capacity,
            process
        ),
    }
}

/// Describe one history entry
pub fn format_record(record: &AllocationRecord) -> String {
    format!(
        "Process {}: Allocated {} KB in Block {}.",
        record.process_id,
        record.granted_size,
        record.block_index + 1
    )
}

/// Memory state listing, one indented line per block
pub struct MemoryState<'a>(pub &'a [Block]);

impl fmt::Display for MemoryState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Memory State:")?;
        for (index, block) in self.0.iter().enumerate() {
            writeln!(f, "\t{}", format_block(index, block))?;
        }
        Ok(())
    }
}

/// Final allocation table, one indented line per grant
pub struct FinalAllocation<'a>(pub &'a [AllocationRecord]);

impl fmt::Display for FinalAllocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final Memory Allocation:")?;
        if self.0.is_empty() {
            writeln!(f, "\tNo processes were allocated.")?;
        }
        for record in self.0 {
            writeln!(f, "\t{}", format_record(record))?;
        }
        Ok(())
    }
}

/// Full transcript of a run
///
/// Size totals are computed up front by `new` so that formatting itself
/// cannot fail.
pub struct TextReport<'a> {
    report: &'a SimulationReport,
    total_block_size: u64,
    total_allocated: u64,
    internal_fragmentation: u64,
}

impl<'a> TextReport<'a> {
    /// Fails with `Overflow` if a size total does not fit in a `u64`
    pub fn new(report: &'a SimulationReport) -> Result<Self> {
        Ok(TextReport {
            report,
            total_block_size: report.config.total_block_size()?,
            total_allocated: report.total_allocated()?,
            internal_fragmentation: report.internal_fragmentation()?,
        })
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        if let Some(name) = &report.config.name {
            writeln!(f, "Scenario: {}", name)?;
        }
        writeln!(
            f,
            "Blocks: {} ({} KB of {} KB main memory)",
            report.config.blocks.len(),
            self.total_block_size,
            report.config.memory_ceiling
        )?;

        for step in &report.steps {
            writeln!(f)?;
            writeln!(f, "{}", format_outcome(&step.request, &step.outcome))?;
            writeln!(f)?;
            write!(f, "{}", MemoryState(&step.blocks_after))?;
        }

        writeln!(f)?;
        write!(f, "{}", FinalAllocation(&report.history))?;

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} granted, {} denied, {} KB allocated, {} KB internal fragmentation",
            report.granted_count(),
            report.denied_count(),
            self.total_allocated,
            self.internal_fragmentation
        )
    }
}

pub fn render_text(report: &SimulationReport) -> Result<String> {
    Ok(TextReport::new(report)?.to_string())
}

pub fn render_json(report: &SimulationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
