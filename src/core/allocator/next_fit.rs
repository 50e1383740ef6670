//! Next-Fit allocator
//!
//! Resumes scanning at the block after the last successful allocation and
//! wraps around the block table, taking the first block with enough room.

use crate::allocator::block::{AllocationOutcome, AllocationRecord, Block, Request};
use crate::allocator::PlacementPolicy;
use crate::error::Result;
use crate::validation::{checked_total, validate_block_capacities, validate_request};
use serde::Serialize;
use tracing::{debug, trace};

/// Next-Fit allocator over a fixed block table
///
/// Leftover capacity inside a used block stays available to the capacity
/// test, so later requests may land in the same block (internal
/// fragmentation is never reclaimed, only consumed).
///
/// Serializes for reporting only. The only way to build one is `new`, which
/// validates the block table.
#[derive(Debug, Clone, Serialize)]
pub struct NextFitAllocator {
    /// Blocks in configuration order
    blocks: Vec<Block>,

    /// Index of the most recently used block, `None` before the first grant
    cursor: Option<usize>,

    /// Successful allocations in request order
    history: Vec<AllocationRecord>,
}

impl NextFitAllocator {
    /// Create a new allocator from block capacities (KB)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the list is empty or contains a zero.
    pub fn new(block_capacities: &[u64]) -> Result<Self> {
        validate_block_capacities(block_capacities)?;

        let blocks: Vec<Block> = block_capacities.iter().map(|&c| Block::new(c)).collect();
        debug!("Created next-fit allocator with {} blocks", blocks.len());

        Ok(NextFitAllocator {
            blocks,
            cursor: None,
            history: Vec::new(),
        })
    }

    /// Index of the most recently used block
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Index where the next scan starts
    pub fn start_index(&self) -> usize {
        match self.cursor {
            Some(index) if !self.blocks.is_empty() => {
                index.checked_add(1).map_or(0, |next| next % self.blocks.len())
            }
            _ => 0,
        }
    }

    /// Find the block the next request of `size` would land in
    ///
    /// Probes at most `len()` blocks in circular order from `start_index()`.
    /// Does not mutate.
    pub fn find_block(&self, size: u64) -> Option<usize> {
        let n = self.blocks.len();
        let start = self.start_index();

        (0..n).map(|offset| (start + offset) % n).find(|&index| {
            let block = &self.blocks[index];
            trace!(
                "Probing block {} (capacity {} KB) for {} KB",
                index,
                block.capacity,
                size
            );
            block.fits(size)
        })
    }

    /// Allocate using next-fit
    ///
    /// On a grant the chosen block shrinks by `request.size`, the cursor moves
    /// to it and a history record is appended. On denial nothing changes.
    pub fn allocate_next_fit(&mut self, request: Request) -> Result<AllocationOutcome> {
        validate_request(&request)?;

        let index = match self.find_block(request.size) {
            Some(index) => index,
            None => {
                debug!(
                    "Process {} requiring {} KB denied: no block large enough",
                    request.id, request.size
                );
                return Ok(AllocationOutcome::Denied);
            }
        };

        self.blocks[index].consume(request.id, request.size);
        self.cursor = Some(index);
        self.history
            .push(AllocationRecord::new(request.id, request.size, index));

        debug!(
            "Process {} requiring {} KB placed in block {} ({} KB left)",
            request.id, request.size, index, self.blocks[index].capacity
        );

        Ok(AllocationOutcome::Granted {
            block_index: index,
            granted_size: request.size,
        })
    }

    /// Get number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Sum of granted sizes across the history
    pub fn allocated_size(&self) -> Result<u64> {
        checked_total(
            self.history.iter().map(|r| r.granted_size),
            "allocated size",
        )
    }

    /// Free capacity stranded inside blocks that have been used
    pub fn internal_fragmentation(&self) -> Result<u64> {
        checked_total(
            self.blocks
                .iter()
                .filter(|b| !b.is_free())
                .map(|b| b.capacity),
            "internal fragmentation",
        )
    }
}

impl PlacementPolicy for NextFitAllocator {
    fn allocate(&mut self, request: Request) -> Result<AllocationOutcome> {
        self.allocate_next_fit(request)
    }

    fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn history(&self) -> &[AllocationRecord] {
        &self.history
    }
}
