//! Block placement for the fixed-partition memory simulator
//!
//! The block table is fixed for the lifetime of a run: blocks are never
//! freed, coalesced or resized. Only the Next-Fit policy is provided.

pub mod block;
pub mod next_fit;

pub use block::{AllocationOutcome, AllocationRecord, Block, BlockState, ProcessId, Request};
pub use next_fit::NextFitAllocator;

use crate::error::Result;
use crate::validation::checked_total;

/// Placement policy trait
///
/// Defines the interface for placing process requests into blocks and
/// inspecting the resulting state.
pub trait PlacementPolicy {
    /// Place a request into a block
    ///
    /// Returns `Denied` (not an error) when no block has room.
    fn allocate(&mut self, request: Request) -> Result<AllocationOutcome>;

    /// Borrowed view of all blocks in table order
    fn blocks(&self) -> &[Block];

    /// Successful allocations in request order
    fn history(&self) -> &[AllocationRecord];

    /// Owned copy of the current block state
    fn snapshot(&self) -> Vec<Block> {
        self.blocks().to_vec()
    }

    /// Get number of blocks managed
    fn block_count(&self) -> usize {
        self.blocks().len()
    }

    /// Sum of configured block sizes
    ///
    /// Fails with `Overflow` if the sum does not fit in a `u64`; the block
    /// table itself is not bounded by any memory ceiling.
    fn total_capacity(&self) -> Result<u64> {
        checked_total(
            self.blocks().iter().map(|b| b.initial_capacity),
            "total block capacity",
        )
    }

    /// Sum of remaining capacity across all blocks
    fn free_capacity(&self) -> Result<u64> {
        checked_total(self.blocks().iter().map(|b| b.capacity), "free capacity")
    }
}
