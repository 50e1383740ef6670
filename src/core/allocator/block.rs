//! Blocks, requests and allocation records
//!
//! A block is a fixed-position partition of the simulated memory pool.
//! Blocks are addressed by their position in the allocator's block table,
//! so no separate block identifier exists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a simulated process
///
/// Processes are numbered from 1 in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl ProcessId {
    /// Create a new process ID
    pub const fn new(id: u32) -> Self {
        ProcessId(id)
    }

    /// Get the raw ID value
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Usage state of a block
///
/// The only transition is `Free -> Used`; blocks are never released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    /// Block has never served a process
    Free,
    /// Block has served at least one process
    Used,
}

/// A single memory block (sizes in KB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Size the block was configured with
    pub initial_capacity: u64,
    /// Remaining free capacity
    pub capacity: u64,
    /// Process that first allocated into this block
    pub allocated_to: Option<ProcessId>,
}

impl Block {
    pub fn new(capacity: u64) -> Self {
        Block {
            initial_capacity: capacity,
            capacity,
            allocated_to: None,
        }
    }

    pub fn state(&self) -> BlockState {
        match self.allocated_to {
            Some(_) => BlockState::Used,
            None => BlockState::Free,
        }
    }

    pub fn is_free(&self) -> bool {
        self.allocated_to.is_none()
    }

    /// Check if the remaining capacity can hold `size`
    pub fn fits(&self, size: u64) -> bool {
        self.capacity >= size
    }

    /// Capacity consumed so far
    pub fn used(&self) -> u64 {
        self.initial_capacity.saturating_sub(self.capacity)
    }

    /// True once a used block has no capacity left
    pub fn is_exhausted(&self) -> bool {
        self.capacity == 0
    }

    /// Carve `size` out of this block on behalf of `process_id`
    ///
    /// Caller must have checked `fits(size)`. The first process to use the
    /// block keeps the attribution.
    pub(crate) fn consume(&mut self, process_id: ProcessId, size: u64) {
        debug_assert!(self.fits(size));
        self.capacity -= size;
        if self.allocated_to.is_none() {
            self.allocated_to = Some(process_id);
        }
    }
}

/// A request for memory from a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: ProcessId,
    /// Requested size in KB (must be positive)
    pub size: u64,
}

impl Request {
    pub fn new(id: ProcessId, size: u64) -> Self {
        Request { id, size }
    }
}

/// Result of a single placement decision
///
/// `Denied` is a normal outcome, not an error: no block had room and the
/// allocator state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AllocationOutcome {
    Granted { block_index: usize, granted_size: u64 },
    Denied,
}

impl AllocationOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, AllocationOutcome::Granted { .. })
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AllocationOutcome::Denied)
    }

    /// Zero-based index of the chosen block, if any
    pub fn block_index(&self) -> Option<usize> {
        match self {
            AllocationOutcome::Granted { block_index, .. } => Some(*block_index),
            AllocationOutcome::Denied => None,
        }
    }
}

/// Entry in the allocation history (append-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub process_id: ProcessId,
    pub granted_size: u64,
    /// Zero-based block index
    pub block_index: usize,
}

impl AllocationRecord {
    pub fn new(process_id: ProcessId, granted_size: u64, block_index: usize) -> Self {
        AllocationRecord {
            process_id,
            granted_size,
            block_index,
        }
    }
}
