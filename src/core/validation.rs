//! Validation for block tables, process requests and size lists
//!
//! Block and process sizes are entered as comma-separated KB values
//! (e.g. "100, 500, 200"). This module turns those lists into sizes and
//! enforces the rules the allocator relies on:
//! - at least one block, every block size positive
//! - every request size positive
//! - total block size within the main memory ceiling

use crate::allocator::Request;
use crate::error::{Result, SimError};

/// Total main memory in KB (5 MB)
pub const DEFAULT_MEMORY_CEILING: u64 = 5120;

/// Validate a list of block capacities
///
/// # Errors
///
/// Returns `InvalidConfiguration` if the list is empty or any capacity is zero.
pub fn validate_block_capacities(capacities: &[u64]) -> Result<()> {
    if capacities.is_empty() {
        return Err(SimError::InvalidConfiguration(
            "at least one memory block is required".to_string(),
        ));
    }

    if let Some(position) = capacities.iter().position(|&c| c == 0) {
        return Err(SimError::InvalidConfiguration(format!(
            "block {} has zero capacity",
            position + 1
        )));
    }

    Ok(())
}

/// Validate a single request
pub fn validate_request(request: &Request) -> Result<()> {
    if request.size == 0 {
        return Err(SimError::InvalidRequest {
            process_id: request.id,
            size: request.size,
        });
    }
    Ok(())
}

/// Add up sizes, failing with `Overflow` instead of wrapping
///
/// `what` names the quantity in the error message.
pub fn checked_total<I>(sizes: I, what: &str) -> Result<u64>
where
    I: IntoIterator<Item = u64>,
{
    sizes
        .into_iter()
        .try_fold(0u64, |acc, size| acc.checked_add(size))
        .ok_or_else(|| SimError::Overflow(format!("{} exceeds {} KB", what, u64::MAX)))
}

/// Check that the block table fits in main memory
///
/// Returns the total block size on success.
pub fn validate_memory_ceiling(capacities: &[u64], ceiling: u64) -> Result<u64> {
    let total = checked_total(capacities.iter().copied(), "total block size")?;

    if total > ceiling {
        return Err(SimError::MemoryCeilingExceeded { total, ceiling });
    }

    Ok(total)
}

/// Parse a comma-separated list of positive sizes
///
/// Whitespace around entries is ignored.
///
/// # Examples
///
/// ```
/// use nextfit_sim::core::validation::parse_size_list;
///
/// assert_eq!(parse_size_list("100, 500,200").unwrap(), vec![100, 500, 200]);
/// assert!(parse_size_list("100,,200").is_err()); // empty entry
/// assert!(parse_size_list("100,-5").is_err()); // not positive
/// ```
pub fn parse_size_list(input: &str) -> Result<Vec<u64>> {
    if input.trim().is_empty() {
        return Err(SimError::Parse("list is empty".to_string()));
    }

    input
        .split(',')
        .enumerate()
        .map(|(i, raw)| parse_size_entry(i + 1, raw.trim()))
        .collect()
}

fn parse_size_entry(position: usize, entry: &str) -> Result<u64> {
    if entry.is_empty() {
        return Err(SimError::Parse(format!("entry {} is empty", position)));
    }

    let not_an_integer = || {
        SimError::Parse(format!(
            "entry {} ('{}') is not a valid integer",
            position, entry
        ))
    };
    let not_positive = || {
        SimError::Parse(format!(
            "entry {} ({}) must be a positive size",
            position, entry
        ))
    };

    // Negative numbers of any magnitude are still integers, just not sizes
    if let Some(digits) = entry.strip_prefix('-') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_positive());
        }
        return Err(not_an_integer());
    }

    match entry.parse::<u64>() {
        Ok(0) => Err(not_positive()),
        Ok(value) => Ok(value),
        Err(_) => Err(not_an_integer()),
    }
}
