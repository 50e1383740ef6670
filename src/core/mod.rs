//! Core implementation: allocator, validation, configuration, runner, reports

pub mod allocator;
pub mod config;
pub mod error;
pub mod report;
pub mod simulation;
pub mod validation;
