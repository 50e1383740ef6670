//! Simulation configuration
//!
//! A configuration is the input of one run: the block table, the process
//! sizes in arrival order, and the main memory ceiling the block table must
//! fit in. It can be built from comma-separated lists or loaded from a
//! scenario file:
//!
//! ```toml
//! name = "reference"
//! blocks = [100, 500, 200, 300, 600]
//! processes = [212, 417, 112, 426]
//! memory_ceiling = 5120
//! ```

use crate::error::{Result, SimError};
use crate::validation::{
    checked_total, parse_size_list, validate_block_capacities, validate_memory_ceiling,
    DEFAULT_MEMORY_CEILING,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Input of a single simulation run (sizes in KB)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Optional scenario name, shown in reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Block capacities in table order
    pub blocks: Vec<u64>,

    /// Process sizes in arrival order
    #[serde(default)]
    pub processes: Vec<u64>,

    /// Upper bound on the total block size
    #[serde(default = "default_memory_ceiling")]
    pub memory_ceiling: u64,
}

fn default_memory_ceiling() -> u64 {
    DEFAULT_MEMORY_CEILING
}

impl SimulationConfig {
    /// Create a configuration with the default memory ceiling
    pub fn new(blocks: Vec<u64>, processes: Vec<u64>) -> Self {
        SimulationConfig {
            name: None,
            blocks,
            processes,
            memory_ceiling: DEFAULT_MEMORY_CEILING,
        }
    }

    /// Build a configuration from comma-separated lists
    ///
    /// # Examples
    ///
    /// ```
    /// use nextfit_sim::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_lists("100,500,200", "212, 417").unwrap();
    /// assert_eq!(config.blocks, vec![100, 500, 200]);
    /// assert_eq!(config.processes, vec![212, 417]);
    /// ```
    pub fn from_lists(blocks: &str, processes: &str) -> Result<Self> {
        let blocks = parse_size_list(blocks)?;
        let processes = parse_size_list(processes)?;
        Ok(Self::new(blocks, processes))
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario file, picking the format from the extension
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for extensions other than `.toml` and
    /// `.json`, and I/O or parse errors from reading the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading simulation config from {:?}", path);

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            _ => {
                return Err(SimError::InvalidConfiguration(format!(
                    "unsupported config file {:?} (expected .toml or .json)",
                    path
                )))
            }
        };

        Ok(config)
    }

    /// Validate all fields
    ///
    /// Checks:
    /// - Block table is non-empty with positive capacities
    /// - Total block size is within the memory ceiling
    /// - Every process size is positive
    pub fn validate(&self) -> Result<()> {
        validate_block_capacities(&self.blocks)?;

        if let Err(e) = validate_memory_ceiling(&self.blocks, self.memory_ceiling) {
            warn!("Rejected block table: {}", e);
            return Err(e);
        }

        if let Some(position) = self.processes.iter().position(|&size| size == 0) {
            return Err(SimError::InvalidConfiguration(format!(
                "process {} has zero size",
                position + 1
            )));
        }

        Ok(())
    }

    /// Set scenario name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set memory ceiling
    pub fn with_memory_ceiling(mut self, memory_ceiling: u64) -> Self {
        self.memory_ceiling = memory_ceiling;
        self
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SimError::InvalidConfiguration(format!("cannot encode config: {}", e)))
    }

    /// Sum of block capacities
    pub fn total_block_size(&self) -> Result<u64> {
        checked_total(self.blocks.iter().copied(), "total block size")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE_TOML: &str = r#"
name = "reference"
blocks = [100, 500, 200, 300, 600]
processes = [212, 417, 112, 426]
"#;

    #[test]
    fn test_new_uses_default_ceiling() {
        let config = SimulationConfig::new(vec![100], vec![50]);
        assert_eq!(config.memory_ceiling, 5120);
        assert_eq!(config.name, None);
    }

    #[test]
    fn test_from_lists() -> Result<()> {
        let config = SimulationConfig::from_lists("100, 500, 200, 300, 600", "212,417,112,426")?;
        assert_eq!(config.blocks, vec![100, 500, 200, 300, 600]);
        assert_eq!(config.processes, vec![212, 417, 112, 426]);
        assert_eq!(config.total_block_size()?, 1700);
        Ok(())
    }

    #[test]
    fn test_from_lists_rejects_garbage() {
        assert!(matches!(
            SimulationConfig::from_lists("100,x", "10"),
            Err(SimError::Parse(_))
        ));
        assert!(matches!(
            SimulationConfig::from_lists("100", ""),
            Err(SimError::Parse(_))
        ));
    }

    #[test]
    fn test_from_toml() -> Result<()> {
        let config = SimulationConfig::from_toml_str(REFERENCE_TOML)?;
        assert_eq!(config.name.as_deref(), Some("reference"));
        assert_eq!(config.blocks, vec![100, 500, 200, 300, 600]);
        assert_eq!(config.memory_ceiling, DEFAULT_MEMORY_CEILING);
        Ok(())
    }

    #[test]
    fn test_from_json() -> Result<()> {
        let config = SimulationConfig::from_json_str(
            r#"{"blocks": [50], "processes": [50, 1], "memory_ceiling": 64}"#,
        )?;
        assert_eq!(config.blocks, vec![50]);
        assert_eq!(config.processes, vec![50, 1]);
        assert_eq!(config.memory_ceiling, 64);
        Ok(())
    }

    #[test]
    fn test_toml_rejects_negative_sizes() {
        let result = SimulationConfig::from_toml_str("blocks = [100, -5]");
        assert!(matches!(result, Err(SimError::Toml(_))));
    }

    #[test]
    fn test_toml_round_trip() -> Result<()> {
        let config = SimulationConfig::new(vec![100, 500], vec![212]).with_name("pair");
        let encoded = config.to_toml_string()?;
        assert_eq!(SimulationConfig::from_toml_str(&encoded)?, config);
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(SimulationConfig::new(vec![100, 500], vec![212]).validate().is_ok());
        // No processes is a valid (empty) run
        assert!(SimulationConfig::new(vec![100], vec![]).validate().is_ok());

        assert!(matches!(
            SimulationConfig::new(vec![], vec![1]).validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SimulationConfig::new(vec![100], vec![10, 0]).validate(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_memory_ceiling() {
        let config = SimulationConfig::new(vec![5000, 200], vec![10]);
        assert!(matches!(
            config.validate(),
            Err(SimError::MemoryCeilingExceeded {
                total: 5200,
                ceiling: 5120
            })
        ));

        assert!(config.with_memory_ceiling(8192).validate().is_ok());
    }

    #[test]
    fn test_oversized_block_table() {
        let config =
            SimulationConfig::new(vec![u64::MAX, 1], vec![1]).with_memory_ceiling(u64::MAX);
        assert!(matches!(config.total_block_size(), Err(SimError::Overflow(_))));
        assert!(matches!(config.validate(), Err(SimError::Overflow(_))));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let result = SimulationConfig::load("scenario.yaml");
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }
}
