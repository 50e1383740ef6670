//! Loading scenario files from disk

use nextfit_sim::{render_json, SimError, Simulation, SimulationConfig, SimulationReport};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_toml_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reference.toml");
    fs::write(
        &path,
        r#"
name = "reference"
blocks = [100, 500, 200, 300, 600]
processes = [212, 417, 112, 426]
memory_ceiling = 5120
"#,
    )
    .unwrap();

    let config = SimulationConfig::load(&path).unwrap();
    assert_eq!(config.name.as_deref(), Some("reference"));

    let report = Simulation::new(config).unwrap().run().unwrap();
    assert_eq!(report.granted_count(), 3);
}

#[test]
fn test_load_json_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("single.JSON");
    fs::write(&path, r#"{"blocks": [50], "processes": [50, 1]}"#).unwrap();

    let config = SimulationConfig::load(&path).unwrap();
    assert_eq!(config.blocks, vec![50]);
    assert_eq!(config.memory_ceiling, 5120);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = SimulationConfig::load(dir.path().join("missing.toml"));
    assert!(matches!(result, Err(SimError::Io(_))));
}

#[test]
fn test_load_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "blocks = [100, ").unwrap();

    assert!(matches!(SimulationConfig::load(&path), Err(SimError::Toml(_))));
}

#[test]
fn test_loaded_config_still_validated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("too-big.toml");
    fs::write(&path, "blocks = [4096, 4096]\nprocesses = [1]\n").unwrap();

    let config = SimulationConfig::load(&path).unwrap();
    assert!(matches!(
        Simulation::new(config),
        Err(SimError::MemoryCeilingExceeded { total: 8192, .. })
    ));
}

#[test]
fn test_json_report_written_and_read_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");

    let config = SimulationConfig::new(vec![100, 500], vec![212, 300]);
    let report = Simulation::new(config).unwrap().run().unwrap();
    fs::write(&path, render_json(&report).unwrap()).unwrap();

    let decoded: SimulationReport =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(decoded.history, report.history);
    assert_eq!(decoded.denied_count(), 1);
}

#[test]
fn test_bundled_demo_scenarios() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

    let reference = SimulationConfig::load(demos.join("reference.toml")).unwrap();
    let report = Simulation::new(reference).unwrap().run().unwrap();
    assert_eq!(report.denied_count(), 1);

    let single = SimulationConfig::load(demos.join("single-block.json")).unwrap();
    let report = Simulation::new(single).unwrap().run().unwrap();
    assert_eq!(report.final_blocks[0].capacity, 0);
    assert_eq!(report.denied_count(), 1);
}
