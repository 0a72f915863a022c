use std::fs;

use serial_cli::config::{Overrides, RunConfig};
use serial_model::ColumnSelection;

#[test]
fn loads_file_and_applies_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recon.toml");
    fs::write(
        &path,
        "[columns]\nmeasured = { index = 1 }\n\n[normalization]\nmin_length = 6\n",
    )
    .unwrap();

    let config = RunConfig::load(Some(path.as_path()))
        .unwrap()
        .apply(Overrides {
            reference_column: Some(ColumnSelection::Name("Serial".into())),
            ..Overrides::default()
        })
        .unwrap();

    assert_eq!(config.columns.measured, ColumnSelection::Index(1));
    assert_eq!(config.columns.reference, ColumnSelection::Name("Serial".into()));
    assert_eq!(config.options.normalization.min_length, 6);
    assert_eq!(config.options.normalization.max_length, 10);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = RunConfig::load(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[classification.thresholds]\npotential_match = \"high\"\n").unwrap();
    assert!(RunConfig::load(Some(path.as_path())).is_err());
}
