//! Dotenv layering tests.


use setup::env;
use std::io::Write;
use toolchain::env::{layer_default_env_file, layer_env_file, EnvFile};

fn env_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_env_file_values_are_used() {
    let file = env_file("MUMBAI_RPC=https://from-file.example\nSEED=\"a b c\"\n");

    let snapshot = layer_env_file(env(&[]), &EnvFile::Path(file.path().into())).unwrap();
    let config = config::resolve(&snapshot);
    let mumbai = config.network("mumbai").unwrap();

    assert_eq!(mumbai.url.as_deref(), Some("https://from-file.example"));
    assert!(mumbai.require_accounts().is_ok());
}

#[test]
fn test_process_values_win() {
    let file = env_file("BSC_KEY=from-file\nPOLYGON_KEY=poly-file\n");

    let snapshot = layer_env_file(
        env(&[("BSC_KEY", "from-process")]),
        &EnvFile::Path(file.path().into()),
    )
    .unwrap();

    assert_eq!(snapshot.get("BSC_KEY"), Some("from-process"));
    assert_eq!(snapshot.get("POLYGON_KEY"), Some("poly-file"));
}

#[test]
fn test_explicit_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.env");

    assert!(layer_env_file(env(&[]), &EnvFile::Path(missing)).is_err());
}

#[test]
fn test_disabled_keeps_base() {
    let base = env(&[("SEED", "x")]);
    let snapshot = layer_env_file(base.clone(), &EnvFile::Disabled).unwrap();
    assert_eq!(snapshot, base);
}

#[test]
fn test_missing_default_file_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let base = env(&[("MUMBAI_RPC", "https://rpc.example")]);

    let snapshot = layer_default_env_file(base.clone(), dir.path()).unwrap();
    assert_eq!(snapshot, base);
}

#[test]
fn test_default_file_is_layered_under_base() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "SEED=from-file\nPOLYGON_KEY=poly-file\n",
    )
    .unwrap();

    let snapshot =
        layer_default_env_file(env(&[("SEED", "from-process")]), dir.path()).unwrap();

    assert_eq!(snapshot.get("SEED"), Some("from-process"));
    assert_eq!(snapshot.get("POLYGON_KEY"), Some("poly-file"));
}
