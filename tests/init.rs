use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_patchgate"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "patchgate init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config_path = dir.path().join(".patchgate.toml");
    assert!(config_path.exists(), ".patchgate.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[diff]"));
    assert!(content.contains("[risk]"));

    // Verify it's valid TOML that patchgate-core can parse
    let _config: patchgate_core::PatchgateConfig = toml::from_str(&content).unwrap();
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".patchgate.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_patchgate"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
}
