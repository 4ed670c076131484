use std::process::Command;

fn run_preview(dir: &std::path::Path, ops_json: &str, extra_args: &[&str]) -> std::process::Output {
    let ops_path = dir.join("ops.json");
    std::fs::write(&ops_path, ops_json).unwrap();

    Command::new(env!("CARGO_BIN_EXE_patchgate"))
        .args(["preview", "--file"])
        .arg(&ops_path)
        .args(["--root", "."])
        .args(["--color", "never"])
        .args(extra_args)
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn preview_renders_a_unified_diff_against_the_workspace() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "a\nb\nc\n").unwrap();

    let ops = r#"[{"id":"1","kind":"update","path":"a.txt","content":"a\nX\nc\n"}]"#;
    let output = run_preview(dir.path(), ops, &["--format", "unified"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--- a/a.txt"), "stdout: {stdout}");
    assert!(stdout.contains("+++ b/a.txt"));
    assert!(stdout.contains("@@ -1,3 +1,3 @@"));
    assert!(stdout.contains("-b\n+X\n"));
}

#[test]
fn json_output_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();

    let ops = r#"[{"id":"1","kind":"create","path":"new.txt","content":"one\ntwo\n"}]"#;
    let output = run_preview(dir.path(), ops, &["--format", "json"]);

    assert!(output.status.success());
    let preview: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(preview["summary"]["filesCreated"], 1);
    assert_eq!(preview["summary"]["totalAdditions"], 2);
    assert_eq!(preview["risk"]["level"], "low");
    assert_eq!(preview["risk"]["requiresReview"], false);
    assert!(preview["generatedAt"].is_string());
    assert_eq!(preview["files"][0]["stats"]["additions"], 2);
}

#[test]
fn deletions_surface_warnings_and_risk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("old.txt"), "gone\n").unwrap();

    let ops = r#"[{"id":"1","kind":"delete","path":"old.txt"}]"#;
    let output = run_preview(dir.path(), ops, &["--format", "json"]);

    assert!(output.status.success());
    let preview: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(preview["risk"]["level"], "medium");
    assert_eq!(preview["summary"]["filesDeleted"], 1);
    let warnings = preview["warnings"].as_array().unwrap();
    assert!(warnings
        .iter()
        .any(|w| w.as_str().unwrap().contains("deleted")));
}

#[test]
fn context_flag_overrides_the_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".patchgate.toml"),
        "[diff]\ncontext_lines = 0\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("a.txt"), "a\nb\nc\n").unwrap();

    let ops = r#"[{"id":"1","kind":"update","path":"a.txt","content":"a\nX\nc\n"}]"#;

    // Config alone: no context lines in the hunk.
    let output = run_preview(dir.path(), ops, &["--format", "unified"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains(" a\n"), "stdout: {stdout}");

    // CLI override restores them.
    let output = run_preview(dir.path(), ops, &["--format", "unified", "--context", "3"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" a\n"), "stdout: {stdout}");
}

#[test]
fn invalid_operations_json_is_a_readable_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_preview(dir.path(), "not json", &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("operations"), "stderr: {stderr}");
}

#[test]
fn oversized_context_is_rejected_with_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let ops = r#"[{"id":"1","kind":"create","path":"a.txt","content":"x\n"}]"#;
    let output = run_preview(dir.path(), ops, &["--context", "100000"]);

    assert!(!output.status.success());
}
