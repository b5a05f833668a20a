use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

const SCREENPLAY: &str = "INT. KITCHEN - DAY\n\nJOHN\nHello there, friend.\n";

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("slugline-cli-{}-{name}", std::process::id()))
}

#[test]
fn parse_lists_element_types() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.arg("parse").arg("-").write_stdin(SCREENPLAY);

    cmd.assert().success().stdout(
        predicate::str::contains("scene_heading")
            .and(predicate::str::contains("character"))
            .and(predicate::str::contains("dialogue")),
    );
}

#[test]
fn parse_json_includes_title_page() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["parse", "-", "--format", "json"])
        .write_stdin("Title: Big Fish\n\nINT. RIVER - DAY\n");

    cmd.assert().success().stdout(
        predicate::str::contains("\"title_page\"")
            .and(predicate::str::contains("Big Fish"))
            .and(predicate::str::contains("\"elements\"")),
    );
}

#[test]
fn parse_fountain_round_trips() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["parse", "-", "--format", "fountain"])
        .write_stdin(SCREENPLAY);

    cmd.assert().success().stdout(SCREENPLAY);
}

#[test]
fn extract_summarizes_entities() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.arg("extract").arg("-").write_stdin(SCREENPLAY);

    cmd.assert().success().stdout(
        predicate::str::contains("Locations (1):")
            .and(predicate::str::contains("KITCHEN (INT)"))
            .and(predicate::str::contains("Characters (1):"))
            .and(predicate::str::contains("[JOHN]")),
    );
}

#[test]
fn extract_rejects_fountain_format() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["extract", "-", "--format", "fountain"])
        .write_stdin(SCREENPLAY);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not available for extract"));
}

#[test]
fn validate_reports_issues() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.arg("validate")
        .arg("-")
        .write_stdin("int. office\n\njohn: hi there");

    cmd.assert().success().stdout(
        predicate::str::contains("line 1:")
            .and(predicate::str::contains("INT. OFFICE - DAY"))
            .and(predicate::str::contains("2 issue(s), 2 auto-fixable")),
    );
}

#[test]
fn validate_strict_exits_with_two() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["validate", "-", "--strict"])
        .write_stdin("int. office\n\njohn: hi there");

    cmd.assert().code(2);
}

#[test]
fn validate_clean_screenplay() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["validate", "-", "--strict"]).write_stdin(SCREENPLAY);

    cmd.assert().success().stdout("valid\n");
}

#[test]
fn correct_applies_fixes() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.arg("correct")
        .arg("-")
        .write_stdin("int. office\n\njohn: hi there");

    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("INT. OFFICE - DAY")
                .and(predicate::str::contains("JOHN\nhi there")),
        )
        .stderr(predicate::str::contains("change(s)"));
}

#[test]
fn correct_quick_uses_configured_time() {
    let config = temp_path("night.toml");
    fs::write(&config, "[validate]\ndefault_time_of_day = \"NIGHT\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["correct", "-", "--quick", "--config"])
        .arg(&config)
        .write_stdin("int. kitchen\n");

    cmd.assert().success().stdout("INT. kitchen - NIGHT\n");
    fs::remove_file(&config).ok();
}

#[test]
fn correct_writes_output_file() {
    let output = temp_path("corrected.fountain");

    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["correct", "-", "--quick", "-o"])
        .arg(&output)
        .write_stdin("ext. park\n");

    cmd.assert().success().stdout("");
    assert_eq!(fs::read_to_string(&output).unwrap(), "EXT. park - DAY\n");
    fs::remove_file(&output).ok();
}

#[test]
fn context_at_cursor() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["context", "-", "--cursor", "40"])
        .write_stdin(SCREENPLAY);

    cmd.assert().success().stdout(
        predicate::str::contains("Scene: INT. KITCHEN - DAY")
            .and(predicate::str::contains("Act: 1"))
            .and(predicate::str::contains("Characters: JOHN")),
    );
}

#[test]
fn detect_screenplay_and_prose() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.arg("detect").arg("-").write_stdin(SCREENPLAY);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("auto-import: yes"));

    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.arg("detect")
        .arg("-")
        .write_stdin("It was a dark and stormy night.");
    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("auto-import: no"));
}

#[test]
fn missing_input_file() {
    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.arg("parse").arg(temp_path("does-not-exist.fountain"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn invalid_config_is_reported() {
    let config = temp_path("bad.toml");
    fs::write(&config, "[extract]\nmin_alias_len = \"three\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("slugline");
    cmd.args(["extract", "-", "--config"])
        .arg(&config)
        .write_stdin(SCREENPLAY);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
    fs::remove_file(&config).ok();
}
