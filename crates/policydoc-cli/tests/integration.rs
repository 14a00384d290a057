//! Integration tests for the policydoc CLI
//!
//! These tests drive the command functions against real files:
//! policy text -> HTML / PDF on disk

use std::fs;
use std::path::{Path, PathBuf};

use policydoc_cli::{
    html_command, load_settings, load_variables, parse_command, pdf_command, DocumentArgs,
    OutputFormat,
};
use policydoc_core::{Settings, Variables};
use tempfile::TempDir;

const POLICY: &str = "1 PURPOSE
{{organization_name}} screens every workforce member.

1.1 Clearance
• Background checks are completed before the first day
• Access is removed within 24 hours of termination
----------------------------------------

2 SCOPE
All workforce members with access to ePHI.
";

fn write_input(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("policy.txt");
    fs::write(&path, POLICY).unwrap();
    path
}

fn args(input: &Path, output: PathBuf) -> DocumentArgs {
    DocumentArgs {
        input: input.to_path_buf(),
        title: "Workforce Security Policy".to_string(),
        org: "Acme Health".to_string(),
        policy_id: Some("WS-003".to_string()),
        date: Some("2025-06-01T12:00:00Z".to_string()),
        output: Some(output),
    }
}

#[test]
fn test_html_command_writes_document() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("out.html");

    let written = html_command(
        &args(&input, output.clone()),
        &Settings::default(),
        &Variables::new(),
    )
    .unwrap();
    assert_eq!(written, output);

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Workforce Security Policy"));
    assert!(html.contains("WS-003"));
    assert!(html.contains("1.1 Clearance"));
    assert!(!html.contains("{{"));
    assert!(!html.contains("----------"));
}

#[test]
fn test_variables_fill_placeholders() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("filled.html");
    let variables = load_variables(None, &["organization_name=Acme Health".to_string()]).unwrap();

    html_command(&args(&input, output.clone()), &Settings::default(), &variables).unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("Acme Health screens every workforce member."));
}

#[test]
fn test_pdf_command_writes_document() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let output = dir.path().join("out.pdf");

    pdf_command(
        &args(&input, output.clone()),
        &Settings::default(),
        &Variables::new(),
    )
    .unwrap();

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_generation_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);
    let config = dir.path().join("policydoc.toml");
    fs::write(&config, "[limits]\nmax_input_bytes = 10\n").unwrap();
    let settings = load_settings(Some(&config)).unwrap();
    assert_eq!(settings.limits.max_input_bytes, 10);

    let pdf = dir.path().join("too-large.pdf");
    let err = pdf_command(&args(&input, pdf.clone()), &settings, &Variables::new()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("could not generate document"));
    assert!(message.contains("document too large"));
    assert!(!pdf.exists());

    let html = dir.path().join("too-large.html");
    let err = html_command(&args(&input, html.clone()), &settings, &Variables::new()).unwrap_err();
    assert!(format!("{:#}", err).contains("could not generate document"));
    assert!(!html.exists());
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let output = dir.path().join("out.pdf");

    let err = pdf_command(
        &args(&missing, output.clone()),
        &Settings::default(),
        &Variables::new(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Input file not found"));
    assert!(!output.exists());
}

#[test]
fn test_load_settings_from_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        "[pdf]\ncompress = false\n\n[document]\nconfidentiality_notice = \"Internal\"\n",
    )
    .unwrap();

    let settings = load_settings(Some(&config)).unwrap();
    assert!(!settings.pdf.compress);
    assert_eq!(settings.document.confidentiality_notice, "Internal");
    assert_eq!(settings.classifier, Settings::default().classifier);
}

#[test]
fn test_load_settings_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[pdf\ncompress = ").unwrap();

    let err = load_settings(Some(&config)).unwrap_err();
    assert!(err.to_string().contains("Failed to load configuration"));
}

#[test]
fn test_command_line_values_override_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("vars.toml");
    fs::write(
        &file,
        "organization_name = \"Acme Health\"\nprivacy_officer = \"Jane Doe\"\n",
    )
    .unwrap();

    let variables =
        load_variables(Some(&file), &["organization_name=Beta Clinic".to_string()]).unwrap();
    assert_eq!(variables.get("organization_name"), Some("Beta Clinic"));
    assert_eq!(variables.get("privacy_officer"), Some("Jane Doe"));
}

#[test]
fn test_parse_command_formats() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir);

    parse_command(&input, OutputFormat::Text, &Settings::default(), &Variables::new()).unwrap();
    parse_command(&input, OutputFormat::Json, &Settings::default(), &Variables::new()).unwrap();
}

#[test]
fn test_ceiling_applies_to_the_file_before_substitution() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("padded.txt");
    fs::write(&input, "{{pad}}".repeat(10)).unwrap();

    let mut settings = Settings::default();
    settings.limits.max_input_bytes = 20;
    let variables = Variables::new().with("pad", "");

    let err = parse_command(&input, OutputFormat::Text, &settings, &variables).unwrap_err();
    assert!(format!("{:#}", err).contains("document too large: 70 bytes"));

    let output = dir.path().join("padded.html");
    let err = html_command(&args(&input, output.clone()), &settings, &variables).unwrap_err();
    assert!(format!("{:#}", err).contains("could not generate document"));
    assert!(!output.exists());
}
