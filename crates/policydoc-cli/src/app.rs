//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use policydoc_ast::{Block, DocumentRequest};
use policydoc_core::{check_input_size, parse_with, substitute, ParseOutcome, Settings, Variables};
use policydoc_html::render_html_with;
use policydoc_pdf::render_pdf_with;

/// Configuration file picked up from the working directory
const DEFAULT_CONFIG_FILE: &str = "policydoc.toml";

/// Longest paragraph preview in the text outline
const PREVIEW_CHARS: usize = 60;

/// Output format for the parse command
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable outline
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "policydoc")]
#[command(author, version, about = "Print-ready policy documents from generated text", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./policydoc.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fill a {{placeholder}} before formatting (repeatable)
    #[arg(long = "var", global = true, value_name = "KEY=VALUE")]
    var: Vec<String>,

    /// TOML file of placeholder values
    #[arg(long, global = true, value_name = "FILE")]
    vars: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by the html and pdf commands
#[derive(Debug, Clone, Args)]
pub struct DocumentArgs {
    /// Input policy text file
    pub input: PathBuf,

    /// Document title
    #[arg(short, long)]
    pub title: String,

    /// Organization name
    #[arg(long)]
    pub org: String,

    /// Policy identifier
    #[arg(long)]
    pub policy_id: Option<String>,

    /// Generation timestamp (defaults to now)
    #[arg(long, value_name = "RFC3339")]
    pub date: Option<String>,

    /// Output file (defaults to a name derived from the title)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format policy text as a print-ready HTML page
    Html(DocumentArgs),

    /// Format policy text as a paginated PDF
    Pdf(DocumentArgs),

    /// Show the parsed section tree and removed anomalies
    Parse {
        /// Input policy text file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(cli.config.as_deref())?;
    let variables = load_variables(cli.vars.as_deref(), &cli.var)?;

    match cli.command {
        Commands::Html(args) => {
            html_command(&args, &settings, &variables)?;
        }
        Commands::Pdf(args) => {
            pdf_command(&args, &settings, &variables)?;
        }
        Commands::Parse { input, format } => {
            parse_command(&input, format, &settings, &variables)?;
        }
    }

    Ok(())
}

/// Load settings from an explicit file, `./policydoc.toml`, or defaults
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                return Ok(Settings::default());
            }
            fallback
        }
    };

    let settings = Settings::load(&path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(settings)
}

/// Merge placeholder values from a TOML file and `key=value` pairs.
///
/// Pairs given on the command line win over file values.
pub fn load_variables(file: Option<&Path>, pairs: &[String]) -> Result<Variables> {
    let mut variables = match file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read variables file: {}", path.display()))?;
            Variables::from_toml_str(&content)
                .with_context(|| format!("Invalid variables file: {}", path.display()))?
        }
        None => Variables::new(),
    };

    for pair in pairs {
        let Some((key, value)) = Variables::parse_pair(pair) else {
            anyhow::bail!("Invalid --var '{}', expected key=value", pair);
        };
        variables.set(key, value);
    }

    Ok(variables)
}

/// Build a formatting request from command arguments and body text
pub fn build_request(args: &DocumentArgs, body: String) -> Result<DocumentRequest> {
    let mut request = DocumentRequest::new(args.title.as_str(), body, args.org.as_str());

    if let Some(ref policy_id) = args.policy_id {
        request = request.with_policy_id(policy_id.as_str());
    }
    if let Some(ref date) = args.date {
        let parsed = DateTime::parse_from_rfc3339(date)
            .with_context(|| format!("Invalid --date '{}', expected RFC 3339", date))?;
        request = request.with_generated_date(parsed.with_timezone(&Utc));
    }

    Ok(request)
}

/// Read an input file, check it against the input ceiling and fill known
/// placeholders
fn read_body(input: &Path, settings: &Settings, variables: &Variables) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    debug!(
        path = %input.display(),
        bytes = content.len(),
        variables = variables.len(),
        "read policy text"
    );

    check_input_size(&content, &settings.limits).context("could not generate document")?;
    Ok(substitute(&content, variables))
}

/// Execute the html command, returning the written path
pub fn html_command(
    args: &DocumentArgs,
    settings: &Settings,
    variables: &Variables,
) -> Result<PathBuf> {
    let body = read_body(&args.input, settings, variables)?;
    let request = build_request(args, body)?;

    let html = render_html_with(&request, settings).context("could not generate document")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(request.html_file_name()));
    fs::write(&output, html)
        .with_context(|| format!("Failed to write HTML file: {}", output.display()))?;

    info!(path = %output.display(), "wrote html document");
    println!("Created: {}", output.display());
    Ok(output)
}

/// Execute the pdf command, returning the written path
pub fn pdf_command(
    args: &DocumentArgs,
    settings: &Settings,
    variables: &Variables,
) -> Result<PathBuf> {
    let body = read_body(&args.input, settings, variables)?;
    let request = build_request(args, body)?;

    // The whole file is produced in memory; nothing is written on failure
    let bytes = render_pdf_with(&request, settings).context("could not generate document")?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(request.pdf_file_name()));
    fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write PDF file: {}", output.display()))?;

    info!(path = %output.display(), bytes = bytes.len(), "wrote pdf document");
    println!("Created: {}", output.display());
    Ok(output)
}

/// Execute the parse command
pub fn parse_command(
    input: &Path,
    format: OutputFormat,
    settings: &Settings,
    variables: &Variables,
) -> Result<()> {
    let body = read_body(input, settings, variables)?;
    let outcome = parse_with(&body, settings).context("could not parse document")?;

    match format {
        OutputFormat::Text => {
            print!("{}", render_outline(&outcome));
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "document": outcome.document,
                "diagnostics": outcome.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

/// Human-readable outline of a parse result
pub fn render_outline(outcome: &ParseOutcome) -> String {
    let mut out = String::new();

    for section in &outcome.document.sections {
        match section.title {
            Some(ref title) => out.push_str(&format!("Section: {}\n", title)),
            None => out.push_str("Section: (untitled)\n"),
        }
        outline_blocks(&mut out, &section.blocks, 1);

        for subsection in &section.subsections {
            out.push_str(&format!("  Subsection: {}\n", subsection.title));
            outline_blocks(&mut out, &subsection.blocks, 2);
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "{} section(s), {} anomaly(ies)\n",
        outcome.document.len(),
        outcome.diagnostics.len()
    ));
    for diag in outcome.diagnostics.iter() {
        out.push_str(&format!("{}\n", diag));
    }

    out
}

fn outline_blocks(out: &mut String, blocks: &[Block], depth: usize) {
    let indent = "  ".repeat(depth);

    for block in blocks {
        let line = match block {
            Block::Paragraph(para) => {
                let text = para.text();
                let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
                if text.chars().count() > PREVIEW_CHARS {
                    preview.push_str("...");
                }
                format!("paragraph: {}", preview)
            }
            Block::List(list) => format!(
                "{} list ({} items)",
                if list.ordered { "ordered" } else { "bulleted" },
                list.items.len()
            ),
            Block::Table(table) => {
                let kind = if table.is_field_value() {
                    "field/value table"
                } else {
                    "table"
                };
                format!(
                    "{} ({} rows x {} columns)",
                    kind,
                    table.rows.len(),
                    table.column_count()
                )
            }
        };
        out.push_str(&indent);
        out.push_str(&line);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "policydoc",
            "pdf",
            "policy.txt",
            "--title",
            "Access Control Policy",
            "--org",
            "Acme Health",
            "--var",
            "organization_name=Acme Health",
            "--var",
            "privacy_officer=Jane Doe",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.var.len(), 2);
        match cli.command {
            Commands::Pdf(args) => {
                assert_eq!(args.title, "Access Control Policy");
                assert_eq!(args.org, "Acme Health");
                assert!(args.output.is_none());
            }
            _ => panic!("Expected pdf command"),
        }
    }

    #[test]
    fn test_title_is_required() {
        assert!(Cli::try_parse_from(["policydoc", "html", "policy.txt", "--org", "Acme"]).is_err());
    }

    #[test]
    fn test_parse_format_flag() {
        let cli =
            Cli::try_parse_from(["policydoc", "parse", "policy.txt", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Parse {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    fn args() -> DocumentArgs {
        DocumentArgs {
            input: PathBuf::from("policy.txt"),
            title: "Access Control Policy".to_string(),
            org: "Acme Health".to_string(),
            policy_id: None,
            date: None,
            output: None,
        }
    }

    #[test]
    fn test_build_request_with_date() {
        let mut args = args();
        args.policy_id = Some("AC-001".to_string());
        args.date = Some("2025-06-01T12:00:00+02:00".to_string());

        let request = build_request(&args, "text".to_string()).unwrap();
        assert_eq!(request.policy_id.as_deref(), Some("AC-001"));
        assert_eq!(
            request.generated_date.unwrap().to_rfc3339(),
            "2025-06-01T10:00:00+00:00"
        );
    }

    #[test]
    fn test_build_request_rejects_bad_date() {
        let mut args = args();
        args.date = Some("June 1st".to_string());

        let err = build_request(&args, String::new()).unwrap_err();
        assert!(err.to_string().contains("Invalid --date"));
    }

    #[test]
    fn test_load_variables_rejects_bad_pair() {
        let err = load_variables(None, &["no-equals-sign".to_string()]).unwrap_err();
        assert!(err.to_string().contains("expected key=value"));
    }

    #[test]
    fn test_outline() {
        let text = "1 PURPOSE\n\
                    this policy protects patient data.\n\
                    1.1 Roles\n\
                    • Security Officer\n\
                    • Privacy Officer\n";
        let outcome = parse_with(text, &Settings::default()).unwrap();
        let outline = render_outline(&outcome);

        assert!(outline.contains("Section: 1 PURPOSE\n"));
        assert!(outline.contains("  paragraph: this policy protects patient data.\n"));
        assert!(outline.contains("  Subsection: 1.1 Roles\n"));
        assert!(outline.contains("    bulleted list (2 items)\n"));
        assert!(outline.contains("1 section(s), 0 anomaly(ies)"));
    }
}
