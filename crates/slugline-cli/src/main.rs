//! Slugline CLI - Fountain screenplay processing from the command line.

mod config;

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use slugline::lint::{Pipeline, QuickCorrect};
use slugline::{AutoImportResult, FountainElement, TitlePageField, ValidationResult};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "slugline")]
#[command(author, version, about = "Fountain screenplay parser, extractor and linter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file with [extract], [validate] and [emit] tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every line of a screenplay
    Parse {
        /// Input file (use - for stdin)
        input: PathBuf,
    },

    /// Extract scenes, locations and characters
    Extract {
        /// Input file (use - for stdin)
        input: PathBuf,
    },

    /// Report format issues
    Validate {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Exit with status 2 when any issue is found
        #[arg(long)]
        strict: bool,
    },

    /// Apply suggested fixes and repair spacing
    Correct {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Only normalize scene headings
        #[arg(long)]
        quick: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the scene, speakers and act at a cursor position
    Context {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Character offset into the document
        #[arg(long)]
        cursor: usize,
    },

    /// Check whether text looks like a screenplay worth importing
    Detect {
        /// Input file (use - for stdin)
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Text,
    Json,
    Fountain,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    title_page: &'a [TitlePageField],
    elements: &'a [FountainElement],
}

#[derive(Serialize)]
struct DetectOutput {
    auto_import: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Parse { input } => {
            let document = read_input(&input)?;
            let elements = slugline::read::parse(&document);
            let text = match format {
                Format::Text => render_elements(&elements),
                Format::Json => {
                    let title_page = slugline::read::title_page(&document);
                    to_json(&ParseOutput {
                        title_page: &title_page,
                        elements: &elements,
                    })?
                }
                Format::Fountain => slugline::write::emit_with_options(&elements, &config.emit),
            };
            print(&text)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Extract { input } => {
            let document = read_input(&input)?;
            let result = slugline::extract::extract_with_options(&document, &config.extract);
            let text = match format {
                Format::Text => render_extraction(&result),
                Format::Json => to_json(&result)?,
                Format::Fountain => return Err(fountain_unsupported("extract")),
            };
            print(&text)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate { input, strict } => {
            let document = read_input(&input)?;
            let result = slugline::lint::validate_with_options(&document, &config.validate);
            let text = match format {
                Format::Text => render_validation(&result),
                Format::Json => to_json(&result)?,
                Format::Fountain => return Err(fountain_unsupported("validate")),
            };
            print(&text)?;
            if strict && !result.issues.is_empty() {
                return Ok(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Correct {
            input,
            quick,
            output,
        } => {
            let document = read_input(&input)?;
            let result = if quick {
                Pipeline::new()
                    .then(QuickCorrect::with_time_of_day(
                        config.validate.default_time_of_day.as_str(),
                    ))
                    .run(&document)
            } else {
                let issues =
                    slugline::lint::validate_with_options(&document, &config.validate).issues;
                slugline::lint::correct(&document, &issues)
            };

            let text = match format {
                Format::Text | Format::Fountain => {
                    eprintln!("{} change(s)", result.change_count);
                    result.corrected_content.clone()
                }
                Format::Json => to_json(&result)?,
            };
            match output {
                Some(path) => fs::write(&path, text).map_err(|source| CliError::Write {
                    path: path.display().to_string(),
                    source,
                })?,
                None => print(&text)?,
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Context { input, cursor } => {
            let document = read_input(&input)?;
            let context = slugline::read::prompt_context(&document, cursor);
            let text = match format {
                Format::Text => render_context(&context),
                Format::Json => to_json(&context)?,
                Format::Fountain => return Err(fountain_unsupported("context")),
            };
            print(&text)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Detect { input } => {
            let document = read_input(&input)?;
            let auto_import = slugline::extract::should_auto_import(&document);
            let text = match format {
                Format::Text => format!("auto-import: {}\n", if auto_import { "yes" } else { "no" }),
                Format::Json => to_json(&DetectOutput { auto_import })?,
                Format::Fountain => return Err(fountain_unsupported("detect")),
            };
            print(&text)?;
            Ok(if auto_import {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })
    }
}

fn print(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

fn fountain_unsupported(command: &str) -> CliError {
    CliError::Usage(format!("--format fountain is not available for {command}"))
}

fn render_elements(elements: &[FountainElement]) -> String {
    let mut out = String::new();
    for element in elements {
        let _ = writeln!(
            out,
            "{:>5}  {:<14} {}",
            element.line_number,
            element.kind.as_str(),
            element.text.trim_end_matches('\r')
        );
    }
    out
}

fn render_extraction(result: &AutoImportResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Locations ({}):", result.locations.len());
    for location in &result.locations {
        let _ = writeln!(out, "  {} ({})", location.name, location.location_type);
    }

    let _ = writeln!(out, "Characters ({}):", result.characters.len());
    for character in &result.characters {
        match &character.description {
            Some(description) => {
                let _ = writeln!(out, "  {} - {}", character.name, description.replace('\n', " "));
            }
            None => {
                let _ = writeln!(out, "  {}", character.name);
            }
        }
    }

    let _ = writeln!(out, "Scenes ({}):", result.scenes.len());
    for scene in &result.scenes {
        let _ = writeln!(
            out,
            "  {}-{}  {}  [{}]",
            scene.start_line,
            scene.end_line,
            scene.heading,
            scene.characters.join(", ")
        );
    }

    if !result.questionable_items.is_empty() {
        let _ = writeln!(out, "Questionable ({}):", result.questionable_items.len());
        for item in &result.questionable_items {
            let _ = write!(out, "  line {}: {} ({})", item.line_number, item.text, item.reason);
            if let Some(suggestion) = &item.suggestion {
                let _ = write!(out, " -> {suggestion}");
            }
            out.push('\n');
        }
    }

    out
}

fn render_validation(result: &ValidationResult) -> String {
    let mut out = String::new();
    for issue in &result.issues {
        let _ = writeln!(
            out,
            "line {}: {} [{}] {}",
            issue.line_number, issue.severity, issue.kind, issue.description
        );
        if let Some(fix) = &issue.suggested_fix {
            let _ = writeln!(out, "    fix: {}", fix.lines().join(" / "));
        }
    }

    if result.is_valid {
        out.push_str("valid\n");
    } else {
        let fixable = result.issues.iter().filter(|i| i.is_fixable()).count();
        let _ = writeln!(out, "{} issue(s), {} auto-fixable", result.issues.len(), fixable);
    }
    out
}

fn render_context(context: &slugline::read::PromptContext) -> String {
    let mut out = String::new();
    let scene = &context.scene;

    let _ = writeln!(out, "Scene: {}", scene.heading.as_deref().unwrap_or("(none)"));
    let _ = writeln!(out, "Act: {}", context.act.number());
    let _ = writeln!(out, "Characters: {}", scene.characters.join(", "));
    if !scene.beats.is_empty() {
        out.push_str("Beats:\n");
        for beat in &scene.beats {
            let _ = writeln!(out, "  - {beat}");
        }
    }
    out
}
