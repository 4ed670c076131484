use std::io::IsTerminal;
use std::io::Read;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};

use patchgate_core::{DiffFormat, Operation, PatchgateConfig, RiskLevel};
use patchgate_preview::{FsContentSource, PreviewAssembler, RiskAssessor};

#[derive(Parser)]
#[command(
    name = "patchgate",
    version,
    about = "Reviewable change-set previews for machine-generated edits",
    long_about = "Patchgate turns proposed file operations into reviewable change sets:\n\
                   per-file diff hunks, change statistics, and a heuristic risk assessment,\n\
                   before anything touches the working tree.\n\n\
                   Operations are read as a JSON array from a file or stdin.\n\n\
                   Examples:\n  \
                     patchgate init                       Create a .patchgate.toml config file\n  \
                     patchgate preview --file ops.json    Preview a batch of operations\n  \
                     cat ops.json | patchgate preview     Preview operations from stdin\n  \
                     patchgate preview --format json      Emit the full preview as JSON\n  \
                     patchgate risk --file ops.json       Risk assessment only\n  \
                     patchgate preview --fail-on high     Non-zero exit at high risk (CI gating)"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .patchgate.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (default: the configured diff format)
    #[arg(
        long,
        global = true,
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         terminal      Colorized diff plus summary\n  \
                         unified       Plain unified diff, patch-tool compatible (default)\n  \
                         side-by-side  Two-column aligned view\n  \
                         inline        Single column with both line number gutters\n  \
                         html          Class-annotated markup fragment\n  \
                         markdown      Report with fenced diff blocks\n  \
                         json          Full preview as JSON with camelCase keys"
    )]
    format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Build a reviewable preview for a batch of file operations
    #[command(long_about = "Build a reviewable preview for a batch of file operations.\n\n\
        Reads a JSON array of operations (create/update/delete/append/move), diffs\n\
        each one against the workspace, and prints hunks, statistics, risk factors,\n\
        and batch advice in the chosen format.\n\n\
        Examples:\n  patchgate preview --file ops.json\n  cat ops.json | patchgate preview --root /my/project\n  patchgate preview --file ops.json --format unified > changes.patch")]
    Preview {
        /// Read operations from file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Workspace root that original file contents are read from
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Unchanged lines kept around each change (overrides config)
        #[arg(long)]
        context: Option<u32>,

        /// Compare lines with surrounding whitespace stripped
        #[arg(long)]
        ignore_whitespace: bool,

        /// Exit with non-zero code if the batch reaches this risk level
        #[arg(
            long,
            long_help = "Exit with code 2 if the batch's overall risk level is at or above\n\
                this threshold.\n\nLevel ranking: critical > high > medium > low.\n\
                Useful in CI pipelines to gate risky change sets on human review."
        )]
        fail_on: Option<RiskLevel>,
    },
    /// Assess risk for a batch of operations without building diffs
    #[command(long_about = "Assess risk for a batch of file operations without building diffs.\n\n\
        Runs the critical-file, deletion, and large-change rules over the operation\n\
        list and prints the triggered factors and recommendations.\n\n\
        Examples:\n  patchgate risk --file ops.json\n  cat ops.json | patchgate risk --fail-on medium")]
    Risk {
        /// Read operations from file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Exit with non-zero code if the batch reaches this risk level
        #[arg(long)]
        fail_on: Option<RiskLevel>,
    },
    /// Create a default .patchgate.toml configuration file
    #[command(long_about = "Create a default .patchgate.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .patchgate.toml already exists.")]
    Init,
    /// Generate shell completion scripts
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Colorized diff plus summary
    Terminal,
    /// Plain unified diff
    Unified,
    /// Two-column aligned view
    SideBySide,
    /// Single column with both line number gutters
    Inline,
    /// Class-annotated markup fragment
    Html,
    /// Report with fenced diff blocks
    Markdown,
    /// Full preview as JSON
    Json,
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        println!("\x1b[1mpatchgate\x1b[0m v{version} — review the change set before it lands\n");

        println!("Quick start:");
        println!("  \x1b[36mpatchgate init\x1b[0m                     Create a .patchgate.toml config file");
        println!("  \x1b[36mpatchgate preview --file ops.json\x1b[0m  Preview a batch of operations\n");

        println!("All commands:");
        println!("  \x1b[32mpreview\x1b[0m   Diff hunks, statistics, risk, and advice for a batch");
        println!("  \x1b[32mrisk\x1b[0m      Risk assessment only, no diffs");
        println!("  \x1b[32minit\x1b[0m      Create default configuration\n");
    } else {
        println!("patchgate v{version} — review the change set before it lands\n");

        println!("Quick start:");
        println!("  patchgate init                     Create a .patchgate.toml config file");
        println!("  patchgate preview --file ops.json  Preview a batch of operations\n");

        println!("All commands:");
        println!("  preview   Diff hunks, statistics, risk, and advice for a batch");
        println!("  risk      Risk assessment only, no diffs");
        println!("  init      Create default configuration\n");
    }

    println!("Run 'patchgate <command> --help' for details.");
}

fn read_operations(file: &Option<PathBuf>) -> Result<Vec<Operation>> {
    let input = match file {
        Some(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err(format!("reading {}", path.display()))?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .into_diagnostic()
                .wrap_err("reading stdin")?;
            input
        }
    };
    serde_json::from_str(&input)
        .into_diagnostic()
        .wrap_err("parsing operations JSON (expected an array of operations)")
}

fn print_risk(assessment: &patchgate_core::RiskAssessment, use_color: bool) {
    let level = assessment.level;
    if use_color {
        let color = match level {
            RiskLevel::Low => "\x1b[32m",
            RiskLevel::Medium => "\x1b[33m",
            RiskLevel::High => "\x1b[31m",
            RiskLevel::Critical => "\x1b[1m\x1b[31m",
        };
        println!("risk: {color}{level}\x1b[0m");
    } else {
        println!("risk: {level}");
    }
    for factor in &assessment.factors {
        println!("  [{}/{}] {}", factor.kind, factor.level, factor.description);
    }
    if !assessment.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &assessment.recommendations {
            println!("  - {rec}");
        }
    }
    if assessment.requires_review {
        println!("\nHuman review recommended before applying this batch.");
    }
}

/// Exit code used when `--fail-on` gates a batch.
const GATE_EXIT_CODE: i32 = 2;

fn gate(level: RiskLevel, fail_on: Option<RiskLevel>) {
    if let Some(threshold) = fail_on {
        if level >= threshold {
            eprintln!("patchgate: risk level '{level}' meets --fail-on '{threshold}'");
            std::process::exit(GATE_EXIT_CODE);
        }
    }
}

const DEFAULT_CONFIG: &str = r#"# Patchgate Configuration

[diff]
# Unchanged lines kept around each change
# context_lines = 3
# Compare lines with surrounding whitespace stripped
# ignore_whitespace = false
# Default rendering format: unified, side-by-side, inline, html, markdown, terminal
# format = "unified"

[risk]
# Glob patterns flagged as critical in addition to the built-in markers
# (dependency manifests, build config, secret and env files)
# critical_paths = ["migrations/**", "deploy/**"]
# Content line count above which an operation is flagged as complex
# large_change_lines = 100
# Batch size above which splitting is suggested
# batch_size_hint = 10
"#;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| if cli.verbose { "debug".into() } else { "warn".into() }),
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => PatchgateConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".patchgate.toml");
            if default_path.exists() {
                PatchgateConfig::from_file(default_path).into_diagnostic()?
            } else {
                PatchgateConfig::default()
            }
        }
    };

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };

    match cli.command {
        None => {
            print_welcome(use_color);
            return Ok(());
        }
        Some(Command::Preview {
            ref file,
            ref root,
            context,
            ignore_whitespace,
            fail_on,
        }) => {
            let operations = read_operations(file)?;

            let mut options = config.options().into_diagnostic()?;
            if let Some(context) = context {
                options.context_lines = context;
            }
            if ignore_whitespace {
                options.ignore_whitespace = true;
            }

            let source = FsContentSource::new(root.clone());
            let assembler =
                PreviewAssembler::with_config(source, options.clone(), &config).into_diagnostic()?;
            let preview = assembler.assemble(&operations);

            let format = cli.format.unwrap_or(match options.format {
                DiffFormat::Unified => OutputFormat::Unified,
                DiffFormat::SideBySide => OutputFormat::SideBySide,
                DiffFormat::Inline => OutputFormat::Inline,
                DiffFormat::Html => OutputFormat::Html,
                DiffFormat::Markdown => OutputFormat::Markdown,
                DiffFormat::Terminal => OutputFormat::Terminal,
            });
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&preview).into_diagnostic()?
                    );
                }
                OutputFormat::Terminal => {
                    print!(
                        "{}",
                        patchgate_render::term::render_preview(&preview, use_color)
                    );
                }
                OutputFormat::Unified => {
                    print!(
                        "{}",
                        patchgate_render::render_preview(&preview, DiffFormat::Unified)
                    );
                }
                OutputFormat::SideBySide => {
                    print!(
                        "{}",
                        patchgate_render::render_preview(&preview, DiffFormat::SideBySide)
                    );
                }
                OutputFormat::Inline => {
                    print!(
                        "{}",
                        patchgate_render::render_preview(&preview, DiffFormat::Inline)
                    );
                }
                OutputFormat::Html => {
                    print!(
                        "{}",
                        patchgate_render::render_preview(&preview, DiffFormat::Html)
                    );
                }
                OutputFormat::Markdown => {
                    print!(
                        "{}",
                        patchgate_render::render_preview(&preview, DiffFormat::Markdown)
                    );
                }
            }

            gate(preview.risk.level, fail_on);
        }
        Some(Command::Risk { ref file, fail_on }) => {
            let operations = read_operations(file)?;
            let assessor = RiskAssessor::from_config(&config.risk);
            let assessment = assessor.assess(&operations);

            if cli.format == Some(OutputFormat::Json) {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&assessment).into_diagnostic()?
                );
            } else {
                print_risk(&assessment, use_color);
            }

            gate(assessment.level, fail_on);
        }
        Some(Command::Init) => {
            let path = std::path::Path::new(".patchgate.toml");
            if path.exists() {
                miette::bail!(".patchgate.toml already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created .patchgate.toml with default configuration");
        }
        Some(Command::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "patchgate", &mut std::io::stdout());
        }
    }

    Ok(())
}
