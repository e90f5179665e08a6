//! RIFT - governance-first source-to-source translator
//! Command-line interface for linking and emitting .rift programs

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use colored::*;
use rift_core::GovernMode;
use rift_lang::{emit, link, surface, Manifest, Target};
use rift_policy::ResultMatrix;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "riftc")]
#[command(author = "RIFT Contributors")]
#[command(version = "2026.1.0")]
#[command(about = "RIFT - governance-first source-to-source translator", long_about = None)]
struct Cli {
    /// Verbose diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new RIFT project
    New {
        /// Project name
        #[arg(value_name = "NAME")]
        name: String,

        /// Author name and email (e.g., "Name <email@example.com>")
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Initialize a RIFT project in the current directory
    Init {
        /// Author name and email (e.g., "Name <email@example.com>")
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Translate a .rift source through the linker and codec
    Translate {
        /// Input .rift file or project directory with rift.toml
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file; the extension selects the target (.c default)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Execution mode override (classical, quantum, hybrid)
        #[arg(short, long)]
        mode: Option<String>,

        /// Policy threshold in (0, 1]
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Link only and report the consensus verdict
    Check {
        /// Input .rift file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Run the pattern-engine surface pass, no consensus checking
    Transform {
        /// Input .rift file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Target language (c, go, js, python, lua, wat)
        #[arg(short, long, default_value = "c")]
        target: String,

        /// Output file; stdout when omitted
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Show information about RIFT
    Info,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::New { name, author } => new_command(&name, author.as_deref()),
        Commands::Init { author } => init_command(author.as_deref()),
        Commands::Translate { input, output, mode, threshold } => {
            translate_command(&input, output.as_deref(), mode.as_deref(), threshold)
        }
        Commands::Check { input } => check_command(&input),
        Commands::Transform { input, target, output } => {
            transform_command(&input, &target, output.as_deref())
        }
        Commands::Info => {
            print_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

// ============================================================================
// Project scaffolding commands
// ============================================================================

const MAIN_TEMPLATE: &str = r#"// Main entry point for the RIFT program

!govern classical

align span<fixed> {
  bytes: 64
}

counter := 0
while (counter < 3) { counter := counter + 1 }
validate(counter)
"#;

fn new_command(name: &str, author: Option<&str>) -> anyhow::Result<()> {
    let project_dir = PathBuf::from(name);

    if project_dir.exists() {
        return Err(anyhow!("directory '{}' already exists", name));
    }

    println!("{} new project '{}'", "Creating".green().bold(), name.cyan());

    fs::create_dir_all(project_dir.join("src"))?;

    let authors = author.map(|a| vec![a.to_string()]).unwrap_or_default();
    let manifest = Manifest::scaffold(name, authors);
    fs::write(project_dir.join("rift.toml"), manifest.to_toml()?)?;
    fs::write(project_dir.join("src/main.rift"), MAIN_TEMPLATE)?;
    fs::write(project_dir.join(".gitignore"), "/out\n")?;

    println!("{} {}", "   Created".green().bold(), "rift.toml".cyan());
    println!("{} {}", "   Created".green().bold(), "src/main.rift".cyan());
    println!("{} {}", "   Created".green().bold(), ".gitignore".cyan());
    println!();
    println!("{}", "To get started, run:".bold());
    println!("  cd {}", name);
    println!("  riftc translate .");

    Ok(())
}

fn init_command(author: Option<&str>) -> anyhow::Result<()> {
    let current_dir = std::env::current_dir()?;
    let manifest_path = current_dir.join("rift.toml");

    if manifest_path.exists() {
        return Err(anyhow!("rift.toml already exists in this directory"));
    }

    let name = current_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("rift-project");

    println!(
        "{} project in '{}'",
        "Initializing".green().bold(),
        current_dir.display().to_string().cyan()
    );

    let src_dir = current_dir.join("src");
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
    }

    let authors = author.map(|a| vec![a.to_string()]).unwrap_or_default();
    let manifest = Manifest::scaffold(name, authors);
    fs::write(&manifest_path, manifest.to_toml()?)?;

    let main_path = src_dir.join("main.rift");
    if !main_path.exists() {
        fs::write(&main_path, MAIN_TEMPLATE)?;
        println!("{} {}", "   Created".green().bold(), "src/main.rift".cyan());
    }

    println!("{} {}", "   Created".green().bold(), "rift.toml".cyan());
    Ok(())
}

// ============================================================================
// Translation commands
// ============================================================================

fn translate_command(
    input: &Path,
    output: Option<&Path>,
    mode: Option<&str>,
    threshold: Option<f64>,
) -> anyhow::Result<()> {
    let (source, manifest) = read_input(input)?;

    let mode_override = match mode {
        Some(text) => Some(text.parse::<GovernMode>().map_err(|e| anyhow!(e))?),
        None => manifest.as_ref().map(|m| m.governance.mode),
    };

    let output_path = match (output, &manifest) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(m)) => input.join(&m.build.output),
        (None, None) => input.with_extension("c"),
    };
    let target = Target::from_path(&output_path);

    let mut program = link(&source);
    if let Some(mode) = mode_override {
        program.mode = mode;
    }
    tracing::debug!(
        "linked {} nodes, mode {}, consensus {}",
        program.node_count(),
        program.mode,
        program.consensus_ok
    );

    let threshold = threshold
        .or_else(|| manifest.as_ref().map(|m| m.governance.threshold))
        .unwrap_or(rift_policy::DEFAULT_THRESHOLD);
    let mut matrix = ResultMatrix::new()
        .with_threshold(threshold)
        .map_err(|e| anyhow!(e))?;

    let emitted = emit(&program, target);
    matrix.validate(program.consensus_ok, emitted.is_ok());
    let text = emitted?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    fs::write(&output_path, &text)
        .with_context(|| format!("cannot write {}", output_path.display()))?;

    tracing::info!(
        "emitted {} ({} nodes, policy ratio {:.2}, threshold {})",
        output_path.display(),
        program.node_count(),
        matrix.ratio(),
        matrix.threshold()
    );
    Ok(())
}

fn check_command(input: &Path) -> anyhow::Result<()> {
    let (source, _) = read_input(input)?;
    let program = link(&source);

    if program.consensus_ok {
        tracing::info!(
            "{}: consensus ok, {} nodes, mode {}",
            input.display(),
            program.node_count(),
            program.mode
        );
        Ok(())
    } else {
        Err(anyhow!(
            program
                .error
                .unwrap_or_else(|| "consensus violated".to_string())
        ))
    }
}

fn transform_command(input: &Path, target: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let (source, _) = read_input(input)?;
    let target = parse_target(target)?;

    let (text, metrics) = surface::transform(&source, target, GovernMode::Classical);
    tracing::info!(
        "surface pass: {} matched, {} passed through",
        metrics.total_matches,
        metrics.total_failures
    );

    match output {
        Some(path) => fs::write(path, &text)
            .with_context(|| format!("cannot write {}", path.display()))?,
        None => print!("{}", text),
    }
    Ok(())
}

fn print_info() {
    println!("{}", "RIFT - governance-first translator".bold());
    println!();
    println!("Targets: c, go, js, python, lua, wat");
    println!("Modes:   classical, quantum, hybrid");
    println!("Policy:  2x2 decision matrix, default threshold 0.85");
    println!();
    println!("The linker enforces memory-first consensus: a span");
    println!("declaration must precede every type and assignment.");
}

// ============================================================================
// Input handling
// ============================================================================

/// Read source text; a directory input resolves through rift.toml
fn read_input(input: &Path) -> anyhow::Result<(String, Option<Manifest>)> {
    if input.is_dir() {
        let manifest = Manifest::load(&input.join("rift.toml")).map_err(|e| anyhow!(e))?;
        let entry = input.join(&manifest.build.entry);
        let source = fs::read_to_string(&entry)
            .with_context(|| format!("cannot read {}", entry.display()))?;
        Ok((source, Some(manifest)))
    } else {
        let source = fs::read_to_string(input)
            .with_context(|| format!("cannot read {}", input.display()))?;
        Ok((source, None))
    }
}

fn parse_target(name: &str) -> anyhow::Result<Target> {
    Target::from_extension(name)
        .or(match name.to_ascii_lowercase().as_str() {
            "javascript" => Some(Target::JavaScript),
            "python" => Some(Target::Python),
            _ => None,
        })
        .ok_or_else(|| anyhow!("unknown target '{}'", name))
}
