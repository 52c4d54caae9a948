//! winnower CLI - Export-Convert Tool
//!
//! Drives the wizard session non-interactively: validate an export file,
//! inspect its category tabs, or convert it with a selection plan.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use winnower::record::Category;
use winnower::{parse, SelectionPlan, SelectionState, WizardConfig, WizardSession};

#[derive(Parser)]
#[command(name = "winnower")]
#[command(version, about = "Export-Convert Tool: filter newline-delimited JSON entity exports", long_about = None)]
struct Cli {
    /// Path to winnower.yaml (optional, defaults apply without it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an export file and report per-category record counts
    Validate {
        /// Export file to check
        file: PathBuf,
    },

    /// List category tabs and the record names under each
    Categories {
        /// Export file to inspect
        file: PathBuf,
    },

    /// Filter an export file and write Convert_<file>
    Convert {
        /// Export file to convert
        file: PathBuf,

        /// YAML selection plan (category tag -> names to keep)
        #[arg(short, long, conflicts_with = "all")]
        plan: Option<PathBuf>,

        /// Keep every named record in every known category
        #[arg(short, long)]
        all: bool,

        /// Directory the converted file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Validate { file } => validate_file(&file, &config),
        Commands::Categories { file } => list_categories(&file, &config),
        Commands::Convert {
            file,
            plan,
            all,
            output_dir,
        } => convert_file(&file, plan.as_deref(), all, &output_dir, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Load wizard configuration, falling back to defaults without a file.
fn load_config(path: Option<&Path>) -> Result<WizardConfig, String> {
    match path {
        Some(path) => WizardConfig::load_from_file(path),
        None => Ok(WizardConfig::default()),
    }
}

/// Read an export file and return its contents plus the bare filename.
fn read_export_file(file: &Path, config: &WizardConfig) -> Result<(String, String), String> {
    let filename = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("Invalid file path: {}", file.display()))?
        .to_string();

    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;

    if text.len() > config.max_file_bytes {
        return Err(format!(
            "{} is {} bytes, exceeding the {} byte limit",
            filename,
            text.len(),
            config.max_file_bytes
        ));
    }

    Ok((filename, text))
}

/// Parse an export file and report per-category record counts
fn validate_file(file: &Path, config: &WizardConfig) -> Result<(), String> {
    let (filename, text) = read_export_file(file, config)?;

    let records = parse(&text).map_err(|e| e.to_string())?;
    println!("  ✓ Parsed {} records from {}", records.len(), filename);

    for category in Category::ALL {
        let count = records
            .iter()
            .filter(|r| r.category() == Some(category))
            .count();
        if count > 0 {
            println!("    {} {}", count, config.label(category));
        }
    }

    let unknown = records.iter().filter(|r| r.category().is_none()).count();
    if unknown > 0 {
        println!(
            "  ℹ {} records have an unknown entityType and will never be exported",
            unknown
        );
    }

    println!("✨ File is supported");
    Ok(())
}

/// List category tabs and record names, i.e. what the Select step shows
fn list_categories(file: &Path, config: &WizardConfig) -> Result<(), String> {
    let (_, text) = read_export_file(file, config)?;
    let records = parse(&text).map_err(|e| e.to_string())?;

    for category in Category::ALL {
        let names: Vec<&str> = records
            .iter()
            .filter(|r| r.category() == Some(category))
            .filter_map(|r| r.display_name())
            .collect();

        if names.is_empty() {
            continue;
        }

        println!("{} ({})", config.label(category), names.len());
        for name in names {
            println!("  - {}", name);
        }
    }

    Ok(())
}

/// Drive a wizard session from Upload to Completed and write the output file
fn convert_file(
    file: &Path,
    plan: Option<&Path>,
    all: bool,
    output_dir: &Path,
    config: WizardConfig,
) -> Result<(), String> {
    if plan.is_none() && !all {
        return Err("Pass --plan <plan.yaml> or --all to choose what to keep".to_string());
    }

    let (filename, text) = read_export_file(file, &config)?;

    let mut session = WizardSession::new(config);
    session
        .load_file(&filename, &text)
        .map_err(|e| e.to_string())?;
    println!("  ✓ Loaded {} records from {}", session.records().len(), filename);

    session.advance().map_err(|e| e.to_string())?;

    if all {
        session.select_all().map_err(|e| e.to_string())?;
    } else if let Some(plan_path) = plan {
        let plan = SelectionPlan::load_from_file(plan_path)?;
        let mut planned = SelectionState::new();
        plan.apply(&mut planned)?;

        for category in Category::ALL {
            for name in planned.selected_names(category) {
                session
                    .toggle(category, name, true)
                    .map_err(|e| e.to_string())?;
            }
        }
        println!("  ✓ Applied selection plan {}", plan_path.display());
    }
    println!("  ✓ Selected {} records", session.selection().total_selected());

    session.advance().map_err(|e| e.to_string())?;

    let output = session.export().map_err(|e| e.to_string())?;

    std::fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create output directory: {}", e))?;
    let output_path = output_dir.join(&output.filename);
    std::fs::write(&output_path, &output.contents)
        .map_err(|e| format!("Failed to write {}: {}", output_path.display(), e))?;

    let kept = output.contents.lines().count();
    println!("  ✓ Wrote {} ({} records)", output_path.display(), kept);
    println!("✨ Conversion complete!");

    Ok(())
}
