//! Build automation tasks for TLN Power
//!
//! Usage:
//!   cargo xtask check-levels    # Validate every level file against the schema
//!   cargo xtask package         # Build native release into dist/<platform>/

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const SCHEMA_FILE: &str = "level.schema.json";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for TLN Power")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate data/level/*.json against the level schema
    CheckLevels,
    /// Build a native release with its data folder
    Package {
        /// Target platform: windows, macos, linux
        #[arg(long)]
        platform: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckLevels => check_levels(),
        Commands::Package { platform } => package(platform),
    }
}

/// Get the project root directory
fn project_root() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.parent().unwrap_or(manifest).to_path_buf()
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

/// Validate every level file, reporting all violations before failing
fn check_levels() -> Result<()> {
    let level_dir = project_root().join("data/level");
    let schema = read_json(&level_dir.join(SCHEMA_FILE))?;
    let compiled = jsonschema::JSONSchema::compile(&schema)
        .map_err(|e| anyhow::anyhow!("compile {}: {}", SCHEMA_FILE, e))?;

    let mut files: Vec<PathBuf> = std::fs::read_dir(&level_dir)
        .with_context(|| format!("list {}", level_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .filter(|p| p.file_name().is_some_and(|name| name != SCHEMA_FILE))
        .collect();
    files.sort();

    let mut failures = 0;
    for path in &files {
        let doc = read_json(path)?;
        let errors: Vec<String> = match compiled.validate(&doc) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|e| format!("{}: {}", e.instance_path, e)).collect(),
        };
        if errors.is_empty() {
            println!("ok   {}", path.display());
        } else {
            failures += 1;
            println!("FAIL {}", path.display());
            for err in errors {
                println!("     {}", err);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} level files failed validation", failures, files.len());
    }
    println!("xtask: levels validated ({} files)", files.len());
    Ok(())
}

/// Build a native release for `platform` (defaults to the host)
fn package(platform: Option<String>) -> Result<()> {
    let root = project_root();
    let platform = platform.unwrap_or_else(|| {
        if cfg!(target_os = "windows") {
            "windows".to_string()
        } else if cfg!(target_os = "macos") {
            "macos".to_string()
        } else {
            "linux".to_string()
        }
    });

    let dist = root.join(format!("dist/{}", platform));

    println!("Building native release for {}...", platform);

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release"]),
    )?;

    let binary_name = if platform == "windows" {
        "tln-power.exe"
    } else {
        "tln-power"
    };

    std::fs::copy(
        root.join(format!("target/release/{}", binary_name)),
        dist.join(binary_name),
    )?;

    // The game looks for data/ next to where it is started
    copy_dir_recursive(&root.join("data"), &dist.join("data"))?;

    println!("Package complete: dist/{}/", platform);
    Ok(())
}
