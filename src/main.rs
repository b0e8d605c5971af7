//! # pairsort CLI Entry Point
//!
//! Parses arguments with clap and routes them to the library.
//!
//! ## Commands
//!
//! - `sort` - print the values ordered by their keys
//! - `pairs` - show the sorted pairs as a table
//! - `check` - validate input without sorting output
//! - `batch` - sort every line of a file
//! - `info`, `completion`

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use serde::Serialize;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use pairsort::batch::{self, BatchOptions};
use pairsort::config::{self, OutputFormat, PairsortConfig};
use pairsort::{Malformed, SortError};
use pairsort::sorter::{self, Pair};
use pairsort::ui;

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

// Box-drawing characters in `pairs` need a UTF-8 console.
#[cfg(windows)]
fn enable_windows_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_windows_utf8_console() {}

#[derive(Parser)]
#[command(name = "pairsort")]
#[command(about = "Order values by their keys", version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
struct Cli {
    /// Print diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print values ordered by their keys ("k1 v1 k2 v2 ...")
    Sort {
        /// Tokens (reads stdin when omitted)
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
        /// Print a JSON report instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Show the sorted key/value pairs
    Pairs {
        /// Tokens (reads stdin when omitted)
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
        /// Do not warn about repeated keys
        #[arg(long)]
        allow_duplicates: bool,
    },
    /// Validate input without printing the result
    Check {
        /// Tokens (reads stdin when omitted)
        #[arg(allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Sort every line of a file
    Batch {
        /// Input file, one "k1 v1 k2 v2 ..." sequence per line
        file: PathBuf,
        /// Worker threads (default: one per CPU)
        #[arg(long)]
        threads: Option<usize>,
        /// Stop at the first malformed line
        #[arg(long)]
        fail_fast: bool,
    },
    /// Show version and configuration in use
    Info,
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

#[derive(Serialize)]
struct SortReport<'a> {
    input: &'a str,
    output: String,
    pairs: Vec<Pair<'a>>,
}

fn main() -> Result<()> {
    enable_windows_utf8_console();

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Sort { tokens, json } => {
            let config = load_config()?;
            let input = read_input(tokens)?;
            let as_json = *json || config.output.format == OutputFormat::Json;
            sort_command(&input, as_json, cli.verbose)
        }
        Commands::Pairs {
            tokens,
            allow_duplicates,
        } => {
            let config = load_config()?;
            let input = read_input(tokens)?;
            let warn = config.check.warn_duplicates && !*allow_duplicates;
            pairs_command(&input, warn)
        }
        Commands::Check { tokens } => {
            let input = read_input(tokens)?;
            check_command(&input)
        }
        Commands::Batch {
            file,
            threads,
            fail_fast,
        } => {
            let config = load_config()?;
            let options = BatchOptions {
                threads: threads.or(config.batch.threads),
                fail_fast: *fail_fast || config.batch.fail_fast,
                verbose: cli.verbose,
            };
            let summary = batch::run_batch(file, &options)?;
            if let Some(line) = summary.stopped_at {
                eprintln!("{} Stopped at line {}", "x".red(), line);
            }
            if !summary.is_success() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Info => print_info(&load_config()?),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Loads config for commands that read it and applies its color setting.
fn load_config() -> Result<PairsortConfig> {
    let config = config::load_config()?;
    if !config.output.color {
        colored::control::set_override(false);
    }
    Ok(config)
}

/// Joins argument tokens with single spaces. An empty argument would
/// otherwise vanish (`""`) or turn into a double space (`"" ""`).
fn join_tokens(tokens: &[String]) -> Result<String, SortError> {
    if let Some(position) = tokens.iter().position(|t| t.is_empty()) {
        return Err(Malformed::EmptyToken { position }.into());
    }
    Ok(tokens.join(" "))
}

/// Input from the arguments, or from stdin when there are none.
fn read_input(tokens: &[String]) -> Result<String> {
    if !tokens.is_empty() {
        return match join_tokens(tokens) {
            Ok(input) => Ok(input),
            Err(e) => fail_malformed(&e),
        };
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("{} Reading tokens from stdin (Ctrl-D to finish)...", "ℹ".blue());
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(strip_line_terminator(&buf).to_string())
}

fn strip_line_terminator(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

fn fail_malformed(err: &SortError) -> ! {
    eprintln!("{} {}", "x".red(), err);
    std::process::exit(1);
}

fn sort_command(input: &str, as_json: bool, verbose: bool) -> Result<()> {
    let pairs = match sorter::sorted_pairs(input) {
        Ok(p) => p,
        Err(e) => fail_malformed(&e),
    };

    if verbose {
        eprintln!("{} {} pairs", "⚡".yellow(), pairs.len());
    }

    let output = sorter::join_values(&pairs);
    if as_json {
        let report = SortReport {
            input,
            output,
            pairs,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn pairs_command(input: &str, warn_duplicates: bool) -> Result<()> {
    let pairs = match sorter::sorted_pairs(input) {
        Ok(p) => p,
        Err(e) => fail_malformed(&e),
    };

    if pairs.is_empty() {
        println!("{} No pairs.", "ℹ".blue());
        return Ok(());
    }

    let mut table = ui::Table::new(&["#", "Key", "Value"]);
    for (i, pair) in pairs.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string().dimmed().to_string(),
            ui::sanitize(pair.key).bold().green().to_string(),
            ui::sanitize(pair.value),
        ]);
    }
    table.print();

    if warn_duplicates {
        let dups = sorter::duplicate_keys(&pairs);
        if !dups.is_empty() {
            eprintln!(
                "{} Repeated keys keep their input order: {}",
                "!".yellow(),
                dups.join(", ")
            );
        }
    }
    Ok(())
}

fn check_command(input: &str) -> Result<()> {
    match sorter::parse_pairs(input) {
        Ok(pairs) => {
            println!("{} {} pairs", "✓".green(), pairs.len());
            Ok(())
        }
        Err(e) => fail_malformed(&e),
    }
}

fn print_info(config: &PairsortConfig) -> Result<()> {
    println!("{} v{}", "pairsort".bold().cyan(), env!("CARGO_PKG_VERSION"));
    println!("------------------------------------");

    let local = Path::new(config::LOCAL_CONFIG);
    let source = if local.exists() {
        local.display().to_string()
    } else {
        match config::global_config_path() {
            Some(p) if p.exists() => p.display().to_string(),
            _ => "(defaults)".dimmed().to_string(),
        }
    };
    println!("{}: {}", "Config".bold(), source);

    let format = match config.output.format {
        OutputFormat::Text => "text",
        OutputFormat::Json => "json",
    };
    println!("{}: {}", "Output".bold(), format);
    println!(
        "{}: {}",
        "Threads".bold(),
        config
            .batch
            .threads
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("auto ({})", rayon::current_num_threads()))
    );
    println!("{}: {}", "Fail fast".bold(), config.batch.fail_fast);
    println!(
        "{}: {}",
        "Warn duplicates".bold(),
        config.check.warn_duplicates
    );
    Ok(())
}
