//! Batch mode: sort every line of a file.
//!
//! Lines are independent, so they are transformed on a rayon pool and
//! collected back in line order before anything is written.

use crate::error::SortError;
use crate::sorter::second_ordered_by_first;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Inputs smaller than this never get a progress bar.
const PROGRESS_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    /// 1-based line number.
    pub line: usize,
    pub result: Result<String, SortError>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub ok: usize,
    pub malformed: usize,
    /// Line that stopped a fail-fast run.
    pub stopped_at: Option<usize>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.malformed == 0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BatchOptions {
    pub threads: Option<usize>,
    pub fail_fast: bool,
    pub verbose: bool,
}

pub fn transform_lines<S: AsRef<str> + Sync>(
    lines: &[S],
    threads: Option<usize>,
) -> Result<Vec<LineOutcome>> {
    let pool = worker_pool(threads)?;
    Ok(transform_with_progress(lines, &pool, &ProgressBar::hidden()))
}

/// `None` sizes the pool to the CPU count.
pub fn worker_pool(threads: Option<usize>) -> Result<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().context("Failed to start worker threads")
}

fn transform_with_progress<S: AsRef<str> + Sync>(
    lines: &[S],
    pool: &rayon::ThreadPool,
    pb: &ProgressBar,
) -> Vec<LineOutcome> {
    pool.install(|| {
        lines
            .par_iter()
            .enumerate()
            .map(|(i, line)| {
                let result = second_ordered_by_first(line.as_ref());
                pb.inc(1);
                LineOutcome { line: i + 1, result }
            })
            .collect()
    })
}

/// Results go to `out`, malformed lines to `err`.
pub fn write_outcomes<W: Write, E: Write>(
    outcomes: &[LineOutcome],
    fail_fast: bool,
    out: &mut W,
    err: &mut E,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary {
        total: outcomes.len(),
        ..Default::default()
    };

    for outcome in outcomes {
        match &outcome.result {
            Ok(sorted) => {
                writeln!(out, "{}", sorted)?;
                summary.ok += 1;
            }
            Err(e) => {
                writeln!(err, "{} line {}: {}", "x".red(), outcome.line, e)?;
                summary.malformed += 1;
                if fail_fast {
                    summary.stopped_at = Some(outcome.line);
                    break;
                }
            }
        }
    }

    out.flush()?;
    Ok(summary)
}

pub fn run_batch(path: &Path, options: &BatchOptions) -> Result<BatchSummary> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let lines: Vec<&str> = content.lines().collect();

    let pool = worker_pool(options.threads)?;

    if options.verbose {
        eprintln!(
            "{} {} lines from {} on {} threads",
            "⚡".yellow(),
            lines.len(),
            path.display(),
            pool.current_num_threads()
        );
    }

    let pb = if lines.len() >= PROGRESS_THRESHOLD && console::Term::stderr().is_term() {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let outcomes = transform_with_progress(&lines, &pool, &pb);
    pb.finish_and_clear();

    let stdout = io::stdout();
    let stderr = io::stderr();
    let summary = write_outcomes(
        &outcomes,
        options.fail_fast,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    if options.verbose {
        eprintln!(
            "{} {} ok, {} malformed, {} total",
            if summary.is_success() {
                "✓".green()
            } else {
                "!".yellow()
            },
            summary.ok,
            summary.malformed,
            summary.total
        );
    }

    Ok(summary)
}
