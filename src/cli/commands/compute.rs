use crate::digit_algorithm::{BellardDigitComputer, DEFAULT_MAX_INDEX};
use crate::engine::{Orchestrator, RunReport};
use crate::services::{ConsoleProgressReporter, DefaultComputeConfig};
use anyhow::{Context, Result};
use std::io::{self, Write};

/// Configuration struct for compute command to reduce argument count
#[derive(Debug, Clone)]
pub struct ComputeOptions {
    pub digits: usize,
    pub threads: Option<usize>,
    pub fallback_threads: usize,
    pub first_index: u64,
    pub max_index: u64,
    pub quiet: bool,
    pub json: bool,
}

impl ComputeOptions {
    fn to_config(&self) -> DefaultComputeConfig {
        let config = DefaultComputeConfig::new()
            .with_digit_count(self.digits)
            .with_first_index(self.first_index)
            .with_fallback_worker_count(self.fallback_threads)
            .with_progress_reporting(!self.quiet);

        match self.threads {
            Some(threads) => config.with_worker_count(threads),
            None => config,
        }
    }

    fn reporter(&self) -> ConsoleProgressReporter {
        if self.quiet {
            ConsoleProgressReporter::quiet()
        } else {
            ConsoleProgressReporter::new()
        }
    }
}

/// Execute compute command, writing the rendered digits to stdout
pub fn execute_compute(options: ComputeOptions) -> Result<RunReport> {
    // 進捗マーカーはワーカーが標準出力へ書くため、ロックは全ワーカーの合流後に取る
    let report = run_compute(&options)?;

    let stdout = io::stdout();
    write_report(&options, &report, &mut stdout.lock())?;

    Ok(report)
}

/// Execute compute command, writing the rendered digits to `out`
///
/// 部分失敗でもエラーにはせず、呼び出し側が `RunReport` から終了コードを決める。
/// `out` に標準出力のロックを渡してはならない（進捗マーカーと競合する）。
pub fn execute_compute_to<W: Write>(options: &ComputeOptions, out: &mut W) -> Result<RunReport> {
    let report = run_compute(options)?;
    write_report(options, &report, out)?;
    Ok(report)
}

fn run_compute(options: &ComputeOptions) -> Result<RunReport> {
    let orchestrator = Orchestrator::new(
        BellardDigitComputer::with_max_index(options.max_index),
        options.to_config(),
        options.reporter(),
    );

    orchestrator.run().context("並列計算を開始できませんでした")
}

fn write_report<W: Write>(options: &ComputeOptions, report: &RunReport, out: &mut W) -> Result<()> {
    writeln!(out, "{}", report.rendered())?;
    if options.json {
        let summary = serde_json::to_string_pretty(&report.summary)?;
        writeln!(out, "{summary}")?;
    }
    out.flush()?;

    if !options.quiet {
        for warning in &report.warnings {
            eprintln!("⚠️  {warning}");
        }
        if !report.is_complete() {
            eprintln!(
                "⚠️  部分失敗: {}/{}桁を計算（失敗位置は '{}' で表示）",
                report.summary.computed,
                report.summary.total_tasks,
                crate::core::FAILURE_MARKER
            );
            for failure in &report.failures {
                eprintln!("   - [{}] {failure}", failure.severity());
            }
        }
    }

    Ok(())
}
