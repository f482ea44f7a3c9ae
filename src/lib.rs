pub mod cli;
pub mod core;
pub mod digit_algorithm;
pub mod engine;
pub mod services;

use crate::core::DigitResult;
use digit_algorithm::BellardDigitComputer;
use engine::{Orchestrator, RunReport};
use services::{ConsoleProgressReporter, DefaultComputeConfig, NoOpProgressReporter};

/// コンソール進捗付きで π の桁を並列計算する（高レベル便利関数）
///
/// `worker_count` が `None` ならハードウェア並列度を使用する。
pub fn compute_pi_digits(digit_count: usize, worker_count: Option<usize>) -> DigitResult<RunReport> {
    Orchestrator::new(
        BellardDigitComputer::new(),
        config_for(digit_count, worker_count, true),
        ConsoleProgressReporter::new(),
    )
    .run()
}

/// 静音版（バックグラウンド・ベンチマーク用）
pub fn compute_pi_digits_quiet(
    digit_count: usize,
    worker_count: Option<usize>,
) -> DigitResult<RunReport> {
    Orchestrator::new(
        BellardDigitComputer::new(),
        config_for(digit_count, worker_count, false),
        NoOpProgressReporter::new(),
    )
    .run()
}

fn config_for(digit_count: usize, worker_count: Option<usize>, progress: bool) -> DefaultComputeConfig {
    let config = DefaultComputeConfig::new()
        .with_digit_count(digit_count)
        .with_progress_reporting(progress);

    match worker_count {
        Some(count) => config.with_worker_count(count),
        None => config,
    }
}
