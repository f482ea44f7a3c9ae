use clap::Parser;
use pi_digits::cli::{execute_compute, execute_digit, Cli, Commands, ComputeOptions};
use std::process::ExitCode;

/// 部分失敗時の終了コード
const PARTIAL_FAILURE_EXIT: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("❌ エラー: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Compute {
            digits,
            threads,
            fallback_threads,
            first_index,
            max_index,
            quiet,
            json,
        } => {
            let report = execute_compute(ComputeOptions {
                digits,
                threads,
                fallback_threads,
                first_index,
                max_index,
                quiet,
                json,
            })?;

            if report.is_complete() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(PARTIAL_FAILURE_EXIT))
            }
        }
        Commands::Digit { index } => {
            execute_digit(index)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
