use clap::{Parser, Subcommand};

use crate::digit_algorithm::DEFAULT_MAX_INDEX;
use crate::services::DEFAULT_DIGIT_COUNT;

#[derive(Parser)]
#[command(name = "pi_digits")]
#[command(about = "Compute decimal digits of pi with a fixed pool of worker threads")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute digits in parallel and print them in index order
    Compute {
        /// Number of digits after the decimal point
        #[arg(short, long, default_value_t = DEFAULT_DIGIT_COUNT)]
        digits: usize,

        /// Number of worker threads (defaults to available parallelism)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Worker threads to use when parallelism cannot be detected
        #[arg(long, default_value = "1")]
        fallback_threads: usize,

        /// Index of the first digit to compute
        #[arg(long, default_value = "1")]
        first_index: u64,

        /// Largest digit index the computer accepts; larger indices fail
        #[arg(long, default_value_t = DEFAULT_MAX_INDEX)]
        max_index: u64,

        /// Suppress progress markers and status lines
        #[arg(short, long)]
        quiet: bool,

        /// Print the run summary as JSON after the digits
        #[arg(long)]
        json: bool,
    },

    /// Compute a single digit on the current thread
    Digit {
        /// Digit index (1 is the first digit after the decimal point)
        index: u64,
    },
}
