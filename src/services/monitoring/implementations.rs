// 進捗監視の具象実装

use crate::core::{DigitError, ProgressReporter};
use std::io::{self, Write};

/// 進捗マーカー
pub const PROGRESS_MARKER: &str = ".";

/// コンソール出力による進捗報告実装
///
/// タスク着手ごとに `.` を標準出力へ書き、即座にflushする。
/// 異なるワーカーのマーカーは任意の順で混ざる。
/// `quiet` の場合は何も出力しない。
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

/// マーカーを1つ書いてflushする
pub fn emit_marker<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(PROGRESS_MARKER.as_bytes())?;
    out.flush()
}

impl ProgressReporter for ConsoleProgressReporter {
    fn report_started(&self, total_tasks: usize, worker_count: usize) {
        if !self.quiet {
            println!("🚀 Computing pi with {worker_count} threads");
            println!("{total_tasks} Digits");
        }
    }

    fn report_task_started(&self, _worker_id: usize, _index: u64) {
        if !self.quiet {
            // 各ワーカーが自分でロックを取るため、呼び出し側は標準出力をロックしたまま
            // プールを実行してはならない。表示の失敗は計算に影響させない
            let _ = emit_marker(&mut io::stdout().lock());
        }
    }

    fn report_error(&self, error: &DigitError) {
        if !self.quiet {
            eprintln!("\n❌ [{}] {error}", error.severity());
        }
    }

    fn report_completed(&self, computed: usize, failed: usize) {
        if !self.quiet {
            println!();
            if failed > 0 {
                eprintln!("⚠️  {failed}桁の計算に失敗しました（成功: {computed}桁）");
            }
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NoOpProgressReporter {
    fn report_started(&self, _total_tasks: usize, _worker_count: usize) {
        // 何もしない
    }

    fn report_task_started(&self, _worker_id: usize, _index: u64) {
        // 何もしない
    }

    fn report_error(&self, _error: &DigitError) {
        // 何もしない
    }

    fn report_completed(&self, _computed: usize, _failed: usize) {
        // 何もしない
    }
}
