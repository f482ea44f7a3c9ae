// Orchestrator - タスク投入・プール実行・インデックス順の描画
// 全ての依存関係がコンストラクタで注入される

use super::{result_table::ResultTable, task_queue::TaskQueue, worker_pool::WorkerPool};
use crate::core::{
    ComputeConfig, DigitComputer, DigitError, DigitResult, DigitSlot, ProgressReporter,
    RunSummary, PI_PREFIX,
};
use crate::services::config::{detect_parallelism, resolve_worker_count, validate_config, WorkerCount};
use chrono::Utc;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

/// ハードウェア並列度の取得関数
pub type ParallelismProbe = fn() -> DigitResult<usize>;

/// 1回の実行結果
#[derive(Debug)]
pub struct RunReport {
    /// 先頭の桁インデックス
    pub first_index: u64,
    /// インデックス昇順の桁
    pub slots: Vec<DigitSlot>,
    /// 部分失敗の原因（インデックス順）
    pub failures: Vec<DigitError>,
    /// 実行を止めなかった警告（並列度取得失敗など）
    pub warnings: Vec<DigitError>,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.summary.is_complete()
    }

    /// 桁部分のみを描画（失敗桁はマーカー）
    pub fn digits(&self) -> String {
        self.slots.iter().map(DigitSlot::as_char).collect()
    }

    /// 整数部を付けて描画する
    ///
    /// 整数部は小数点直後から始まる実行にのみ付く。
    pub fn rendered(&self) -> String {
        if self.first_index == 1 {
            format!("{PI_PREFIX}{}", self.digits())
        } else {
            self.digits()
        }
    }
}

/// 結果テーブルをインデックス昇順に読み出す
///
/// 完了順には一切依存しない。未登録の桁は `Missing` と `KeyNotFound` になる。
pub fn render_slots(table: &ResultTable, range: Range<u64>) -> (Vec<DigitSlot>, Vec<DigitError>) {
    let mut slots = Vec::with_capacity(range.end.saturating_sub(range.start) as usize);
    let mut missing = Vec::new();

    for index in range {
        match table.get(index) {
            Ok(digit) => slots.push(DigitSlot::Digit(digit)),
            Err(error) => {
                slots.push(DigitSlot::Missing);
                missing.push(error);
            }
        }
    }

    (slots, missing)
}

/// 並列桁計算のオーケストレーター
pub struct Orchestrator<D, C, R> {
    computer: D,
    config: C,
    reporter: R,
    probe: ParallelismProbe,
}

impl<D, C, R> Orchestrator<D, C, R>
where
    D: DigitComputer,
    C: ComputeConfig,
    R: ProgressReporter,
{
    pub fn new(computer: D, config: C, reporter: R) -> Self {
        Self {
            computer,
            config,
            reporter,
            probe: detect_parallelism,
        }
    }

    /// 並列度の取得方法を差し替える
    pub fn with_parallelism_probe(mut self, probe: ParallelismProbe) -> Self {
        self.probe = probe;
        self
    }

    /// 全桁を計算し、全ワーカーの合流後にインデックス順で描画する
    pub fn run(&self) -> DigitResult<RunReport> {
        self.execute(None)
    }

    /// キャンセルフラグ付きで実行する
    ///
    /// フラグが立った後に未着手だった桁は欠損として報告される。
    pub fn run_with_shutdown(&self, shutdown: Arc<AtomicBool>) -> DigitResult<RunReport> {
        self.execute(Some(shutdown))
    }

    fn execute(&self, shutdown: Option<Arc<AtomicBool>>) -> DigitResult<RunReport> {
        validate_config(&self.config)?;

        let started_at = Utc::now();
        let start = Instant::now();
        let digit_count = self.config.digit_count();
        let first_index = self.config.first_index();
        let range = first_index..first_index + digit_count as u64;

        let mut warnings = Vec::new();
        let worker_count = match resolve_worker_count(&self.config, self.probe)? {
            WorkerCount::Fallback { count, reason } => {
                self.reporter.report_error(&reason);
                warnings.push(reason);
                count
            }
            resolved => resolved.get(),
        };

        // ワーカー起動前にキューを全て埋める
        let queue = TaskQueue::from_range(range.clone());
        let table = ResultTable::with_capacity(digit_count);

        let mut pool = WorkerPool::new(worker_count)?
            .with_progress_markers(self.config.enable_progress_reporting());
        if let Some(shutdown) = shutdown {
            pool = pool.with_shutdown(shutdown);
        }

        self.reporter.report_started(digit_count, worker_count);
        let pool_report = pool.run(&queue, &table, &self.computer, &self.reporter);

        let (slots, missing) = render_slots(&table, range);
        let failed_indices: Vec<u64> = missing.iter().filter_map(DigitError::index).collect();

        // 計算失敗として既に記録済みの桁は KeyNotFound を重ねない
        let compute_failed: HashSet<u64> = pool_report
            .failures
            .iter()
            .filter(|error| matches!(error, DigitError::ComputeFailure { .. }))
            .filter_map(DigitError::index)
            .collect();
        let mut failures = pool_report.failures;
        failures.extend(
            missing
                .into_iter()
                .filter(|error| error.index().is_some_and(|index| !compute_failed.contains(&index))),
        );
        failures.sort_by_key(|error| error.index().unwrap_or(u64::MAX));

        let computed = slots.iter().filter(|slot| slot.digit().is_some()).count();
        self.reporter.report_completed(computed, failed_indices.len());

        Ok(RunReport {
            first_index,
            slots,
            failures,
            warnings,
            summary: RunSummary {
                started_at,
                total_tasks: digit_count,
                computed,
                failed_indices,
                worker_count: pool_report.worker_count,
                elapsed_ms: start.elapsed().as_millis() as u64,
            },
        })
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &C {
        &self.config
    }

    /// 進捗報告への参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 桁計算器への参照を取得
    pub fn computer(&self) -> &D {
        &self.computer
    }
}
