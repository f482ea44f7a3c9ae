// WorkerPool - 固定サイズのスレッドプール
// 共有キューが空になるまで各ワーカーがタスクを取り出し続ける

use crate::core::{DigitComputer, DigitError, DigitResult, ProgressReporter};
use super::{result_table::ResultTable, task_queue::TaskQueue};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// プール実行の結果
#[derive(Debug, Default)]
pub struct PoolReport {
    /// 起動できたワーカー数
    pub worker_count: usize,
    /// ワーカーごとに着手したタスク数
    pub tasks_per_worker: Vec<usize>,
    /// 全ワーカー合流後に集約した失敗
    pub failures: Vec<DigitError>,
}

impl PoolReport {
    pub fn tasks_started(&self) -> usize {
        self.tasks_per_worker.iter().sum()
    }
}

/// 単一ワーカーの実行結果
#[derive(Debug, Default)]
struct WorkerOutcome {
    tasks_started: usize,
    failures: Vec<DigitError>,
}

/// 固定サイズのワーカープール
///
/// `run` はスコープ付きスレッドで全ワーカーを起動し、全員が合流するまで戻らない。
/// 途中でパニックやエラーがあっても未合流のスレッドは残らない。
#[derive(Debug, Clone)]
pub struct WorkerPool {
    size: usize,
    progress_markers: bool,
    shutdown: Option<Arc<AtomicBool>>,
}

impl WorkerPool {
    pub fn new(size: usize) -> DigitResult<Self> {
        if size == 0 {
            return Err(DigitError::configuration(
                "WorkerPool requires at least one worker",
            ));
        }

        Ok(Self {
            size,
            progress_markers: true,
            shutdown: None,
        })
    }

    pub fn with_progress_markers(mut self, enable: bool) -> Self {
        self.progress_markers = enable;
        self
    }

    /// タスク間で確認されるキャンセルフラグを設定
    pub fn with_shutdown(mut self, shutdown: Arc<AtomicBool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// キューが空になるまで全ワーカーを実行する
    pub fn run<D, R>(
        &self,
        queue: &TaskQueue,
        table: &ResultTable,
        computer: &D,
        reporter: &R,
    ) -> PoolReport
    where
        D: DigitComputer + ?Sized,
        R: ProgressReporter + ?Sized,
    {
        let mut report = PoolReport::default();

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.size);

            for worker_id in 0..self.size {
                let spawned = thread::Builder::new()
                    .name(format!("pi-worker-{worker_id}"))
                    .spawn_scoped(scope, move || {
                        self.drain(worker_id, queue, table, computer, reporter)
                    });

                match spawned {
                    Ok(handle) => handles.push((worker_id, handle)),
                    Err(source) => {
                        let error = DigitError::spawn_failed(worker_id, source);
                        reporter.report_error(&error);
                        report.failures.push(error);
                    }
                }
            }

            report.worker_count = handles.len();

            // 唯一の同期点: 全ワーカーの合流
            for (worker_id, handle) in handles {
                match handle.join() {
                    Ok(outcome) => {
                        report.tasks_per_worker.push(outcome.tasks_started);
                        report.failures.extend(outcome.failures);
                    }
                    Err(payload) => {
                        let error = DigitError::worker_panicked(worker_id, panic_message(&payload));
                        reporter.report_error(&error);
                        report.tasks_per_worker.push(0);
                        report.failures.push(error);
                    }
                }
            }
        });

        report
    }

    fn drain<D, R>(
        &self,
        worker_id: usize,
        queue: &TaskQueue,
        table: &ResultTable,
        computer: &D,
        reporter: &R,
    ) -> WorkerOutcome
    where
        D: DigitComputer + ?Sized,
        R: ProgressReporter + ?Sized,
    {
        let mut outcome = WorkerOutcome::default();

        loop {
            if self.is_cancelled() {
                break;
            }

            let Some(task) = queue.try_pop() else {
                break;
            };

            outcome.tasks_started += 1;
            if self.progress_markers {
                reporter.report_task_started(worker_id, task.index);
            }

            // 計算はどのロックも保持せずに行う
            match computer
                .compute(task.index)
                .and_then(|digit| validate_digit(task.index, digit))
            {
                Ok(digit) => table.insert(task.index, digit),
                Err(error) => {
                    reporter.report_error(&error);
                    outcome.failures.push(error);
                }
            }
        }

        outcome
    }

    fn is_cancelled(&self) -> bool {
        self.shutdown
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }
}

fn validate_digit(index: u64, digit: u8) -> DigitResult<u8> {
    if digit <= 9 {
        Ok(digit)
    } else {
        Err(DigitError::compute_failure(
            index,
            format!("computed value {digit} is not a decimal digit"),
        ))
    }
}

fn panic_message(payload: &Box<dyn Any + Send + 'static>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
