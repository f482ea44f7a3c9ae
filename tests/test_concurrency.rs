// 並行性の統合テスト
// キュー・結果テーブル・ワーカープールを直接組み合わせて検証する
mod fixtures;

use fixtures::{DelayedComputer, TableComputer, PI_FRACTION_50};
use pi_digits::{
    core::{DigitComputer, DigitResult, DigitSlot, Task},
    engine::{render_slots, ResultTable, TaskQueue, WorkerPool},
    services::NoOpProgressReporter,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

/// 呼び出されたインデックスを記録する計算器
struct RecordingComputer {
    seen: Mutex<Vec<u64>>,
    calls: AtomicUsize,
}

impl RecordingComputer {
    fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl DigitComputer for RecordingComputer {
    fn compute(&self, index: u64) -> DigitResult<u8> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(index);
        Ok((index % 10) as u8)
    }
}

#[test]
fn test_each_task_consumed_exactly_once() {
    for workers in [1, 2, 4, 16] {
        let queue = TaskQueue::from_range(1..501);
        let table = ResultTable::new();
        let computer = RecordingComputer::new();
        let pool = WorkerPool::new(workers).unwrap().with_progress_markers(false);

        let report = pool.run(&queue, &table, &computer, &NoOpProgressReporter::new());

        assert_eq!(report.worker_count, workers);
        assert_eq!(report.tasks_started(), 500);
        assert!(report.failures.is_empty());
        assert_eq!(computer.calls.load(Ordering::SeqCst), 500);

        let seen = computer.seen.into_inner().unwrap();
        let unique: HashSet<u64> = seen.iter().copied().collect();
        assert_eq!(unique.len(), 500);
        assert_eq!(table.len(), 500);
        assert!(queue.is_empty());
    }
}

#[test]
fn test_render_ignores_completion_order() {
    let queue = TaskQueue::from_range(1..51);
    let table = ResultTable::new();
    let computer = DelayedComputer::new(TableComputer::pi(), 7, 5);
    let pool = WorkerPool::new(8).unwrap().with_progress_markers(false);

    pool.run(&queue, &table, &computer, &NoOpProgressReporter::new());
    let (slots, missing) = render_slots(&table, 1..51);

    assert!(missing.is_empty());
    let rendered: String = slots.iter().map(DigitSlot::as_char).collect();
    assert_eq!(rendered, PI_FRACTION_50);
}

#[test]
fn test_concurrent_producers_and_consumers_share_queue() {
    let queue = TaskQueue::new();
    let popped = Mutex::new(Vec::new());
    let produced = AtomicUsize::new(0);

    thread::scope(|scope| {
        for producer in 0..4u64 {
            let queue = &queue;
            let produced = &produced;
            scope.spawn(move || {
                for offset in 0..250u64 {
                    queue.push(Task::new(producer * 1000 + offset));
                    produced.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        for _ in 0..4 {
            let queue = &queue;
            let popped = &popped;
            let produced = &produced;
            scope.spawn(move || loop {
                match queue.try_pop() {
                    Some(task) => popped.lock().unwrap().push(task.index),
                    None if produced.load(Ordering::SeqCst) == 1000 => break,
                    None => thread::yield_now(),
                }
            });
        }
    });

    // 空確認と生産完了確認の間に追加されたタスクはここで回収する
    let mut popped = popped.into_inner().unwrap();
    popped.extend(std::iter::from_fn(|| queue.try_pop()).map(|task| task.index));

    let unique: HashSet<u64> = popped.iter().copied().collect();
    assert_eq!(popped.len(), 1000);
    assert_eq!(unique.len(), 1000);
}

#[test]
fn test_result_table_reads_during_writes() {
    let table = ResultTable::new();

    thread::scope(|scope| {
        for worker in 0..4u64 {
            let table = &table;
            scope.spawn(move || {
                for index in (worker * 100 + 1)..=(worker * 100 + 100) {
                    table.insert(index, (index % 10) as u8);
                }
            });
        }

        let table = &table;
        scope.spawn(move || {
            for _ in 0..200 {
                // 読み出しは登録済みなら正しい値、未登録ならエラー
                if let Ok(digit) = table.get(42) {
                    assert_eq!(digit, 2);
                }
            }
        });
    });

    assert_eq!(table.len(), 400);
    let snapshot = table.snapshot();
    assert!(snapshot.windows(2).all(|pair| pair[0].0 < pair[1].0));
}

#[test]
fn test_single_worker_matches_many_workers() {
    let run = |workers: usize| {
        let queue = TaskQueue::from_range(1..41);
        let table = ResultTable::new();
        WorkerPool::new(workers)
            .unwrap()
            .with_progress_markers(false)
            .run(&queue, &table, &TableComputer::pi(), &NoOpProgressReporter::new());
        table.snapshot()
    };

    assert_eq!(run(1), run(12));
}
