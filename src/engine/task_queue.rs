// TaskQueue - ワーカー間で共有するFIFOタスクキュー

use crate::core::{DigitError, DigitResult, Task};
use std::collections::VecDeque;
use std::ops::Range;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ミューテックスで保護されたFIFOキュー
///
/// ロックはコンテナ操作の間だけ保持される。桁計算中に保持されることはない。
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// インデックス範囲から全タスクを一括生成
    pub fn from_range(range: Range<u64>) -> Self {
        Self {
            tasks: Mutex::new(range.map(Task::new).collect()),
        }
    }

    /// 末尾に追加する（失敗しない）
    pub fn push(&self, task: Task) {
        self.lock().push_back(task);
    }

    /// 先頭を取り出す
    ///
    /// 空判定と取り出しは同一のクリティカルセクションで行う。
    /// ワーカーのドレインループはこの操作だけを使うこと。
    pub fn try_pop(&self) -> Option<Task> {
        self.lock().pop_front()
    }

    /// タスクが必須な呼び出し元向けの取り出し
    pub fn pop(&self) -> DigitResult<Task> {
        self.try_pop().ok_or(DigitError::QueueUnderflow)
    }

    /// 参考値。取り出し可否の判定には使わないこと
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    // ロック内でユーザーコードは実行されないため、ポイズン後も中身は整合している
    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
