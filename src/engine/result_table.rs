// ResultTable - 桁インデックスから計算結果へのスレッドセーフなマップ

use crate::core::{DigitError, DigitResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ミューテックスで保護された結果テーブル
///
/// TaskQueueとは独立したロックを持つ。両方のロックを同時に保持する経路は存在しない。
#[derive(Debug, Default)]
pub struct ResultTable {
    digits: Mutex<HashMap<u64, u8>>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            digits: Mutex::new(HashMap::with_capacity(capacity)),
        }
    }

    /// 登録または上書き
    pub fn insert(&self, index: u64, digit: u8) {
        self.lock().insert(index, digit);
    }

    /// 登録済みの桁を取得
    pub fn get(&self, index: u64) -> DigitResult<u8> {
        self.lock()
            .get(&index)
            .copied()
            .ok_or_else(|| DigitError::key_not_found(index))
    }

    pub fn contains(&self, index: u64) -> bool {
        self.lock().contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// インデックス昇順のコピー
    pub fn snapshot(&self) -> Vec<(u64, u8)> {
        let mut entries: Vec<(u64, u8)> = self
            .lock()
            .iter()
            .map(|(index, digit)| (*index, *digit))
            .collect();
        entries.sort_unstable_by_key(|(index, _)| *index);
        entries
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u64, u8>> {
        self.digits.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FromIterator<(u64, u8)> for ResultTable {
    fn from_iter<I: IntoIterator<Item = (u64, u8)>>(iter: I) -> Self {
        Self {
            digits: Mutex::new(iter.into_iter().collect()),
        }
    }
}
