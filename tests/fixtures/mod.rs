// テストユーティリティとフィクスチャ
// 遅延注入・失敗注入を行う桁計算器

#![allow(dead_code)]

use pi_digits::core::{DigitComputer, DigitError, DigitResult};
use pi_digits::services::DefaultComputeConfig;
use std::collections::{HashMap, HashSet};
use std::thread;
use std::time::Duration;

/// 小数点以下50桁
pub const PI_FRACTION_50: &str = "14159265358979323846264338327950288419716939937510";

/// 既知の桁表を返す計算器
pub struct TableComputer {
    digits: HashMap<u64, u8>,
}

impl TableComputer {
    pub fn new(entries: &[(u64, u8)]) -> Self {
        Self {
            digits: entries.iter().copied().collect(),
        }
    }

    /// π の小数部を先頭から登録
    pub fn pi() -> Self {
        let entries: Vec<(u64, u8)> = PI_FRACTION_50
            .bytes()
            .enumerate()
            .map(|(i, byte)| (i as u64 + 1, byte - b'0'))
            .collect();
        Self::new(&entries)
    }
}

impl DigitComputer for TableComputer {
    fn compute(&self, index: u64) -> DigitResult<u8> {
        self.digits
            .get(&index)
            .copied()
            .ok_or_else(|| DigitError::compute_failure(index, "index not in table"))
    }
}

/// 計算前にインデックス依存の遅延を入れるラッパー
///
/// `seed` を変えると完了順が変わる。
pub struct DelayedComputer<D> {
    inner: D,
    seed: u64,
    max_delay_ms: u64,
}

impl<D: DigitComputer> DelayedComputer<D> {
    pub fn new(inner: D, seed: u64, max_delay_ms: u64) -> Self {
        Self {
            inner,
            seed,
            max_delay_ms,
        }
    }

    fn delay_for(&self, index: u64) -> Duration {
        let mixed = index
            .wrapping_mul(0x9E37_79B9_7F4A_7C15)
            .wrapping_add(self.seed.wrapping_mul(0xBF58_476D_1CE4_E5B9));
        Duration::from_millis((mixed >> 32) % (self.max_delay_ms + 1))
    }
}

impl<D: DigitComputer> DigitComputer for DelayedComputer<D> {
    fn compute(&self, index: u64) -> DigitResult<u8> {
        thread::sleep(self.delay_for(index));
        self.inner.compute(index)
    }
}

/// 指定インデックスで失敗するラッパー
pub struct FailingComputer<D> {
    inner: D,
    failing: HashSet<u64>,
}

impl<D: DigitComputer> FailingComputer<D> {
    pub fn new(inner: D, failing: &[u64]) -> Self {
        Self {
            inner,
            failing: failing.iter().copied().collect(),
        }
    }
}

impl<D: DigitComputer> DigitComputer for FailingComputer<D> {
    fn compute(&self, index: u64) -> DigitResult<u8> {
        if self.failing.contains(&index) {
            return Err(DigitError::compute_failure(index, "injected failure"));
        }
        self.inner.compute(index)
    }
}

/// 進捗表示なし・ワーカー数固定の設定
pub fn quiet_config(digits: usize, workers: usize) -> DefaultComputeConfig {
    DefaultComputeConfig::new()
        .with_digit_count(digits)
        .with_worker_count(workers)
        .with_progress_reporting(false)
}
