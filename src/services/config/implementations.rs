// 設定管理の具象実装

use crate::core::{ComputeConfig, DigitError, DigitResult};
use std::num::NonZeroUsize;
use std::thread;

/// 既定の計算桁数
pub const DEFAULT_DIGIT_COUNT: usize = 1000;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultComputeConfig {
    digit_count: usize,
    first_index: u64,
    worker_count: Option<usize>,
    fallback_worker_count: usize,
    enable_progress: bool,
}

impl DefaultComputeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_digit_count(mut self, digit_count: usize) -> Self {
        self.digit_count = digit_count;
        self
    }

    pub fn with_first_index(mut self, first_index: u64) -> Self {
        self.first_index = first_index;
        self
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = Some(worker_count);
        self
    }

    pub fn with_fallback_worker_count(mut self, fallback: usize) -> Self {
        self.fallback_worker_count = fallback;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultComputeConfig {
    fn default() -> Self {
        Self {
            digit_count: DEFAULT_DIGIT_COUNT,
            first_index: 1,
            worker_count: None,
            fallback_worker_count: 1,
            enable_progress: true,
        }
    }
}

impl ComputeConfig for DefaultComputeConfig {
    fn digit_count(&self) -> usize {
        self.digit_count
    }

    fn first_index(&self) -> u64 {
        self.first_index
    }

    fn worker_count(&self) -> Option<usize> {
        self.worker_count
    }

    fn fallback_worker_count(&self) -> usize {
        self.fallback_worker_count
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// ワーカー数の決定結果
#[derive(Debug)]
pub enum WorkerCount {
    /// 設定で明示された値
    Configured(usize),
    /// ハードウェア並列度から取得した値
    Detected(usize),
    /// 並列度が取得できず既定値に落ちた場合
    Fallback { count: usize, reason: DigitError },
}

impl WorkerCount {
    pub fn get(&self) -> usize {
        match self {
            Self::Configured(count) | Self::Detected(count) => *count,
            Self::Fallback { count, .. } => *count,
        }
    }
}

/// ハードウェア並列度を取得
pub fn detect_parallelism() -> DigitResult<usize> {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .map_err(DigitError::parallelism_unavailable)
}

/// 設定と並列度プローブからワーカー数を決定する
///
/// 明示指定が0の場合のみエラー。プローブ失敗は既定値（最低1）で回復する。
pub fn resolve_worker_count<C, P>(config: &C, probe: P) -> DigitResult<WorkerCount>
where
    C: ComputeConfig + ?Sized,
    P: FnOnce() -> DigitResult<usize>,
{
    if let Some(count) = config.worker_count() {
        if count == 0 {
            return Err(DigitError::configuration("worker count must be at least 1"));
        }
        return Ok(WorkerCount::Configured(count));
    }

    match probe() {
        Ok(count) if count > 0 => Ok(WorkerCount::Detected(count)),
        Ok(_) => Ok(WorkerCount::Fallback {
            count: config.fallback_worker_count().max(1),
            reason: DigitError::parallelism_unavailable(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "parallelism probe reported zero execution contexts",
            )),
        }),
        Err(reason) => Ok(WorkerCount::Fallback {
            count: config.fallback_worker_count().max(1),
            reason,
        }),
    }
}

/// 設定値の検証
pub fn validate_config<C: ComputeConfig + ?Sized>(config: &C) -> DigitResult<()> {
    if config.first_index() == 0 {
        return Err(DigitError::configuration(
            "first digit index must be at least 1",
        ));
    }

    let count = u64::try_from(config.digit_count())
        .map_err(|_| DigitError::configuration("digit count does not fit in u64"))?;
    if config.first_index().checked_add(count).is_none() {
        return Err(DigitError::configuration(format!(
            "digit range starting at {} with {} digits overflows",
            config.first_index(),
            count
        )));
    }

    Ok(())
}
