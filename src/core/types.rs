// 桁計算に関連するデータ型定義

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 描画時に失敗桁を表すマーカー
pub const FAILURE_MARKER: char = '?';

/// 描画結果の先頭に付く整数部
pub const PI_PREFIX: &str = "3.";

/// 1桁分の計算タスク
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Task {
    pub index: u64,
}

impl Task {
    pub fn new(index: u64) -> Self {
        Self { index }
    }
}

/// 描画順に並んだ1桁分の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitSlot {
    Digit(u8),
    Missing,
}

impl DigitSlot {
    pub fn as_char(&self) -> char {
        match self {
            Self::Digit(digit) => char::from_digit(u32::from(*digit), 10).unwrap_or(FAILURE_MARKER),
            Self::Missing => FAILURE_MARKER,
        }
    }

    pub fn digit(&self) -> Option<u8> {
        match self {
            Self::Digit(digit) => Some(*digit),
            Self::Missing => None,
        }
    }
}

/// 実行全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub total_tasks: usize,
    pub computed: usize,
    pub failed_indices: Vec<u64>,
    pub worker_count: usize,
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// 全桁が計算されたかどうか
    pub fn is_complete(&self) -> bool {
        self.failed_indices.is_empty() && self.computed == self.total_tasks
    }

    /// 失敗した桁数
    pub fn failed(&self) -> usize {
        self.failed_indices.len()
    }
}
