// Custom error types for parallel digit computation
// 並列桁計算専用のカスタムエラー型定義

use thiserror::Error;

/// 桁計算コア固有のエラー型
#[derive(Error, Debug)]
pub enum DigitError {
    #[error("キューアンダーフロー: 空のタスクキューから取り出そうとしました")]
    QueueUnderflow,

    #[error("桁計算エラー: index={index} - {message}")]
    ComputeFailure { index: u64, message: String },

    #[error("結果未登録: index={index} の桁は計算されていません")]
    KeyNotFound { index: u64 },

    #[error("並列度取得エラー: {source}")]
    ParallelismUnavailable {
        #[source]
        source: std::io::Error,
    },

    #[error("ワーカー起動エラー: worker={worker_id} - {source}")]
    SpawnFailed {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("ワーカーパニック: worker={worker_id} - {message}")]
    WorkerPanicked { worker_id: usize, message: String },

    #[error("設定エラー: {message}")]
    Configuration { message: String },
}

impl DigitError {
    /// 桁計算エラーの作成
    pub fn compute_failure(index: u64, message: impl Into<String>) -> Self {
        Self::ComputeFailure {
            index,
            message: message.into(),
        }
    }

    /// 結果未登録エラーの作成
    pub fn key_not_found(index: u64) -> Self {
        Self::KeyNotFound { index }
    }

    /// 並列度取得エラーの作成
    pub fn parallelism_unavailable(source: std::io::Error) -> Self {
        Self::ParallelismUnavailable { source }
    }

    /// ワーカー起動エラーの作成
    pub fn spawn_failed(worker_id: usize, source: std::io::Error) -> Self {
        Self::SpawnFailed { worker_id, source }
    }

    /// ワーカーパニックの作成
    pub fn worker_panicked(worker_id: usize, message: impl Into<String>) -> Self {
        Self::WorkerPanicked {
            worker_id,
            message: message.into(),
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 失敗した桁インデックス（特定できる場合）
    pub fn index(&self) -> Option<u64> {
        match self {
            Self::ComputeFailure { index, .. } | Self::KeyNotFound { index } => Some(*index),
            _ => None,
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ParallelismUnavailable { .. } => ErrorSeverity::Low,
            Self::QueueUnderflow => ErrorSeverity::Medium,
            Self::ComputeFailure { .. } | Self::KeyNotFound { .. } => ErrorSeverity::Medium,
            Self::SpawnFailed { .. } | Self::WorkerPanicked { .. } => ErrorSeverity::High,
            Self::Configuration { .. } => ErrorSeverity::Critical,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// 回復可能なエラーは実行全体を止めず、部分失敗として集計される。
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::QueueUnderflow => true,
            Self::ComputeFailure { .. } => true,
            Self::KeyNotFound { .. } => true,
            Self::ParallelismUnavailable { .. } => true,
            Self::SpawnFailed { .. } => true,
            Self::WorkerPanicked { .. } => true,
            Self::Configuration { .. } => false,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 部分失敗として報告
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - 実行不可
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 桁計算コアのResult型
pub type DigitResult<T> = Result<T, DigitError>;
