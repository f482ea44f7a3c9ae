// 並列桁計算システムのトレイト定義
// コアが依存する全ての抽象化インターフェースを定義

use super::error::{DigitError, DigitResult};
use mockall::automock;

/// 単一桁の計算を抽象化するトレイト
///
/// 実装は純粋かつ再入可能でなければならない。複数のワーカーから
/// 異なるインデックスで同時に呼ばれても、共有可変状態に触れないこと。
#[automock]
pub trait DigitComputer: Send + Sync {
    /// 指定インデックス（小数点以下1始まり）の桁を計算する
    fn compute(&self, index: u64) -> DigitResult<u8>;
}

/// 並列計算の設定を抽象化するトレイト
#[automock]
pub trait ComputeConfig: Send + Sync {
    /// 計算する桁数
    fn digit_count(&self) -> usize;

    /// 最初の桁インデックス
    fn first_index(&self) -> u64;

    /// 明示的に指定されたワーカー数（未指定ならハードウェア並列度を使用）
    fn worker_count(&self) -> Option<usize>;

    /// 並列度が取得できない場合のワーカー数
    fn fallback_worker_count(&self) -> usize;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// 進捗報告の抽象化トレイト
///
/// ワーカースレッドから並行に呼ばれるため、実装は内部で同期すること。
#[automock]
pub trait ProgressReporter: Send + Sync {
    /// 計算開始時の報告
    fn report_started(&self, total_tasks: usize, worker_count: usize);

    /// ワーカーがタスクに着手した時の進捗マーカー
    fn report_task_started(&self, worker_id: usize, index: u64);

    /// エラー発生時の報告
    fn report_error(&self, error: &DigitError);

    /// 全ワーカー合流後の完了報告
    fn report_completed(&self, computed: usize, failed: usize);
}
