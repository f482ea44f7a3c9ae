// サービス層 - 機能別の具象実装
// 各サービスは core のトレイトを実装し、疎結合で設計されている

pub mod config;
pub mod monitoring;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{
    detect_parallelism, resolve_worker_count, validate_config, DefaultComputeConfig, WorkerCount,
    DEFAULT_DIGIT_COUNT,
};
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter};
