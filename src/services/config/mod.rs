// 設定管理
// 桁数・ワーカー数・進捗表示の設定と、ハードウェア並列度の解決

pub mod implementations;

// 公開API
pub use implementations::{
    detect_parallelism, resolve_worker_count, validate_config, DefaultComputeConfig, WorkerCount,
    DEFAULT_DIGIT_COUNT,
};
