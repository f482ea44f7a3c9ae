// コア層 - エラー型・トレイト・データ型
// 他の全てのモジュールはこの層にのみ依存する

pub mod error;
pub mod traits;
pub mod types;

// 公開API
pub use error::{DigitError, DigitResult, ErrorSeverity};
pub use traits::{ComputeConfig, DigitComputer, ProgressReporter};
pub use types::{DigitSlot, RunSummary, Task, FAILURE_MARKER, PI_PREFIX};

// mockallが生成したモック（統合テストからも利用）
pub use traits::{MockComputeConfig, MockDigitComputer, MockProgressReporter};
