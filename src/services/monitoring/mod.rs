// 進捗監視機能
// 進捗マーカー、エラー通知、完了通知

pub mod implementations;

// 公開API
pub use implementations::{emit_marker, ConsoleProgressReporter, NoOpProgressReporter, PROGRESS_MARKER};
