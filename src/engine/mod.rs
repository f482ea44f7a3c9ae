// エンジン層 - 並行処理コアとオーケストレーション
// 共有キュー・結果テーブル・ワーカープールを組み合わせて高レベルな処理を提供

pub mod orchestrator;
pub mod result_table;
pub mod task_queue;
pub mod worker_pool;

// 公開API
pub use orchestrator::{render_slots, Orchestrator, ParallelismProbe, RunReport};
pub use result_table::ResultTable;
pub use task_queue::TaskQueue;
pub use worker_pool::{PoolReport, WorkerPool};
