// 桁計算アルゴリズム
// core::DigitComputer の具象実装群

pub mod bellard;

pub use bellard::{BellardDigitComputer, DEFAULT_MAX_INDEX};
