//! # 近邻壳层搜索模块
//!
//! 在小晶格基上穷举搜索最近邻（J）与次近邻（K）壳层，
//! 并枚举哈密顿量模型所需的相互作用对。
//!
//! ## 子模块
//! - `shells`: 壳层距离识别
//! - `pairs`: 周期像移位下的相互作用对枚举
//!
//! ## 依赖关系
//! - 被 `commands/interactions.rs` 使用

pub mod pairs;
pub mod shells;

pub use pairs::{enumerate_pairs, InteractionPair, Shell};
pub use shells::{shell_distances, ShellDistances};
