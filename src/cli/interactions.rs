//! # interactions 子命令 CLI 定义
//!
//! 枚举最近邻/次近邻相互作用对。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/interactions.rs`

use clap::Args;
use std::path::PathBuf;

/// interactions 子命令参数
#[derive(Args, Debug)]
pub struct InteractionsArgs {
    /// Coordinate file (group XYZ format)
    pub xyz: PathBuf,

    /// Write the pair list to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
