//! # generate 子命令 CLI 定义
//!
//! 根据构型表批量生成 variation 坐标文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use clap::Args;
use std::path::PathBuf;

/// generate 子命令参数
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Template coordinate file (group XYZ format)
    pub xyz: PathBuf,

    /// Output directory, populated with variation_<uid> subdirectories
    pub output: PathBuf,

    /// Headerless CSV of J, K, configuration string (e.g. from enum.x)
    pub jkconfigs: PathBuf,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing variation directories
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
