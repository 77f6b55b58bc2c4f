//! # scatter 子命令 CLI 定义
//!
//! J/K 构型散点图与 (J, K) 去重列表。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scatter.rs`

use clap::Args;
use std::path::PathBuf;

/// scatter 子命令参数
#[derive(Args, Debug)]
pub struct ScatterArgs {
    /// Headerless CSV of J, K, configuration string
    pub jkconfigs: PathBuf,

    /// Filename for the scatter plot
    #[arg(short, long, default_value = "jk_scatter.png")]
    pub output: PathBuf,

    /// Write the deduplicated (J, K, config) rows as headerless CSV
    #[arg(long)]
    pub dedup_csv: Option<PathBuf>,

    /// Figure width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Render SVG instead of PNG
    #[arg(long, default_value_t = false)]
    pub svg: bool,
}
