//! # fit 子命令 CLI 定义
//!
//! J-K 线性模型最小二乘拟合。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fit.rs`

use clap::Args;
use std::path::PathBuf;

/// fit 子命令参数
#[derive(Args, Debug)]
pub struct FitArgs {
    /// Headerless CSV of J, K, configuration string
    pub jkconfigs: PathBuf,

    /// Whitespace-delimited table of `variation_<uid>` filename and energy
    pub energies: PathBuf,

    /// Species count used as the UID radix (0 = infer from the table)
    #[arg(long, default_value_t = 0)]
    pub species: usize,

    /// Filename for the per-configuration fit results CSV
    #[arg(long, default_value = "jk_fit_results.csv")]
    pub output_csv: PathBuf,

    /// Filename for the 3-D fitted surface plot
    #[arg(long, default_value = "jk_surface.png")]
    pub surface: PathBuf,

    /// Filename for the parity plot
    #[arg(long, default_value = "jk_parity.png")]
    pub parity: PathBuf,

    /// Skip plot generation
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Surface plot width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Surface plot height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Render SVG instead of PNG
    #[arg(long, default_value_t = false)]
    pub svg: bool,
}
