//! # analyze 子命令 CLI 定义
//!
//! 相图分析统一入口，包含多个子命令：
//! - `draw`: 按 enum.x 编号绘制三维构型
//! - `map`: 对角化相图热力图
//! - `radial`: 径向 J-K 扇区图
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/analyze/` 相应模块

use clap::{Args, Subcommand};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// Analyze 主命令
// ─────────────────────────────────────────────────────────────

/// analyze 主命令参数
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub command: AnalyzeCommands,
}

/// analyze 子命令
#[derive(Subcommand, Debug)]
pub enum AnalyzeCommands {
    /// Draw the 3-D crystal configuration for an enum.x structure number
    Draw(DrawArgs),

    /// Render a diagonalized phase-diagram heatmap from a UID grid CSV
    Map(MapArgs),

    /// Render a radial J-K sector plot from a (J, K, theta, id) CSV
    Radial(RadialArgs),
}

// ─────────────────────────────────────────────────────────────
// draw 子命令
// ─────────────────────────────────────────────────────────────

/// draw 子命令参数
#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Coordinate file (group XYZ format)
    pub xyz: PathBuf,

    /// enum.x enumeration output file
    #[arg(value_name = "ENUM")]
    pub enum_file: PathBuf,

    /// Structure number (1-based row in the enum.x output)
    #[arg(long)]
    pub uid: u64,

    /// 1-based column of the labeling string in the enum.x output
    #[arg(long, default_value_t = 27)]
    pub labeling_column: usize,

    /// Filename for the rendered configuration
    #[arg(short, long, default_value = "configuration.png")]
    pub output: PathBuf,

    /// Figure size in pixels (square)
    #[arg(long, default_value_t = 800)]
    pub size: u32,

    /// Render SVG instead of PNG
    #[arg(long, default_value_t = false)]
    pub svg: bool,
}

// ─────────────────────────────────────────────────────────────
// map 子命令
// ─────────────────────────────────────────────────────────────

/// map 子命令参数
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Coordinate file, used only for the species count
    pub xyz: PathBuf,

    /// Headerless CSV grid of structure UIDs
    pub csv: PathBuf,

    /// Filename for the heatmap
    #[arg(short, long, default_value = "phase_map.png")]
    pub output: PathBuf,

    /// Figure size in pixels (square)
    #[arg(long, default_value_t = 700)]
    pub size: u32,

    /// Render SVG instead of PNG
    #[arg(long, default_value_t = false)]
    pub svg: bool,
}

// ─────────────────────────────────────────────────────────────
// radial 子命令
// ─────────────────────────────────────────────────────────────

/// radial 子命令参数
#[derive(Args, Debug)]
pub struct RadialArgs {
    /// Coordinate file, used only for the species count
    pub xyz: PathBuf,

    /// Headerless CSV of J, K, theta (radians), structure id
    pub csv: PathBuf,

    /// Filename for the radial plot
    #[arg(short, long, default_value = "phase_radial.png")]
    pub output: PathBuf,

    /// Figure size in pixels (square)
    #[arg(long, default_value_t = 800)]
    pub size: u32,

    /// Draw a legend of known phase names
    #[arg(long, default_value_t = false)]
    pub legend: bool,

    /// Render SVG instead of PNG
    #[arg(long, default_value_t = false)]
    pub svg: bool,
}
