//! # analyze 命令实现
//!
//! 相图分析统一入口，包含多个子命令：
//! - `draw`: 按 enum.x 编号绘制三维构型
//! - `map`: 对角化相图热力图
//! - `radial`: 径向 J-K 扇区图
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 子模块: draw, map, radial

pub mod draw;
pub mod map;
pub mod radial;

use crate::cli::analyze::{AnalyzeArgs, AnalyzeCommands};
use crate::error::Result;

/// 执行 analyze 命令
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    match args.command {
        AnalyzeCommands::Draw(draw_args) => draw::execute(draw_args),
        AnalyzeCommands::Map(map_args) => map::execute(map_args),
        AnalyzeCommands::Radial(radial_args) => radial::execute(radial_args),
    }
}
