//! # JKutility - Heusler 合金 J-K 模型分析统一工具箱
//!
//! 将课题组分散的 Heusler 构型分析脚本用 Rust 重构，统一成单一可执行文件。
//!
//! ## 子命令
//! - `generate` - 根据构型表批量生成 variation 坐标文件
//! - `interactions` - 枚举最近邻/次近邻相互作用对
//! - `fit` - 对计算能量做 J-K 线性模型最小二乘拟合
//! - `scatter` - J/K 构型散点图与去重列表
//! - `analyze` - 相图分析功能
//!   - `draw` - 按 enum.x 编号绘制三维构型
//!   - `map` - 对角化相图热力图
//!   - `radial` - 径向 J-K 扇区图
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/    (文件格式解析器)
//!   │     ├── models/     (数据模型)
//!   │     ├── neighbors/  (近邻壳层搜索)
//!   │     └── fitting/    (最小二乘拟合)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod fitting;
mod models;
mod neighbors;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
