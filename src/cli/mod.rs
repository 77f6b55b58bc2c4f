//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `generate`: 批量生成 variation 坐标文件
//! - `interactions`: 枚举最近邻/次近邻相互作用对
//! - `fit`: J-K 线性模型最小二乘拟合
//! - `scatter`: J/K 构型散点图与去重列表
//! - `analyze`: 相图分析（嵌套子命令）
//!   - `draw`: 按 enum.x 编号绘制三维构型
//!   - `map`: 对角化相图热力图
//!   - `radial`: 径向 J-K 扇区图
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: generate, interactions, fit, scatter, analyze

pub mod analyze;
pub mod fit;
pub mod generate;
pub mod interactions;
pub mod scatter;

use clap::{Parser, Subcommand};

/// JKutility - Heusler 合金 J-K 模型分析统一工具箱
#[derive(Parser)]
#[command(name = "jkutility")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A unified Heusler alloy J-K interaction model analysis toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Generate variation coordinate files from a configuration table
    Generate(generate::GenerateArgs),

    /// Enumerate nearest/next-nearest neighbor interaction pairs
    Interactions(interactions::InteractionsArgs),

    /// Fit computed energies to the linear J-K interaction model
    Fit(fit::FitArgs),

    /// Plot J/K configurations and list deduplicated (J, K) points
    Scatter(scatter::ScatterArgs),

    /// Analyze and visualize phase diagrams
    Analyze(analyze::AnalyzeArgs),
}
