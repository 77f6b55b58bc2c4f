//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `models/`, `neighbors/`, `fitting/`, `utils/`
//! - 子模块: generate, interactions, fit, scatter, analyze

pub mod analyze;
pub mod fit;
pub mod generate;
pub mod interactions;
pub mod scatter;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Generate(args) => generate::execute(args),
        Commands::Interactions(args) => interactions::execute(args),
        Commands::Fit(args) => fit::execute(args),
        Commands::Scatter(args) => scatter::execute(args),
        Commands::Analyze(args) => analyze::execute(args),
    }
}
