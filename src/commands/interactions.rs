//! # interactions 命令实现
//!
//! 枚举哈密顿量模型的最近邻/次近邻相互作用对。
//!
//! ## 输出约定
//! 每行 `a b 标记`，格点编号 1 起始，标记 1 = 最近邻、2 = 次近邻。
//! 默认写 stdout 且不加装饰，便于管道接入下游哈密顿量构建；
//! 指定 `-o` 时写文件并在终端打印壳层距离摘要。
//!
//! ## 依赖关系
//! - 使用 `cli/interactions.rs` 定义的参数
//! - 使用 `parsers/xyz.rs`, `neighbors/`
//! - 使用 `utils/output.rs`

use crate::cli::interactions::InteractionsArgs;
use crate::error::{JkUtilityError, Result};
use crate::neighbors::{enumerate_pairs, shell_distances};
use crate::parsers::xyz;
use crate::utils::output;

use std::fs;

/// 执行 interactions 命令
pub fn execute(args: InteractionsArgs) -> Result<()> {
    let table = xyz::parse_xyz_file(&args.xyz)?;
    let positions = table.positions();

    let shells = shell_distances(&positions)?;
    let pairs = enumerate_pairs(&positions, shells);
    let text = crate::neighbors::pairs::format_pairs(&pairs);

    match &args.output {
        Some(path) => {
            output::print_header("Enumerating Neighbor Interactions");
            output::print_info(&format!(
                "{} sites, nearest d = {:.6}, next-nearest d = {:.6}",
                table.len(),
                shells.nearest,
                shells.next_nearest
            ));

            fs::write(path, &text).map_err(|e| JkUtilityError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            output::print_success(&format!(
                "{} interaction pair(s) written to '{}'",
                pairs.len(),
                path.display()
            ));
        }
        None => {
            print!("{}", text);
        }
    }

    Ok(())
}
