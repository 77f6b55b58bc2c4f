//! # enum.x 输出解析器
//!
//! enum.x (enumlib) 的结构枚举输出：若干行注释与元数据之后，
//! 一行以 `start` 开头的列标题，随后每行一个枚举结构，
//! 物种标记串位于固定列（本课题组的超胞设置下是第 27 列）。
//! 第 n 行数据对应 UID 为 n 的结构。
//!
//! ## 依赖关系
//! - 被 `commands/analyze/draw.rs` 使用

use crate::error::{JkUtilityError, Result};
use std::fs;
use std::path::Path;

/// 解析 enum.x 输出，返回按行序排列的标记串
///
/// `labeling_column` 为 1 起始的列号。
pub fn parse_enumx_file(path: &Path, labeling_column: usize) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| JkUtilityError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_enumx_content(&content, labeling_column, &path.display().to_string())
}

/// 从字符串内容解析 enum.x 输出
pub fn parse_enumx_content(
    content: &str,
    labeling_column: usize,
    source: &str,
) -> Result<Vec<String>> {
    if labeling_column == 0 {
        return Err(JkUtilityError::InvalidArgument(
            "labeling column is 1-based".to_string(),
        ));
    }

    let mut lines = content.lines();

    // 跳过元数据，直到 `start` 开头的标题行
    let mut found_start = false;
    for line in lines.by_ref() {
        if line.trim_start().starts_with("start") {
            found_start = true;
            break;
        }
    }
    if !found_start {
        return Err(JkUtilityError::ParseError {
            format: "enum.x".to_string(),
            path: source.to_string(),
            reason: "No 'start' header line found".to_string(),
        });
    }

    let mut labelings = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let labeling = fields
            .get(labeling_column - 1)
            .ok_or_else(|| JkUtilityError::ParseError {
                format: "enum.x".to_string(),
                path: source.to_string(),
                reason: format!(
                    "Structure row has {} columns, labeling expected in column {}",
                    fields.len(),
                    labeling_column
                ),
            })?;
        labelings.push(labeling.to_string());
    }

    if labelings.is_empty() {
        return Err(JkUtilityError::ParseError {
            format: "enum.x".to_string(),
            path: source.to_string(),
            reason: "No structure rows after the 'start' header".to_string(),
        });
    }

    Ok(labelings)
}

/// 按 UID（1 起始的行号）取标记串
pub fn labeling_for_uid(labelings: &[String], uid: u64) -> Result<&str> {
    if uid == 0 || uid as usize > labelings.len() {
        return Err(JkUtilityError::InvalidArgument(format!(
            "UID {} outside the enumeration range 1..={}",
            uid,
            labelings.len()
        )));
    }
    Ok(&labelings[uid as usize - 1])
}
