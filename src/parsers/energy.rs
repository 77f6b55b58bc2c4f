//! # 能量表解析器
//!
//! 解析空白分隔的能量表，每行 `<文件名> <能量>`。
//! 文件名形如 `variation_<uid>[...]`，UID 取第一个下划线后的整数。
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 使用
//! - 使用 `regex` 提取 UID

use crate::error::{JkUtilityError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// 一条能量记录
#[derive(Debug, Clone)]
pub struct EnergyRecord {
    /// 原始文件名
    pub filename: String,
    /// 从文件名解码出的构型 UID
    pub uid: u64,
    /// 计算能量
    pub energy: f64,
}

/// 解析能量表文件
pub fn parse_energy_file(path: &Path) -> Result<Vec<EnergyRecord>> {
    let content = fs::read_to_string(path).map_err(|e| JkUtilityError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_energy_content(&content, &path.display().to_string())
}

/// 从字符串内容解析能量表
pub fn parse_energy_content(content: &str, source: &str) -> Result<Vec<EnergyRecord>> {
    let uid_pattern = Regex::new(r"^[^_]*_(\d+)").expect("static regex");

    let mut records = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(JkUtilityError::ParseError {
                format: "energy".to_string(),
                path: source.to_string(),
                reason: format!("Line {} has fewer than 2 columns", lineno + 1),
            });
        }

        let filename = fields[0];
        let uid: u64 = uid_pattern
            .captures(filename)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| JkUtilityError::ParseError {
                format: "energy".to_string(),
                path: source.to_string(),
                reason: format!("Filename '{}' does not embed a UID", filename),
            })?;

        let energy: f64 = fields[1].parse().map_err(|_| JkUtilityError::ParseError {
            format: "energy".to_string(),
            path: source.to_string(),
            reason: format!("Invalid energy '{}' at line {}", fields[1], lineno + 1),
        })?;

        records.push(EnergyRecord {
            filename: filename.to_string(),
            uid,
            energy,
        });
    }

    Ok(records)
}
