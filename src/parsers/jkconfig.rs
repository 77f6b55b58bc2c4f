//! # J/K 构型表解析器
//!
//! 解析无表头的逗号分隔表，每行 `J,K,构型串`。
//! J/K 是该构型对应的最近邻/次近邻相互作用强度。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/fit.rs`, `commands/scatter.rs` 使用
//! - 使用 `models/config.rs`
//! - 使用 `csv` + `serde` 读取

use crate::error::{JkUtilityError, Result};
use crate::models::Configuration;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// CSV 行的原始形态
#[derive(Debug, Deserialize)]
struct RawRow {
    j: f64,
    k: f64,
    config: String,
}

/// 一条构型记录
#[derive(Debug, Clone)]
pub struct JkRecord {
    /// 最近邻相互作用强度
    pub j: f64,
    /// 次近邻相互作用强度
    pub k: f64,
    /// 物种构型
    pub config: Configuration,
}

/// 解析构型表文件
pub fn parse_jkconfig_file(path: &Path) -> Result<Vec<JkRecord>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(JkUtilityError::CsvError)?;
    parse_records(rdr)
}

/// 从任意 reader 解析构型表
pub fn parse_jkconfig_reader<R: Read>(reader: R) -> Result<Vec<JkRecord>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    parse_records(rdr)
}

fn parse_records<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<JkRecord>> {
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        let raw: RawRow = row.map_err(JkUtilityError::CsvError)?;
        records.push(JkRecord {
            j: raw.j,
            k: raw.k,
            config: Configuration::parse(&raw.config)?,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = "4,-4,0110\n-8,0,1100\n";
        let records = parse_jkconfig_reader(content.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].j, 4.0);
        assert_eq!(records[0].k, -4.0);
        assert_eq!(records[0].config.as_str(), "0110");
        assert_eq!(records[1].j, -8.0);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let content = " 2 , 3 , 01 \n";
        let records = parse_jkconfig_reader(content.as_bytes()).unwrap();
        assert_eq!(records[0].config.as_str(), "01");
    }

    #[test]
    fn test_parse_rejects_non_numeric_jk() {
        let content = "a,b,0110\n";
        assert!(parse_jkconfig_reader(content.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_config() {
        let content = "1,2,01x0\n";
        assert!(parse_jkconfig_reader(content.as_bytes()).is_err());
    }
}
