//! # 坐标文件（XYZ）解析器
//!
//! 解析课题组内部使用的坐标文件格式。
//!
//! ## 格式说明
//! ```text
//! b11 b12 b13            # 基矢矩阵第 1 行
//! b21 b22 b23            # 基矢矩阵第 2 行
//! b31 b32 b33            # 基矢矩阵第 3 行
//! <free-form>            # 第 4 行（格点数或注释），原样保留
//! x y z  Z  s  Sym       # 每行一个格点: 分数坐标、原子序数、
//! ...                    # 物种编号（1 起始）、元素符号
//! ```
//!
//! 坐标列与文件头在生成 variation 文件时逐字节回写，
//! 因此解析时同时保留原始文本。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/structure.rs`, `models/config.rs`

use crate::error::{JkUtilityError, Result};
use crate::models::{Configuration, Lattice, Site, SiteTable};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 文件头固定行数：3 行基矢 + 1 行自由文本
pub const HEADER_LINES: usize = 4;

/// 解析坐标文件
pub fn parse_xyz_file(path: &Path) -> Result<SiteTable> {
    let content = fs::read_to_string(path).map_err(|e| JkUtilityError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_xyz_content(&content, &path.display().to_string())
}

/// 从字符串内容解析坐标文件
pub fn parse_xyz_content(content: &str, source: &str) -> Result<SiteTable> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() < HEADER_LINES {
        return Err(JkUtilityError::ParseError {
            format: "xyz".to_string(),
            path: source.to_string(),
            reason: format!("File shorter than the {}-line header", HEADER_LINES),
        });
    }

    // 前 3 行：基矢矩阵
    let mut matrix = [[0.0; 3]; 3];
    for i in 0..3 {
        let parts: Vec<f64> = lines[i]
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() < 3 {
            return Err(JkUtilityError::ParseError {
                format: "xyz".to_string(),
                path: source.to_string(),
                reason: format!("Invalid basis vector at line {}", i + 1),
            });
        }
        matrix[i] = [parts[0], parts[1], parts[2]];
    }
    let lattice = Lattice::from_vectors(matrix);

    let header_lines: Vec<String> = lines[..HEADER_LINES]
        .iter()
        .map(|l| l.to_string())
        .collect();

    // 余下各行：格点
    let mut sites = Vec::new();
    for (offset, line) in lines[HEADER_LINES..].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let lineno = HEADER_LINES + offset + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 6 {
            return Err(JkUtilityError::ParseError {
                format: "xyz".to_string(),
                path: source.to_string(),
                reason: format!("Site row at line {} has fewer than 6 columns", lineno),
            });
        }

        let mut position = [0.0; 3];
        for (k, slot) in position.iter_mut().enumerate() {
            *slot = fields[k]
                .parse()
                .map_err(|_| JkUtilityError::ParseError {
                    format: "xyz".to_string(),
                    path: source.to_string(),
                    reason: format!("Invalid coordinate '{}' at line {}", fields[k], lineno),
                })?;
        }

        let atomic_number: u32 = fields[3].parse().map_err(|_| JkUtilityError::ParseError {
            format: "xyz".to_string(),
            path: source.to_string(),
            reason: format!("Invalid atomic number '{}' at line {}", fields[3], lineno),
        })?;

        let species: usize = fields[4].parse().map_err(|_| JkUtilityError::ParseError {
            format: "xyz".to_string(),
            path: source.to_string(),
            reason: format!("Invalid species index '{}' at line {}", fields[4], lineno),
        })?;
        if species == 0 {
            return Err(JkUtilityError::ParseError {
                format: "xyz".to_string(),
                path: source.to_string(),
                reason: format!("Species index must be 1-based, got 0 at line {}", lineno),
            });
        }

        sites.push(Site {
            position,
            raw_position: [
                fields[0].to_string(),
                fields[1].to_string(),
                fields[2].to_string(),
            ],
            atomic_number,
            species,
            symbol: fields[5].to_string(),
        });
    }

    if sites.is_empty() {
        return Err(JkUtilityError::ParseError {
            format: "xyz".to_string(),
            path: source.to_string(),
            reason: "No site rows after the header".to_string(),
        });
    }

    Ok(SiteTable {
        header_lines,
        lattice,
        sites,
    })
}

/// 按构型替换物种后渲染 variation 文件正文（制表符分隔）
///
/// 每行: `x\ty\tz\t原子序数\t物种编号\t符号`，坐标来自模板原文。
pub fn render_variation_body(
    table: &SiteTable,
    config: &Configuration,
    species_map: &BTreeMap<usize, (u32, String)>,
) -> Result<String> {
    if config.len() != table.len() {
        return Err(JkUtilityError::ConfigLengthMismatch {
            config: config.as_str().to_string(),
            expected: table.len(),
            got: config.len(),
        });
    }

    let mut body = String::new();
    for (site, &digit) in table.sites.iter().zip(config.digits()) {
        let species = digit as usize + 1;
        let (atomic_number, symbol) =
            species_map
                .get(&species)
                .ok_or_else(|| JkUtilityError::SpeciesOutOfRange {
                    config: config.as_str().to_string(),
                    digit,
                    species: species_map.len(),
                })?;
        body.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            site.raw_position[0],
            site.raw_position[1],
            site.raw_position[2],
            atomic_number,
            species,
            symbol
        ));
    }
    Ok(body)
}

/// 渲染完整 variation 文件：模板文件头原文 + 替换后的正文
pub fn render_variation_file(
    table: &SiteTable,
    config: &Configuration,
    species_map: &BTreeMap<usize, (u32, String)>,
) -> Result<String> {
    let body = render_variation_body(table, config, species_map)?;
    let mut out = table.header_lines.join("\n");
    out.push('\n');
    out.push_str(&body);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
1.0 0.0 0.0
0.0 1.0 0.0
0.0 0.0 1.0
4
0.00 0.00 0.00\t26\t1\tFe
0.50 0.50 0.50\t26\t1\tFe
0.25 0.25 0.25\t13\t2\tAl
0.75 0.75 0.75\t13\t2\tAl
";

    #[test]
    fn test_parse_sample() {
        let table = parse_xyz_content(SAMPLE, "sample").unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.species_count(), 2);
        assert_eq!(table.lattice.matrix[1][1], 1.0);
        assert_eq!(table.sites[2].symbol, "Al");
        assert_eq!(table.sites[2].species, 2);
        assert_eq!(table.sites[1].position, [0.5, 0.5, 0.5]);
        // 原始坐标文本保留
        assert_eq!(table.sites[1].raw_position[0], "0.50");
    }

    #[test]
    fn test_parse_too_short() {
        assert!(parse_xyz_content("1 0 0\n0 1 0\n", "short").is_err());
    }

    #[test]
    fn test_parse_bad_species() {
        let content = "\
1 0 0
0 1 0
0 0 1
1
0.0 0.0 0.0 26 0 Fe
";
        assert!(parse_xyz_content(content, "bad").is_err());
    }

    #[test]
    fn test_render_variation_substitutes_species() {
        let table = parse_xyz_content(SAMPLE, "sample").unwrap();
        let map = table.species_map();
        let config = Configuration::parse("1010").unwrap();

        let body = render_variation_body(&table, &config, &map).unwrap();
        let rows: Vec<&str> = body.lines().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "0.00\t0.00\t0.00\t13\t2\tAl");
        assert_eq!(rows[1], "0.50\t0.50\t0.50\t26\t1\tFe");
    }

    #[test]
    fn test_variation_round_trip() {
        // 生成的 variation 文件重新解析后，物种分配与输入构型一致
        let table = parse_xyz_content(SAMPLE, "sample").unwrap();
        let map = table.species_map();
        let config = Configuration::parse("1100").unwrap();

        let rendered = render_variation_file(&table, &config, &map).unwrap();
        let reparsed = parse_xyz_content(&rendered, "rendered").unwrap();

        let species: Vec<usize> = reparsed.sites.iter().map(|s| s.species).collect();
        let expected: Vec<usize> = config.digits().iter().map(|&d| d as usize + 1).collect();
        assert_eq!(species, expected);

        // 文件头与坐标文本逐字保留
        assert_eq!(reparsed.header_lines, table.header_lines);
        assert_eq!(reparsed.sites[0].raw_position, table.sites[0].raw_position);
    }

    #[test]
    fn test_render_variation_length_mismatch() {
        let table = parse_xyz_content(SAMPLE, "sample").unwrap();
        let map = table.species_map();
        let config = Configuration::parse("10").unwrap();
        assert!(render_variation_body(&table, &config, &map).is_err());
    }
}
