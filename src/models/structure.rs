//! # 晶格与格点数据模型
//!
//! 定义坐标文件（课题组内部 XYZ 格式）的内存表示。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 晶格表示
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    /// [[a1, a2, a3], [b1, b2, b3], [c1, c2, c3]]
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Self {
        Lattice { matrix }
    }

    /// 分数坐标转笛卡尔坐标（行向量约定: cart = frac · M）
    pub fn to_cartesian(&self, frac: [f64; 3]) -> [f64; 3] {
        let m = self.matrix;
        [
            frac[0] * m[0][0] + frac[1] * m[1][0] + frac[2] * m[2][0],
            frac[0] * m[0][1] + frac[1] * m[1][1] + frac[2] * m[2][1],
            frac[0] * m[0][2] + frac[1] * m[1][2] + frac[2] * m[2][2],
        ]
    }

    /// 计算晶格体积
    pub fn volume(&self) -> f64 {
        let a = self.matrix[0];
        let b = self.matrix[1];
        let c = self.matrix[2];

        // 行列式计算
        a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0])
    }
}

/// 单个格点
///
/// 坐标同时保留解析后的数值和模板文件中的原始文本，
/// 生成 variation 文件时原样回写坐标列。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// 分数坐标 [x, y, z]
    pub position: [f64; 3],

    /// 坐标列的原始文本 [x, y, z]
    pub raw_position: [String; 3],

    /// 原子序数
    pub atomic_number: u32,

    /// 物种编号（1 起始）
    pub species: usize,

    /// 元素符号
    pub symbol: String,
}

/// 坐标文件的完整内容：4 行文件头 + 格点列表
#[derive(Debug, Clone)]
pub struct SiteTable {
    /// 文件头原文（前 3 行为基矢矩阵，第 4 行原样保留）
    pub header_lines: Vec<String>,

    /// 由文件头前 3 行解析出的晶格
    pub lattice: Lattice,

    /// 格点列表
    pub sites: Vec<Site>,
}

impl SiteTable {
    /// 格点数
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// 所有格点的分数坐标
    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.sites.iter().map(|s| s.position).collect()
    }

    /// 不同物种编号的数量
    pub fn species_count(&self) -> usize {
        let mut seen: Vec<usize> = self.sites.iter().map(|s| s.species).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// 物种编号 -> (原子序数, 元素符号)
    ///
    /// 每个物种取首次出现的格点，与模板文件按物种分组取首行一致。
    pub fn species_map(&self) -> BTreeMap<usize, (u32, String)> {
        let mut map = BTreeMap::new();
        for site in &self.sites {
            map.entry(site.species)
                .or_insert_with(|| (site.atomic_number, site.symbol.clone()));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> SiteTable {
        let lattice = Lattice::from_vectors([[4.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 4.0]]);
        let site = |pos: [f64; 3], z: u32, sp: usize, sym: &str| Site {
            position: pos,
            raw_position: [
                format!("{}", pos[0]),
                format!("{}", pos[1]),
                format!("{}", pos[2]),
            ],
            atomic_number: z,
            species: sp,
            symbol: sym.to_string(),
        };
        SiteTable {
            header_lines: vec![
                "4.0 0.0 0.0".to_string(),
                "0.0 4.0 0.0".to_string(),
                "0.0 0.0 4.0".to_string(),
                "4".to_string(),
            ],
            lattice,
            sites: vec![
                site([0.0, 0.0, 0.0], 26, 1, "Fe"),
                site([0.5, 0.5, 0.5], 26, 1, "Fe"),
                site([0.25, 0.25, 0.25], 13, 2, "Al"),
                site([0.75, 0.75, 0.75], 13, 2, "Al"),
            ],
        }
    }

    #[test]
    fn test_lattice_volume_cubic() {
        let lattice = Lattice::from_vectors([[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]);
        let vol = lattice.volume().abs();

        // 5^3 = 125
        assert!((vol - 125.0).abs() < 1e-6);
    }

    #[test]
    fn test_lattice_to_cartesian() {
        let lattice = Lattice::from_vectors([[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 8.0]]);
        let cart = lattice.to_cartesian([0.5, 0.5, 0.5]);

        assert!((cart[0] - 1.0).abs() < 1e-12);
        assert!((cart[1] - 2.0).abs() < 1e-12);
        assert!((cart[2] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_species_count() {
        assert_eq!(sample_table().species_count(), 2);
    }

    #[test]
    fn test_species_map_first_occurrence() {
        let map = sample_table().species_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1], (26, "Fe".to_string()));
        assert_eq!(map[&2], (13, "Al".to_string()));
    }
}
