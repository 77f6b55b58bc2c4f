//! # 相互作用对枚举
//!
//! 对每个格点、每个周期像移位（{-1,0,1}³ 共 27 个）、每个目标格点，
//! 距离落在 J 或 K 壳层上的有序对即为一条相互作用。
//! 同一对格点经不同移位可多次命中，逐条输出，
//! 与下游哈密顿量构建约定一致。
//!
//! ## 依赖关系
//! - 被 `commands/interactions.rs` 使用
//! - 使用 `neighbors/shells.rs`

use super::shells::{distance, ShellDistances, DIST_TOL};

/// 壳层标记：1 = 最近邻，2 = 次近邻
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Nearest,
    NextNearest,
}

impl Shell {
    /// 输出中使用的数字标记
    pub fn tag(self) -> u8 {
        match self {
            Shell::Nearest => 1,
            Shell::NextNearest => 2,
        }
    }
}

/// 一条相互作用对（格点编号 1 起始）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionPair {
    pub site_a: usize,
    pub site_b: usize,
    pub shell: Shell,
}

/// 枚举全部相互作用对
///
/// 循环顺序：格点 a、移位、格点 b，与输出行序约定一致。
pub fn enumerate_pairs(positions: &[[f64; 3]], shells: ShellDistances) -> Vec<InteractionPair> {
    let mut shifts = Vec::with_capacity(27);
    for i in [-1.0, 0.0, 1.0] {
        for j in [-1.0, 0.0, 1.0] {
            for k in [-1.0, 0.0, 1.0] {
                shifts.push([i, j, k]);
            }
        }
    }

    let mut pairs = Vec::new();
    for (ia, pos_a) in positions.iter().enumerate() {
        for shift in &shifts {
            for (ib, pos_b) in positions.iter().enumerate() {
                let shifted = [
                    pos_b[0] + shift[0],
                    pos_b[1] + shift[1],
                    pos_b[2] + shift[2],
                ];
                let d = distance(*pos_a, shifted);
                if (d - shells.nearest).abs() < DIST_TOL {
                    pairs.push(InteractionPair {
                        site_a: ia + 1,
                        site_b: ib + 1,
                        shell: Shell::Nearest,
                    });
                } else if (d - shells.next_nearest).abs() < DIST_TOL {
                    pairs.push(InteractionPair {
                        site_a: ia + 1,
                        site_b: ib + 1,
                        shell: Shell::NextNearest,
                    });
                }
            }
        }
    }
    pairs
}

/// 渲染输出行：每行 `a b 标记`
pub fn format_pairs(pairs: &[InteractionPair]) -> String {
    let mut out = String::new();
    for pair in pairs {
        out.push_str(&format!(
            "{} {} {}\n",
            pair.site_a,
            pair.site_b,
            pair.shell.tag()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::shells::shell_distances;

    /// 面内正方格子：J = 0.5（轴向），K = √0.5（对角）
    fn square_cell() -> Vec<[f64; 3]> {
        vec![
            [0.0, 0.0, 0.0],
            [0.5, 0.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.5, 0.5, 0.0],
        ]
    }

    #[test]
    fn test_hand_computed_adjacency() {
        let positions = square_cell();
        let shells = shell_distances(&positions).unwrap();
        let pairs = enumerate_pairs(&positions, shells);

        // 每个轴向邻对在两个移位下命中，8 个有序对 × 2；
        // 每个对角邻对在四个移位下命中，4 个有序对 × 4。
        let nearest: Vec<_> = pairs
            .iter()
            .filter(|p| p.shell == Shell::Nearest)
            .collect();
        let next: Vec<_> = pairs
            .iter()
            .filter(|p| p.shell == Shell::NextNearest)
            .collect();
        assert_eq!(nearest.len(), 16);
        assert_eq!(next.len(), 16);

        let count = |a: usize, b: usize, shell: Shell| {
            pairs
                .iter()
                .filter(|p| p.site_a == a && p.site_b == b && p.shell == shell)
                .count()
        };
        assert_eq!(count(1, 2, Shell::Nearest), 2);
        assert_eq!(count(2, 1, Shell::Nearest), 2);
        assert_eq!(count(1, 3, Shell::Nearest), 2);
        assert_eq!(count(1, 4, Shell::NextNearest), 4);
        assert_eq!(count(2, 3, Shell::NextNearest), 4);
        // 对角对不会落在最近邻壳层
        assert_eq!(count(1, 4, Shell::Nearest), 0);
    }

    #[test]
    fn test_pairs_are_symmetric() {
        let positions = square_cell();
        let shells = shell_distances(&positions).unwrap();
        let pairs = enumerate_pairs(&positions, shells);

        for pair in &pairs {
            let reversed = pairs.iter().any(|p| {
                p.site_a == pair.site_b && p.site_b == pair.site_a && p.shell == pair.shell
            });
            assert!(reversed, "missing reverse of {:?}", pair);
        }
    }

    #[test]
    fn test_format_pairs() {
        let pairs = vec![
            InteractionPair {
                site_a: 1,
                site_b: 2,
                shell: Shell::Nearest,
            },
            InteractionPair {
                site_a: 2,
                site_b: 1,
                shell: Shell::NextNearest,
            },
        ];
        assert_eq!(format_pairs(&pairs), "1 2 1\n2 1 2\n");
    }

    #[test]
    fn test_site_indices_are_one_based() {
        let positions = square_cell();
        let shells = shell_distances(&positions).unwrap();
        let pairs = enumerate_pairs(&positions, shells);
        assert!(pairs.iter().all(|p| p.site_a >= 1 && p.site_b >= 1));
        assert!(pairs.iter().all(|p| p.site_a <= 4 && p.site_b <= 4));
    }
}
