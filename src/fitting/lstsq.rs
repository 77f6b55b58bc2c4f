//! # 普通最小二乘平面拟合
//!
//! 设计矩阵每行 [J, K, 1]，解 3×3 正规方程 AᵀA·x = Aᵀb。
//! 系统很小，直接用行列式/伴随矩阵求逆。
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 使用
//! - 使用 `error.rs`

use crate::error::{JkUtilityError, Result};

/// 拟合结果 E ≈ j_coeff·J + k_coeff·K + intercept
#[derive(Debug, Clone, Copy)]
pub struct PlaneFit {
    pub j_coeff: f64,
    pub k_coeff: f64,
    pub intercept: f64,
}

impl PlaneFit {
    /// 模型能量
    pub fn predict(&self, j: f64, k: f64) -> f64 {
        self.j_coeff * j + self.k_coeff * k + self.intercept
    }

    /// J/K 系数比
    pub fn ratio(&self) -> f64 {
        self.j_coeff / self.k_coeff
    }
}

/// 对 (J, K, E) 样本做最小二乘平面拟合
pub fn fit_plane(samples: &[(f64, f64, f64)]) -> Result<PlaneFit> {
    if samples.len() < 3 {
        return Err(JkUtilityError::InvalidArgument(format!(
            "Need at least 3 (J, K, E) samples to fit a plane, got {}",
            samples.len()
        )));
    }

    // AᵀA 与 Aᵀb 的逐元素累加
    let mut m = [[0.0f64; 3]; 3];
    let mut v = [0.0f64; 3];
    for &(j, k, e) in samples {
        let row = [j, k, 1.0];
        for r in 0..3 {
            for c in 0..3 {
                m[r][c] += row[r] * row[c];
            }
            v[r] += row[r] * e;
        }
    }

    let x = solve_3x3(&m, &v)?;
    Ok(PlaneFit {
        j_coeff: x[0],
        k_coeff: x[1],
        intercept: x[2],
    })
}

/// 行列式/伴随矩阵法解 3×3 线性系统
fn solve_3x3(m: &[[f64; 3]; 3], v: &[f64; 3]) -> Result<[f64; 3]> {
    let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);

    if det.abs() < 1e-10 {
        return Err(JkUtilityError::SingularFit);
    }

    let inv = [
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) / det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) / det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) / det,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) / det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) / det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) / det,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) / det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) / det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) / det,
        ],
    ];

    Ok([
        inv[0][0] * v[0] + inv[0][1] * v[1] + inv[0][2] * v[2],
        inv[1][0] * v[0] + inv[1][1] * v[1] + inv[1][2] * v[2],
        inv[2][0] * v[0] + inv[2][1] * v[1] + inv[2][2] * v[2],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_exact_plane_recovered() {
        // E = 2J - 3K + 1
        let samples: Vec<(f64, f64, f64)> = vec![
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 3.0),
            (0.0, 1.0, -2.0),
            (2.0, 1.0, 2.0),
            (-1.0, 2.0, -7.0),
        ];
        let fit = fit_plane(&samples).unwrap();

        assert_relative_eq!(fit.j_coeff, 2.0, max_relative = 1e-10);
        assert_relative_eq!(fit.k_coeff, -3.0, max_relative = 1e-10);
        assert_relative_eq!(fit.intercept, 1.0, max_relative = 1e-10);
        assert_relative_eq!(fit.ratio(), -2.0 / 3.0, max_relative = 1e-10);
    }

    #[test]
    fn test_normal_equations_hold() {
        // 有噪声数据：残差必须与设计矩阵的列正交
        let samples: Vec<(f64, f64, f64)> = vec![
            (4.0, -4.0, -5.61),
            (-8.0, 0.0, -5.48),
            (0.0, 8.0, -5.70),
            (4.0, 4.0, -5.66),
            (-4.0, -4.0, -5.50),
            (8.0, 0.0, -5.69),
        ];
        let fit = fit_plane(&samples).unwrap();

        let mut residual_dot = [0.0f64; 3];
        for &(j, k, e) in &samples {
            let r = fit.predict(j, k) - e;
            residual_dot[0] += r * j;
            residual_dot[1] += r * k;
            residual_dot[2] += r;
        }
        for dot in residual_dot {
            assert!(dot.abs() < 1e-8, "normal equation residual {}", dot);
        }
    }

    #[test]
    fn test_collinear_samples_rejected() {
        // K = 2J 使设计矩阵列线性相关
        let samples: Vec<(f64, f64, f64)> = vec![
            (1.0, 2.0, 0.0),
            (2.0, 4.0, 1.0),
            (3.0, 6.0, 2.0),
            (4.0, 8.0, 3.0),
        ];
        assert!(matches!(
            fit_plane(&samples),
            Err(JkUtilityError::SingularFit)
        ));
    }

    #[test]
    fn test_too_few_samples() {
        let samples = vec![(0.0, 0.0, 1.0), (1.0, 1.0, 2.0)];
        assert!(fit_plane(&samples).is_err());
    }

    #[test]
    fn test_predict() {
        let fit = PlaneFit {
            j_coeff: 0.5,
            k_coeff: -0.25,
            intercept: 2.0,
        };
        assert_relative_eq!(fit.predict(4.0, 8.0), 2.0, max_relative = 1e-12);
    }
}
