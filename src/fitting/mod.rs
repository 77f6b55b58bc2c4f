//! # J-K 线性模型拟合模块
//!
//! 把计算能量拟合为 (J, K) 的仿射函数 E ≈ cJ·J + cK·K + c0。
//!
//! ## 子模块
//! - `lstsq`: 普通最小二乘平面拟合
//! - `plot`: 拟合曲面与奇偶校验图渲染
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 使用

pub mod lstsq;
pub mod plot;

pub use lstsq::{fit_plane, PlaneFit};
