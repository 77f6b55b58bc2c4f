//! # 拟合结果图表生成
//!
//! 使用 `plotters` 渲染两张图：
//! - 三维拟合曲面 + 数据散点
//! - 模型能量 vs 计算能量的奇偶校验图
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 调用
//! - 使用 `fitting/lstsq.rs` 的 PlaneFit
//! - 使用 `plotters` 渲染图表

use crate::error::{JkUtilityError, Result};
use crate::fitting::PlaneFit;

use plotters::prelude::*;
use std::path::Path;

/// 曲面网格步长与数据范围外延，与原分析约定一致
const GRID_STEP: f64 = 0.5;
const GRID_PAD: f64 = 5.0;

/// 生成拟合曲面图（三维）
pub fn generate_surface_plot(
    fit: &PlaneFit,
    data: &[(f64, f64, f64)],
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_surface_chart(&root, fit, data, title)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_surface_chart(&root, fit, data, title)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 生成奇偶校验图（模型 vs 计算能量）
pub fn generate_parity_plot(
    fit: &PlaneFit,
    data: &[(f64, f64, f64)],
    output_path: &Path,
    title: &str,
    size: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (size, size)).into_drawing_area();
        draw_parity_chart(&root, fit, data, title)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (size, size)).into_drawing_area();
        draw_parity_chart(&root, fit, data, title)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 数据范围两侧外延 GRID_PAD 的网格坐标
fn grid_values(min: f64, max: f64) -> Vec<f64> {
    let lo = min - GRID_PAD;
    let hi = max + GRID_PAD;
    let n = ((hi - lo) / GRID_STEP).ceil() as usize;
    (0..=n).map(|i| lo + i as f64 * GRID_STEP).collect()
}

fn min_max<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// 绘制三维曲面图的核心逻辑
fn draw_surface_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    fit: &PlaneFit,
    data: &[(f64, f64, f64)],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let (j_min, j_max) = min_max(data.iter().map(|d| d.0));
    let (k_min, k_max) = min_max(data.iter().map(|d| d.1));
    let j_grid = grid_values(j_min, j_max);
    let k_grid = grid_values(k_min, k_max);

    // 能量轴范围覆盖数据点与平面四角
    let corner_energies = [
        fit.predict(j_min - GRID_PAD, k_min - GRID_PAD),
        fit.predict(j_min - GRID_PAD, k_max + GRID_PAD),
        fit.predict(j_max + GRID_PAD, k_min - GRID_PAD),
        fit.predict(j_max + GRID_PAD, k_max + GRID_PAD),
    ];
    let (e_min, e_max) = min_max(data.iter().map(|d| d.2).chain(corner_energies));
    let e_margin = ((e_max - e_min).abs() * 0.1).max(1e-6);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .build_cartesian_3d(
            (j_min - GRID_PAD)..(j_max + GRID_PAD),
            (e_min - e_margin)..(e_max + e_margin),
            (k_min - GRID_PAD)..(k_max + GRID_PAD),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    chart.with_projection(|mut pb| {
        pb.pitch = 0.3;
        pb.yaw = 0.7;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let surface_color = RGBColor(0, 102, 204);
    chart
        .draw_series(
            SurfaceSeries::xoz(
                j_grid.iter().copied(),
                k_grid.iter().copied(),
                |j, k| fit.predict(j, k),
            )
            .style(surface_color.mix(0.4).filled()),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    // 数据散点，黑色，与曲面对照
    chart
        .draw_series(
            data.iter()
                .map(|&(j, k, e)| Circle::new((j, e, k), 4, BLACK.filled())),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    Ok(())
}

/// 绘制奇偶校验图的核心逻辑
fn draw_parity_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    fit: &PlaneFit,
    data: &[(f64, f64, f64)],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let points: Vec<(f64, f64)> = data
        .iter()
        .map(|&(j, k, e)| (fit.predict(j, k), e))
        .collect();

    let (lo, hi) = min_max(points.iter().flat_map(|&(m, c)| [m, c].into_iter()));
    let margin = ((hi - lo).abs() * 0.05).max(1e-6);
    let range = (lo - margin)..(hi + margin);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 20).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(range.clone(), range.clone())
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Energy (Model)")
        .y_desc("Energy (Computed)")
        .x_label_style(("sans-serif", 14))
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    // 对角参考线
    chart
        .draw_series(LineSeries::new(
            vec![(range.start, range.start), (range.end, range.end)],
            BLACK.mix(0.4).stroke_width(1),
        ))
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let marker_fill = RGBColor(0, 102, 204);
    let marker_edge = RGBColor(47, 79, 79);
    chart
        .draw_series(
            points
                .iter()
                .map(|&(m, c)| Circle::new((m, c), 6, marker_fill.filled())),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(m, c)| Circle::new((m, c), 6, marker_edge.stroke_width(2))),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_values_cover_padded_range() {
        let grid = grid_values(0.0, 8.0);
        assert!((grid[0] - (-5.0)).abs() < 1e-12);
        assert!(*grid.last().unwrap() >= 13.0);
        // 步长 0.5
        assert!((grid[1] - grid[0] - GRID_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_min_max() {
        let (lo, hi) = min_max([3.0, -1.0, 2.0].into_iter());
        assert_eq!(lo, -1.0);
        assert_eq!(hi, 3.0);
    }
}
