//! # analyze map 子命令实现
//!
//! 把 UID 网格渲染成对角化相图热力图。
//! 每个格子取 z = uid²·(-1)^uid，颜色在 #800020 与 #208000 之间线性插值，
//! 两轴都是 [-1, 1] 上的等距坐标。
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用 `parsers/xyz.rs`, `models/config.rs`
//! - 使用 `utils/output.rs`
//! - 使用 `csv` 读取网格、`plotters` 渲染图表

use crate::cli::analyze::MapArgs;
use crate::error::{JkUtilityError, Result};
use crate::models::config::phase_name;
use crate::parsers::xyz;
use crate::utils::output;

use plotters::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

/// 色带端点：#800020 (z 最小) -> #208000 (z 最大)
const RAMP_LO: (f64, f64, f64) = (128.0, 0.0, 32.0);
const RAMP_HI: (f64, f64, f64) = (32.0, 128.0, 0.0);

/// 执行 analyze map 子命令
pub fn execute(args: MapArgs) -> Result<()> {
    output::print_header("Rendering Phase Diagram Heatmap");

    let table = xyz::parse_xyz_file(&args.xyz)?;
    let num_species = table.species_count();

    let grid = read_uid_grid(&args.csv)?;
    output::print_info(&format!(
        "UID grid: {} x {} cells",
        grid.len(),
        grid.first().map(|r| r.len()).unwrap_or(0)
    ));

    // 命名相清单（代替交互式悬浮标签）
    let distinct: BTreeSet<u64> = grid.iter().flatten().copied().collect();
    for uid in &distinct {
        let name = phase_name(*uid, num_species);
        if !name.starts_with("Unknown") {
            output::print_info(&format!("UID {}: {}", uid, name));
        }
    }

    let title = format!("{}-Species Diagonalized Phase Diagram", num_species);

    if args.svg {
        let root = SVGBackend::new(&args.output, (args.size, args.size)).into_drawing_area();
        draw_heatmap_chart(&root, &grid, &title)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(&args.output, (args.size, args.size)).into_drawing_area();
        draw_heatmap_chart(&root, &grid, &title)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    }

    output::print_success(&format!("Heatmap saved to '{}'", args.output.display()));

    Ok(())
}

/// 读取无表头的 UID 网格 CSV
///
/// 行尾逗号产生的空字段直接忽略。
fn read_uid_grid(path: &Path) -> Result<Vec<Vec<u64>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(JkUtilityError::CsvError)?;

    let mut grid = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(JkUtilityError::CsvError)?;
        let mut row = Vec::new();
        for field in record.iter() {
            if field.is_empty() {
                continue;
            }
            let uid: u64 = field.parse().map_err(|_| JkUtilityError::ParseError {
                format: "uid grid".to_string(),
                path: path.display().to_string(),
                reason: format!("'{}' is not an unsigned integer", field),
            })?;
            row.push(uid);
        }
        if !row.is_empty() {
            grid.push(row);
        }
    }

    if grid.is_empty() {
        return Err(JkUtilityError::ParseError {
            format: "uid grid".to_string(),
            path: path.display().to_string(),
            reason: "No grid rows".to_string(),
        });
    }

    Ok(grid)
}

/// 对角化的格子值：uid²·(-1)^uid
fn cell_value(uid: u64) -> f64 {
    let sign = if uid % 2 == 0 { 1.0 } else { -1.0 };
    (uid as f64) * (uid as f64) * sign
}

/// [-1, 1] 上的等距坐标
fn linspace_unit(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![-1.0];
    }
    let step = 2.0 / (n as f64 - 1.0);
    (0..n).map(|i| -1.0 + i as f64 * step).collect()
}

/// 线性插值色带
fn ramp_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(
        lerp(RAMP_LO.0, RAMP_HI.0),
        lerp(RAMP_LO.1, RAMP_HI.1),
        lerp(RAMP_LO.2, RAMP_HI.2),
    )
}

/// 绘制热力图的核心逻辑
fn draw_heatmap_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    grid: &[Vec<u64>],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let n_rows = grid.len();
    let n_cols = grid.iter().map(|r| r.len()).max().unwrap_or(0);

    let values: Vec<Vec<f64>> = grid
        .iter()
        .map(|row| row.iter().map(|&uid| cell_value(uid)).collect())
        .collect();
    let (z_min, z_max) = values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let z_span = if (z_max - z_min).abs() < f64::EPSILON {
        1.0
    } else {
        z_max - z_min
    };

    let ys = linspace_unit(n_rows);
    let xs = linspace_unit(n_cols);
    let half_x = if n_cols > 1 { 1.0 / (n_cols as f64 - 1.0) } else { 1.0 };
    let half_y = if n_rows > 1 { 1.0 / (n_rows as f64 - 1.0) } else { 1.0 };

    let pad_x = half_x;
    let pad_y = half_y;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 22).into_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (-1.0 - pad_x)..(1.0 + pad_x),
            (-1.0 - pad_y)..(1.0 + pad_y),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("K (next-nearest-neighbor interaction strength)")
        .y_desc("J (nearest-neighbor interaction strength)")
        .x_label_style(("sans-serif", 14))
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    for (r, row) in values.iter().enumerate() {
        for (c, &z) in row.iter().enumerate() {
            let t = (z - z_min) / z_span;
            let color = ramp_color(t);
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [
                        (xs[c] - half_x, ys[r] - half_y),
                        (xs[c] + half_x, ys[r] + half_y),
                    ],
                    color.filled(),
                )))
                .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_alternates_sign() {
        assert_eq!(cell_value(0), 0.0);
        assert_eq!(cell_value(1), -1.0);
        assert_eq!(cell_value(2), 4.0);
        assert_eq!(cell_value(3), -9.0);
        assert_eq!(cell_value(58), 58.0 * 58.0);
        assert_eq!(cell_value(59), -(59.0 * 59.0));
    }

    #[test]
    fn test_linspace_unit() {
        let vals = linspace_unit(5);
        assert_eq!(vals.len(), 5);
        assert!((vals[0] + 1.0).abs() < 1e-12);
        assert!((vals[2]).abs() < 1e-12);
        assert!((vals[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ramp_color_endpoints() {
        assert_eq!(ramp_color(0.0), RGBColor(128, 0, 32));
        assert_eq!(ramp_color(1.0), RGBColor(32, 128, 0));
    }

    #[test]
    fn test_read_uid_grid_ignores_trailing_empties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.csv");
        std::fs::write(&path, "59,58,59,\n58,59,58,\n").unwrap();

        let grid = read_uid_grid(&path).unwrap();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0], vec![59, 58, 59]);
        assert_eq!(grid[1], vec![58, 59, 58]);
    }

    #[test]
    fn test_read_uid_grid_rejects_non_integer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.csv");
        std::fs::write(&path, "1,x\n").unwrap();
        assert!(read_uid_grid(&path).is_err());
    }
}
