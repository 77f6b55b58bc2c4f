//! # analyze radial 子命令实现
//!
//! 把 (J, K, θ, ID) 表渲染成径向扇区图：
//! 每个 θ 上的行按文件顺序向外堆叠，径向厚度 1/该 θ 的行数，
//! 角向宽度 360°/不同 θ 数，颜色按 ID 在全表中的排位取色。
//! 表的最后一行是哨兵行，渲染前丢弃。
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用 `parsers/xyz.rs`, `models/config.rs`
//! - 使用 `utils/output.rs`
//! - 使用 `csv` 读取、`plotters` 渲染图表

use crate::cli::analyze::RadialArgs;
use crate::error::{JkUtilityError, Result};
use crate::models::config::phase_name;
use crate::parsers::xyz;
use crate::utils::output;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use serde::Deserialize;
use std::f64::consts::PI;
use std::path::Path;

/// 扇区图使用的平面直角图表
type DiscChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// 径向表的一行
#[derive(Debug, Clone, Deserialize)]
struct RadialRow {
    j: f64,
    k: f64,
    theta: f64,
    id: u64,
}

/// 执行 analyze radial 子命令
pub fn execute(args: RadialArgs) -> Result<()> {
    output::print_header("Rendering Radial J-K Plot");

    let table = xyz::parse_xyz_file(&args.xyz)?;
    let num_species = table.species_count();

    let mut rows = read_radial_rows(&args.csv)?;
    // 末行是闭合哨兵
    rows.pop();
    if rows.len() < 2 {
        return Err(JkUtilityError::InvalidArgument(
            "Radial table needs at least 3 rows (including the sentinel row)".to_string(),
        ));
    }
    let (j_lo, j_hi) = value_bounds(rows.iter().map(|r| r.j));
    let (k_lo, k_hi) = value_bounds(rows.iter().map(|r| r.k));
    output::print_info(&format!(
        "{} sectors, J in [{:.6}, {:.6}], K in [{:.6}, {:.6}]",
        rows.len(),
        j_lo,
        j_hi,
        k_lo,
        k_hi
    ));

    let file_label = args
        .csv
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| args.csv.display().to_string());
    let title = format!("Radial J-K Plot of {}", file_label);

    if args.svg {
        let root = SVGBackend::new(&args.output, (args.size, args.size)).into_drawing_area();
        draw_radial_chart(&root, &rows, &title, num_species, args.legend)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(&args.output, (args.size, args.size)).into_drawing_area();
        draw_radial_chart(&root, &rows, &title, num_species, args.legend)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    }

    output::print_success(&format!(
        "Radial plot saved to '{}'",
        args.output.display()
    ));

    Ok(())
}

/// 读取无表头的 (J, K, θ, ID) CSV
fn read_radial_rows(path: &Path) -> Result<Vec<RadialRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(JkUtilityError::CsvError)?;

    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row.map_err(JkUtilityError::CsvError)?);
    }
    Ok(rows)
}

fn value_bounds<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// 每行 ID 在全表不同 ID（升序）中的排位
fn id_ranks(ids: &[u64]) -> (Vec<usize>, usize) {
    let mut distinct: Vec<u64> = ids.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    let ranks = ids
        .iter()
        .map(|id| distinct.binary_search(id).expect("id from same list"))
        .collect();
    (ranks, distinct.len())
}

/// 每行所在 θ 的行数
fn theta_counts(thetas: &[f64]) -> Vec<usize> {
    thetas
        .iter()
        .map(|t| {
            thetas
                .iter()
                .filter(|u| u.to_bits() == t.to_bits())
                .count()
        })
        .collect()
}

/// 不同 θ 的数量
fn distinct_theta_count(thetas: &[f64]) -> usize {
    let mut bits: Vec<u64> = thetas.iter().map(|t| t.to_bits()).collect();
    bits.sort_unstable();
    bits.dedup();
    bits.len()
}

/// 每行扇区的径向起点：同一 θ 的行按文件顺序向外堆叠
fn stack_offsets(thetas: &[f64], extents: &[f64]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(thetas.len());
    for (i, t) in thetas.iter().enumerate() {
        let offset: f64 = thetas[..i]
            .iter()
            .zip(&extents[..i])
            .filter(|(u, _)| u.to_bits() == t.to_bits())
            .map(|(_, e)| e)
            .sum();
        offsets.push(offset);
    }
    offsets
}

/// 绘制径向扇区图的核心逻辑
fn draw_radial_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    rows: &[RadialRow],
    title: &str,
    num_species: usize,
    legend: bool,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let thetas: Vec<f64> = rows.iter().map(|r| r.theta).collect();
    let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();

    let (ranks, n_ids) = id_ranks(&ids);
    let counts = theta_counts(&thetas);
    let extents: Vec<f64> = counts.iter().map(|&c| 1.0 / c as f64).collect();
    let offsets = stack_offsets(&thetas, &extents);
    let half_width = PI / distinct_theta_count(&thetas) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 22).into_font())
        .margin(20)
        .build_cartesian_2d(-1.1f64..1.1f64, -1.1f64..1.1f64)
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    for (i, row) in rows.iter().enumerate() {
        let inner = offsets[i];
        let outer = offsets[i] + extents[i];
        let color = sector_color(ranks[i], n_ids);
        chart
            .draw_series(std::iter::once(Polygon::new(
                sector_points(row.theta, half_width, inner, outer),
                color.filled(),
            )))
            .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;
    }

    if legend {
        draw_phase_legend(&mut chart, &ids, &ranks, n_ids, num_species)?;
    }

    Ok(())
}

/// 按 ID 排位取色
fn sector_color(rank: usize, n_ids: usize) -> HSLColor {
    let frac = if n_ids > 1 {
        rank as f64 / (n_ids - 1) as f64
    } else {
        0.0
    };
    HSLColor(0.8 * frac, 0.7, 0.5)
}

/// 环形扇区的顶点序列：外弧正向 + 内弧反向
fn sector_points(theta: f64, half_width: f64, inner: f64, outer: f64) -> Vec<(f64, f64)> {
    let lo = theta - half_width;
    let hi = theta + half_width;
    let steps = ((hi - lo) / 0.03).ceil().max(4.0) as usize;

    let arc = |radius: f64, reverse: bool| {
        (0..=steps).map(move |s| {
            let s = if reverse { steps - s } else { s };
            let ang = lo + (hi - lo) * s as f64 / steps as f64;
            (radius * ang.cos(), radius * ang.sin())
        })
    };

    let mut points: Vec<(f64, f64)> = arc(outer, false).collect();
    points.extend(arc(inner, true));
    points
}

/// 左上角的相名图例
fn draw_phase_legend<DB: DrawingBackend>(
    chart: &mut DiscChart<'_, DB>,
    ids: &[u64],
    ranks: &[usize],
    n_ids: usize,
    num_species: usize,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let mut seen: Vec<(u64, usize)> = ids.iter().copied().zip(ranks.iter().copied()).collect();
    seen.sort_unstable();
    seen.dedup();

    for (slot, (id, rank)) in seen.iter().enumerate() {
        let y = 1.05 - 0.07 * slot as f64;
        let color = sector_color(*rank, n_ids);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(-1.08, y - 0.02), (-1.03, y + 0.02)],
                color.filled(),
            )))
            .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;
        chart
            .draw_series(std::iter::once(Text::new(
                phase_name(*id, num_species),
                (-1.0, y),
                ("sans-serif", 13).into_font().color(&BLACK),
            )))
            .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ranks_sorted_distinct() {
        let (ranks, n) = id_ranks(&[59, 58, 59, 1]);
        assert_eq!(n, 3);
        // 不同 ID 升序: [1, 58, 59]
        assert_eq!(ranks, vec![2, 1, 2, 0]);
    }

    #[test]
    fn test_theta_counts() {
        let counts = theta_counts(&[0.0, 0.0, 1.5, 0.0, 1.5]);
        assert_eq!(counts, vec![3, 3, 2, 3, 2]);
    }

    #[test]
    fn test_distinct_theta_count() {
        assert_eq!(distinct_theta_count(&[0.0, 0.0, 1.5, 3.0]), 3);
    }

    #[test]
    fn test_stack_offsets() {
        let thetas = [0.0, 0.0, 1.5, 0.0];
        let extents = [0.25, 0.25, 0.5, 0.25];
        let offsets = stack_offsets(&thetas, &extents);
        assert_eq!(offsets, vec![0.0, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn test_stacked_extents_fill_unit_disc() {
        // 同一 θ 的行堆叠后总厚度为 1
        let thetas = [0.7, 0.7, 0.7];
        let counts = theta_counts(&thetas);
        let extents: Vec<f64> = counts.iter().map(|&c| 1.0 / c as f64).collect();
        let offsets = stack_offsets(&thetas, &extents);
        let top = offsets[2] + extents[2];
        assert!((top - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sector_points_closed_ring_segment() {
        let points = sector_points(0.0, 0.1, 0.5, 1.0);
        // 外弧与内弧各 steps+1 个点
        assert!(points.len() >= 10);
        // 所有点的半径都在 [inner, outer] 内
        for (x, y) in points {
            let r = (x * x + y * y).sqrt();
            assert!(r > 0.49 && r < 1.01);
        }
    }

    #[test]
    fn test_sector_color_range() {
        let c0 = sector_color(0, 5);
        let c4 = sector_color(4, 5);
        assert!(c0.0 < 1e-12);
        assert!((c4.0 - 0.8).abs() < 1e-12);
        // 单一 ID 不除零
        let c = sector_color(0, 1);
        assert_eq!(c.0, 0.0);
    }
}
