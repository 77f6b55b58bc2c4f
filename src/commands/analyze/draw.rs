//! # analyze draw 子命令实现
//!
//! 按 enum.x 结构编号绘制三维晶体构型：
//! 每个格点一个散点，颜色由该位的物种索引决定。
//!
//! ## 依赖关系
//! - 使用 `cli/analyze.rs` 定义的参数
//! - 使用 `parsers/xyz.rs`, `parsers/enumx.rs`, `models/config.rs`
//! - 使用 `utils/output.rs`
//! - 使用 `plotters` 渲染图表

use crate::cli::analyze::DrawArgs;
use crate::error::{JkUtilityError, Result};
use crate::models::config::phase_name;
use crate::models::Configuration;
use crate::parsers::{enumx, xyz};
use crate::utils::output;

use plotters::prelude::*;

/// 物种索引 -> 散点颜色（blue, red, green, purple）
const SPECIES_COLORS: [RGBColor; 4] = [
    RGBColor(0, 0, 255),
    RGBColor(255, 0, 0),
    RGBColor(0, 128, 0),
    RGBColor(128, 0, 128),
];

/// 执行 analyze draw 子命令
pub fn execute(args: DrawArgs) -> Result<()> {
    output::print_header("Drawing Crystal Configuration");

    let table = xyz::parse_xyz_file(&args.xyz)?;
    let num_species = table.species_count();

    let labelings = enumx::parse_enumx_file(&args.enum_file, args.labeling_column)?;
    let labeling = enumx::labeling_for_uid(&labelings, args.uid)?;
    let config = Configuration::parse(labeling)?;

    if config.len() != table.len() {
        return Err(JkUtilityError::ConfigLengthMismatch {
            config: config.as_str().to_string(),
            expected: table.len(),
            got: config.len(),
        });
    }

    // 笛卡尔坐标与物种颜色
    let mut points: Vec<([f64; 3], RGBColor)> = Vec::with_capacity(table.len());
    for (site, &digit) in table.sites.iter().zip(config.digits()) {
        let color = SPECIES_COLORS
            .get(digit as usize)
            .copied()
            .ok_or_else(|| {
                JkUtilityError::InvalidArgument(format!(
                    "Species index {} has no assigned color (at most {} species supported)",
                    digit,
                    SPECIES_COLORS.len()
                ))
            })?;
        points.push((table.lattice.to_cartesian(site.position), color));
    }

    let title = phase_name(args.uid, num_species);
    output::print_info(&format!(
        "Structure {} ({}): {} sites, {} species",
        args.uid,
        title,
        table.len(),
        num_species
    ));

    if args.svg {
        let root = SVGBackend::new(&args.output, (args.size, args.size)).into_drawing_area();
        draw_configuration_chart(&root, &points, &title)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(&args.output, (args.size, args.size)).into_drawing_area();
        draw_configuration_chart(&root, &points, &title)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    }

    output::print_success(&format!(
        "Configuration rendered to '{}'",
        args.output.display()
    ));

    Ok(())
}

/// 绘制三维构型散点的核心逻辑（不画坐标轴）
fn draw_configuration_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    points: &[([f64; 3], RGBColor)],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let (mut lo, mut hi) = ([f64::INFINITY; 3], [f64::NEG_INFINITY; 3]);
    for (p, _) in points {
        for axis in 0..3 {
            lo[axis] = lo[axis].min(p[axis]);
            hi[axis] = hi[axis].max(p[axis]);
        }
    }
    let margin = |lo: f64, hi: f64| ((hi - lo).abs() * 0.15).max(0.5);
    let mx = margin(lo[0], hi[0]);
    let my = margin(lo[1], hi[1]);
    let mz = margin(lo[2], hi[2]);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .build_cartesian_3d(
            (lo[0] - mx)..(hi[0] + mx),
            (lo[1] - my)..(hi[1] + my),
            (lo[2] - mz)..(hi[2] + mz),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    chart.with_projection(|mut pb| {
        pb.pitch = 0.4;
        pb.yaw = 0.6;
        pb.scale = 0.9;
        pb.into_matrix()
    });

    // 构型图不画坐标轴，只看格点着色
    chart
        .draw_series(
            points
                .iter()
                .map(|&(p, color)| Circle::new((p[0], p[1], p[2]), 9, color.filled())),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    Ok(())
}
