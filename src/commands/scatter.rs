//! # scatter 命令实现
//!
//! 绘制构型表的 J-K 散点图，并按 (J, K) 去重列出代表构型。
//!
//! ## 依赖关系
//! - 使用 `cli/scatter.rs` 定义的参数
//! - 使用 `parsers/jkconfig.rs`
//! - 使用 `utils/output.rs`
//! - 使用 `plotters` 渲染图表

use crate::cli::scatter::ScatterArgs;
use crate::error::{JkUtilityError, Result};
use crate::parsers::jkconfig::{self, JkRecord};
use crate::utils::output;

use plotters::prelude::*;
use std::path::Path;
use tabled::{Table, Tabled};

/// 网格线间距，与原图 dtick=4 一致
const GRID_TICK: f64 = 4.0;

/// 去重后的一组 (J, K)
#[derive(Debug, Clone, Tabled)]
struct DedupGroup {
    #[tabled(rename = "J")]
    j: f64,
    #[tabled(rename = "K")]
    k: f64,
    #[tabled(rename = "Config")]
    config: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// 执行 scatter 命令
pub fn execute(args: ScatterArgs) -> Result<()> {
    output::print_header("J/K Configuration Scatter");

    let records = jkconfig::parse_jkconfig_file(&args.jkconfigs)?;
    if records.is_empty() {
        output::print_warning("Configuration table is empty, nothing to plot.");
        return Ok(());
    }
    output::print_info(&format!(
        "Loaded {} configurations from '{}'",
        records.len(),
        args.jkconfigs.display()
    ));

    generate_scatter_plot(&records, &args.output, args.width, args.height, args.svg)?;
    output::print_success(&format!(
        "Scatter plot saved to '{}'",
        args.output.display()
    ));

    let groups = dedup_groups(&records);
    println!("{}", Table::new(&groups));

    if let Some(path) = &args.dedup_csv {
        save_dedup_csv(&groups, path)?;
        output::print_success(&format!(
            "{} deduplicated row(s) saved to '{}'",
            groups.len(),
            path.display()
        ));
    }

    Ok(())
}

/// 按 (J, K) 分组，保留每组首个构型，按 J、K 升序排列
fn dedup_groups(records: &[JkRecord]) -> Vec<DedupGroup> {
    let mut groups: Vec<DedupGroup> = Vec::new();
    for record in records {
        match groups
            .iter_mut()
            .find(|g| g.j == record.j && g.k == record.k)
        {
            Some(group) => group.count += 1,
            None => groups.push(DedupGroup {
                j: record.j,
                k: record.k,
                config: record.config.as_str().to_string(),
                count: 1,
            }),
        }
    }
    groups.sort_by(|a, b| {
        a.j.partial_cmp(&b.j)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.k.partial_cmp(&b.k).unwrap_or(std::cmp::Ordering::Equal))
    });
    groups
}

/// 保存去重行为无表头 CSV（`J,K,构型`）
fn save_dedup_csv(groups: &[DedupGroup], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(JkUtilityError::CsvError)?;
    for group in groups {
        wtr.write_record(&[
            group.j.to_string(),
            group.k.to_string(),
            group.config.clone(),
        ])
        .map_err(JkUtilityError::CsvError)?;
    }
    wtr.flush().map_err(|e| JkUtilityError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// 生成 J-K 散点图
fn generate_scatter_plot(
    records: &[JkRecord],
    output_path: &Path,
    width: u32,
    height: u32,
    use_svg: bool,
) -> Result<()> {
    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_scatter_chart(&root, records)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_scatter_chart(&root, records)?;
        root.present()
            .map_err(|e| JkUtilityError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 绘制散点图的核心逻辑
fn draw_scatter_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    records: &[JkRecord],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let (j_min, j_max) = bounds(records.iter().map(|r| r.j));
    let (k_min, k_max) = bounds(records.iter().map(|r| r.k));

    // 轴范围向外取整到网格间距的整数倍
    let x_lo = (j_min / GRID_TICK).floor() * GRID_TICK - GRID_TICK;
    let x_hi = (j_max / GRID_TICK).ceil() * GRID_TICK + GRID_TICK;
    let y_lo = (k_min / GRID_TICK).floor() * GRID_TICK - GRID_TICK;
    let y_hi = (k_max / GRID_TICK).ceil() * GRID_TICK + GRID_TICK;

    let mut chart = ChartBuilder::on(root)
        .caption("J/K Configurations", ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("J")
        .y_desc("K")
        .x_labels(((x_hi - x_lo) / GRID_TICK) as usize + 1)
        .y_labels(((y_hi - y_lo) / GRID_TICK) as usize + 1)
        .x_label_style(("sans-serif", 14))
        .y_label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    let marker_color = RGBColor(0, 102, 204);
    chart
        .draw_series(
            records
                .iter()
                .map(|r| Circle::new((r.j, r.k), 4, marker_color.filled())),
        )
        .map_err(|e| JkUtilityError::Other(format!("{:?}", e)))?;

    Ok(())
}

fn bounds<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
