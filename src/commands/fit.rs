//! # fit 命令实现
//!
//! 把计算能量拟合为 (J, K) 的仿射函数并可视化。
//!
//! ## 功能
//! - 读取构型表与能量表，按 UID 连接
//! - 普通最小二乘拟合 E ≈ cJ·J + cK·K + c0
//! - 终端系数表格 + 每构型结果 CSV
//! - 可选绘制拟合曲面与奇偶校验图
//!
//! ## 依赖关系
//! - 使用 `cli/fit.rs` 定义的参数
//! - 使用 `parsers/jkconfig.rs`, `parsers/energy.rs`
//! - 使用 `fitting/`
//! - 使用 `utils/output.rs`

use crate::cli::fit::FitArgs;
use crate::error::{JkUtilityError, Result};
use crate::fitting::{self, fit_plane, PlaneFit};
use crate::parsers::energy::{self, EnergyRecord};
use crate::parsers::jkconfig::{self, JkRecord};
use crate::utils::output;

use std::collections::HashMap;
use std::path::Path;
use tabled::{Table, Tabled};

/// 奇偶校验图的边长（像素）
const PARITY_SIZE: u32 = 600;

/// 系数表格行
#[derive(Debug, Tabled)]
struct CoefficientRow {
    #[tabled(rename = "Term")]
    term: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// 连接后的一条拟合样本
#[derive(Debug, Clone)]
struct JoinedRow {
    uid: u64,
    j: f64,
    k: f64,
    energy: f64,
}

/// 执行 fit 命令
pub fn execute(args: FitArgs) -> Result<()> {
    output::print_header("Fitting J-K Interaction Model");

    let records = jkconfig::parse_jkconfig_file(&args.jkconfigs)?;
    output::print_info(&format!(
        "Loaded {} configurations from '{}'",
        records.len(),
        args.jkconfigs.display()
    ));

    let energies = energy::parse_energy_file(&args.energies)?;
    output::print_info(&format!(
        "Loaded {} energies from '{}'",
        energies.len(),
        args.energies.display()
    ));

    let radix = if args.species > 0 {
        args.species
    } else {
        infer_radix(&records)?
    };
    output::print_info(&format!("UID radix (species count): {}", radix));

    let joined = join_energies(&records, &energies, radix)?;
    let samples: Vec<(f64, f64, f64)> = joined.iter().map(|r| (r.j, r.k, r.energy)).collect();

    let fit = fit_plane(&samples)?;

    // 系数报告
    let rows = vec![
        CoefficientRow {
            term: "J (nearest-neighbor)".to_string(),
            value: format!("{:.10e}", fit.j_coeff),
        },
        CoefficientRow {
            term: "K (next-nearest-neighbor)".to_string(),
            value: format!("{:.10e}", fit.k_coeff),
        },
        CoefficientRow {
            term: "Intercept".to_string(),
            value: format!("{:.10e}", fit.intercept),
        },
        CoefficientRow {
            term: "J/K ratio".to_string(),
            value: format!("{:.6}", fit.ratio()),
        },
    ];
    let table = Table::new(&rows);
    println!("{}", table);

    // 裸系数输出，便于脚本截取
    println!("{}", fit.j_coeff);
    println!("{}", fit.k_coeff);
    println!("{}", fit.intercept);

    save_results_csv(&joined, &fit, &args.output_csv)?;
    output::print_success(&format!(
        "Per-configuration results saved to '{}'",
        args.output_csv.display()
    ));

    if !args.no_plot {
        let surface_title = format!("Fit for {} Species: J/K = {:.4}", radix, fit.ratio());
        fitting::plot::generate_surface_plot(
            &fit,
            &samples,
            &args.surface,
            &surface_title,
            args.width,
            args.height,
            args.svg,
        )?;
        output::print_success(&format!(
            "Surface plot saved to '{}'",
            args.surface.display()
        ));

        let parity_title = format!(
            "Parity Plot for {} Species J-K Model: J = {:.2E}, K = {:.2E}",
            radix, fit.j_coeff, fit.k_coeff
        );
        fitting::plot::generate_parity_plot(
            &fit,
            &samples,
            &args.parity,
            &parity_title,
            PARITY_SIZE,
            args.svg,
        )?;
        output::print_success(&format!("Parity plot saved to '{}'", args.parity.display()));
    }

    Ok(())
}

/// 从整张构型表推断 UID 基数（最大物种索引 + 1）
fn infer_radix(records: &[JkRecord]) -> Result<usize> {
    let max_digit = records
        .iter()
        .map(|r| r.config.max_digit())
        .max()
        .ok_or_else(|| {
            JkUtilityError::InvalidArgument("Configuration table is empty".to_string())
        })?;
    Ok(max_digit as usize + 1)
}

/// 把能量表的每一行连接到构型表的 (J, K)
///
/// 同一 UID 出现多次时取首行；能量表中出现未知 UID 是致命错误。
fn join_energies(
    records: &[JkRecord],
    energies: &[EnergyRecord],
    radix: usize,
) -> Result<Vec<JoinedRow>> {
    let mut jk_by_uid: HashMap<u64, (f64, f64)> = HashMap::new();
    for record in records {
        let uid = record.config.uid(radix)?;
        jk_by_uid.entry(uid).or_insert((record.j, record.k));
    }

    let mut joined = Vec::with_capacity(energies.len());
    for record in energies {
        let (j, k) = jk_by_uid
            .get(&record.uid)
            .copied()
            .ok_or(JkUtilityError::UidNotFound { uid: record.uid })?;
        joined.push(JoinedRow {
            uid: record.uid,
            j,
            k,
            energy: record.energy,
        });
    }
    Ok(joined)
}

/// 保存每构型结果到 CSV
fn save_results_csv(joined: &[JoinedRow], fit: &PlaneFit, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(JkUtilityError::CsvError)?;

    wtr.write_record(["uid", "j", "k", "energy_computed", "energy_model"])
        .map_err(JkUtilityError::CsvError)?;

    for row in joined {
        wtr.write_record(&[
            row.uid.to_string(),
            row.j.to_string(),
            row.k.to_string(),
            format!("{:.10}", row.energy),
            format!("{:.10}", fit.predict(row.j, row.k)),
        ])
        .map_err(JkUtilityError::CsvError)?;
    }

    wtr.flush().map_err(|e| JkUtilityError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
