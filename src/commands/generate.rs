//! # generate 命令实现
//!
//! 根据构型表批量生成 variation 坐标文件。
//!
//! ## 功能
//! - 解析模板坐标文件，建立物种 -> (原子序数, 符号) 查找表
//! - 对每个构型行计算 UID 并渲染替换后的坐标文件
//! - 写入 `OUTPUT/variation_<uid>/XYZ`，已存在的目录计为跳过
//! - 支持并行处理
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `parsers/xyz.rs`, `parsers/jkconfig.rs`, `models/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::generate::GenerateArgs;
use crate::error::{JkUtilityError, Result};
use crate::parsers::{jkconfig, xyz};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 执行 generate 命令
pub fn execute(args: GenerateArgs) -> Result<()> {
    output::print_header("Generating Configuration Variations");

    // 解析模板
    let table = xyz::parse_xyz_file(&args.xyz)?;
    let species_map = table.species_map();
    let radix = species_map.len();
    output::print_info(&format!(
        "Template '{}': {} sites, {} species",
        args.xyz.display(),
        table.len(),
        radix
    ));

    // 读取构型表
    let records = jkconfig::parse_jkconfig_file(&args.jkconfigs)?;
    if records.is_empty() {
        output::print_warning("Configuration table is empty, nothing to generate.");
        return Ok(());
    }
    output::print_info(&format!("Loaded {} configurations", records.len()));

    // 先整体校验：位数、物种范围、UID 溢出都在写盘前报错
    let mut variations: Vec<(u64, String)> = Vec::with_capacity(records.len());
    for record in &records {
        let uid = record.config.uid(radix)?;
        let content = xyz::render_variation_file(&table, &record.config, &species_map)?;
        variations.push((uid, content));
    }

    // 创建输出根目录
    fs::create_dir_all(&args.output).map_err(|e| JkUtilityError::DirectoryCreateError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    // 设置并行度
    let num_threads = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();

    let pb = progress::create_progress_bar(variations.len() as u64, "Writing");
    let success_count = AtomicUsize::new(0);
    let skip_count = AtomicUsize::new(0);

    // 并行写出；单个 variation 失败只报告并继续
    variations.par_iter().for_each(|(uid, content)| {
        match write_variation(&args.output, *uid, content, args.overwrite) {
            Ok(GenerateStatus::Success) => {
                success_count.fetch_add(1, Ordering::SeqCst);
            }
            Ok(GenerateStatus::Skipped) => {
                skip_count.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                pb.suspend(|| {
                    output::print_error(&format!("variation_{}: {}", uid, e));
                });
            }
        }
        pb.inc(1);
    });

    pb.finish_with_message("Done");

    output::print_done(&format!(
        "Wrote {} variation(s) to '{}' ({} skipped)",
        success_count.load(Ordering::SeqCst),
        args.output.display(),
        skip_count.load(Ordering::SeqCst)
    ));

    Ok(())
}

enum GenerateStatus {
    Success,
    Skipped,
}

/// 写出单个 variation 目录与坐标文件
fn write_variation(
    output_root: &Path,
    uid: u64,
    content: &str,
    overwrite: bool,
) -> Result<GenerateStatus> {
    let dirpath = output_root.join(format!("variation_{}", uid));

    if dirpath.exists() && !overwrite {
        return Ok(GenerateStatus::Skipped);
    }

    fs::create_dir_all(&dirpath).map_err(|e| JkUtilityError::DirectoryCreateError {
        path: dirpath.display().to_string(),
        source: e,
    })?;

    let file_path = dirpath.join("XYZ");
    fs::write(&file_path, content).map_err(|e| JkUtilityError::FileWriteError {
        path: file_path.display().to_string(),
        source: e,
    })?;

    Ok(GenerateStatus::Success)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::generate::GenerateArgs;
    use tempfile::tempdir;

    const TEMPLATE: &str = "\
1.0 0.0 0.0
0.0 1.0 0.0
0.0 0.0 1.0
4
0.00 0.00 0.00 26 1 Fe
0.50 0.50 0.50 26 1 Fe
0.25 0.25 0.25 13 2 Al
0.75 0.75 0.75 13 2 Al
";

    #[test]
    fn test_write_variation_and_skip() {
        let dir = tempdir().unwrap();

        let status = write_variation(dir.path(), 6, "content\n", false).unwrap();
        assert!(matches!(status, GenerateStatus::Success));
        assert_eq!(
            fs::read_to_string(dir.path().join("variation_6/XYZ")).unwrap(),
            "content\n"
        );

        // 已存在则跳过，内容保持不变
        let status = write_variation(dir.path(), 6, "other\n", false).unwrap();
        assert!(matches!(status, GenerateStatus::Skipped));
        assert_eq!(
            fs::read_to_string(dir.path().join("variation_6/XYZ")).unwrap(),
            "content\n"
        );

        // overwrite 强制重写
        let status = write_variation(dir.path(), 6, "other\n", true).unwrap();
        assert!(matches!(status, GenerateStatus::Success));
        assert_eq!(
            fs::read_to_string(dir.path().join("variation_6/XYZ")).unwrap(),
            "other\n"
        );
    }

    #[test]
    fn test_execute_end_to_end() {
        let dir = tempdir().unwrap();
        let xyz_path = dir.path().join("XYZ");
        let csv_path = dir.path().join("jkconfig.csv");
        let out_path = dir.path().join("out");
        fs::write(&xyz_path, TEMPLATE).unwrap();
        // 0110 radix 2 -> uid 6, 1100 -> uid 3
        fs::write(&csv_path, "4,-4,0110\n-8,0,1100\n").unwrap();

        execute(GenerateArgs {
            xyz: xyz_path,
            output: out_path.clone(),
            jkconfigs: csv_path,
            jobs: 1,
            overwrite: false,
        })
        .unwrap();

        let v6 = fs::read_to_string(out_path.join("variation_6/XYZ")).unwrap();
        let reparsed = xyz::parse_xyz_content(&v6, "v6").unwrap();
        let species: Vec<usize> = reparsed.sites.iter().map(|s| s.species).collect();
        assert_eq!(species, vec![1, 2, 2, 1]);
        // 物种 2 的格点带上物种 2 的原子序数与符号
        assert_eq!(reparsed.sites[1].atomic_number, 13);
        assert_eq!(reparsed.sites[1].symbol, "Al");

        assert!(out_path.join("variation_3/XYZ").exists());
    }

    #[test]
    fn test_execute_rejects_length_mismatch() {
        let dir = tempdir().unwrap();
        let xyz_path = dir.path().join("XYZ");
        let csv_path = dir.path().join("jkconfig.csv");
        fs::write(&xyz_path, TEMPLATE).unwrap();
        fs::write(&csv_path, "1,1,01\n").unwrap();

        let result = execute(GenerateArgs {
            xyz: xyz_path,
            output: dir.path().join("out"),
            jkconfigs: csv_path,
            jobs: 1,
            overwrite: false,
        });
        assert!(matches!(
            result,
            Err(JkUtilityError::ConfigLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_execute_rejects_digit_out_of_range() {
        let dir = tempdir().unwrap();
        let xyz_path = dir.path().join("XYZ");
        let csv_path = dir.path().join("jkconfig.csv");
        fs::write(&xyz_path, TEMPLATE).unwrap();
        // 模板只有两个物种，数字 2 越界
        fs::write(&csv_path, "1,1,0120\n").unwrap();

        let result = execute(GenerateArgs {
            xyz: xyz_path,
            output: dir.path().join("out"),
            jkconfigs: csv_path,
            jobs: 1,
            overwrite: false,
        });
        assert!(matches!(
            result,
            Err(JkUtilityError::SpeciesOutOfRange { .. })
        ));
    }
}
