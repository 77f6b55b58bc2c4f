//! # 统一错误处理模块
//!
//! 定义 JKutility 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// JKutility 统一错误类型
#[derive(Error, Debug)]
pub enum JkUtilityError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory: {path}")]
    DirectoryCreateError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 构型与 UID 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration '{config}' has {got} digits, expected {expected} (one per site)")]
    ConfigLengthMismatch {
        config: String,
        expected: usize,
        got: usize,
    },

    #[error("Configuration '{config}' contains digit {digit}, but only {species} species are defined")]
    SpeciesOutOfRange {
        config: String,
        digit: u8,
        species: usize,
    },

    #[error("Configuration UID overflows 64 bits (radix {radix}, {digits} digits)")]
    UidOverflow { radix: usize, digits: usize },

    #[error("UID {uid} from the energy table has no matching configuration")]
    UidNotFound { uid: u64 },

    // ─────────────────────────────────────────────────────────────
    // 数值错误
    // ─────────────────────────────────────────────────────────────
    #[error("Fewer than two distinct nonzero site distances; cannot identify J/K shells")]
    DegenerateShells,

    #[error("Singular least-squares system: (J, K) samples are collinear")]
    SingularFit,

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, JkUtilityError>;
