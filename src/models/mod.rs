//! # 数据模型模块
//!
//! 定义晶格、格点表和构型的统一数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: structure, config

pub mod config;
pub mod structure;

pub use config::Configuration;
pub use structure::{Lattice, Site, SiteTable};
