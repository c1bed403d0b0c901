//! # process 子命令 CLI 定义
//!
//! 对已下载的本地 netCDF 文件生成 CSV 表
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/process.rs`

use super::compute::ComputeArgs;

use clap::Args;
use std::path::PathBuf;

/// process 子命令参数
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// A netCDF file or a directory of files
    pub input: PathBuf,

    /// Glob pattern for input files (comma-separated for several)
    #[arg(short, long, default_value = "*.nc4")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Output CSV file
    #[arg(short, long, default_value = "merra2_site.csv")]
    pub output: PathBuf,

    /// Stop at the first failing file (the partial CSV is still written)
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    #[command(flatten)]
    pub compute: ComputeArgs,
}
