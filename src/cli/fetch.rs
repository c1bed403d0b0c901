//! # fetch 子命令 CLI 定义
//!
//! 读取 URL 清单，逐个下载 MERRA2 子集并生成一张 CSV 表
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fetch.rs`

use super::compute::ComputeArgs;
use crate::config::{HttpConfig, PipelineConfig};
use crate::error::Result;

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

/// fetch 子命令参数
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Text file with one download URL per line
    pub manifest: PathBuf,

    /// Number of leading manifest lines to skip (GES DISC lists start with a README link)
    #[arg(long, default_value_t = 1)]
    pub skip_lines: usize,

    /// Directory for transient downloads
    #[arg(long, default_value = "netfiles")]
    pub scratch_dir: PathBuf,

    /// Output CSV file
    #[arg(short, long, default_value = "merra2_site.csv")]
    pub output: PathBuf,

    /// Keep downloaded files after processing
    #[arg(long, default_value_t = false)]
    pub keep_downloads: bool,

    /// Stop at the first failing entry (the partial CSV is still written)
    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,

    /// HTTP timeout per download in seconds
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,

    /// Earthdata Login bearer token (the only supported authentication)
    #[arg(long, env = "EARTHDATA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(flatten)]
    pub compute: ComputeArgs,
}

impl FetchArgs {
    /// 转换为流水线配置
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        Ok(PipelineConfig {
            compute: self.compute.to_config()?,
            scratch_dir: self.scratch_dir.clone(),
            keep_downloads: self.keep_downloads,
            fail_fast: self.fail_fast,
        })
    }

    /// 转换为 HTTP 配置
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.timeout),
            token: self.token.clone(),
            ..Default::default()
        }
    }
}
