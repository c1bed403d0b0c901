//! # plot 子命令 CLI 定义
//!
//! 由输出 CSV 绘制风速和空气密度时间序列
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use clap::Args;
use std::path::PathBuf;

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// CSV file written by `fetch` or `process`
    pub csv: PathBuf,

    /// Output image (.png or .svg)
    #[arg(short, long, default_value = "merra2_site.png")]
    pub output: PathBuf,

    /// Chart title
    #[arg(long, default_value = "MERRA2 site time series")]
    pub title: String,

    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,
}
