//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `fetch`: 读取 URL 清单，下载 → 解析 → 计算 → 写出 CSV
//! - `process`: 对已下载的本地 netCDF 文件执行解析 → 计算 → 写出
//! - `calc`: 对单组输入计算空气密度与外推风速
//! - `plot`: 由输出 CSV 绘制时间序列
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: compute, fetch, process, calc, plot

pub mod calc;
pub mod compute;
pub mod fetch;
pub mod plot;
pub mod process;

use clap::{Parser, Subcommand};

/// merra2 - MERRA2 站点时间序列 ETL 工具
#[derive(Parser)]
#[command(name = "merra2")]
#[command(version)]
#[command(
    about = "Download MERRA2 site subsets and derive air density and hub-height wind speed",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Download every URL in a manifest, derive records and write one CSV
    Fetch(fetch::FetchArgs),

    /// Derive records from already downloaded netCDF files
    Process(process::ProcessArgs),

    /// Evaluate air density and wind extrapolation for a single input
    Calc(calc::CalcArgs),

    /// Plot wind speed and air density time series from an output CSV
    Plot(plot::PlotArgs),
}
