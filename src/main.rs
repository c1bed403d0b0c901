//! # merra2 - MERRA2 站点时间序列 ETL 工具
//!
//! 按 URL 清单下载 MERRA2 单站点子集 (netCDF4)，计算空气密度和目标高度风速，
//! 合并为一张 CSV 表。
//!
//! ## 子命令
//! - `fetch`   - 下载 → 解析 → 计算 → 写出 CSV
//! - `process` - 对本地已下载文件执行同样的处理
//! - `calc`    - 单组输入的空气密度 / 风速外推
//! - `plot`    - 由输出 CSV 绘制时间序列
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── pipeline/  (逐项 ETL 流水线)
//!   │     │     ├── manifest/ (URL 清单)
//!   │     │     ├── fetch/    (HTTP 下载)
//!   │     │     ├── parsers/  (netCDF / CF 时间解析)
//!   │     │     └── physics/  (空气密度、风速廓线)
//!   │     └── export/    (CSV、图表)
//!   ├── models/     (数据模型)
//!   ├── config.rs   (运行配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod config;
mod error;
mod export;
mod fetch;
mod manifest;
mod models;
mod parsers;
mod physics;
mod pipeline;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
