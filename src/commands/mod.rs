//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `pipeline/`, `physics/`, `export/`, `utils/`
//! - 子模块: fetch, process, calc, plot, summary

pub mod calc;
pub mod fetch;
pub mod plot;
pub mod process;
mod summary;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Fetch(args) => fetch::execute(args),
        Commands::Process(args) => process::execute(args),
        Commands::Calc(args) => calc::execute(args),
        Commands::Plot(args) => plot::execute(args),
    }
}
