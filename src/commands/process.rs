//! # process 命令实现
//!
//! 对本地已有的 netCDF 文件执行解析 → 计算 → 写出，不访问网络。
//!
//! ## 依赖关系
//! - 使用 `cli/process.rs` 定义的参数
//! - 使用 `pipeline/collector.rs`, `pipeline/mod.rs`
//! - 使用 `utils/output.rs`

use super::summary;
use crate::cli::process::ProcessArgs;
use crate::error::Result;
use crate::pipeline::{self, FileCollector};
use crate::utils::output;

/// 执行 process 命令
pub fn execute(args: ProcessArgs) -> Result<()> {
    output::print_header("MERRA2 Local Processing");

    let config = args.compute.to_config()?;

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matching '{}' in '{}'",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} files to process", files.len()));

    let mut table = Vec::new();
    let report = pipeline::process_files(&files, &config, args.fail_fast, &mut table);

    summary::finish_run(&table, report, &args.output)
}
