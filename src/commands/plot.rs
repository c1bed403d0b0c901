//! # plot 命令实现
//!
//! 读取输出 CSV 并渲染时间序列图，扩展名为 `.svg` 时输出 SVG，否则输出 PNG。
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的参数
//! - 使用 `export/`

use crate::cli::plot::PlotArgs;
use crate::error::Result;
use crate::export::{self, PlotOptions};
use crate::utils::output;

/// 执行 plot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    let records = export::read_csv(&args.csv)?;
    output::print_info(&format!(
        "Read {} records from '{}'",
        records.len(),
        args.csv.display()
    ));

    let use_svg = args
        .output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    let options = PlotOptions {
        title: args.title,
        width: args.width,
        height: args.height,
        use_svg,
    };
    export::generate_series_plot(&records, &args.output, &options)?;

    output::print_success(&format!("Plot saved to '{}'", args.output.display()));
    Ok(())
}
