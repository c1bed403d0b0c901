//! # 导出模块
//!
//! 结果写出：CSV 表格和时间序列图。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 子模块: csv_file, plot

pub mod csv_file;
pub mod plot;

pub use csv_file::{read_csv, write_csv};
pub use plot::{generate_series_plot, PlotOptions};
