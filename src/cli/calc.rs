//! # calc 子命令 CLI 定义
//!
//! 对单组气象输入计算空气密度和目标高度风速
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calc.rs`

use super::compute::ProfileArg;

use clap::Args;

/// calc 子命令参数
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Surface pressure in Pa
    #[arg(long, default_value_t = 101325.0)]
    pub pressure: f64,

    /// 2 m air temperature in K
    #[arg(long, default_value_t = 288.15)]
    pub temperature: f64,

    /// Relative humidity as a 0-1 fraction
    #[arg(long, default_value_t = 0.5)]
    pub humidity: f64,

    /// Wind speed at the lower reference height in m/s
    #[arg(long)]
    pub ws_lower: f64,

    /// Wind speed at the upper reference height in m/s
    #[arg(long)]
    pub ws_upper: f64,

    /// Lower reference height in metres
    #[arg(long, default_value_t = 10.0)]
    pub lower_height: f64,

    /// Upper reference height in metres
    #[arg(long, default_value_t = 50.0)]
    pub upper_height: f64,

    /// Target heights in metres (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "50")]
    pub height: Vec<f64>,

    /// Wind profile used for extrapolation
    #[arg(long, value_enum, default_value = "power")]
    pub profile: ProfileArg,
}
