//! # calc 命令实现
//!
//! 对单组输入计算空气密度、幂律指数和各目标高度的风速，以表格输出。
//!
//! ## 依赖关系
//! - 使用 `cli/calc.rs` 定义的参数
//! - 使用 `physics/`

use crate::cli::calc::CalcArgs;
use crate::cli::compute::validate_humidity;
use crate::error::Result;
use crate::physics::{self, wind, WindProfile};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Debug, Tabled)]
struct CalcRow {
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(quantity: impl Into<String>, value: String) -> CalcRow {
    CalcRow {
        quantity: quantity.into(),
        value,
    }
}

/// 计算结果行
fn calc_rows(args: &CalcArgs) -> Result<Vec<CalcRow>> {
    validate_humidity(args.humidity)?;
    let profile = WindProfile::from(args.profile);

    let density = physics::air_density(args.temperature, args.pressure, args.humidity)?;
    let mut rows = vec![
        row("Air density (kg/m³)", format!("{:.6}", density)),
        row(
            format!("Wind speed at {} m (m/s)", args.lower_height),
            format!("{:.4}", args.ws_lower),
        ),
        row(
            format!("Wind speed at {} m (m/s)", args.upper_height),
            format!("{:.4}", args.ws_upper),
        ),
    ];

    if profile == WindProfile::PowerLaw {
        let alpha = wind::shear_exponent(
            args.ws_lower,
            args.ws_upper,
            args.lower_height,
            args.upper_height,
        );
        rows.push(row("Shear exponent α", format!("{:.4}", alpha)));
    }

    for &z in &args.height {
        let ws = physics::extrapolate(
            profile,
            args.ws_lower,
            args.ws_upper,
            args.lower_height,
            args.upper_height,
            z,
        )?;
        rows.push(row(
            format!("Wind speed at {} m, {} (m/s)", z, profile),
            format!("{:.4}", ws),
        ));
    }

    Ok(rows)
}

/// 执行 calc 命令
pub fn execute(args: CalcArgs) -> Result<()> {
    let rows = calc_rows(&args)?;
    output::print_header("Site Calculation");
    println!("{}", Table::new(&rows));
    Ok(())
}
