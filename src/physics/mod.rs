//! # 物理计算模块
//!
//! 由站点原始值计算空气密度和目标高度风速，纯函数，无副作用。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 和 `commands/calc.rs` 使用
//! - 使用 `models/record.rs`
//! - 子模块: density, wind

pub mod density;
pub mod wind;

pub use density::air_density;
pub use wind::{extrapolate, wind_speed, WindProfile};

use crate::config::ComputeConfig;
use crate::error::{Merra2Error, Result};
use crate::models::{DerivedRecord, SiteSample, SiteSeries};

/// 计算单个时间步的派生记录
pub fn derive_record(
    sample: &SiteSample,
    latitude: Option<f64>,
    longitude: Option<f64>,
    config: &ComputeConfig,
) -> Result<DerivedRecord> {
    let humidity = sample.humidity.unwrap_or(config.default_humidity);
    let density = air_density(sample.temp_2m, sample.surface_pressure, humidity)
        .map_err(|e| at_time(e, sample))?;

    let ws_lower = match (sample.u_lower, sample.v_lower) {
        (Some(u), Some(v)) => Some(wind_speed(u, v)),
        _ => None,
    };
    let ws_upper = wind_speed(sample.u_upper, sample.v_upper);

    // 目标高度等于高参考高度时结果就是 ws_upper
    let reference_lower = if config.needs_lower_wind() {
        ws_lower.ok_or_else(|| {
            at_time(
                Merra2Error::Computation(format!(
                    "wind at {} m is required to extrapolate to {} m",
                    config.lower_height, config.target_height
                )),
                sample,
            )
        })?
    } else {
        ws_upper
    };
    let ws_target = extrapolate(
        config.profile,
        reference_lower,
        ws_upper,
        config.lower_height,
        config.upper_height,
        config.target_height,
    )
    .map_err(|e| at_time(e, sample))?;

    Ok(DerivedRecord {
        datetime: sample.timestamp,
        latitude,
        longitude,
        surface_pressure: sample.surface_pressure,
        temp_2m: sample.temp_2m,
        ws_lower,
        ws_upper,
        air_density: density,
        wind_speed: ws_target,
    })
}

/// 计算整个时间序列；任一时间步失败则整体失败
pub fn derive_records(series: &SiteSeries, config: &ComputeConfig) -> Result<Vec<DerivedRecord>> {
    series
        .samples
        .iter()
        .map(|s| derive_record(s, series.latitude, series.longitude, config))
        .collect()
}

fn at_time(err: Merra2Error, sample: &SiteSample) -> Merra2Error {
    match err {
        Merra2Error::Computation(msg) => {
            Merra2Error::Computation(format!("{} at {}", msg, sample.timestamp))
        }
        other => other,
    }
}
