//! # 解析器模块
//!
//! 打开下载的 MERRA2 文件，在选定网格点和时间步上抽取站点时间序列。
//!
//! ## 依赖关系
//! - 被 `pipeline/` 使用
//! - 使用 `models/`、`config.rs`
//! - 子模块: merra2, cf_time

pub mod cf_time;
pub mod merra2;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::config::{ComputeConfig, PointSelection, TimeSelection};
use crate::error::{Merra2Error, Result};
use crate::models::grid::nearest_index;
use crate::models::{GridPoint, RawGrid, SiteSample, SiteSeries};
use cf_time::TimeUnits;

use std::path::Path;

/// 解析单个文件为站点时间序列
pub fn parse_site_file(path: &Path, config: &ComputeConfig) -> Result<SiteSeries> {
    let grid = merra2::read_grid(path, &config.variables)?;
    extract_series(&grid, config)
}

/// 从原始网格抽取站点时间序列
pub fn extract_series(grid: &RawGrid, config: &ComputeConfig) -> Result<SiteSeries> {
    let names = &config.variables;

    let units_text = grid.time_units.clone().unwrap_or_default();
    let units = TimeUnits::parse(&units_text).ok_or_else(|| Merra2Error::InvalidTimeUnits {
        units: units_text.clone(),
        path: grid.source.clone(),
    })?;

    let time = grid.get(&names.time)?;
    let n_steps = time.time_len();
    let time_steps: Vec<usize> = match config.time {
        TimeSelection::All => (0..n_steps).collect(),
        TimeSelection::Index(i) if i < n_steps => vec![i],
        TimeSelection::Index(i) => {
            return Err(Merra2Error::IndexOutOfRange {
                dimension: names.time.clone(),
                index: i,
                len: n_steps,
            })
        }
    };

    let point = select_point(grid, config)?;

    let pressure = grid.get(&names.pressure)?;
    let temperature = grid.get(&names.temperature)?;
    let humidity = match &names.humidity {
        Some(h) => Some(grid.get(h)?),
        None => None,
    };
    let lower_wind = if config.needs_lower_wind() {
        Some((grid.get(&names.u_lower)?, grid.get(&names.v_lower)?))
    } else {
        match (
            grid.variables.get(&names.u_lower),
            grid.variables.get(&names.v_lower),
        ) {
            (Some(u), Some(v)) => Some((u, v)),
            _ => None,
        }
    };
    let u_upper = grid.get(&names.u_upper)?;
    let v_upper = grid.get(&names.v_upper)?;

    let mut samples = Vec::with_capacity(time_steps.len());
    for t in time_steps {
        let index = point.at_time(t);
        let timestamp =
            units
                .to_datetime(time.values[t])
                .ok_or_else(|| Merra2Error::InvalidTimeUnits {
                    units: format!("{} (value {})", units_text, time.values[t]),
                    path: grid.source.clone(),
                })?;

        samples.push(SiteSample {
            timestamp,
            surface_pressure: pressure.value_at(&index)?,
            temp_2m: temperature.value_at(&index)?,
            humidity: humidity.map(|h| h.value_at(&index)).transpose()?,
            u_lower: lower_wind.map(|(u, _)| u.value_at(&index)).transpose()?,
            v_lower: lower_wind.map(|(_, v)| v.value_at(&index)).transpose()?,
            u_upper: u_upper.value_at(&index)?,
            v_upper: v_upper.value_at(&index)?,
        });
    }

    Ok(SiteSeries {
        latitude: point.latitude,
        longitude: point.longitude,
        samples,
    })
}

/// 选择水平网格点
fn select_point(grid: &RawGrid, config: &ComputeConfig) -> Result<GridPoint> {
    let names = &config.variables;
    let lats = grid.variables.get(&names.latitude).map(|v| v.values.as_slice());
    let lons = grid
        .variables
        .get(&names.longitude)
        .map(|v| v.values.as_slice());

    match config.point {
        PointSelection::First => Ok(GridPoint {
            lat_index: 0,
            lon_index: 0,
            latitude: lats.and_then(|v| v.first().copied()),
            longitude: lons.and_then(|v| v.first().copied()),
        }),
        PointSelection::Nearest { lat, lon } => {
            let (lats, lons) = match (lats, lons) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    return Err(Merra2Error::MissingCoordinates {
                        path: grid.source.clone(),
                    })
                }
            };
            let missing = || Merra2Error::MissingCoordinates {
                path: grid.source.clone(),
            };
            let lat_index = nearest_index(lats, lat, false).ok_or_else(missing)?;
            let lon_index = nearest_index(lons, lon, true).ok_or_else(missing)?;
            Ok(GridPoint {
                lat_index,
                lon_index,
                latitude: Some(lats[lat_index]),
                longitude: Some(lons[lon_index]),
            })
        }
    }
}
