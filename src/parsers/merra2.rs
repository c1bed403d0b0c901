//! # MERRA2 netCDF4 读取器
//!
//! 通过 `netcdf` crate (libnetcdf) 读取 MERRA2 单站点子集文件中的变量。
//!
//! ## 文件结构（M2T1NXSLV 子集）
//! ```text
//! dimensions: time = 24, lat = 1, lon = 1
//! double lat(lat), double lon(lon)
//! int    time(time)            units = "minutes since 2020-01-01 00:30:00"
//! float  PS(time, lat, lon)    _FillValue = 1e15
//! float  T2M(time, lat, lon)
//! float  U10M, V10M, U50M, V50M (time, lat, lon)
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 调用
//! - 构建 `models/grid.rs` 的 RawGrid

use crate::config::VariableNames;
use crate::error::{Merra2Error, Result};
use crate::models::{GridVariable, RawGrid};

use std::path::Path;

/// 打开文件并读取所需变量
///
/// 必需变量缺失时返回 `MissingVariable`；坐标变量和低参考高度风分量是可选的，
/// 是否真正需要由 `parsers::extract_series` 按计算配置判断。
pub fn read_grid(path: &Path, names: &VariableNames) -> Result<RawGrid> {
    if !path.exists() {
        return Err(Merra2Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = netcdf::open(path).map_err(|e| nc_error(path, e))?;
    let mut grid = RawGrid::new(path.display().to_string());

    // 时间变量
    let time_var = file
        .variable(&names.time)
        .ok_or_else(|| Merra2Error::MissingVariable {
            variable: names.time.clone(),
            path: path.display().to_string(),
        })?;
    grid.time_units = attr_string(&time_var, "units");
    grid.insert(read_variable(&time_var, path)?);

    // 必需变量
    let mut required = names.required();
    if let Some(h) = &names.humidity {
        required.push(h.as_str());
    }
    for name in required {
        let var = file
            .variable(name)
            .ok_or_else(|| Merra2Error::MissingVariable {
                variable: name.to_string(),
                path: path.display().to_string(),
            })?;
        grid.insert(read_variable(&var, path)?);
    }

    // 可选变量
    let [u_lower, v_lower] = names.lower_wind();
    for name in [names.latitude.as_str(), names.longitude.as_str(), u_lower, v_lower] {
        if let Some(var) = file.variable(name) {
            grid.insert(read_variable(&var, path)?);
        }
    }

    Ok(grid)
}

/// 读取单个变量，应用 scale_factor / add_offset，缺测值置为 NaN
fn read_variable(var: &netcdf::Variable, path: &Path) -> Result<GridVariable> {
    let dimensions: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();

    let raw: Vec<f64> = var
        .get_values::<f64, _>(..)
        .map_err(|e| nc_error(path, e))?;

    let fill = attr_f64(var, "_FillValue").or_else(|| attr_f64(var, "missing_value"));
    let scale = attr_f64(var, "scale_factor").unwrap_or(1.0);
    let offset = attr_f64(var, "add_offset").unwrap_or(0.0);

    let values = raw
        .into_iter()
        .map(|v| {
            if is_fill(v, fill) {
                f64::NAN
            } else {
                v * scale + offset
            }
        })
        .collect();

    Ok(GridVariable::new(var.name(), dimensions, shape, values))
}

/// 判断是否为缺测值（f32 填充值转换为 f64 后允许微小误差）
fn is_fill(value: f64, fill: Option<f64>) -> bool {
    match fill {
        Some(f) => value == f || (value - f).abs() <= f.abs() * 1e-6,
        None => false,
    }
}

/// 读取数值属性
fn attr_f64(var: &netcdf::Variable, name: &str) -> Option<f64> {
    var.attribute_value(name)
        .and_then(|r| r.ok())
        .and_then(|v| match v {
            netcdf::AttributeValue::Double(d) => Some(d),
            netcdf::AttributeValue::Float(f) => Some(f as f64),
            netcdf::AttributeValue::Int(i) => Some(i as f64),
            netcdf::AttributeValue::Short(s) => Some(s as f64),
            netcdf::AttributeValue::Doubles(d) => d.first().copied(),
            netcdf::AttributeValue::Floats(f) => f.first().map(|x| *x as f64),
            _ => None,
        })
}

/// 读取字符串属性
fn attr_string(var: &netcdf::Variable, name: &str) -> Option<String> {
    var.attribute_value(name)
        .and_then(|r| r.ok())
        .and_then(|v| match v {
            netcdf::AttributeValue::Str(s) => Some(s),
            _ => None,
        })
}

fn nc_error(path: &Path, source: netcdf::Error) -> Merra2Error {
    Merra2Error::NetCdf {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fill() {
        assert!(is_fill(1e15_f32 as f64, Some(1e15_f32 as f64)));
        assert!(is_fill(1.0e15, Some(1e15_f32 as f64)));
        assert!(!is_fill(101325.0, Some(1e15)));
        assert!(!is_fill(101325.0, None));
    }

    #[test]
    fn test_read_missing_file() {
        let names = VariableNames::for_heights(10, 50);
        let err = read_grid(Path::new("/nonexistent/20200101-site.nc4"), &names).unwrap_err();
        assert!(matches!(err, Merra2Error::FileNotFound { .. }));
    }
}
