//! # 计算参数（多个子命令共享）
//!
//! `fetch` 和 `process` 共用的网格点、时间步、高度、廓线与湿度参数，
//! 以及它们到 `ComputeConfig` 的转换。
//!
//! ## 依赖关系
//! - 被 `cli/fetch.rs`, `cli/process.rs`, `cli/calc.rs` 使用
//! - 构建 `config.rs` 中的 `ComputeConfig`

use crate::config::{ComputeConfig, PointSelection, TimeSelection, VariableNames};
use crate::error::{Merra2Error, Result};
use crate::physics::WindProfile;

use clap::{Args, ValueEnum};

/// 风速廓线
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ProfileArg {
    /// Power law with exponent fitted from the two reference heights
    Power,
    /// Logarithmic interpolation between the reference heights
    Log,
}

impl From<ProfileArg> for WindProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Power => WindProfile::PowerLaw,
            ProfileArg::Log => WindProfile::LogLaw,
        }
    }
}

/// 共享计算参数
#[derive(Args, Debug, Clone)]
pub struct ComputeArgs {
    /// Latitude of the site; selects the nearest grid point
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the site; selects the nearest grid point
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Use only this time step of each file (default: all time steps)
    #[arg(long)]
    pub time_index: Option<usize>,

    /// Lower reference height in metres (reads U<h>M / V<h>M)
    #[arg(long, default_value_t = 10)]
    pub lower_height: u32,

    /// Upper reference height in metres (reads U<h>M / V<h>M)
    #[arg(long, default_value_t = 50)]
    pub upper_height: u32,

    /// Target height for the extrapolated wind speed in metres
    #[arg(long, default_value_t = 50.0)]
    pub height: f64,

    /// Wind profile used for extrapolation
    #[arg(long, value_enum, default_value = "power")]
    pub profile: ProfileArg,

    /// Relative humidity (0-1) used when the file has no humidity variable
    #[arg(long, default_value_t = 0.5)]
    pub humidity: f64,

    /// Name of a relative humidity variable (0-1 fraction) to read from the file
    #[arg(long)]
    pub humidity_var: Option<String>,
}

impl ComputeArgs {
    /// 转换为计算配置
    pub fn to_config(&self) -> Result<ComputeConfig> {
        validate_humidity(self.humidity)?;
        if self.lower_height == 0 || self.lower_height >= self.upper_height {
            return Err(Merra2Error::InvalidArgument(format!(
                "lower height ({} m) must be positive and below upper height ({} m)",
                self.lower_height, self.upper_height
            )));
        }
        if self.height <= 0.0 {
            return Err(Merra2Error::InvalidArgument(format!(
                "target height must be positive, got {}",
                self.height
            )));
        }

        let mut variables = VariableNames::for_heights(self.lower_height, self.upper_height);
        variables.humidity = self.humidity_var.clone();

        let point = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => PointSelection::Nearest { lat, lon },
            _ => PointSelection::First,
        };
        let time = match self.time_index {
            Some(i) => TimeSelection::Index(i),
            None => TimeSelection::All,
        };

        Ok(ComputeConfig {
            variables,
            point,
            time,
            lower_height: f64::from(self.lower_height),
            upper_height: f64::from(self.upper_height),
            target_height: self.height,
            profile: self.profile.into(),
            default_humidity: self.humidity,
        })
    }
}

/// 相对湿度必须是 0–1 之间的比例
pub fn validate_humidity(humidity: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&humidity) {
        return Err(Merra2Error::InvalidArgument(format!(
            "humidity must be a fraction between 0 and 1, got {}",
            humidity
        )));
    }
    Ok(())
}
