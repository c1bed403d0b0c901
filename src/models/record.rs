//! # 站点时间序列与派生记录
//!
//! ## 依赖关系
//! - `SiteSeries` 由 `parsers/` 产生
//! - `DerivedRecord` 由 `physics/` 产生，被 `export/` 写出和读回
//! - 使用 `serde` 读写 CSV

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// CSV 中的时间格式
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 单个时间步的原始站点值
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSample {
    pub timestamp: NaiveDateTime,

    /// 地面气压 (Pa)
    pub surface_pressure: f64,

    /// 2 米气温 (K)
    pub temp_2m: f64,

    /// 相对湿度（0–1），文件未提供时为 None
    pub humidity: Option<f64>,

    /// 低参考高度风分量 (m/s)，目标高度等于高参考高度且文件未提供时为 None
    pub u_lower: Option<f64>,
    pub v_lower: Option<f64>,

    /// 高参考高度风分量 (m/s)
    pub u_upper: f64,
    pub v_upper: f64,
}

/// 一个文件抽取出的站点时间序列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteSeries {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub samples: Vec<SiteSample>,
}

/// 派生记录（CSV 中的一行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    #[serde(with = "datetime_format")]
    pub datetime: NaiveDateTime,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// 地面气压 (Pa)
    pub surface_pressure: f64,

    /// 2 米气温 (K)
    pub temp_2m: f64,

    /// 参考高度风速 (m/s)
    pub ws_lower: Option<f64>,
    pub ws_upper: f64,

    /// 空气密度 (kg/m³)
    pub air_density: f64,

    /// 目标高度风速 (m/s)
    pub wind_speed: f64,
}

impl DerivedRecord {
    /// CSV 表头
    pub const HEADER: [&'static str; 9] = [
        "datetime",
        "latitude",
        "longitude",
        "surface_pressure",
        "temp_2m",
        "ws_lower",
        "ws_upper",
        "air_density",
        "wind_speed",
    ];

    /// 格式化为定长精度的 CSV 字段
    pub fn to_fields(&self) -> [String; 9] {
        let opt = |v: Option<f64>| v.map(|x| format!("{:.4}", x)).unwrap_or_default();
        [
            self.datetime.format(DATETIME_FORMAT).to_string(),
            opt(self.latitude),
            opt(self.longitude),
            format!("{:.2}", self.surface_pressure),
            format!("{:.3}", self.temp_2m),
            opt(self.ws_lower),
            format!("{:.4}", self.ws_upper),
            format!("{:.6}", self.air_density),
            format!("{:.4}", self.wind_speed),
        ]
    }
}

mod datetime_format {
    use super::DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fields_fixed_precision() {
        let record = DerivedRecord {
            datetime: NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 30, 0)
                .unwrap(),
            latitude: Some(40.0),
            longitude: None,
            surface_pressure: 101325.0,
            temp_2m: 288.15,
            ws_lower: None,
            ws_upper: 7.5,
            air_density: 1.2249781,
            wind_speed: 7.5,
        };

        let fields = record.to_fields();
        assert_eq!(fields[0], "2020-01-01 00:30:00");
        assert_eq!(fields[1], "40.0000");
        assert_eq!(fields[2], "");
        assert_eq!(fields[5], "");
        assert_eq!(fields[6], "7.5000");
        assert_eq!(fields[7], "1.224978");
        assert_eq!(fields.len(), DerivedRecord::HEADER.len());
    }
}
