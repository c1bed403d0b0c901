//! # 网格数据模型
//!
//! 一个 netCDF 文件在内存中的表示：变量名 → 多维数组（按行优先展平）。
//!
//! ## 维度约定
//! MERRA2 变量按 (time, lev, lat, lon) 或其子集排列。索引时按维度名匹配，
//! 未知维度取 0。
//!
//! ## 依赖关系
//! - 被 `parsers/merra2.rs` 构建
//! - 被 `parsers/mod.rs` 用于抽取站点时间序列

use crate::error::{Merra2Error, Result};

use std::collections::HashMap;

/// 单个网格变量
#[derive(Debug, Clone)]
pub struct GridVariable {
    /// 变量名
    pub name: String,

    /// 维度名（与 shape 一一对应）
    pub dimensions: Vec<String>,

    /// 各维度长度
    pub shape: Vec<usize>,

    /// 展平后的数值，缺测值为 NaN
    pub values: Vec<f64>,
}

impl GridVariable {
    pub fn new(
        name: impl Into<String>,
        dimensions: Vec<String>,
        shape: Vec<usize>,
        values: Vec<f64>,
    ) -> Self {
        GridVariable {
            name: name.into(),
            dimensions,
            shape,
            values,
        }
    }

    /// 按维度类别查询长度
    pub fn len_of(&self, axis: Axis) -> Option<usize> {
        self.dimensions
            .iter()
            .position(|d| Axis::of(d) == Some(axis))
            .map(|i| self.shape[i])
    }

    /// 时间步数（无时间维度时为 1）
    pub fn time_len(&self) -> usize {
        self.len_of(Axis::Time).unwrap_or(1)
    }

    /// 读取某个网格索引处的值
    pub fn value_at(&self, index: &GridIndex) -> Result<f64> {
        let mut offset = 0usize;
        for (dim, &len) in self.dimensions.iter().zip(self.shape.iter()) {
            let i = match Axis::of(dim) {
                Some(Axis::Time) => index.time,
                Some(Axis::Level) => index.level,
                Some(Axis::Lat) => index.lat,
                Some(Axis::Lon) => index.lon,
                None => 0,
            };
            if i >= len {
                return Err(Merra2Error::IndexOutOfRange {
                    dimension: format!("{}:{}", self.name, dim),
                    index: i,
                    len,
                });
            }
            offset = offset * len + i;
        }

        self.values
            .get(offset)
            .copied()
            .ok_or_else(|| Merra2Error::Other(format!("Variable '{}' is truncated", self.name)))
    }
}

/// 维度类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Time,
    Level,
    Lat,
    Lon,
}

impl Axis {
    /// 从维度名识别类别
    pub fn of(name: &str) -> Option<Axis> {
        match name.to_ascii_lowercase().as_str() {
            "time" | "t" => Some(Axis::Time),
            "lev" | "level" | "height" => Some(Axis::Level),
            "lat" | "latitude" | "y" => Some(Axis::Lat),
            "lon" | "longitude" | "x" => Some(Axis::Lon),
            _ => None,
        }
    }
}

/// 网格索引
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridIndex {
    pub time: usize,
    pub level: usize,
    pub lat: usize,
    pub lon: usize,
}

/// 选定的水平网格点
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridPoint {
    pub lat_index: usize,
    pub lon_index: usize,
    /// 网格点纬度（文件无坐标变量时为 None）
    pub latitude: Option<f64>,
    /// 网格点经度
    pub longitude: Option<f64>,
}

impl GridPoint {
    /// 某时间步处的完整索引（层取 0）
    pub fn at_time(&self, time: usize) -> GridIndex {
        GridIndex {
            time,
            level: 0,
            lat: self.lat_index,
            lon: self.lon_index,
        }
    }
}

/// 一个文件的原始网格
#[derive(Debug, Clone, Default)]
pub struct RawGrid {
    /// 来源文件路径
    pub source: String,
    pub variables: HashMap<String, GridVariable>,
    /// 时间变量的 `units` 属性
    pub time_units: Option<String>,
}

impl RawGrid {
    pub fn new(source: impl Into<String>) -> Self {
        RawGrid {
            source: source.into(),
            variables: HashMap::new(),
            time_units: None,
        }
    }

    pub fn insert(&mut self, variable: GridVariable) {
        self.variables.insert(variable.name.clone(), variable);
    }

    /// 获取变量，不存在时返回格式错误
    pub fn get(&self, name: &str) -> Result<&GridVariable> {
        self.variables
            .get(name)
            .ok_or_else(|| Merra2Error::MissingVariable {
                variable: name.to_string(),
                path: self.source.clone(),
            })
    }
}

/// 在坐标数组中找到最近的索引
///
/// 经度按圆周距离比较，可同时处理 -180..180 和 0..360 两种约定。
pub fn nearest_index(coords: &[f64], target: f64, periodic: bool) -> Option<usize> {
    coords
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_finite())
        .map(|(i, &c)| {
            let mut d = (c - target).abs();
            if periodic {
                d %= 360.0;
                d = d.min(360.0 - d);
            }
            (i, d)
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}
