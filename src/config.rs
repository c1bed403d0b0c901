//! # 运行配置
//!
//! 命令行参数最终转换为这里的纯数据结构，供 `pipeline/`、`parsers/` 和
//! `physics/` 使用，不依赖 `clap`。
//!
//! ## 依赖关系
//! - 被 `cli/` 构建
//! - 被 `pipeline/`, `parsers/`, `physics/` 使用

use crate::physics::WindProfile;

use std::path::PathBuf;
use std::time::Duration;

/// 时间步选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSelection {
    /// 文件中的全部时间步
    #[default]
    All,
    /// 单个时间步
    Index(usize),
}

/// 网格点选择
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointSelection {
    /// 第一个网格点 (0, 0)，适用于单站点子集文件
    #[default]
    First,
    /// 离给定经纬度最近的网格点
    Nearest { lat: f64, lon: f64 },
}

/// 需要读取的变量名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNames {
    pub time: String,
    pub latitude: String,
    pub longitude: String,
    pub pressure: String,
    pub temperature: String,
    pub humidity: Option<String>,
    pub u_lower: String,
    pub v_lower: String,
    pub u_upper: String,
    pub v_upper: String,
}

impl VariableNames {
    /// 按 MERRA2 命名规则 (`U50M`, `V10M`, ...) 生成变量名
    pub fn for_heights(lower: u32, upper: u32) -> Self {
        VariableNames {
            time: "time".to_string(),
            latitude: "lat".to_string(),
            longitude: "lon".to_string(),
            pressure: "PS".to_string(),
            temperature: "T2M".to_string(),
            humidity: None,
            u_lower: format!("U{}M", lower),
            v_lower: format!("V{}M", lower),
            u_upper: format!("U{}M", upper),
            v_upper: format!("V{}M", upper),
        }
    }

    /// 必需的数据变量（不含坐标变量和低参考高度风分量）
    pub fn required(&self) -> Vec<&str> {
        vec![
            self.pressure.as_str(),
            self.temperature.as_str(),
            self.u_upper.as_str(),
            self.v_upper.as_str(),
        ]
    }

    /// 低参考高度风分量
    pub fn lower_wind(&self) -> [&str; 2] {
        [self.u_lower.as_str(), self.v_lower.as_str()]
    }
}

/// 解析与计算配置
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeConfig {
    pub variables: VariableNames,
    pub point: PointSelection,
    pub time: TimeSelection,
    /// 低参考高度 (m)
    pub lower_height: f64,
    /// 高参考高度 (m)
    pub upper_height: f64,
    /// 目标高度 (m)
    pub target_height: f64,
    pub profile: WindProfile,
    /// 文件无湿度变量时使用的相对湿度
    pub default_humidity: f64,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        ComputeConfig {
            variables: VariableNames::for_heights(10, 50),
            point: PointSelection::First,
            time: TimeSelection::All,
            lower_height: 10.0,
            upper_height: 50.0,
            target_height: 50.0,
            profile: WindProfile::PowerLaw,
            default_humidity: 0.5,
        }
    }
}

impl ComputeConfig {
    /// 目标高度不等于高参考高度时才需要低参考高度风速
    pub fn needs_lower_wind(&self) -> bool {
        self.target_height != self.upper_height
    }
}

/// 下载与流水线配置
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub compute: ComputeConfig,
    /// 临时下载目录
    pub scratch_dir: PathBuf,
    /// 处理后保留下载文件
    pub keep_downloads: bool,
    /// 遇到第一个失败即停止
    pub fail_fast: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            compute: ComputeConfig::default(),
            scratch_dir: PathBuf::from("netfiles"),
            keep_downloads: false,
            fail_fast: false,
        }
    }
}

/// HTTP 下载配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout: Duration,
    /// Earthdata Login bearer token
    pub token: Option<String>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            timeout: Duration::from_secs(300),
            token: None,
            user_agent: format!("merra2-etl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
