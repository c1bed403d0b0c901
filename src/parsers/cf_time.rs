//! # CF 时间单位解析
//!
//! 解析 netCDF 时间变量的 `units` 属性并换算为 UTC 时间。
//!
//! ## 格式说明
//! ```text
//! minutes since 2020-01-01 00:30:00     # MERRA2 M2T1NXSLV
//! hours since 1900-01-01
//! seconds since 1970-01-01T00:00:00Z
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `chrono`

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// 时间步长单位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn parse_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Some(TimeUnit::Seconds),
            "min" | "mins" | "minute" | "minutes" => Some(TimeUnit::Minutes),
            "h" | "hr" | "hrs" | "hour" | "hours" => Some(TimeUnit::Hours),
            "d" | "day" | "days" => Some(TimeUnit::Days),
            _ => None,
        }
    }

    /// 每单位对应的秒数
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
            TimeUnit::Days => 86400.0,
        }
    }
}

/// 解析后的 `units` 属性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    pub unit: TimeUnit,
    pub epoch: NaiveDateTime,
}

impl TimeUnits {
    /// 解析 `"<unit> since <datetime>"`
    pub fn parse(units: &str) -> Option<Self> {
        let mut parts = units.trim().splitn(3, char::is_whitespace);
        let unit = TimeUnit::parse_name(parts.next()?)?;
        if !parts.next()?.eq_ignore_ascii_case("since") {
            return None;
        }
        let epoch = parse_epoch(parts.next()?)?;
        Some(TimeUnits { unit, epoch })
    }

    /// 将时间坐标值换算为时间点（精确到毫秒）
    pub fn to_datetime(&self, value: f64) -> Option<NaiveDateTime> {
        if !value.is_finite() {
            return None;
        }
        let millis = (value * self.unit.seconds() * 1000.0).round();
        if millis.abs() > i64::MAX as f64 / 2.0 {
            return None;
        }
        self.epoch
            .checked_add_signed(Duration::milliseconds(millis as i64))
    }
}

fn parse_epoch(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    let s = s
        .strip_suffix(" UTC")
        .or_else(|| s.strip_suffix('Z'))
        .unwrap_or(s)
        .replacen('T', " ", 1);
    let s = s.trim();

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
