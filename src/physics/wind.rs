//! # 风速廓线外推
//!
//! 由两个参考高度的风速外推到目标高度。
//!
//! ## 支持的廓线
//! - 幂律: `ws(z) = ws_hi · (z / z_hi)^α`，`α = ln(ws_hi/ws_lo) / ln(z_hi/z_lo)`
//! - 对数律: `ws(z) = ws_lo + (ws_hi − ws_lo) · ln(z/z_lo) / ln(z_hi/z_lo)`
//!
//! ## 依赖关系
//! - 被 `physics/mod.rs` 和 `commands/calc.rs` 调用

use crate::error::{Merra2Error, Result};

/// 任一参考风速为 0 时使用的幂律指数
pub const DEFAULT_SHEAR_EXPONENT: f64 = 1.0 / 7.0;

/// 风速廓线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindProfile {
    #[default]
    PowerLaw,
    LogLaw,
}

impl std::fmt::Display for WindProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindProfile::PowerLaw => write!(f, "power law"),
            WindProfile::LogLaw => write!(f, "log law"),
        }
    }
}

/// 由 u、v 分量计算风速
pub fn wind_speed(u: f64, v: f64) -> f64 {
    u.hypot(v)
}

/// 两个参考高度之间的幂律指数
pub fn shear_exponent(ws_lower: f64, ws_upper: f64, z_lower: f64, z_upper: f64) -> f64 {
    if ws_lower <= 0.0 || ws_upper <= 0.0 {
        return DEFAULT_SHEAR_EXPONENT;
    }
    (ws_upper / ws_lower).ln() / (z_upper / z_lower).ln()
}

/// 外推目标高度风速
pub fn extrapolate(
    profile: WindProfile,
    ws_lower: f64,
    ws_upper: f64,
    z_lower: f64,
    z_upper: f64,
    z_target: f64,
) -> Result<f64> {
    if !(z_lower > 0.0 && z_upper > 0.0 && z_target > 0.0) {
        return Err(Merra2Error::Computation(format!(
            "heights must be positive (lower={}, upper={}, target={})",
            z_lower, z_upper, z_target
        )));
    }
    if z_lower == z_upper {
        return Err(Merra2Error::Computation(format!(
            "reference heights must differ (both {} m)",
            z_lower
        )));
    }
    if !ws_lower.is_finite() || !ws_upper.is_finite() || ws_lower < 0.0 || ws_upper < 0.0 {
        return Err(Merra2Error::Computation(format!(
            "invalid reference wind speeds ({}, {})",
            ws_lower, ws_upper
        )));
    }

    if z_target == z_upper {
        return Ok(ws_upper);
    }
    if z_target == z_lower {
        return Ok(ws_lower);
    }
    if ws_lower == ws_upper {
        return Ok(ws_upper);
    }

    let speed = match profile {
        WindProfile::PowerLaw => {
            let alpha = shear_exponent(ws_lower, ws_upper, z_lower, z_upper);
            ws_upper * (z_target / z_upper).powf(alpha)
        }
        WindProfile::LogLaw => {
            let frac = (z_target / z_lower).ln() / (z_upper / z_lower).ln();
            (ws_lower + (ws_upper - ws_lower) * frac).max(0.0)
        }
    };

    Ok(speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_speed_magnitude() {
        assert!((wind_speed(3.0, 4.0) - 5.0).abs() < 1e-12);
        assert!((wind_speed(-3.0, -4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_shear_returns_same_speed() {
        for profile in [WindProfile::PowerLaw, WindProfile::LogLaw] {
            let ws = extrapolate(profile, 6.2, 6.2, 10.0, 50.0, 100.0).unwrap();
            assert!((ws - 6.2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_target_at_reference_height() {
        let ws = extrapolate(WindProfile::PowerLaw, 4.0, 6.0, 10.0, 50.0, 50.0).unwrap();
        assert_eq!(ws, 6.0);
        let ws = extrapolate(WindProfile::LogLaw, 4.0, 6.0, 10.0, 50.0, 10.0).unwrap();
        assert_eq!(ws, 4.0);
    }

    #[test]
    fn test_power_law_recovers_exponent() {
        // α = 0.2
        let ws_lo = 5.0;
        let ws_hi = ws_lo * 5.0_f64.powf(0.2);
        let alpha = shear_exponent(ws_lo, ws_hi, 10.0, 50.0);
        assert!((alpha - 0.2).abs() < 1e-9);

        let ws_100 = extrapolate(WindProfile::PowerLaw, ws_lo, ws_hi, 10.0, 50.0, 100.0).unwrap();
        assert!((ws_100 - ws_lo * 10.0_f64.powf(0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_log_law_interpolates_between_references() {
        let ws = extrapolate(WindProfile::LogLaw, 4.0, 6.0, 10.0, 50.0, 30.0).unwrap();
        assert!(ws > 4.0 && ws < 6.0);
    }

    #[test]
    fn test_zero_speed_uses_default_exponent() {
        let alpha = shear_exponent(0.0, 5.0, 10.0, 50.0);
        assert_eq!(alpha, DEFAULT_SHEAR_EXPONENT);
    }

    #[test]
    fn test_invalid_heights() {
        assert!(extrapolate(WindProfile::PowerLaw, 4.0, 6.0, 50.0, 50.0, 80.0).is_err());
        assert!(extrapolate(WindProfile::PowerLaw, 4.0, 6.0, 0.0, 50.0, 80.0).is_err());
        assert!(extrapolate(WindProfile::LogLaw, 4.0, 6.0, 10.0, 50.0, -1.0).is_err());
    }
}
