//! # 空气密度
//!
//! 理想气体定律，扣除水汽分压的影响：
//!
//! ```text
//! ρ = (1/T) · ( P/R_d − RH · e_s(T) · (1/R_d − 1/R_v) )
//! e_s(T) = 2.05e-5 · exp(0.0631846 · T)      (Pa, T 单位为 K)
//! ```
//!
//! ## 依赖关系
//! - 被 `physics/mod.rs` 和 `commands/calc.rs` 调用

use crate::error::{Merra2Error, Result};

/// 干空气比气体常数 (J/(kg·K))
pub const R_DRY: f64 = 287.05;

/// 水汽比气体常数 (J/(kg·K))
pub const R_VAPOR: f64 = 461.5;

/// 饱和水汽压近似 (Pa)
pub fn saturation_vapor_pressure(temp_k: f64) -> f64 {
    0.0000205 * (0.0631846 * temp_k).exp()
}

/// 计算空气密度 (kg/m³)
///
/// - `temp_k`: 气温 (K)
/// - `pressure_pa`: 气压 (Pa)
/// - `rel_humidity`: 相对湿度（0–1）
pub fn air_density(temp_k: f64, pressure_pa: f64, rel_humidity: f64) -> Result<f64> {
    if !temp_k.is_finite() || !pressure_pa.is_finite() || !rel_humidity.is_finite() {
        return Err(Merra2Error::Computation(format!(
            "missing input (T={}, P={}, RH={})",
            temp_k, pressure_pa, rel_humidity
        )));
    }
    if temp_k <= 0.0 || pressure_pa < 0.0 || !(0.0..=1.0).contains(&rel_humidity) {
        return Err(Merra2Error::Computation(format!(
            "temperature, pressure or humidity out of range (T={}, P={}, RH={})",
            temp_k, pressure_pa, rel_humidity
        )));
    }

    let vapor_term = rel_humidity * saturation_vapor_pressure(temp_k) * (1.0 / R_DRY - 1.0 / R_VAPOR);
    Ok((pressure_pa / R_DRY - vapor_term) / temp_k)
}
