//! # CSV 导出
//!
//! 将派生记录写入 CSV（一行表头 + 每条记录一行），以及读回已有结果。
//!
//! ## 列
//! `datetime, latitude, longitude, surface_pressure, temp_2m, ws_lower, ws_upper,
//! air_density, wind_speed`
//!
//! ## 依赖关系
//! - 被 `commands/fetch.rs`, `commands/process.rs`, `commands/plot.rs` 调用
//! - 使用 `models/record.rs` 的 DerivedRecord
//! - 使用 `csv` 库

use crate::error::{Merra2Error, Result};
use crate::models::DerivedRecord;

use std::fs;
use std::path::Path;

/// 写出记录（覆盖已有文件）
pub fn write_csv(records: &[DerivedRecord], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Merra2Error::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }

    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(DerivedRecord::HEADER)?;
    for record in records {
        wtr.write_record(record.to_fields())?;
    }

    wtr.flush().map_err(|e| Merra2Error::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 读回 CSV 结果
pub fn read_csv(input_path: &Path) -> Result<Vec<DerivedRecord>> {
    if !input_path.exists() {
        return Err(Merra2Error::FileNotFound {
            path: input_path.display().to_string(),
        });
    }

    let mut rdr = csv::Reader::from_path(input_path)?;
    let records = rdr
        .deserialize::<DerivedRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(records)
}
