//! # 时间序列图表
//!
//! 使用 `plotters` 将派生记录绘制为上下两幅时间序列：目标高度风速和空气密度。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `models/record.rs` 的 DerivedRecord
//! - 使用 `plotters` 渲染 PNG / SVG

use crate::error::{Merra2Error, Result};
use crate::models::DerivedRecord;

use chrono::{Duration, NaiveDateTime};
use plotters::prelude::*;
use std::path::Path;

/// 图表参数
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            title: "MERRA2 site time series".to_string(),
            width: 1200,
            height: 800,
            use_svg: false,
        }
    }
}

/// 生成时间序列图
pub fn generate_series_plot(
    records: &[DerivedRecord],
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    if records.is_empty() {
        return Err(Merra2Error::Other("No data to plot".to_string()));
    }

    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_series_chart(&root, records, &options.title)?;
        root.present()
            .map_err(|e| Merra2Error::Other(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_series_chart(&root, records, &options.title)?;
        root.present()
            .map_err(|e| Merra2Error::Other(e.to_string()))?;
    }
    Ok(())
}

/// 记录时间相对于第一条记录的小时数
fn hours_since(t0: NaiveDateTime, t: NaiveDateTime) -> f64 {
    (t - t0).num_seconds() as f64 / 3600.0
}

/// 数值范围，上下各留 10% 边距
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let margin = ((hi - lo).abs() * 0.1).max(1e-3);
    (lo - margin, hi + margin)
}

fn draw_series_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    records: &[DerivedRecord],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| Merra2Error::Other(format!("{:?}", e)))?;

    let root = root
        .titled(title, ("sans-serif", 26))
        .map_err(|e| Merra2Error::Other(format!("{:?}", e)))?;
    let panels = root.split_evenly((2, 1));

    let t0 = records[0].datetime;
    let x_max = hours_since(t0, records[records.len() - 1].datetime).max(1.0);
    let x_fmt = |x: &f64| {
        (t0 + Duration::seconds((x * 3600.0) as i64))
            .format("%m-%d %H:%M")
            .to_string()
    };

    let panel_specs: [(&str, RGBColor, fn(&DerivedRecord) -> f64); 2] = [
        ("Wind speed (m/s)", RGBColor(0, 102, 204), |r| r.wind_speed),
        ("Air density (kg/m³)", RGBColor(204, 51, 0), |r| r.air_density),
    ];

    for (area, (label, color, value)) in panels.iter().zip(panel_specs) {
        let (y_min, y_max) = padded_range(records.iter().map(value));

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..x_max, y_min..y_max)
            .map_err(|e| Merra2Error::Other(format!("{:?}", e)))?;

        chart
            .configure_mesh()
            .x_desc("Time (UTC)")
            .y_desc(label)
            .x_label_formatter(&x_fmt)
            .x_label_style(("sans-serif", 14))
            .y_label_style(("sans-serif", 14))
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(|e| Merra2Error::Other(format!("{:?}", e)))?;

        chart
            .draw_series(LineSeries::new(
                records
                    .iter()
                    .map(|r| (hours_since(t0, r.datetime), value(r)))
                    .filter(|(_, y)| y.is_finite()),
                color.stroke_width(2),
            ))
            .map_err(|e| Merra2Error::Other(format!("{:?}", e)))?;
    }

    Ok(())
}
