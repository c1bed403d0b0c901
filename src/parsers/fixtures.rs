//! # 测试用 netCDF 文件生成
//!
//! 按 MERRA2 M2T1NXSLV 子集的结构写出小型 netCDF4 文件，供解析器和流水线测试使用。

use std::path::{Path, PathBuf};

/// 填充值（与 MERRA2 相同）
pub const FILL: f32 = 1.0e15;

/// 测试文件描述
#[derive(Debug, Clone)]
pub struct SiteFixture {
    /// 时间单位中的日期（2020-01-DD）
    pub day: u32,
    pub hours: usize,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    /// 不写出的变量
    pub omit: Vec<&'static str>,
    /// 在 (变量, 时间步) 处写入填充值
    pub fill_at: Option<(&'static str, usize)>,
}

impl Default for SiteFixture {
    fn default() -> Self {
        SiteFixture {
            day: 1,
            hours: 24,
            lats: vec![40.0],
            lons: vec![-105.0],
            omit: vec![],
            fill_at: None,
        }
    }
}

impl SiteFixture {
    pub fn day(day: u32) -> Self {
        SiteFixture {
            day,
            ..Default::default()
        }
    }

    /// PS 在 (t, j, i) 处的值
    pub fn pressure(&self, t: usize, j: usize, i: usize) -> f32 {
        101325.0 + t as f32 * 10.0 + j as f32 * 100.0 + i as f32 * 1000.0
    }

    fn field(&self, name: &str) -> Vec<f32> {
        let (nt, ny, nx) = (self.hours, self.lats.len(), self.lons.len());
        let mut out = Vec::with_capacity(nt * ny * nx);
        for t in 0..nt {
            for j in 0..ny {
                for i in 0..nx {
                    let v = match name {
                        "PS" => self.pressure(t, j, i),
                        "T2M" => 288.15 + self.day as f32 * 0.5 + t as f32 * 0.1,
                        "U10M" => 3.0,
                        "V10M" => 4.0,
                        "U50M" => 6.0 + self.day as f32,
                        "V50M" => 8.0,
                        _ => 0.0,
                    };
                    let filled = matches!(self.fill_at, Some((n, ft)) if n == name && ft == t);
                    out.push(if filled { FILL } else { v });
                }
            }
        }
        out
    }

    /// 写出文件
    pub fn write(&self, path: &Path) -> Result<(), netcdf::Error> {
        let _ = std::fs::remove_file(path);
        let mut file = netcdf::create(path)?;
        file.add_dimension("time", self.hours)?;
        file.add_dimension("lat", self.lats.len())?;
        file.add_dimension("lon", self.lons.len())?;

        if !self.omit.contains(&"lat") {
            let mut v = file.add_variable::<f64>("lat", &["lat"])?;
            v.put_attribute("units", "degrees_north")?;
            v.put_values(&self.lats, ..)?;
        }
        if !self.omit.contains(&"lon") {
            let mut v = file.add_variable::<f64>("lon", &["lon"])?;
            v.put_attribute("units", "degrees_east")?;
            v.put_values(&self.lons, ..)?;
        }
        if !self.omit.contains(&"time") {
            let minutes: Vec<i32> = (0..self.hours as i32).map(|h| h * 60).collect();
            let mut v = file.add_variable::<i32>("time", &["time"])?;
            v.put_attribute(
                "units",
                format!("minutes since 2020-01-{:02} 00:30:00", self.day).as_str(),
            )?;
            v.put_values(&minutes, ..)?;
        }

        for name in ["PS", "T2M", "U10M", "V10M", "U50M", "V50M"] {
            if self.omit.contains(&name) {
                continue;
            }
            let data = self.field(name);
            let mut v = file.add_variable::<f32>(name, &["time", "lat", "lon"])?;
            v.set_fill_value(FILL)?;
            v.put_values(&data, ..)?;
        }

        Ok(())
    }
}

/// 每个测试独立的临时目录
pub fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "merra2-etl-{}-{}",
        test_name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
