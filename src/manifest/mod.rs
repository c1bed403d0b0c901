//! # 下载清单
//!
//! 读取 GES DISC 导出的 URL 清单（每行一个下载地址）。
//!
//! ## 清单格式
//! ```text
//! https://goldsmr4.gesdisc.eosdis.nasa.gov/data/MERRA2/README.pdf   # 可用 --skip-lines 跳过
//! https://goldsmr4.gesdisc.eosdis.nasa.gov/opendap/.../MERRA2_400.tavg1_2d_slv_Nx.20200101.nc4.nc4?U50M,...
//! https://goldsmr4.gesdisc.eosdis.nasa.gov/opendap/.../MERRA2_400.tavg1_2d_slv_Nx.20200102.nc4.nc4?U50M,...
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/fetch.rs`, `pipeline/` 使用
//! - 使用 `regex` 提取文件日期

use crate::error::{Merra2Error, Result};

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// 清单中的一个下载项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// 下载地址
    pub url: String,
    /// 在清单文件中的行号（从 1 开始）
    pub line: usize,
}

impl ManifestEntry {
    pub fn new(url: impl Into<String>, line: usize) -> Self {
        ManifestEntry {
            url: url.into(),
            line,
        }
    }

    /// 颗粒日期 (YYYYMMDD)，如 `MERRA2_400.tavg1_2d_slv_Nx.20200101.nc4`
    pub fn granule_date(&self) -> Option<&str> {
        static DATE_RE: OnceLock<Regex> = OnceLock::new();
        let re = DATE_RE.get_or_init(|| {
            Regex::new(r"MERRA2_\d+\.[A-Za-z0-9_]+\.(\d{8})\.nc4").expect("valid regex")
        });
        re.captures(&self.url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// 本地临时文件名
    ///
    /// 优先使用颗粒日期 (`20200101-site.nc4`)，其次使用 URL 最后一段路径，
    /// 都不可用时回退到 `entry-<行号>.nc4`。
    pub fn scratch_file_name(&self) -> String {
        if let Some(date) = self.granule_date() {
            return format!("{}-site.nc4", date);
        }

        let path = self.url.split(['?', '#']).next().unwrap_or_default();
        // 去掉 scheme 和主机名
        let path = match path.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map(|(_, p)| p).unwrap_or_default(),
            None => path,
        };
        let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();

        if !segment.is_empty() {
            let sanitized: String = segment
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            if !sanitized.trim_matches('.').is_empty() {
                return sanitized;
            }
        }

        format!("entry-{}.nc4", self.line)
    }
}

/// URL 清单
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// 从文件读取清单
    pub fn from_file(path: &Path, skip_lines: usize) -> Result<Self> {
        if !path.exists() {
            return Err(Merra2Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| Merra2Error::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let manifest = Self::parse(&content, skip_lines);
        if manifest.is_empty() {
            return Err(Merra2Error::EmptyManifest {
                path: path.display().to_string(),
            });
        }

        Ok(manifest)
    }

    /// 从文本内容解析清单
    ///
    /// 前 `skip_lines` 行直接丢弃；空行和 `#` 开头的行忽略。
    pub fn parse(content: &str, skip_lines: usize) -> Self {
        let entries = content
            .lines()
            .enumerate()
            .skip(skip_lines)
            .filter_map(|(i, line)| {
                let url = line.trim();
                if url.is_empty() || url.starts_with('#') {
                    None
                } else {
                    Some(ManifestEntry::new(url, i + 1))
                }
            })
            .collect();

        Manifest { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRANULE_URL: &str = "https://goldsmr4.gesdisc.eosdis.nasa.gov/opendap/MERRA2/M2T1NXSLV.5.12.4/2020/01/MERRA2_400.tavg1_2d_slv_Nx.20200101.nc4.nc4?U50M[0:23][200:200][300:300],time";

    #[test]
    fn test_parse_skips_header_and_blank_lines() {
        let content = format!(
            "https://goldsmr4.gesdisc.eosdis.nasa.gov/data/MERRA2/README.pdf\n\n{}\n# comment\n  https://example.org/b.nc4  \n",
            GRANULE_URL
        );
        let manifest = Manifest::parse(&content, 1);

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries[0].url, GRANULE_URL);
        assert_eq!(manifest.entries[0].line, 3);
        assert_eq!(manifest.entries[1].url, "https://example.org/b.nc4");
        assert_eq!(manifest.entries[1].line, 5);
    }

    #[test]
    fn test_parse_without_skip_keeps_first_line() {
        let manifest = Manifest::parse("https://example.org/a.nc4\nhttps://example.org/b.nc4", 0);
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.entries[0].url, "https://example.org/a.nc4");
    }

    #[test]
    fn test_scratch_name_from_granule_date() {
        let entry = ManifestEntry::new(GRANULE_URL, 2);
        assert_eq!(entry.granule_date(), Some("20200101"));
        assert_eq!(entry.scratch_file_name(), "20200101-site.nc4");
    }

    #[test]
    fn test_scratch_name_from_path_segment() {
        let entry = ManifestEntry::new("https://example.org/data/site%20a.nc4?x=1", 4);
        assert_eq!(entry.scratch_file_name(), "site_20a.nc4");
    }

    #[test]
    fn test_scratch_name_fallback() {
        let entry = ManifestEntry::new("https://example.org/", 7);
        assert_eq!(entry.scratch_file_name(), "entry-7.nc4");
    }

    #[test]
    fn test_missing_manifest_file() {
        let err = Manifest::from_file(Path::new("/nonexistent/manifest.txt"), 0).unwrap_err();
        assert!(matches!(err, Merra2Error::FileNotFound { .. }));
    }
}
