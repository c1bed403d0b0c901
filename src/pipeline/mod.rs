//! # ETL 流水线
//!
//! 清单读取一次，然后对每个条目依次执行 下载 → 解析 → 计算 → 追加记录。
//!
//! ## 资源范围
//! 下载文件和 netCDF 句柄只在一次迭代内存在，下一项开始前已释放
//! （默认删除下载文件，`keep_downloads` 时保留）。
//!
//! ## 依赖关系
//! - 被 `commands/fetch.rs`, `commands/process.rs` 调用
//! - 使用 `fetch/`, `parsers/`, `physics/`
//! - 子模块: collector, runner

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{RunReport, SequentialRunner};

use crate::config::{ComputeConfig, PipelineConfig};
use crate::error::{Merra2Error, Result};
use crate::fetch::{self, Fetch};
use crate::manifest::{Manifest, ManifestEntry};
use crate::models::DerivedRecord;
use crate::parsers;
use crate::physics;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 解析并计算单个本地文件
pub fn process_file(path: &Path, config: &ComputeConfig) -> Result<Vec<DerivedRecord>> {
    let series = parsers::parse_site_file(path, config)?;
    physics::derive_records(&series, config)
}

/// 处理一组本地文件（按给定顺序）
pub fn process_files(
    paths: &[PathBuf],
    config: &ComputeConfig,
    fail_fast: bool,
    table: &mut Vec<DerivedRecord>,
) -> RunReport {
    let runner = SequentialRunner::new(fail_fast, "Processing");
    runner.run(
        paths,
        |p| p.display().to_string(),
        table,
        |p| process_file(p, config),
    )
}

/// 下载流水线
pub struct Pipeline<'a, F: Fetch> {
    fetcher: &'a F,
    config: &'a PipelineConfig,
}

impl<'a, F: Fetch> Pipeline<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a PipelineConfig) -> Self {
        Pipeline { fetcher, config }
    }

    /// 单个条目的本地文件路径
    pub fn scratch_path(&self, entry: &ManifestEntry) -> PathBuf {
        self.config.scratch_dir.join(entry.scratch_file_name())
    }

    /// 处理单个清单条目
    pub fn process_entry(&self, entry: &ManifestEntry) -> Result<Vec<DerivedRecord>> {
        let dest = self.scratch_path(entry);
        self.fetcher.fetch(entry, &dest)?;

        let result = process_file(&dest, &self.config.compute);

        if !self.config.keep_downloads {
            if let Err(e) = fetch::remove_download(&dest) {
                output::print_warning(&format!("Could not remove {}: {}", dest.display(), e));
            }
        }

        result
    }

    /// 处理整个清单，记录按清单顺序追加到 `table`
    pub fn run(&self, manifest: &Manifest, table: &mut Vec<DerivedRecord>) -> Result<RunReport> {
        fs::create_dir_all(&self.config.scratch_dir).map_err(|e| Merra2Error::FileWriteError {
            path: self.config.scratch_dir.display().to_string(),
            source: e,
        })?;

        let runner = SequentialRunner::new(self.config.fail_fast, "Downloading");
        Ok(runner.run(
            &manifest.entries,
            |e| e.scratch_file_name(),
            table,
            |e| self.process_entry(e),
        ))
    }
}
