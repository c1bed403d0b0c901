//! # 顺序执行器
//!
//! 逐项执行 下载 → 解析 → 计算，把记录追加到结果表中。
//!
//! ## 功能
//! - 单线程、按输入顺序处理
//! - 进度条显示，失败项以警告形式打印
//! - 默认跳过失败项；`fail_fast` 时在第一个失败处停止
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `pipeline/mod.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条

use crate::error::{ErrorKind, Merra2Error, Result};
use crate::models::DerivedRecord;
use crate::utils::{output, progress};

use std::collections::BTreeMap;

/// 单项处理结果
#[derive(Debug, Clone)]
pub enum EntryOutcome {
    /// 处理成功，附带产生的记录数
    Success(usize),
    /// 处理失败
    Failed(String, ErrorKind, String), // (标签, 错误类别, 错误信息)
}

/// 运行结果统计
#[derive(Debug, Default)]
pub struct RunReport {
    /// 成功项数
    pub success: usize,
    /// 失败项数
    pub failed: usize,
    /// 写入结果表的记录数
    pub records: usize,
    /// 未处理项数（fail-fast 停止后剩余）
    pub not_attempted: usize,
    /// 失败详情
    pub failures: Vec<(String, ErrorKind, String)>,
    /// fail-fast 模式下导致停止的错误
    pub stopped_by: Option<Merra2Error>,
}

impl RunReport {
    /// 合并处理结果
    pub fn merge(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Success(n) => {
                self.success += 1;
                self.records += n;
            }
            EntryOutcome::Failed(label, kind, msg) => {
                self.failed += 1;
                self.failures.push((label, kind, msg));
            }
        }
    }

    /// 已处理项数
    pub fn total(&self) -> usize {
        self.success + self.failed
    }

    /// 按错误类别统计失败数
    pub fn failures_by_kind(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, kind, _) in &self.failures {
            *counts.entry(*kind).or_insert(0) += 1;
        }
        counts
    }
}

/// 顺序执行器
pub struct SequentialRunner {
    fail_fast: bool,
    message: String,
}

impl SequentialRunner {
    /// 创建新的执行器
    pub fn new(fail_fast: bool, message: impl Into<String>) -> Self {
        Self {
            fail_fast,
            message: message.into(),
        }
    }

    /// 逐项处理，成功项的记录按顺序追加到 `table`
    pub fn run<T, L, F>(
        &self,
        items: &[T],
        label: L,
        table: &mut Vec<DerivedRecord>,
        mut processor: F,
    ) -> RunReport
    where
        L: Fn(&T) -> String,
        F: FnMut(&T) -> Result<Vec<DerivedRecord>>,
    {
        let pb = progress::create_progress_bar(items.len() as u64, &self.message);
        let mut report = RunReport::default();

        for (i, item) in items.iter().enumerate() {
            let name = label(item);
            pb.set_message(name.clone());

            match processor(item) {
                Ok(records) => {
                    report.merge(EntryOutcome::Success(records.len()));
                    table.extend(records);
                }
                Err(e) => {
                    pb.suspend(|| {
                        output::print_warning(&format!("Failed to fetch or process {}: {}", name, e));
                    });
                    report.merge(EntryOutcome::Failed(name, e.kind(), e.to_string()));

                    if self.fail_fast {
                        report.not_attempted = items.len() - i - 1;
                        report.stopped_by = Some(e);
                        break;
                    }
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32) -> DerivedRecord {
        DerivedRecord {
            datetime: NaiveDate::from_ymd_opt(2020, 1, day)
                .unwrap()
                .and_hms_opt(0, 30, 0)
                .unwrap(),
            latitude: None,
            longitude: None,
            surface_pressure: 101325.0,
            temp_2m: 288.15,
            ws_lower: Some(1.0),
            ws_upper: 2.0,
            air_density: 1.2,
            wind_speed: 2.0,
        }
    }

    fn process(day: &u32) -> Result<Vec<DerivedRecord>> {
        if *day == 0 {
            Err(Merra2Error::Computation("bad day".to_string()))
        } else {
            Ok(vec![record(*day)])
        }
    }

    #[test]
    fn test_skip_failures_by_default() {
        let mut table = Vec::new();
        let runner = SequentialRunner::new(false, "Testing");
        let report = runner.run(&[3, 0, 1], |d| d.to_string(), &mut table, process);

        assert_eq!(report.success, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 3);
        assert_eq!(report.records, 2);
        assert!(report.stopped_by.is_none());
        assert_eq!(table[0].datetime.to_string(), "2020-01-03 00:30:00");
        assert_eq!(table[1].datetime.to_string(), "2020-01-01 00:30:00");
        assert_eq!(report.failures_by_kind()[&ErrorKind::Computation], 1);
    }

    #[test]
    fn test_fail_fast_keeps_earlier_records() {
        let mut table = Vec::new();
        let runner = SequentialRunner::new(true, "Testing");
        let report = runner.run(&[2, 0, 1, 4], |d| d.to_string(), &mut table, process);

        assert_eq!(table.len(), 1);
        assert_eq!(report.success, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(report.not_attempted, 2);
        assert!(matches!(
            report.stopped_by,
            Some(Merra2Error::Computation(_))
        ));
    }
}
