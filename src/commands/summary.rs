//! # 运行收尾
//!
//! `fetch` 和 `process` 共用：写出 CSV、打印汇总表，fail-fast 停止时返回原始错误。
//!
//! ## 依赖关系
//! - 被 `commands/fetch.rs`, `commands/process.rs` 调用
//! - 使用 `export/csv_file.rs`, `pipeline/runner.rs`

use crate::error::Result;
use crate::export;
use crate::models::DerivedRecord;
use crate::pipeline::RunReport;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// 汇总表的行
fn summary_rows(report: &RunReport) -> Vec<SummaryRow> {
    let mut rows = vec![
        SummaryRow {
            item: "Succeeded".to_string(),
            count: report.success,
        },
        SummaryRow {
            item: "Failed".to_string(),
            count: report.failed,
        },
    ];
    for (kind, count) in report.failures_by_kind() {
        rows.push(SummaryRow {
            item: format!("  {} errors", kind),
            count,
        });
    }
    if report.not_attempted > 0 {
        rows.push(SummaryRow {
            item: "Not attempted".to_string(),
            count: report.not_attempted,
        });
    }
    rows.push(SummaryRow {
        item: "Records written".to_string(),
        count: report.records,
    });
    rows
}

/// 写出结果表并打印汇总
pub fn finish_run(table: &[DerivedRecord], report: RunReport, output_path: &Path) -> Result<()> {
    if table.is_empty() {
        output::print_warning("No records were derived; writing a header-only CSV.");
    }
    export::write_csv(table, output_path)?;
    output::print_success(&format!(
        "Wrote {} records to '{}'",
        table.len(),
        output_path.display()
    ));

    output::print_header("Run Summary");
    println!("{}", Table::new(summary_rows(&report)));

    if report.not_attempted > 0 {
        output::print_skip(&format!(
            "{} entries not attempted after the first failure",
            report.not_attempted
        ));
    }

    match report.stopped_by {
        Some(e) => Err(e),
        None => {
            output::print_done(&format!(
                "{}/{} entries processed successfully",
                report.success,
                report.total()
            ));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Merra2Error};
    use crate::parsers::fixtures::scratch_dir;

    #[test]
    fn test_summary_rows_include_kinds() {
        let report = RunReport {
            success: 3,
            failed: 2,
            records: 3,
            failures: vec![
                ("a".to_string(), ErrorKind::Network, "404".to_string()),
                ("b".to_string(), ErrorKind::Format, "no T2M".to_string()),
            ],
            ..Default::default()
        };
        let rows = summary_rows(&report);
        let items: Vec<&str> = rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(
            items,
            vec![
                "Succeeded",
                "Failed",
                "  network errors",
                "  format errors",
                "Records written"
            ]
        );
    }

    #[test]
    fn test_stopped_run_still_writes_csv() {
        let dir = scratch_dir("finish_run");
        let path = dir.join("partial.csv");
        let report = RunReport {
            failed: 1,
            not_attempted: 2,
            stopped_by: Some(Merra2Error::Computation("bad".to_string())),
            ..Default::default()
        };

        let result = finish_run(&[], report, &path);
        assert!(matches!(result, Err(Merra2Error::Computation(_))));
        assert!(path.exists());
    }
}
