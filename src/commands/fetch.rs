//! # fetch 命令实现
//!
//! 完整的 ETL 流程：读取清单 → 逐项下载、解析、计算 → 写出一张 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/fetch.rs` 定义的参数
//! - 使用 `manifest/`, `fetch/`, `pipeline/`
//! - 使用 `utils/output.rs`

use super::summary;
use crate::cli::fetch::FetchArgs;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::manifest::Manifest;
use crate::pipeline::Pipeline;
use crate::utils::output;

/// 未提供令牌时的提示（只支持 bearer token 认证）
const NO_TOKEN_WARNING: &str = "No Earthdata token given (--token or EARTHDATA_TOKEN); \
     .netrc credentials are not used, so protected URLs will fail with 401.";

/// 执行 fetch 命令
pub fn execute(args: FetchArgs) -> Result<()> {
    output::print_header("MERRA2 Download & Processing");

    let config = args.pipeline_config()?;
    let manifest = Manifest::from_file(&args.manifest, args.skip_lines)?;

    output::print_info(&format!(
        "{} URLs in '{}'",
        manifest.len(),
        args.manifest.display()
    ));
    output::print_info(&format!(
        "Wind at {} m ({}), scratch directory '{}'",
        config.compute.target_height,
        config.compute.profile,
        config.scratch_dir.display()
    ));
    if args.token.is_none() {
        output::print_warning(NO_TOKEN_WARNING);
    }

    let fetcher = HttpFetcher::new(&args.http_config())?;
    let pipeline = Pipeline::new(&fetcher, &config);

    let mut table = Vec::new();
    let report = pipeline.run(&manifest, &mut table)?;

    summary::finish_run(&table, report, &args.output)
}
