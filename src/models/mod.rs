//! # 数据模型模块
//!
//! 定义原始网格、站点时间序列和派生记录的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`physics/`、`export/` 和 `commands/` 使用
//! - 子模块: grid, record

pub mod grid;
pub mod record;

pub use grid::{GridPoint, GridVariable, RawGrid};
pub use record::{DerivedRecord, SiteSample, SiteSeries};
