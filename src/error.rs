//! # 统一错误处理模块
//!
//! 定义 merra2 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 网络错误：URL 不可达、HTTP 状态异常
//! - 格式错误：netCDF 文件损坏、缺少变量、时间单位无法解析
//! - 计算错误：物理输入越界或缺失
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// merra2 统一错误类型
#[derive(Error, Debug)]
pub enum Merra2Error {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 网络错误
    // ─────────────────────────────────────────────────────────────
    #[error("Request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    // ─────────────────────────────────────────────────────────────
    // 格式错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read netCDF file: {path}")]
    NetCdf {
        path: String,
        #[source]
        source: netcdf::Error,
    },

    #[error("Variable '{variable}' not found in {path}")]
    MissingVariable { variable: String, path: String },

    #[error("Invalid time units '{units}' in {path}")]
    InvalidTimeUnits { units: String, path: String },

    #[error("Index {index} out of range for dimension '{dimension}' (length {len})")]
    IndexOutOfRange {
        dimension: String,
        index: usize,
        len: usize,
    },

    #[error("No latitude/longitude coordinates in {path}; cannot select nearest grid point")]
    MissingCoordinates { path: String },

    #[error("Manifest contains no URLs: {path}")]
    EmptyManifest { path: String },

    // ─────────────────────────────────────────────────────────────
    // 计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("Computation failed: {0}")]
    Computation(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// 错误类别（用于运行汇总）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    Network,
    Format,
    Computation,
    Io,
    Other,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Format => write!(f, "format"),
            ErrorKind::Computation => write!(f, "computation"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

impl Merra2Error {
    /// 错误所属类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            Merra2Error::Network { .. } | Merra2Error::HttpStatus { .. } => ErrorKind::Network,
            Merra2Error::NetCdf { .. }
            | Merra2Error::MissingVariable { .. }
            | Merra2Error::InvalidTimeUnits { .. }
            | Merra2Error::IndexOutOfRange { .. }
            | Merra2Error::MissingCoordinates { .. }
            | Merra2Error::EmptyManifest { .. } => ErrorKind::Format,
            Merra2Error::Computation(_) => ErrorKind::Computation,
            Merra2Error::FileReadError { .. }
            | Merra2Error::FileWriteError { .. }
            | Merra2Error::DirectoryNotFound { .. }
            | Merra2Error::FileNotFound { .. }
            | Merra2Error::CsvError(_) => ErrorKind::Io,
            Merra2Error::InvalidArgument(_) | Merra2Error::Other(_) => ErrorKind::Other,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, Merra2Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_classification() {
        let missing = Merra2Error::MissingVariable {
            variable: "T2M".to_string(),
            path: "a.nc4".to_string(),
        };
        assert_eq!(missing.kind(), ErrorKind::Format);

        let status = Merra2Error::HttpStatus {
            url: "https://example.org/a.nc4".to_string(),
            status: 401,
        };
        assert_eq!(status.kind(), ErrorKind::Network);

        assert_eq!(
            Merra2Error::Computation("negative pressure".to_string()).kind(),
            ErrorKind::Computation
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Merra2Error::HttpStatus {
            url: "https://example.org/a.nc4".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Server returned 404 for https://example.org/a.nc4"
        );
    }
}
