//! # 下载器
//!
//! 将清单中的每个 URL 下载到本地临时目录。
//!
//! ## 功能
//! - `Fetch` trait：流水线只依赖该接口
//! - `HttpFetcher`：基于 `reqwest` blocking 客户端的实现
//! - 同名文件直接覆盖，不做重试
//!
//! ## 依赖关系
//! - 被 `pipeline/` 和 `commands/fetch.rs` 使用
//! - 使用 `manifest/`、`config.rs`

use crate::config::HttpConfig;
use crate::error::{Merra2Error, Result};
use crate::manifest::ManifestEntry;

use std::fs::{self, File};
use std::io;
use std::path::Path;

/// 下载接口
pub trait Fetch {
    /// 将 `entry` 下载到 `dest`（覆盖已有文件）
    fn fetch(&self, entry: &ManifestEntry, dest: &Path) -> Result<()>;
}

/// HTTP(S) 下载器
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    token: Option<String>,
}

impl HttpFetcher {
    /// 创建下载器
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Merra2Error::Network {
                url: String::new(),
                source: e,
            })?;

        Ok(HttpFetcher {
            client,
            token: config.token.clone(),
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, entry: &ManifestEntry, dest: &Path) -> Result<()> {
        let mut request = self.client.get(&entry.url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let mut response = request.send().map_err(|e| Merra2Error::Network {
            url: entry.url.clone(),
            source: e,
        })?;

        if !response.status().is_success() {
            return Err(Merra2Error::HttpStatus {
                url: entry.url.clone(),
                status: response.status().as_u16(),
            });
        }

        write_body(dest, |file| {
            response
                .copy_to(file)
                .map(|_| ())
                .map_err(|e| Merra2Error::Network {
                    url: entry.url.clone(),
                    source: e,
                })
        })
    }
}

/// 创建目标文件并写入内容；失败时删除不完整的文件
pub fn write_body<F>(dest: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Merra2Error::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }

    let mut file = File::create(dest).map_err(|e| Merra2Error::FileWriteError {
        path: dest.display().to_string(),
        source: e,
    })?;

    if let Err(e) = write(&mut file) {
        drop(file);
        let _ = fs::remove_file(dest);
        return Err(e);
    }

    file.sync_all().map_err(|e| Merra2Error::FileWriteError {
        path: dest.display().to_string(),
        source: e,
    })
}

/// 删除已处理的下载文件（文件不存在视为成功）
pub fn remove_download(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Merra2Error::FileWriteError {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::fixtures::scratch_dir;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// 本地单次 HTTP 服务，返回 URL 和收到的请求头
    fn serve_once(status: &'static str, body: &'static [u8]) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        let url = format!("http://{}/MERRA2_400.tavg1_2d_slv_Nx.20200101.nc4", addr);
        (url, handle)
    }

    /// 不经过系统代理的下载器
    fn local_fetcher(token: Option<&str>) -> HttpFetcher {
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();
        HttpFetcher {
            client,
            token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_fetch_writes_body_with_bearer_token() {
        let dir = scratch_dir("http_fetch_ok");
        let dest = dir.join("netfiles").join("20200101-site.nc4");
        let (url, server) = serve_once("200 OK", b"CDF\x01 granule bytes");

        let fetcher = local_fetcher(Some("secret-token"));
        fetcher.fetch(&ManifestEntry::new(url, 1), &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"CDF\x01 granule bytes");
        let request = server.join().unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /merra2_400.tavg1_2d_slv_nx.20200101.nc4 "));
        assert!(request.contains("authorization: bearer secret-token"));
    }

    #[test]
    fn test_fetch_maps_error_status() {
        let dir = scratch_dir("http_fetch_404");
        let dest = dir.join("missing.nc4");
        let (url, server) = serve_once("404 Not Found", b"not here");

        let fetcher = local_fetcher(None);
        let err = fetcher.fetch(&ManifestEntry::new(url, 2), &dest).unwrap_err();

        assert!(matches!(err, Merra2Error::HttpStatus { status: 404, .. }));
        assert_eq!(err.kind(), crate::error::ErrorKind::Network);
        assert!(!dest.exists());
        let request = server.join().unwrap().to_ascii_lowercase();
        assert!(!request.contains("authorization:"));
    }

    #[test]
    fn test_write_body_creates_parent_and_overwrites() {
        let dir = scratch_dir("write_body");
        let dest = dir.join("nested").join("a.nc4");

        write_body(&dest, |f| {
            f.write_all(b"first download").map_err(|e| Merra2Error::FileWriteError {
                path: String::new(),
                source: e,
            })
        })
        .unwrap();
        write_body(&dest, |f| {
            f.write_all(b"second").map_err(|e| Merra2Error::FileWriteError {
                path: String::new(),
                source: e,
            })
        })
        .unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"second");
    }

    #[test]
    fn test_write_body_removes_partial_file() {
        let dir = scratch_dir("write_body_partial");
        let dest = dir.join("partial.nc4");

        let result = write_body(&dest, |f| {
            f.write_all(b"half").ok();
            Err(Merra2Error::Other("connection reset".to_string()))
        });

        assert!(result.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_remove_download_missing_is_ok() {
        let dir = scratch_dir("remove_download");
        assert!(remove_download(&dir.join("never-downloaded.nc4")).is_ok());
    }

    #[test]
    fn test_http_fetcher_builds_with_token() {
        let config = HttpConfig {
            token: Some("secret".to_string()),
            ..Default::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();
        assert_eq!(fetcher.token.as_deref(), Some("secret"));
    }
}
