//! 错误类型（库内统一使用 `HuntError`）
use std::path::PathBuf;
use thiserror::Error;

/// 扫描 / 抓取 / 持久化过程中的错误
#[derive(Debug, Error)]
pub enum HuntError {
    /// 命令行缺少必需参数（例如 URL）
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// HTTP 状态码不在 2xx 范围
    #[error("fetch {url} failed with status {status}")]
    FetchStatus { url: String, status: u16 },

    /// HTTP 客户端构建失败（TLS 初始化等）
    #[error("http client: {0}")]
    Client(#[source] reqwest::Error),

    /// 网络层错误（连接失败、超时、读取 body 失败等）
    #[error("fetch {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 无法解析的 URL
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// 配置 / JSON 解析失败
    #[error("parse failure: {0}")]
    Parse(String),

    /// 工作线程池创建失败
    #[error("worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// 目录创建或文件写入失败
    #[error("filesystem failure at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HuntError {
    /// 映射为进程退出码：缺参 2，非成功状态 3，其余 1
    pub fn exit_code(&self) -> u8 {
        match self {
            HuntError::MissingArgument(_) => 2,
            HuntError::FetchStatus { .. } => 3,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for HuntError {
    fn from(e: toml::de::Error) -> Self {
        HuntError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for HuntError {
    fn from(e: serde_json::Error) -> Self {
        HuntError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HuntError>;
