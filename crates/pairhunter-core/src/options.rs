//! 扫描 / 抓取选项与统计信息（模块）
use std::path::PathBuf;
use std::time::Duration;

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!("pairhunter/", env!("CARGO_PKG_VERSION"));
/// 默认落盘目录
pub const DEFAULT_OUTPUT_DIR: &str = "captures";

/// 单个文本源的扫描选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// 按 (url, key) 去重，仅保留首次出现
    pub unique: bool,
    /// 以 JSON 形式输出（crawl 落盘时强制开启）
    pub json: bool,
    /// 上下文窗口宽度；0 表示关闭
    pub context: usize,
}

/// 抓取选项
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// 并发数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub concurrency: Option<usize>,
    /// 单次请求超时
    pub timeout: Duration,
    pub user_agent: String,
    /// 是否将聚合结果写入文件
    pub output: bool,
    /// 结果文件目录
    pub output_dir: PathBuf,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            concurrency: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// 抓取统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    pub scripts_found: usize,
    pub scripts_scanned: usize,
    pub scripts_failed: usize,
    pub pairs_found: usize,
}
