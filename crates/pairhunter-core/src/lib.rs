//! 核心扫描库
//!
//! 设计要点：
//! - 扫描器只认一种调用形态：`.post(url).set("x-api-key", key)`，两段式匹配（预筛调用点 + 锚定正则）。
//! - 命中项按出现顺序输出，附带 1 起始行号；可选 (url, key) 去重与上下文切片。
//! - crawl 对每个脚本独立执行扫描流水线，单个脚本失败只记录为错误项，结果按发现顺序聚合。

mod options;
mod error;
mod types;
mod findings;
mod prefilter;
mod scanner;
mod lines;
mod context;
mod scan;
mod fetch;
mod discover;
mod crawl;
mod report;
mod config;

pub use options::{CrawlOptions, CrawlStats, ScanOptions, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use error::{HuntError, Result};
pub use types::{CrawlReport, ScanReport, ScriptOutcome};
pub use findings::{dedupe_pairs, EnrichedPair, PairMatch};
pub use scanner::PairScanner;
pub use lines::LineIndex;
pub use context::{attach_context, extract_context, CONTEXT_TAIL, NEWLINE_PLACEHOLDER};
pub use scan::{scan_text, scan_url};
pub use fetch::{FetchedPage, Fetcher};
pub use discover::{discover_scripts, extract_script_srcs, normalize_script_url};
pub use crawl::{crawl, crawl_stats, scan_script};
pub use report::{
    capture_file_name, capture_host, render_json, render_outcomes_json, render_plain, write_capture, write_capture_now,
};
pub use config::{HunterConfig, DEFAULT_CONFIG_PATH};
