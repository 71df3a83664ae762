//! 结果渲染与落盘
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;
use url::Url;

use crate::error::{HuntError, Result};
use crate::types::{ScanReport, ScriptOutcome};

/// 纯文本格式：抬头、计数，然后逐条输出 URL / KEY / Line / Context
pub fn render_plain(report: &ScanReport) -> String {
    let mut out = String::new();
    // 写入 String 不会失败
    let _ = writeln!(out, "Fetched: {}", report.url);
    let _ = writeln!(out, "Found {} pair(s)", report.count);
    for p in &report.pairs {
        let _ = writeln!(out);
        let _ = writeln!(out, "URL: {}", p.url);
        let _ = writeln!(out, "KEY: {}", p.key);
        let _ = writeln!(out, "Line: {}", p.line);
        if let Some(ctx) = &p.context {
            let _ = writeln!(out, "Context: ...{ctx}...");
        }
    }
    out
}

/// JSON 格式（美化输出）
pub fn render_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// crawl 结果数组的 JSON 格式
pub fn render_outcomes_json(outcomes: &[ScriptOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}

/// 由根地址生成文件名前缀：取 host，去掉开头的 `www.`
pub fn capture_host(root_url: &str) -> String {
    let host = Url::parse(root_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| String::from("unknown"));
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

/// `<host> - <YYYYMMDDHHMMSS>.txt`
pub fn capture_file_name(root_url: &str, at: &DateTime<Local>) -> String {
    format!("{} - {}.txt", capture_host(root_url), at.format("%Y%m%d%H%M%S"))
}

/// 将聚合结果以 JSON 数组写入 `dir`（目录不存在时自动创建），返回文件路径
pub fn write_capture(dir: &Path, root_url: &str, outcomes: &[ScriptOutcome], at: &DateTime<Local>) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| HuntError::Filesystem { path: dir.to_path_buf(), source })?;

    let path = dir.join(capture_file_name(root_url, at));
    let body = render_outcomes_json(outcomes)?;
    std::fs::write(&path, body).map_err(|source| HuntError::Filesystem { path: path.clone(), source })?;

    info!(path = %path.display(), entries = outcomes.len(), "capture written");
    Ok(path)
}

/// 以当前本地时间落盘
pub fn write_capture_now(dir: &Path, root_url: &str, outcomes: &[ScriptOutcome]) -> Result<PathBuf> {
    write_capture(dir, root_url, outcomes, &Local::now())
}
