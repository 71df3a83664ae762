//! 从页面中发现外部脚本地址
//!
//! 只用宽松的正则匹配 `<script ... src=...>`，不做完整 HTML 解析：
//! - src 支持双引号、单引号与无引号写法；
//! - 相对地址基于页面地址解析；
//! - 去掉 query 与 fragment 后按字符串去重，保留首次发现的顺序。
use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::error::{HuntError, Result};

fn script_src_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<script\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("compile script src pattern")
    })
}

/// 提取页面内全部 `src` 原始值（未解析、未去重）
pub fn extract_script_srcs(html: &str) -> Vec<&str> {
    script_src_regex()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// 基于 `base` 解析单个 src：去掉 query/fragment，仅保留 http(s)
pub fn normalize_script_url(base: &Url, raw: &str) -> Option<String> {
    let mut url = base.join(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}

/// 发现脚本地址集合（按发现顺序去重）
pub fn discover_scripts(base_url: &str, html: &str) -> Result<Vec<String>> {
    let base = Url::parse(base_url).map_err(|source| HuntError::InvalidUrl { url: base_url.to_string(), source })?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut scripts = Vec::new();
    for raw in extract_script_srcs(html) {
        match normalize_script_url(&base, raw) {
            Some(u) => {
                if seen.insert(u.clone()) {
                    scripts.push(u);
                }
            }
            None => debug!(src = raw, "skipping unsupported script src"),
        }
    }
    Ok(scripts)
}
