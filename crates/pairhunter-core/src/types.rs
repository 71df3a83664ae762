//! 公共类型（对外暴露）
use serde::{Deserialize, Serialize};

use crate::findings::EnrichedPair;

/// 单个文本源的扫描结果（JSON 模式下的输出结构）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub url: String,
    pub count: usize,
    pub pairs: Vec<EnrichedPair>,
}

impl ScanReport {
    pub fn new(url: &str, pairs: Vec<EnrichedPair>) -> Self {
        Self { url: url.to_string(), count: pairs.len(), pairs }
    }
}

/// 单个脚本的处理结果（对应落盘文件中的一个元素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptOutcome {
    /// `{url, count, pairs}`
    Pairs(ScanReport),
    /// `{url, output}`：纯文本模式下的渲染结果
    Text { url: String, output: String },
    /// `{url, error}`：该脚本失败，不影响其他脚本
    Error { url: String, error: String },
}

impl ScriptOutcome {
    pub fn url(&self) -> &str {
        match self {
            ScriptOutcome::Pairs(r) => &r.url,
            ScriptOutcome::Text { url, .. } | ScriptOutcome::Error { url, .. } => url,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ScriptOutcome::Error { .. })
    }
}

/// 一次 crawl 的聚合结果（按发现顺序）
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub root_url: String,
    pub scripts: Vec<String>,
    pub outcomes: Vec<ScriptOutcome>,
}
