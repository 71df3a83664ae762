//! 命中项与去重
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 扫描器的原始命中（创建后不再修改）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairMatch {
    pub url: String,
    pub key: String,
    /// 匹配起点的字节偏移
    pub offset: usize,
}

/// 附加行号与上下文后的命中项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPair {
    pub url: String,
    pub key: String,
    pub offset: usize,
    /// 从 1 开始的行号
    pub line: usize,
    /// 未开启上下文时为 null（而不是空串）
    pub context: Option<String>,
}

impl EnrichedPair {
    pub(crate) fn from_match(m: PairMatch, line: usize) -> Self {
        Self { url: m.url, key: m.key, offset: m.offset, line, context: None }
    }
}

/// 按 (url, key) 去重：保留首次出现，维持原有相对顺序
pub fn dedupe_pairs(pairs: Vec<EnrichedPair>) -> Vec<EnrichedPair> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    pairs
        .into_iter()
        .filter(|p| seen.insert((p.url.clone(), p.key.clone())))
        .collect()
}
