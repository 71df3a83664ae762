//! 调用点预筛（Aho-Corasick）
//!
//! 两段式扫描的第一段：
//! - 用 ASCII 大小写不敏感的 AC 自动机定位所有 `.post` 调用点；
//! - 第二段（见 scanner.rs）只在这些位置上执行锚定正则，验证 `.post(..).set(..)` 的相邻结构。

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

/// 调用点锚点（与正则首段一致）
pub(crate) const CALL_ANCHOR: &str = ".post";

/// 预筛计划（只读，可跨线程共享）
pub(crate) struct PrefilterPlan {
    ac: AhoCorasick,
}

impl PrefilterPlan {
    pub(crate) fn new() -> Self {
        let ac = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostFirst)
            .build([CALL_ANCHOR])
            .expect("build aho-corasick from a fixed literal");
        Self { ac }
    }

    /// 返回所有候选起点（升序）
    pub(crate) fn call_sites<'a>(&'a self, text: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.ac.find_iter(text).map(|m| m.start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_call_sites_case_insensitively() {
        let plan = PrefilterPlan::new();
        let text = "a.post(x) b.POST(y) c.Post";
        let hits: Vec<usize> = plan.call_sites(text).collect();
        assert_eq!(hits, vec![1, 11, 21]);
    }

    #[test]
    fn no_anchor_no_sites() {
        let plan = PrefilterPlan::new();
        assert_eq!(plan.call_sites("fetch(url).then(r => r.json())").count(), 0);
    }
}
