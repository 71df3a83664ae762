//! `.post(url).set("x-api-key", key)` 调用扫描器
//!
//! 两段式：prefilter 定位 `.post` 调用点，随后在每个调用点上执行锚定正则校验相邻结构。
//! 结果与对整段文本做一次全局 leftmost-first 正则扫描完全一致：
//! - 从左到右输出；
//! - 新的匹配不会落在上一个匹配的区间内。
use regex_automata as ra;
use ra::meta::Regex;
use ra::{Anchored, Input};

use crate::findings::PairMatch;
use crate::prefilter::PrefilterPlan;

/// 调用模式：
/// - 组 1/2：URL（双引号 / 单引号）
/// - 组 3/4：key（双引号 / 单引号）
/// 字面量的开闭引号必须一致，内容取到下一个同类引号为止，不处理转义。
/// 关键字部分按 ASCII 忽略大小写。
pub(crate) const PAIR_PATTERN: &str = concat!(
    r#"(?i-u:\.post)\s*\(\s*(?:"([^"]*)"|'([^']*)')\s*\)"#,
    r#"\s*(?i-u:\.set)\s*\(\s*(?:"(?i-u:x-api-key)"|'(?i-u:x-api-key)')"#,
    r#"\s*,\s*(?:"([^"]*)"|'([^']*)')\s*\)"#,
);

/// 扫描器：预筛计划 + 锚定正则（只读，可跨线程共享）
pub struct PairScanner {
    plan: PrefilterPlan,
    re: Regex,
}

impl PairScanner {
    pub fn new() -> Self {
        let re = Regex::new(PAIR_PATTERN).expect("compile built-in pair pattern");
        Self { plan: PrefilterPlan::new(), re }
    }

    /// 扫描文本，返回全部不重叠匹配（按出现顺序）
    pub fn scan(&self, text: &str) -> Vec<PairMatch> {
        let mut out = Vec::new();
        let mut caps = self.re.create_captures();
        // 上一个匹配的结束位置；落在其之前的调用点直接跳过
        let mut last_end = 0usize;

        for pos in self.plan.call_sites(text) {
            if pos < last_end {
                continue;
            }
            let input = Input::new(text).span(pos..text.len()).anchored(Anchored::Yes);
            self.re.captures(input, &mut caps);
            let m0 = match caps.get_match() { Some(m) => m, None => continue };

            let url = caps.get_group(1).or_else(|| caps.get_group(2));
            let key = caps.get_group(3).or_else(|| caps.get_group(4));
            if let (Some(u), Some(k)) = (url, key) {
                out.push(PairMatch {
                    url: text[u.start..u.end].to_string(),
                    key: text[k.start..k.end].to_string(),
                    offset: m0.start(),
                });
            }
            last_end = m0.end();
        }

        out
    }
}

impl Default for PairScanner {
    fn default() -> Self {
        Self::new()
    }
}
