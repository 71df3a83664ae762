//! 扫描流水线：Scanner → 行号映射 → 去重 → 上下文
use tracing::{debug, info};

use crate::context::attach_context;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::findings::{dedupe_pairs, EnrichedPair};
use crate::lines::LineIndex;
use crate::options::ScanOptions;
use crate::scanner::PairScanner;
use crate::types::ScanReport;

/// 对一段文本执行完整流水线
pub fn scan_text(scanner: &PairScanner, text: &str, opts: &ScanOptions) -> Vec<EnrichedPair> {
    let matches = scanner.scan(text);
    if matches.is_empty() {
        return Vec::new();
    }

    let index = LineIndex::new(text);
    let offsets: Vec<usize> = matches.iter().map(|m| m.offset).collect();
    let lines = index.lines_for(&offsets);
    let mut pairs: Vec<EnrichedPair> = matches
        .into_iter()
        .zip(lines)
        .map(|(m, line)| EnrichedPair::from_match(m, line))
        .collect();

    if opts.unique {
        let before = pairs.len();
        pairs = dedupe_pairs(pairs);
        debug!(before, after = pairs.len(), "deduplicated pairs");
    }
    attach_context(text, &mut pairs, opts.context);
    pairs
}

/// 抓取 `url` 并扫描其内容
pub fn scan_url(fetcher: &Fetcher, scanner: &PairScanner, url: &str, opts: &ScanOptions) -> Result<ScanReport> {
    let page = fetcher.fetch(url)?;
    let pairs = scan_text(scanner, &page.body, opts);
    info!(url, count = pairs.len(), "scan finished");
    Ok(ScanReport::new(url, pairs))
}
