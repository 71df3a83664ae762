//! 抓取主流程与并行调度
use tracing::{info, warn};

use crate::discover::discover_scripts;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::options::{CrawlOptions, CrawlStats, ScanOptions};
use crate::report::render_plain;
use crate::scan::scan_url;
use crate::scanner::PairScanner;
use crate::types::{CrawlReport, ScriptOutcome};

/// 抓取根页面，发现脚本并逐个扫描。
/// - 根页面抓取失败属于致命错误，直接返回 Err；
/// - 单个脚本失败只转成该脚本的 `ScriptOutcome::Error`，不影响其他脚本；
/// - 结果顺序始终等于发现顺序，与完成顺序无关。
pub fn crawl(root_url: &str, crawl_opts: &CrawlOptions, scan_opts: &ScanOptions) -> Result<CrawlReport> {
    let fetcher = Fetcher::new(crawl_opts)?;
    let page = fetcher.fetch(root_url)?;
    let scripts = discover_scripts(&page.final_url, &page.body)?;
    info!(root_url, scripts = scripts.len(), "scripts discovered");

    // 落盘时强制 JSON 模式（文件内容需要结构化）
    let mut scan_opts = scan_opts.clone();
    if crawl_opts.output {
        scan_opts.json = true;
    }

    let scanner = PairScanner::new();
    let threads = crawl_opts.concurrency.unwrap_or_else(num_cpus::get).max(1);
    let outcomes = if threads > 1 && scripts.len() > 1 {
        scan_scripts_parallel(&fetcher, &scanner, &scripts, &scan_opts, threads)?
    } else {
        scripts.iter().map(|u| scan_script(&fetcher, &scanner, u, &scan_opts)).collect()
    };

    Ok(CrawlReport { root_url: root_url.to_string(), scripts, outcomes })
}

/// 单个脚本的独立工作单元：任何失败都降级为数据
pub fn scan_script(fetcher: &Fetcher, scanner: &PairScanner, url: &str, opts: &ScanOptions) -> ScriptOutcome {
    match scan_url(fetcher, scanner, url, opts) {
        Ok(report) if opts.json => ScriptOutcome::Pairs(report),
        Ok(report) => ScriptOutcome::Text { url: url.to_string(), output: render_plain(&report).trim().to_string() },
        Err(e) => {
            warn!(url, error = %e, "script scan failed");
            ScriptOutcome::Error { url: url.to_string(), error: e.to_string() }
        }
    }
}

/// 并行调度：
/// - 专用 Rayon 线程池限定并发度
/// - worker 通过通道回传 (idx, outcome)，按 idx 归位，保证输出顺序稳定
fn scan_scripts_parallel(
    fetcher: &Fetcher,
    scanner: &PairScanner,
    scripts: &[String],
    opts: &ScanOptions,
    threads: usize,
) -> Result<Vec<ScriptOutcome>> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    let (tx, rx) = channel::bounded::<(usize, ScriptOutcome)>(scripts.len());
    pool.install(|| {
        scripts.par_iter().enumerate().for_each_with(tx, |tx, (idx, url)| {
            let _ = tx.send((idx, scan_script(fetcher, scanner, url, opts)));
        });
    });
    // for_each_with 结束后所有 Sender 已释放，rx 迭代会自然终止

    let mut slots: Vec<Option<ScriptOutcome>> = vec![None; scripts.len()];
    for (idx, outcome) in rx.iter() {
        slots[idx] = Some(outcome);
    }

    Ok(slots
        .into_iter()
        .zip(scripts)
        .map(|(slot, url)| {
            slot.unwrap_or_else(|| ScriptOutcome::Error { url: url.clone(), error: String::from("worker produced no result") })
        })
        .collect())
}

/// 统计聚合结果
pub fn crawl_stats(report: &CrawlReport) -> CrawlStats {
    let mut stats = CrawlStats { scripts_found: report.scripts.len(), ..Default::default() };
    for o in &report.outcomes {
        match o {
            ScriptOutcome::Pairs(r) => {
                stats.scripts_scanned += 1;
                stats.pairs_found += r.count;
            }
            ScriptOutcome::Text { .. } => stats.scripts_scanned += 1,
            ScriptOutcome::Error { .. } => stats.scripts_failed += 1,
        }
    }
    stats
}
