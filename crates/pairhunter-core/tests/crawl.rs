//! 基于 mockito 的端到端测试：抓取、发现、扫描与落盘

use mockito::{Mock, Server};
use pairhunter_core::{
    crawl, crawl_stats, scan_url, write_capture, CrawlOptions, Fetcher, HuntError, PairScanner, ScanOptions,
    ScriptOutcome,
};
use std::time::Duration;

const BUNDLE_A: &str = "!function(){\nvar c=r.post('https://api.example.com/x').set(\"x-api-key\", 'SECRET123');\n}();";
const BUNDLE_C: &str = "console.log('nothing to see');";

fn index_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
    <script src="/static/a.js?v=1"></script>
    <script src="/static/a.js?v=2"></script>
    <script defer src="/static/b.js"></script>
</head>
<body>
    <script src='static/c.js#main'></script>
    <script>window.inline = true;</script>
</body>
</html>"#
        .to_string()
}

fn js_mock(server: &mut Server, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/javascript")
        .with_body(body)
        .create()
}

fn site(server: &mut Server) -> Vec<Mock> {
    vec![
        server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(index_html())
            .create(),
        js_mock(server, "/static/a.js", BUNDLE_A),
        server.mock("GET", "/static/b.js").with_status(500).with_body("boom").create(),
        js_mock(server, "/static/c.js", BUNDLE_C),
    ]
}

fn crawl_opts(concurrency: usize) -> CrawlOptions {
    CrawlOptions { concurrency: Some(concurrency), timeout: Duration::from_secs(10), ..Default::default() }
}

#[test]
fn crawl_collapses_query_variants_and_isolates_failures() {
    let mut server = Server::new();
    let _mocks = site(&mut server);
    let root = format!("{}/", server.url());

    let scan_opts = ScanOptions { json: true, ..Default::default() };
    let report = crawl(&root, &crawl_opts(3), &scan_opts).unwrap();

    let base = server.url();
    assert_eq!(
        report.scripts,
        vec![format!("{base}/static/a.js"), format!("{base}/static/b.js"), format!("{base}/static/c.js")]
    );
    assert_eq!(report.outcomes.len(), 3);

    match &report.outcomes[0] {
        ScriptOutcome::Pairs(r) => {
            assert_eq!(r.count, 1);
            assert_eq!(r.pairs[0].url, "https://api.example.com/x");
            assert_eq!(r.pairs[0].key, "SECRET123");
            assert_eq!(r.pairs[0].line, 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    match &report.outcomes[1] {
        ScriptOutcome::Error { url, error } => {
            assert!(url.ends_with("/static/b.js"));
            assert!(error.contains("500"), "error: {error}");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    match &report.outcomes[2] {
        ScriptOutcome::Pairs(r) => assert_eq!(r.count, 0),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let stats = crawl_stats(&report);
    assert_eq!((stats.scripts_scanned, stats.scripts_failed, stats.pairs_found), (2, 1, 1));
}

#[test]
fn sequential_plain_mode_captures_text_output() {
    let mut server = Server::new();
    let _mocks = site(&mut server);
    let root = format!("{}/", server.url());

    let report = crawl(&root, &crawl_opts(1), &ScanOptions::default()).unwrap();
    let urls: Vec<&str> = report.outcomes.iter().map(|o| o.url()).collect();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].ends_with("a.js") && urls[1].ends_with("b.js") && urls[2].ends_with("c.js"));

    match &report.outcomes[0] {
        ScriptOutcome::Text { output, .. } => {
            assert!(output.starts_with("Fetched: "));
            assert!(output.contains("KEY: SECRET123"));
            assert!(output.ends_with("Line: 2"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(report.outcomes[1].is_error());
}

#[test]
fn output_forces_json_mode() {
    let mut server = Server::new();
    let _mocks = site(&mut server);
    let root = format!("{}/", server.url());

    let opts = CrawlOptions { output: true, ..crawl_opts(2) };
    let report = crawl(&root, &opts, &ScanOptions::default()).unwrap();
    assert!(matches!(report.outcomes[0], ScriptOutcome::Pairs(_)));
}

#[test]
fn page_without_scripts_yields_empty_report() {
    let mut server = Server::new();
    let _m = server.mock("GET", "/").with_status(200).with_body("<html><body>hi</body></html>").create();

    let report = crawl(&format!("{}/", server.url()), &crawl_opts(2), &ScanOptions::default()).unwrap();
    assert!(report.scripts.is_empty());
    assert!(report.outcomes.is_empty());
}

#[test]
fn root_page_failure_is_fatal() {
    let mut server = Server::new();
    let _m = server.mock("GET", "/").with_status(404).create();

    let err = crawl(&format!("{}/", server.url()), &crawl_opts(2), &ScanOptions::default()).unwrap_err();
    assert!(matches!(err, HuntError::FetchStatus { status: 404, .. }));
}

#[test]
fn scan_url_applies_pipeline_options() {
    let mut server = Server::new();
    let body = format!("{BUNDLE_A}\n{BUNDLE_A}");
    let _m = js_mock(&mut server, "/bundle.js", &body);
    let url = format!("{}/bundle.js", server.url());

    let fetcher = Fetcher::new(&crawl_opts(1)).unwrap();
    let scanner = PairScanner::new();

    let all = scan_url(&fetcher, &scanner, &url, &ScanOptions::default()).unwrap();
    assert_eq!(all.count, 2);
    assert_eq!(all.pairs[1].line, 5);

    let opts = ScanOptions { unique: true, context: 7, ..Default::default() };
    let unique = scan_url(&fetcher, &scanner, &url, &opts).unwrap();
    assert_eq!(unique.count, 1);
    assert_eq!(unique.url, url);
    assert!(unique.pairs[0].context.as_deref().unwrap().starts_with("var c=r.post("));
}

#[test]
fn capture_file_is_written_under_created_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("captures");
    let outcomes = vec![
        ScriptOutcome::Error { url: "https://www.example.com/b.js".into(), error: "boom".into() },
    ];
    let at = chrono_fixed();

    let path = write_capture(&dir, "https://www.example.com/", &outcomes, &at).unwrap();
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "example.com - 20240102030405.txt");

    let written: Vec<ScriptOutcome> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, outcomes);
}

fn chrono_fixed() -> chrono::DateTime<chrono::Local> {
    use chrono::TimeZone;
    chrono::Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
}
