use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pairhunter_core::{
    crawl, crawl_stats, render_json, render_outcomes_json, render_plain, scan_url, write_capture_now, CrawlOptions,
    Fetcher, HuntError, HunterConfig, PairScanner, ScanOptions, ScriptOutcome,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "pairhunter", version, about = "提取 JS 中硬编码的 x-api-key / URL 对")]
struct Cli {
    /// 配置文件（TOML），默认 ./pairhunter.toml（存在时）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// 两个入口共用的扫描参数
#[derive(Args, Debug)]
struct ScanFlags {
    /// 按 (url, key) 去重
    #[arg(long)]
    unique: bool,

    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 上下文窗口宽度（`--context` 不带值时为 80；0 表示关闭）
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "80")]
    context: Option<usize>,

    /// 请求超时（秒）
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// 自定义 User-Agent
    #[arg(long)]
    user_agent: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 抓取单个 URL 并扫描其内容
    Scan {
        /// 目标地址（脚本或任意文本）
        url: Option<String>,

        #[command(flatten)]
        flags: ScanFlags,
    },
    /// 抓取页面，发现 <script src> 并逐个扫描
    Crawl {
        /// 根页面地址
        url: Option<String>,

        #[command(flatten)]
        flags: ScanFlags,

        /// 将结果写入 captures/<host> - <时间戳>.txt（强制 JSON 模式）
        #[arg(long, short = 'o')]
        output: bool,

        /// 并发数（"auto"=CPU 核心数；1 为串行）
        #[arg(long, value_parser = parse_threads)]
        concurrency: Option<Concurrency>,
    },
}

/// `--concurrency` 的取值："auto" 为 None
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Concurrency(Option<usize>);

fn main() -> ExitCode {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();
    let is_crawl = matches!(cli.command, Commands::Crawl { .. });

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_code_for(&e, is_crawl))
        }
    }
}

/// 返回进程退出码；缺少 URL 的检查先于读取配置文件
fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        Commands::Scan { url, flags } => {
            let Some(url) = url else {
                eprintln!("Usage: pairhunter scan <URL> [--unique] [--json] [--context=N]");
                return Ok(HuntError::MissingArgument("url").exit_code());
            };
            let config = HunterConfig::load(cli.config.as_deref()).context("load config")?;
            let scan_opts = scan_options(&config, &flags);
            let crawl_opts = crawl_options(&config, &flags);
            info!(%url, ?scan_opts, "starting scan");

            let fetcher = Fetcher::new(&crawl_opts)?;
            let report = scan_url(&fetcher, &PairScanner::new(), &url, &scan_opts)?;
            if scan_opts.json {
                println!("{}", render_json(&report)?);
            } else {
                print!("{}", render_plain(&report));
            }
        }
        Commands::Crawl { url, flags, output, concurrency } => {
            let Some(url) = url else {
                eprintln!("Usage: pairhunter crawl <root-URL> [--json] [--context=N] [--unique] [--output|-o]");
                return Ok(1);
            };
            let config = HunterConfig::load(cli.config.as_deref()).context("load config")?;
            let scan_opts = scan_options(&config, &flags);
            let mut crawl_opts = crawl_options(&config, &flags);
            crawl_opts.output = output;
            if let Some(Concurrency(c)) = concurrency {
                crawl_opts.concurrency = c;
            }
            info!(%url, ?crawl_opts, "starting crawl");

            let report = crawl(&url, &crawl_opts, &scan_opts).with_context(|| format!("crawl {url}"))?;
            if report.scripts.is_empty() {
                println!("No scripts found on {url}");
                return Ok(0);
            }

            print_outcomes(&report.outcomes, flags.json)?;

            if crawl_opts.output {
                let path = write_capture_now(&crawl_opts.output_dir, &url, &report.outcomes)
                    .context("write capture file")?;
                println!("Saved results to {}", path.display());
            }

            let stats = crawl_stats(&report);
            info!(
                scripts_found = stats.scripts_found,
                scripts_scanned = stats.scripts_scanned,
                scripts_failed = stats.scripts_failed,
                pairs_found = stats.pairs_found,
                "crawl finished"
            );
        }
    }

    Ok(0)
}

fn print_outcomes(outcomes: &[ScriptOutcome], json: bool) -> Result<()> {
    if json {
        println!("{}", render_outcomes_json(outcomes)?);
        return Ok(());
    }
    for o in outcomes {
        println!("=== {} ===", o.url());
        match o {
            ScriptOutcome::Pairs(report) => print!("{}", render_plain(report)),
            ScriptOutcome::Text { output, .. } => println!("{output}"),
            ScriptOutcome::Error { error, .. } => println!("Error: {error}"),
        }
        println!();
    }
    Ok(())
}

/// 配置文件为底，命令行参数覆盖
fn scan_options(config: &HunterConfig, flags: &ScanFlags) -> ScanOptions {
    let mut opts = config.scan_options();
    opts.unique |= flags.unique;
    opts.json = flags.json;
    if let Some(n) = flags.context {
        opts.context = n;
    }
    opts
}

fn crawl_options(config: &HunterConfig, flags: &ScanFlags) -> CrawlOptions {
    let mut opts = config.crawl_options();
    if let Some(secs) = flags.timeout_secs {
        opts.timeout = Duration::from_secs(secs);
    }
    if let Some(ua) = &flags.user_agent {
        opts.user_agent = ua.clone();
    }
    opts
}

/// crawl 的致命错误一律为 1；scan 根据错误链中的 HuntError 决定退出码，其他错误为 1
fn exit_code_for(e: &anyhow::Error, is_crawl: bool) -> u8 {
    if is_crawl {
        return 1;
    }
    e.chain()
        .find_map(|c| c.downcast_ref::<HuntError>())
        .map(HuntError::exit_code)
        .unwrap_or(1)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写 stderr，stdout 只保留结果（便于管道处理 JSON）
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(std::io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析并发参数（clap value_parser）："auto" 或 >= 1 的整数
fn parse_threads(s: &str) -> std::result::Result<Concurrency, String> {
    if s.eq_ignore_ascii_case("auto") { return Ok(Concurrency(None)); }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Concurrency(Some(n))),
        _ => Err(format!("expected \"auto\" or an integer >= 1, got {s:?}")),
    }
}
