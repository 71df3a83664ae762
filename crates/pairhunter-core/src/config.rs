//! 配置文件加载（TOML）
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{HuntError, Result};
use crate::options::{CrawlOptions, ScanOptions};

/// 未指定 `--config` 时尝试读取的默认路径
pub const DEFAULT_CONFIG_PATH: &str = "./pairhunter.toml";

/// `[scan]` 段
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanSection {
    #[serde(default)]
    pub unique: Option<bool>,
    #[serde(default)]
    pub context: Option<usize>,
}

/// `[crawl]` 段
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlSection {
    #[serde(default)]
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// 顶层配置文件结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HunterConfig {
    #[serde(default)]
    pub scan: ScanSection,
    #[serde(default)]
    pub crawl: CrawlSection,
}

impl HunterConfig {
    pub fn from_toml(txt: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(txt)?;
        if cfg.crawl.concurrency == Some(0) {
            return Err(HuntError::Parse(String::from("crawl.concurrency must be >= 1")));
        }
        Ok(cfg)
    }

    /// 显式路径必须存在；未显式指定时默认路径不存在则返回空配置
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };
        let txt = std::fs::read_to_string(&path).map_err(|source| HuntError::Filesystem { path: path.clone(), source })?;
        Self::from_toml(&txt)
    }

    /// 以配置文件为底，未设置的字段沿用默认值
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            unique: self.scan.unique.unwrap_or(false),
            json: false,
            context: self.scan.context.unwrap_or(0),
        }
    }

    pub fn crawl_options(&self) -> CrawlOptions {
        let mut opts = CrawlOptions { concurrency: self.crawl.concurrency, ..Default::default() };
        if let Some(secs) = self.crawl.timeout_secs {
            opts.timeout = Duration::from_secs(secs);
        }
        if let Some(ua) = &self.crawl.user_agent {
            opts.user_agent = ua.clone();
        }
        if let Some(dir) = &self.crawl.output_dir {
            opts.output_dir = dir.clone();
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_OUTPUT_DIR;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = HunterConfig::from_toml("").unwrap();
        assert_eq!(cfg.scan_options(), ScanOptions::default());
        let crawl = cfg.crawl_options();
        assert_eq!(crawl.concurrency, None);
        assert_eq!(crawl.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = HunterConfig::from_toml(
            r#"
            [scan]
            unique = true
            context = 12

            [crawl]
            concurrency = 3
            timeout_secs = 5
            user_agent = "ua/1"
            output_dir = "out"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.scan_options(), ScanOptions { unique: true, json: false, context: 12 });
        let crawl = cfg.crawl_options();
        assert_eq!(crawl.concurrency, Some(3));
        assert_eq!(crawl.timeout, Duration::from_secs(5));
        assert_eq!(crawl.user_agent, "ua/1");
        assert_eq!(crawl.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        assert!(matches!(HunterConfig::from_toml("[scan]\nbogus = 1"), Err(HuntError::Parse(_))));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let err = HunterConfig::from_toml("[crawl]\nconcurrency = 0").unwrap_err();
        assert!(matches!(err, HuntError::Parse(msg) if msg.contains("concurrency")));
    }

    #[test]
    fn explicit_missing_file_is_filesystem_error() {
        let err = HunterConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, HuntError::Filesystem { .. }));
    }
}
