//! HTTP 抓取（阻塞客户端，带超时）
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{HuntError, Result};
use crate::options::CrawlOptions;

/// 一次成功抓取的结果
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// 跟随重定向后的最终地址（作为相对链接的基准）
    pub final_url: String,
    pub body: String,
}

/// 共享的抓取器（Client 内部自带连接池，可跨线程复用）
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(opts: &CrawlOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.clone())
            .build()
            .map_err(HuntError::Client)?;
        Ok(Self { client })
    }

    /// GET 指定地址；非 2xx 状态返回 `FetchStatus`
    pub fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let network = |source| HuntError::Network { url: url.to_string(), source };

        let resp = self.client.get(url).send().map_err(network)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HuntError::FetchStatus { url: url.to_string(), status: status.as_u16() });
        }
        let final_url = resp.url().to_string();
        let body = resp.text().map_err(network)?;
        debug!(url, final_url = %final_url, bytes = body.len(), "fetched");
        Ok(FetchedPage { final_url, body })
    }
}
