//! 市场汇总数据获取
//!
//! 单次 GET 请求，不分页、不重试

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::config::ApiConfig;

/// 市场汇总数据客户端
pub struct SummaryClient {
    /// HTTP 客户端
    client: Client,
}

impl SummaryClient {
    /// 根据 API 配置创建客户端，超时为 0 时沿用 reqwest 默认行为
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        if config.connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        }
        let client = builder.build().context("创建 HTTP 客户端失败")?;
        Ok(Self { client })
    }

    /// 请求 URL 并返回响应中的 results 数组
    pub async fn fetch_results(&self, url: &str) -> Result<Vec<Value>> {
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("获取市场汇总数据失败: {}", response.status()));
        }

        let text = response.text().await?;
        log::debug!("响应长度: {} 字节", text.len());
        parse_results_body(&text)
    }
}

/// 解析响应体，取出 results 数组
///
/// results 为 null 时视为无数据
pub fn parse_results_body(body: &str) -> Result<Vec<Value>> {
    let mut data: Value =
        serde_json::from_str(body).map_err(|e| anyhow!("解析JSON失败: {}", e))?;

    match data.get_mut("results").map(Value::take) {
        Some(Value::Array(results)) => Ok(results),
        Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(anyhow!("results 字段不是数组: {}", other)),
        None => Err(anyhow!("响应中缺少 results 字段")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::paradex::test_support::{serve_once, unreachable_base_url};
    use serde_json::json;

    #[test]
    fn test_parse_results_body() {
        let body = json!({
            "results": [
                { "created_at": 1700000000000_i64, "bid": "1.5" },
                { "created_at": 1700000001000_i64 }
            ]
        })
        .to_string();

        let results = parse_results_body(&body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["bid"], "1.5");
    }

    #[test]
    fn test_parse_results_body_errors() {
        assert!(parse_results_body("<html>502</html>").is_err());
        assert!(parse_results_body(r#"{"error": "bad market"}"#).is_err());
        assert!(parse_results_body(r#"{"results": {"a": 1}}"#).is_err());
        assert!(parse_results_body(r#"{"results": "none"}"#).is_err());
        assert!(parse_results_body(r#"{"results": []}"#).unwrap().is_empty());
        assert!(parse_results_body(r#"{"results": null}"#).unwrap().is_empty());
    }

    /// 测试请求本地模拟服务
    #[tokio::test]
    async fn test_fetch_results_from_server() {
        let body = json!({ "results": [{ "created_at": 1700000000000_i64, "mark_price": "812.4" }] });
        let base = serve_once("200 OK", &body.to_string());

        let client = SummaryClient::new(&ApiConfig::default()).unwrap();
        let results = client
            .fetch_results(&format!("{}/v1/markets/summary?market=BTC-USD-95000-C", base))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["mark_price"], "812.4");
    }

    /// HTTP 错误状态视为失败
    #[tokio::test]
    async fn test_fetch_results_http_error() {
        let base = serve_once("500 Internal Server Error", r#"{"results": []}"#);

        let client = SummaryClient::new(&ApiConfig::default()).unwrap();
        let err = client
            .fetch_results(&format!("{}/v1/markets/summary", base))
            .await
            .unwrap_err();
        println!("  错误: {}", err);
        assert!(err.to_string().contains("500"));
    }

    /// 连接失败视为失败
    #[tokio::test]
    async fn test_fetch_results_network_error() {
        let config = ApiConfig {
            connect_timeout_secs: 5,
            ..ApiConfig::default()
        };
        let client = SummaryClient::new(&config).unwrap();
        let result = client
            .fetch_results(&format!("{}/v1/markets/summary", unreachable_base_url()))
            .await;
        assert!(result.is_err());
    }
}
