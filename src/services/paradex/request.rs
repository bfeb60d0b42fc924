//! 请求构造
//!
//! 拼接市场汇总接口 URL，并从 URL 反推输出文件名标签

use regex::Regex;

use crate::models::{OutputLabel, QuerySpec};

use super::common::{epoch_ms_to_civil, LABEL_TIME_FORMAT, MARKETS_SUMMARY_PATH};

/// 拼接市场汇总接口 URL
///
/// 市场代码原样代入，不做 URL 编码
pub fn build_summary_url(base_url: &str, query: &QuerySpec) -> String {
    format!(
        "{}{}?market={}&start={}&end={}",
        base_url.trim_end_matches('/'),
        MARKETS_SUMMARY_PATH,
        query.symbol,
        query.start_epoch_ms,
        query.end_epoch_ms
    )
}

/// 从 URL 中提取市场名称和起止时间标签
///
/// - market 去掉 "USD-"，如 BTC-USD-95000-C -> BTC-95000-C，缺失时为 "unknown-market"
/// - start/end 缺失时按时间戳 0 处理，再加上时区偏移格式化为 YYYYMMDD_HHMM
pub fn extract_market_and_time(url: &str, utc_offset_hours: i32) -> OutputLabel {
    let market_re = Regex::new(r"market=([^&]+)").unwrap();
    let market = market_re
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or("unknown-market");
    let simple_market = market.replace("USD-", "");

    let epoch_re = Regex::new(r"(start|end)=(\d+)").unwrap();
    let start_ts = extract_epoch_param(&epoch_re, url, "start");
    let end_ts = extract_epoch_param(&epoch_re, url, "end");

    OutputLabel {
        market: simple_market,
        start: epoch_ms_to_civil(start_ts, utc_offset_hours)
            .format(LABEL_TIME_FORMAT)
            .to_string(),
        end: epoch_ms_to_civil(end_ts, utc_offset_hours)
            .format(LABEL_TIME_FORMAT)
            .to_string(),
    }
}

/// 取第一个名为 name 的时间戳参数，缺失或溢出时为 0
fn extract_epoch_param(epoch_re: &Regex, url: &str, name: &str) -> i64 {
    epoch_re
        .captures_iter(url)
        .find(|c| &c[1] == name)
        .and_then(|c| c[2].parse::<i64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_summary_url() {
        let query = QuerySpec {
            symbol: "BTC-USD-95000-C".to_string(),
            start_epoch_ms: 1_700_000_000_000,
            end_epoch_ms: 1_700_003_600_000,
        };

        assert_eq!(
            build_summary_url("https://api.prod.paradex.trade", &query),
            "https://api.prod.paradex.trade/v1/markets/summary?market=BTC-USD-95000-C&start=1700000000000&end=1700003600000"
        );
        assert_eq!(
            build_summary_url("http://127.0.0.1:8080/", &query),
            "http://127.0.0.1:8080/v1/markets/summary?market=BTC-USD-95000-C&start=1700000000000&end=1700003600000"
        );
    }

    /// 测试市场名称和时间标签提取
    #[test]
    fn test_extract_market_and_time() {
        println!("\n========== 测试 URL 标签提取 ==========");
        let url = "https://api.prod.paradex.trade/v1/markets/summary?market=BTC-USD-95000-C&start=1700000000000&end=1700003600000";
        let label = extract_market_and_time(url, 8);
        println!("  {:?}", label);

        assert_eq!(label.market, "BTC-95000-C");
        assert_eq!(label.start, "20231115_0613");
        assert_eq!(label.end, "20231115_0713");
        assert_eq!(label.file_name(), "BTC-95000-C_20231115_0613_to_20231115_0713.csv");
    }

    /// 测试参数缺失时的默认值
    #[test]
    fn test_extract_missing_params() {
        let label = extract_market_and_time("https://example.com/v1/markets/summary?foo=bar", 8);
        assert_eq!(label.market, "unknown-market");
        assert_eq!(label.start, "19700101_0800");
        assert_eq!(label.end, "19700101_0800");

        let label = extract_market_and_time("https://example.com/?start=1700000000000", 0);
        assert_eq!(label.market, "unknown-market");
        assert_eq!(label.start, "20231114_2213");
        assert_eq!(label.end, "19700101_0000");
    }

    /// 参数顺序不影响提取，负数时间戳不匹配
    #[test]
    fn test_extract_param_order_and_sign() {
        let label = extract_market_and_time("?end=1700003600000&market=BTC-USD-1-C&start=1700000000000", 8);
        assert_eq!(label.start, "20231115_0613");
        assert_eq!(label.end, "20231115_0713");

        let label = extract_market_and_time("?market=BTC-USD-1-C&start=-5&end=99999999999999999999", 8);
        assert_eq!(label.start, "19700101_0800");
        assert_eq!(label.end, "19700101_0800");
    }

    #[test]
    fn test_market_without_usd_is_kept() {
        let label = extract_market_and_time("?market=ETH-PERP&start=0&end=0", 8);
        assert_eq!(label.market, "ETH-PERP");
    }

    /// URL 往返后得到的标签与输入时间一致
    #[test]
    fn test_label_matches_window() {
        use crate::models::TimeWindow;
        use chrono::NaiveDateTime;

        let start = NaiveDateTime::parse_from_str("2025-04-23 10:30", "%Y-%m-%d %H:%M").unwrap();
        let end = NaiveDateTime::parse_from_str("2025-04-24 09:05", "%Y-%m-%d %H:%M").unwrap();
        let window = TimeWindow::new(start, end).unwrap();
        let query = QuerySpec::from_window("ETH-USD-3000-P", &window, 8).unwrap();

        let url = build_summary_url("https://api.prod.paradex.trade", &query);
        let label = extract_market_and_time(&url, 8);

        assert_eq!(label.file_name(), "ETH-3000-P_20250423_1030_to_20250424_0905.csv");
    }
}
