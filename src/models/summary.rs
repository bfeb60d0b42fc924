//! 期权市场汇总数据模型
//!
//! 定义查询时间窗口、查询参数以及展开后的 CSV 记录

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::path::PathBuf;

use crate::services::paradex::common::{
    civil_to_epoch_ms, format_next_funding_time, CSV_TIMESTAMP_FORMAT,
};

/// 查询时间窗口
///
/// 起止时间均为配置时区（默认 UTC+8）下的本地时间表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// 创建时间窗口，要求 start <= end
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(anyhow!(
                "开始时间 {} 晚于结束时间 {}",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M")
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// API 查询参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// 市场代码，如 BTC-USD-95000-C
    pub symbol: String,
    /// 开始时间（UTC 毫秒时间戳）
    pub start_epoch_ms: i64,
    /// 结束时间（UTC 毫秒时间戳）
    pub end_epoch_ms: i64,
}

impl QuerySpec {
    /// 由时间窗口推导查询参数：先减去时区偏移得到 UTC，再转为毫秒时间戳
    pub fn from_window(symbol: &str, window: &TimeWindow, utc_offset_hours: i32) -> Result<Self> {
        let to_ms = |civil: NaiveDateTime| {
            civil_to_epoch_ms(civil, utc_offset_hours)
                .ok_or_else(|| anyhow!("时间超出可表示范围: {}", civil))
        };
        Ok(Self {
            symbol: symbol.to_string(),
            start_epoch_ms: to_ms(window.start())?,
            end_epoch_ms: to_ms(window.end())?,
        })
    }
}

/// 由 URL 反推出的文件名标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLabel {
    /// 简化后的市场名称，如 BTC-95000-C
    pub market: String,
    /// 开始时间标签（YYYYMMDD_HHMM）
    pub start: String,
    /// 结束时间标签（YYYYMMDD_HHMM）
    pub end: String,
}

impl OutputLabel {
    /// 输出文件名：{market}_{start}_to_{end}.csv
    pub fn file_name(&self) -> String {
        format!("{}_{}_to_{}.csv", self.market, self.start, self.end)
    }
}

/// 展开后的单条市场汇总记录
///
/// 字段顺序即 CSV 表头顺序
#[derive(Debug, Clone, Serialize)]
pub struct FlatRecord {
    /// created_at 对应的本地时间
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Local>,
    pub underlying_price: f64,
    pub last_traded_price: f64,
    pub mark_price: f64,
    /// 标记隐含波动率
    pub mark_iv: f64,
    pub bid: f64,
    pub ask: f64,
    pub price_change_rate_24h: f64,
    pub volume_24h: f64,
    pub funding_rate: f64,
    /// 原样保留（可能是整数时间戳）
    #[serde(serialize_with = "serialize_raw")]
    pub next_funding_time: Value,
    // 希腊值
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
    pub vanna: f64,
    pub volga: f64,
}

/// CSV 表头，与 [`FlatRecord`] 字段顺序一致
pub const FLAT_RECORD_HEADERS: [&str; 18] = [
    "timestamp",
    "underlying_price",
    "last_traded_price",
    "mark_price",
    "mark_iv",
    "bid",
    "ask",
    "price_change_rate_24h",
    "volume_24h",
    "funding_rate",
    "next_funding_time",
    "delta",
    "gamma",
    "vega",
    "theta",
    "rho",
    "vanna",
    "volga",
];

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.format(CSV_TIMESTAMP_FORMAT).to_string())
}

fn serialize_raw<S: Serializer>(value: &Value, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_next_funding_time(value))
}

/// 一次运行的结果
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// 已写入 CSV 文件
    Written { path: PathBuf, rows: usize },
    /// 时间段内无数据，未写文件
    Empty,
}
