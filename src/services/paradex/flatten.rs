//! 记录展开
//!
//! 把 API 返回的嵌套 JSON（含 greeks 子对象）展开为 [`FlatRecord`]

use anyhow::{anyhow, Result};
use chrono::{Local, TimeZone};
use serde_json::Value;

use crate::models::FlatRecord;

use super::common::safe_float;

/// 展开全部记录，并按 timestamp 升序稳定排序
pub fn flatten_results(results: &[Value]) -> Result<Vec<FlatRecord>> {
    let mut records = results
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            flatten_record(item).map_err(|e| anyhow!("第 {} 条记录解析失败: {}", idx + 1, e))
        })
        .collect::<Result<Vec<_>>>()?;

    // sort_by 为稳定排序，时间相同的记录保持原顺序
    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(records)
}

/// 展开单条记录
///
/// created_at 必须存在；其余字段缺失或无法解析时为 0.0
pub fn flatten_record(item: &Value) -> Result<FlatRecord> {
    let created_at = parse_created_at(item.get("created_at"))?;
    let timestamp = Local
        .timestamp_millis_opt(created_at)
        .single()
        .ok_or_else(|| anyhow!("created_at 超出范围: {}", created_at))?;

    let greeks = item.get("greeks").filter(|g| g.is_object());
    let greek = |name: &str| safe_float(greeks.and_then(|g| g.get(name)));

    Ok(FlatRecord {
        timestamp,
        underlying_price: safe_float(item.get("underlying_price")),
        last_traded_price: safe_float(item.get("last_traded_price")),
        mark_price: safe_float(item.get("mark_price")),
        mark_iv: safe_float(item.get("mark_iv")),
        bid: safe_float(item.get("bid")),
        ask: safe_float(item.get("ask")),
        price_change_rate_24h: safe_float(item.get("price_change_rate_24h")),
        volume_24h: safe_float(item.get("volume_24h")),
        funding_rate: safe_float(item.get("funding_rate")),
        next_funding_time: item
            .get("next_funding_time")
            .cloned()
            .unwrap_or_else(|| Value::from(0)),
        delta: greek("delta"),
        gamma: greek("gamma"),
        vega: greek("vega"),
        theta: greek("theta"),
        rho: greek("rho"),
        vanna: greek("vanna"),
        volga: greek("volga"),
    })
}

/// created_at 为毫秒时间戳，接受整数或数字字符串
fn parse_created_at(value: Option<&Value>) -> Result<i64> {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| anyhow!("created_at 不是有效时间戳: {}", n)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow!("created_at 不是有效时间戳: {}", s)),
        Some(other) => Err(anyhow!("created_at 不是有效时间戳: {}", other)),
        None => Err(anyhow!("缺少 created_at 字段")),
    }
}
