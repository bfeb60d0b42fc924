//! 公共常量和辅助函数

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde_json::Value;

// ==================== Paradex API 常量 ====================

/// Paradex 生产环境 API 根地址
pub const PARADEX_API_BASE: &str = "https://api.prod.paradex.trade";
/// 市场汇总数据接口
pub const MARKETS_SUMMARY_PATH: &str = "/v1/markets/summary";

// ==================== 时间格式 ====================

/// 开始时间输入格式
pub const INPUT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// 文件名中的时间标签格式
pub const LABEL_TIME_FORMAT: &str = "%Y%m%d_%H%M";
/// CSV 中 timestamp 列的格式
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// 安全地把 JSON 值转换为 f64
///
/// 空字符串、null、无法解析的值都返回 0.0，永不失败
pub fn safe_float(value: Option<&Value>) -> f64 {
    safe_float_or(value, 0.0)
}

/// 同 [`safe_float`]，可指定默认值
pub fn safe_float_or(value: Option<&Value>, default: f64) -> f64 {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                default
            } else {
                s.parse::<f64>().unwrap_or(default)
            }
        }
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(_) => default,
    }
}

/// 时区偏移对应的时长
pub fn offset_duration(utc_offset_hours: i32) -> Duration {
    Duration::hours(utc_offset_hours as i64)
}

/// 偏移时区下的本地时间 -> UTC 毫秒时间戳
///
/// 减去偏移后超出可表示范围时返回 None
pub fn civil_to_epoch_ms(civil: NaiveDateTime, utc_offset_hours: i32) -> Option<i64> {
    civil
        .checked_sub_signed(offset_duration(utc_offset_hours))
        .map(|utc| utc.and_utc().timestamp_millis())
}

/// UTC 毫秒时间戳 -> 偏移时区下的本地时间
///
/// 超出可表示范围时按 0 处理
pub fn epoch_ms_to_civil(epoch_ms: i64, utc_offset_hours: i32) -> NaiveDateTime {
    let utc: DateTime<Utc> = DateTime::from_timestamp_millis(epoch_ms).unwrap_or_default();
    utc.naive_utc()
        .checked_add_signed(offset_duration(utc_offset_hours))
        .unwrap_or_default()
}

/// 当前时间在偏移时区下的本地表示
pub fn now_civil(utc_offset_hours: i32) -> NaiveDateTime {
    Utc::now().naive_utc() + offset_duration(utc_offset_hours)
}

/// next_funding_time 的原样输出
pub fn format_next_funding_time(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
