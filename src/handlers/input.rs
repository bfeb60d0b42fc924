//! 交互式输入
//!
//! 读取市场代码和开始时间，结束时间固定为当前时间

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use regex::Regex;
use std::io::{BufRead, Write};

use crate::config::QueryConfig;
use crate::models::TimeWindow;
use crate::services::paradex::common::INPUT_TIME_FORMAT;

/// 开始时间的字面格式，年份固定 4 位
const START_TIME_PATTERN: &str = r"^\d{4}-\d{1,2}-\d{1,2} \d{1,2}:\d{1,2}$";

/// 用户输入结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedInput {
    pub symbol: String,
    pub window: TimeWindow,
}

/// 时区标签，如 UTC+8
pub fn offset_label(utc_offset_hours: i32) -> String {
    if utc_offset_hours >= 0 {
        format!("UTC+{}", utc_offset_hours)
    } else {
        format!("UTC{}", utc_offset_hours)
    }
}

/// 读取市场代码和开始时间
///
/// 开始时间格式错误或晚于当前时间时提示并重新输入；输入流结束时返回错误
pub fn collect_input<R, W, F>(
    input: &mut R,
    out: &mut W,
    config: &QueryConfig,
    now: F,
) -> Result<CollectedInput>
where
    R: BufRead,
    W: Write,
    F: Fn() -> NaiveDateTime,
{
    let zone = offset_label(config.utc_offset_hours);

    writeln!(out, "\n=== 期权数据采集设置 ===")?;
    let market = prompt(
        input,
        out,
        &format!("市场代码 (例: {}): ", config.default_market),
    )?;
    let symbol = if market.is_empty() {
        config.default_market.clone()
    } else {
        market
    };

    writeln!(out, "\n日期格式: YYYY-MM-DD HH:MM (例: 2025-04-23 10:30)")?;

    let start_re = Regex::new(START_TIME_PATTERN).unwrap();
    let window = loop {
        let raw = prompt(input, out, &format!("开始时间 ({}): ", zone))?;
        let start = match parse_start_time(&start_re, &raw) {
            Some(start) => start,
            None => {
                writeln!(out, "❌ 日期/时间格式不正确，请重新输入。")?;
                continue;
            }
        };
        match TimeWindow::new(start, now()) {
            Ok(window) => break window,
            Err(e) => {
                writeln!(out, "❌ {}，请重新输入。", e)?;
            }
        }
    };

    writeln!(
        out,
        "结束时间: 当前时间 ({}: {})",
        zone,
        window.end().format(INPUT_TIME_FORMAT)
    )?;

    Ok(CollectedInput { symbol, window })
}

/// 解析开始时间，年份必须是 4 位数字
fn parse_start_time(start_re: &Regex, raw: &str) -> Option<NaiveDateTime> {
    if !start_re.is_match(raw) {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, INPUT_TIME_FORMAT).ok()
}

/// 输出提示并读取一行，去掉首尾空白
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("输入已结束");
    }
    Ok(line.trim().to_string())
}
