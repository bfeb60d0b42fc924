//! 市场汇总数据采集流程
//!
//! 请求构造 -> 数据获取 -> 记录展开 -> 写入 CSV，单向执行

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::config::AppConfig;
use crate::handlers::input::CollectedInput;
use crate::models::{QuerySpec, RunOutcome};
use crate::services::paradex::{
    build_summary_url, extract_market_and_time, flatten_results, format_preview, write_csv,
    SummaryClient,
};

/// 执行一次采集
///
/// 请求失败时直接返回错误，不写任何文件；results 为空时返回 [`RunOutcome::Empty`]
pub async fn run_summary<W: Write>(
    config: &AppConfig,
    collected: &CollectedInput,
    output_dir: &Path,
    out: &mut W,
) -> Result<RunOutcome> {
    let offset = config.query.utc_offset_hours;
    let query = QuerySpec::from_window(&collected.symbol, &collected.window, offset)?;
    let url = build_summary_url(&config.api.base_url, &query);
    writeln!(out, "\n使用的 API URL: {}", url)?;
    log::info!(
        "请求市场汇总数据: market={} start={} end={}",
        query.symbol,
        query.start_epoch_ms,
        query.end_epoch_ms
    );

    let label = extract_market_and_time(&url, offset);

    let client = SummaryClient::new(&config.api)?;
    let results = client
        .fetch_results(&url)
        .await
        .context("API 请求出错")?;

    if results.is_empty() {
        writeln!(out, "\n⚠️ 该时间段内没有数据。")?;
        log::warn!("{} 在所选时间段内无数据，不生成文件", query.symbol);
        return Ok(RunOutcome::Empty);
    }

    if let Some(fields) = results[0].as_object() {
        writeln!(out, "\n可用的数据字段:")?;
        for key in fields.keys() {
            writeln!(out, "- {}", key)?;
        }
    }

    let records = flatten_results(&results)?;
    log::info!("解析到 {} 条记录", records.len());

    let path = output_dir.join(label.file_name());
    write_csv(&path, &records)?;

    writeln!(out, "\n✅ 数据已保存到 {}", path.display())?;
    writeln!(out, "\n共采集 {} 行数据。", records.len())?;
    writeln!(out, "\n数据预览 (前 {} 行):", config.output.preview_rows)?;
    write!(out, "{}", format_preview(&records, config.output.preview_rows))?;

    Ok(RunOutcome::Written {
        path,
        rows: records.len(),
    })
}
