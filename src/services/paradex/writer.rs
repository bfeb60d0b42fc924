//! CSV 输出与控制台预览

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use crate::models::{FlatRecord, FLAT_RECORD_HEADERS};

use super::common::{format_next_funding_time, CSV_TIMESTAMP_FORMAT};

/// 把记录写入 CSV 文件，表头为 [`FlatRecord`] 字段名
pub fn write_csv(path: &Path, records: &[FlatRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("创建文件失败: {}", path.display()))?;

    wtr.write_record(FLAT_RECORD_HEADERS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    log::debug!("写入 {} 行到 {}", records.len(), path.display());
    Ok(())
}

/// 前 n 条记录的表格预览
pub fn format_preview(records: &[FlatRecord], n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:>12} {:>10} {:>10} {:>8} {:>10} {:>10} {:>9} {:>10} {:>10} {:>15}",
        "timestamp", "underlying", "mark", "mark_iv", "bid", "ask", "delta", "gamma", "vega",
        "theta", "next_funding"
    );
    for r in records.iter().take(n) {
        let _ = writeln!(
            out,
            "{:<24} {:>12.2} {:>10.2} {:>10.4} {:>8.2} {:>10.2} {:>10.4} {:>9.6} {:>10.4} {:>10.4} {:>15}",
            r.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string(),
            r.underlying_price,
            r.mark_price,
            r.mark_iv,
            r.bid,
            r.ask,
            r.delta,
            r.gamma,
            r.vega,
            r.theta,
            format_next_funding_time(&r.next_funding_time)
        );
    }
    out
}
