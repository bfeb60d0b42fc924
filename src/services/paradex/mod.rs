//! Paradex 期权市场汇总数据服务
//!
//! 对接 https://api.prod.paradex.trade/v1/markets/summary
//!
//! ## 处理流程
//! - 请求构造：本地时间 -> UTC 毫秒时间戳 -> 查询 URL
//! - 数据获取：单次 GET，取出 results 数组
//! - 记录展开：顶层字段与 greeks 子对象展开为扁平记录
//! - 输出：按时间排序后写入 CSV

pub mod common;
mod fetcher;
mod flatten;
mod request;
mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::PARADEX_API_BASE;
pub use fetcher::SummaryClient;
pub use flatten::flatten_results;
pub use request::{build_summary_url, extract_market_and_time};
pub use writer::{format_preview, write_csv};
