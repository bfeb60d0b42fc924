//! Paradex 期权市场汇总数据采集工具
//!
//! 按市场代码和时间段获取历史汇总数据（含希腊值），展开后保存为 CSV

mod config;   // 配置
mod handlers; // 控制台交互与采集流程
mod models;   // 数据模型定义
mod services; // 业务逻辑服务

use env_logger::Env;
use std::io;

use crate::config::AppConfig;
use crate::models::RunOutcome;
use crate::services::paradex::common::now_civil;

/// 程序入口
///
/// 单线程顺序执行：输入 -> 请求 -> 展开 -> 写文件
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let (config, source) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    source.log();

    if let Err(e) = config.validate() {
        eprintln!("❌ 配置无效: {:#}", e);
        std::process::exit(1);
    }

    match run(&config).await {
        Ok(RunOutcome::Written { path, rows }) => {
            log::info!("完成: {} 行 -> {}", rows, path.display());
        }
        Ok(RunOutcome::Empty) => {}
        Err(e) => {
            println!("\n❌ {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(config: &AppConfig) -> anyhow::Result<RunOutcome> {
    let output_dir = config.output_dir()?;

    let mut out = io::stdout();

    let offset = config.query.utc_offset_hours;
    let collected = {
        let mut input = io::stdin().lock();
        handlers::collect_input(&mut input, &mut out, &config.query, || now_civil(offset))?
    };

    handlers::run_summary(config, &collected, &output_dir, &mut out).await
}
