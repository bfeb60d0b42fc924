//! 配置模块
//!
//! 支持从 JSON 文件加载配置，文件不存在时全部使用默认值

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::paradex::PARADEX_API_BASE;

/// API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API 根地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求超时时间（秒，0 表示不设置）
    #[serde(default)]
    pub timeout_secs: u64,
    /// 连接超时时间（秒，0 表示不设置）
    #[serde(default)]
    pub connect_timeout_secs: u64,
}

/// 查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// 未输入时使用的默认市场
    #[serde(default = "default_market")]
    pub default_market: String,
    /// 输入/显示时间所用的时区偏移（小时）
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 输出目录，未设置时使用程序所在目录
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// 控制台预览行数
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// 配置来源，日志初始化后再输出
#[derive(Debug)]
pub enum ConfigSource {
    File(String),
    Default,
    Invalid { path: String, error: String },
}

// 默认值函数
fn default_base_url() -> String { PARADEX_API_BASE.to_string() }
fn default_market() -> String { "BTC-USD-95000-C".to_string() }
fn default_utc_offset_hours() -> i32 { 8 }
fn default_preview_rows() -> usize { 5 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 0,
            connect_timeout_secs: 0,
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_market: default_market(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            preview_rows: default_preview_rows(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    ///
    /// 此时日志系统尚未初始化，加载结果通过 [`ConfigSource`] 返回
    pub fn load() -> (Self, ConfigSource) {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                return match Self::from_file(path) {
                    Ok(config) => (config, ConfigSource::File(path.to_string())),
                    Err(e) => (
                        Self::default(),
                        ConfigSource::Invalid {
                            path: path.to_string(),
                            error: e.to_string(),
                        },
                    ),
                };
            }
        }

        (Self::default(), ConfigSource::Default)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(anyhow!("api.base_url 不能为空"));
        }
        if !(-23..=23).contains(&self.query.utc_offset_hours) {
            return Err(anyhow!(
                "query.utc_offset_hours 超出范围 (-23..=23): {}",
                self.query.utc_offset_hours
            ));
        }
        Ok(())
    }

    /// 解析输出目录：配置优先，否则为当前可执行文件所在目录
    pub fn output_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.output.dir {
            return Ok(dir.clone());
        }
        let exe = std::env::current_exe()?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("无法确定程序所在目录: {}", exe.display()))
    }
}

impl ConfigSource {
    /// 输出配置来源日志
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => log::info!("从 {} 加载配置成功", path),
            ConfigSource::Default => log::info!("使用默认配置"),
            ConfigSource::Invalid { path, error } => {
                log::warn!("加载配置文件 {} 失败: {}，使用默认配置", path, error)
            }
        }
    }
}
