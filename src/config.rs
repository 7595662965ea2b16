use serde::Deserialize;
use std::fs;
use tracing::warn;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库数据库文件路径
    pub db_path: String,
    /// 待导入文件存放目录
    pub import_folder: String,
    /// 导出文件路径（为空则不导出）
    pub export_file: String,
    /// 导出时按来源过滤（为空则导出全部）
    pub export_sources: Vec<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "timu_database.db".to_string(),
            import_folder: "import".to_string(),
            export_file: String::new(),
            export_sources: Vec::new(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，缺失项使用默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            db_path: std::env::var("TIMU_DB_PATH").unwrap_or(default.db_path),
            import_folder: std::env::var("TIMU_IMPORT_FOLDER").unwrap_or(default.import_folder),
            export_file: std::env::var("TIMU_EXPORT_FILE").unwrap_or(default.export_file),
            export_sources: std::env::var("TIMU_EXPORT_SOURCES")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(default.export_sources),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 加载配置：优先读取 config.toml，不存在时回退到环境变量
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("⚠️ config.toml 解析失败，使用环境变量配置: {}", e);
                    Self::from_env()
                }
            },
            Err(_) => Self::from_env(),
        }
    }
}
