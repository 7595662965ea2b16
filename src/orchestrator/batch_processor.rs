//! 批量导入处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一批文件的导入和资源管理。
//!
//! 1. **应用初始化**：初始化日志文件、打开存储句柄、构建解析器
//! 2. **批量扫描**：收集导入目录中所有受支持的文件
//! 3. **顺序处理**：逐个文件导入，文件内题目顺序保持不变
//! 4. **失败隔离**：单个文件读取/解析失败只记录，不中断批次
//! 5. **导出收尾**：配置了导出路径时，导入完成后执行导出
//! 6. **全局统计**：汇总所有文件的处理结果
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 TimuStore 的模块，向下传递引用
//! - **向下委托**：委托 file_processor 处理单个文件

use crate::config::Config;
use crate::models::loaders;
use crate::orchestrator::file_processor;
use crate::parser::QuestionParser;
use crate::services::export_service;
use crate::storage::TimuStore;
use crate::utils::logging;
use anyhow::Result;
use std::path::Path;
use tracing::{error, info, warn};

/// 单个文件的失败记录
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

/// 批处理统计
#[derive(Debug, Default)]
pub struct BatchStats {
    /// 处理成功的文件数
    pub files_ok: usize,
    /// 处理失败的文件数
    pub files_failed: usize,
    /// 成功入库的题目总数
    pub imported: usize,
    /// 逐文件的失败原因
    pub failures: Vec<FileFailure>,
}

/// 应用主结构
pub struct App {
    config: Config,
    store: TimuStore,
    parser: QuestionParser,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 打开存储句柄（显式持有，向下传递引用）
        let store = TimuStore::open(Path::new(&config.db_path))?;
        let parser = QuestionParser::new()?;

        Ok(Self {
            config,
            store,
            parser,
        })
    }

    /// 运行应用主逻辑：批量导入，然后按配置导出
    pub async fn run(&self) -> Result<BatchStats> {
        let files = loaders::list_import_files(&self.config.import_folder).await?;

        if files.is_empty() {
            warn!("⚠️ 目录 {} 中没有待导入的文件", self.config.import_folder);
        } else {
            log_files_found(files.len(), &self.config.import_folder);
        }

        let mut stats = BatchStats::default();

        // ========== 顺序处理所有文件 ==========
        for (index, path) in files.iter().enumerate() {
            let file_index = index + 1;
            let file_name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            log_file_start(file_index, files.len(), &file_name);

            match file_processor::process_file(
                &self.store,
                &self.parser,
                path,
                file_index,
                &self.config,
            )
            .await
            {
                Ok(imported) => {
                    stats.files_ok += 1;
                    stats.imported += imported;
                    log_file_complete(file_index, imported);
                }
                Err(e) => {
                    // 单个文件失败不中断批次，记录后继续
                    error!("[文件 {}] ❌ 处理失败: {:#}", file_index, e);
                    stats.files_failed += 1;
                    stats.failures.push(FileFailure {
                        file: file_name,
                        error: format!("{:#}", e),
                    });
                }
            }
        }

        // ========== 按配置导出 ==========
        if !self.config.export_file.is_empty() {
            self.export()?;
        }

        print_final_stats(&stats, &self.config);

        Ok(stats)
    }

    fn export(&self) -> Result<usize> {
        let output_path = Path::new(&self.config.export_file);
        if self.config.export_sources.is_empty() {
            info!("📤 正在导出全部题目...");
            export_service::export_all(&self.store, output_path)
        } else {
            info!(
                "📤 正在按来源导出题目: {}",
                self.config.export_sources.join(", ")
            );
            export_service::export_by_sources(&self.store, &self.config.export_sources, output_path)
        }
    }

    /// 存储句柄（供上层查询统计信息）
    pub fn store(&self) -> &TimuStore {
        &self.store
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库批量导入模式");
    info!("📁 导入目录: {}", config.import_folder);
    info!("💾 数据库: {}", config.db_path);
    info!("{}", "=".repeat(60));
}

fn log_files_found(total: usize, folder: &str) {
    info!("✓ 在 {} 中找到 {} 个待导入文件\n", folder, total);
}

fn log_file_start(file_index: usize, total: usize, file_name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📄 正在处理第 {}/{} 个文件: {}", file_index, total, file_name);
}

fn log_file_complete(file_index: usize, imported: usize) {
    info!("[文件 {}] ✓ 完成，入库 {} 道题目", file_index, imported);
}

fn print_final_stats(stats: &BatchStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功文件: {}", stats.files_ok);
    info!("❌ 失败文件: {}", stats.files_failed);
    for failure in &stats.failures {
        info!("   - {}: {}", failure.file, failure.error);
    }
    info!("📥 入库题目: {}", stats.imported);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
