//! 单个文件处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责把一个文件的全部题目导入题库，是文件级别的编排器。
//!
//! 1. **识别类型**：按扩展名区分自由文本（.txt）与结构化（.json）
//! 2. **文本路径**：归一化 → 分割 → 提取 → 逐题插入
//! 3. **结构化路径**：反序列化 → 逐题 upsert（同ID合并覆盖）
//! 4. **题目级隔离**：单道题目入库失败只记录日志并跳过，
//!    不中断同一文件中其余题目
//!
//! 文件级失败（无法读取、编码错误、JSON形状不符）向上传播，
//! 由批处理层记录并隔离。

use crate::config::Config;
use crate::models::loaders;
use crate::parser::QuestionParser;
use crate::storage::{TimuStore, UpsertOutcome};
use crate::utils::logging::truncate_text;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// 处理单个导入文件
///
/// # 参数
/// - `store`: 题目存储句柄
/// - `parser`: 题目解析器
/// - `path`: 文件路径
/// - `file_index`: 文件序号（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回成功入库的题目数量
pub async fn process_file(
    store: &TimuStore,
    parser: &QuestionParser,
    path: &Path,
    file_index: usize,
    config: &Config,
) -> Result<usize> {
    let source = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => import_text_file(store, parser, path, &source, file_index, config).await,
        "json" => import_json_file(store, path, &source, file_index).await,
        other => anyhow::bail!("不支持的文件类型: .{}", other),
    }
}

/// 自由文本导入路径
async fn import_text_file(
    store: &TimuStore,
    parser: &QuestionParser,
    path: &Path,
    source: &str,
    file_index: usize,
    config: &Config,
) -> Result<usize> {
    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取文本文件: {}", path.display()))?;

    let questions = parser.parse_document(&text, source);
    info!("[文件 {}] 解析出 {} 道题目", file_index, questions.len());

    let mut imported = 0;
    for (index, question) in questions.iter().enumerate() {
        if config.verbose_logging {
            info!(
                "[文件 {}] 题目 {}: {}",
                file_index,
                index + 1,
                truncate_text(&question.title, 50)
            );
        }
        match store.insert_parsed(question) {
            Ok(_) => imported += 1,
            Err(e) => {
                // 单道题目入库失败不中断同一文件的其余题目
                error!("[文件 {}] 题目 {} 入库失败: {}", file_index, index + 1, e);
            }
        }
    }

    Ok(imported)
}

/// 结构化(JSON)导入路径：不经过解析器，逐条 upsert
async fn import_json_file(
    store: &TimuStore,
    path: &Path,
    source: &str,
    file_index: usize,
) -> Result<usize> {
    let questions = loaders::load_json_questions(path).await?;
    info!("[文件 {}] 读取到 {} 条结构化题目", file_index, questions.len());

    let mut imported = 0;
    let mut updated = 0;
    for (index, question) in questions.iter().enumerate() {
        match store.upsert(question, source) {
            Ok(UpsertOutcome::Inserted) => imported += 1,
            Ok(UpsertOutcome::Updated) => {
                imported += 1;
                updated += 1;
            }
            Err(e) => {
                error!("[文件 {}] 题目 {} 入库失败: {}", file_index, index + 1, e);
            }
        }
    }

    if updated > 0 {
        info!("[文件 {}] 其中 {} 条为同ID覆盖更新", file_index, updated);
    }

    Ok(imported)
}
