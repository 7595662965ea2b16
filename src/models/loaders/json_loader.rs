use crate::models::question::JsonQuestion;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载题目列表
///
/// 文件内容应为题目对象数组；对象中缺失的字段使用空值，
/// 不符合该形状的文件整体报错（由批处理层隔离，不影响其他文件）。
pub async fn load_json_questions(json_file_path: &Path) -> Result<Vec<JsonQuestion>> {
    let content = fs::read_to_string(json_file_path)
        .await
        .with_context(|| format!("无法读取JSON文件: {}", json_file_path.display()))?;

    let questions: Vec<JsonQuestion> = serde_json::from_str(&content)
        .with_context(|| format!("无法解析JSON文件: {}", json_file_path.display()))?;

    Ok(questions)
}
