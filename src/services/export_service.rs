//! 导出服务
//!
//! 将库中记录序列化为 JSON 数组文件。选项字段在导出时从
//! 存储格式（JSON 文本）还原为列表，无法还原的降级为空列表。

use crate::models::question::ExportQuestion;
use crate::models::TimuRecord;
use crate::storage::TimuStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// 导出全部题目
///
/// # 返回
/// 返回导出的题目数量
pub fn export_all(store: &TimuStore, output_path: &Path) -> Result<usize> {
    let records = store.fetch_all()?;
    write_export_file(&records, output_path)
}

/// 按来源过滤导出题目
///
/// # 参数
/// - `sources`: 来源标签列表，命中任一即被导出
pub fn export_by_sources(
    store: &TimuStore,
    sources: &[String],
    output_path: &Path,
) -> Result<usize> {
    let records = store.fetch_by_sources(sources)?;
    write_export_file(&records, output_path)
}

fn write_export_file(records: &[TimuRecord], output_path: &Path) -> Result<usize> {
    let entries: Vec<ExportQuestion> = records.iter().map(ExportQuestion::from).collect();

    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(output_path, json)
        .with_context(|| format!("无法写入导出文件: {}", output_path.display()))?;

    info!("✓ 已导出 {} 道题目到 {}", entries.len(), output_path.display());
    Ok(entries.len())
}
