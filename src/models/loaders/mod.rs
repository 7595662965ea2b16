pub mod json_loader;

pub use json_loader::load_json_questions;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 支持导入的文件扩展名
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "json"];

/// 扫描文件夹中所有支持导入的文件
///
/// # 参数
/// - `folder_path`: 待扫描的文件夹路径
///
/// # 返回
/// 返回按文件名排序的文件路径列表，保证批量处理顺序稳定
pub async fn list_import_files(folder_path: &str) -> Result<Vec<PathBuf>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_supported(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// 判断文件扩展名是否受支持
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
