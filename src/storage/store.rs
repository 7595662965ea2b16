//! 题目持久化网关
//!
//! 持有 SQLite 连接的显式存储句柄，由调用方创建一次后向下传递，
//! 不使用任何全局连接状态。解析器本身是纯计算，不接触本模块。
//!
//! ## 核心方法
//! - `insert_parsed`: 文本解析路径入库（ID冲突时重新生成并重试）
//! - `upsert`: 结构化(JSON)导入路径入库（同ID记录合并覆盖而非拒绝）
//! - `fetch_all` / `fetch_by_sources`: 导出查询
//! - `search`: 关键字检索（题干/答案/来源 LIKE）
//! - `update_answer_analysis` / `delete`: 单条维护

use crate::error::{AppError, AppResult, StorageError};
use crate::models::question::{JsonQuestion, ParsedQuestion, TimuRecord};
use crate::storage::timu_id;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::path::Path;
use tracing::debug;

/// ID冲突时的最大插入尝试次数
const MAX_ID_ATTEMPTS: usize = 3;

/// upsert 的落库结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 新插入一条记录
    Inserted,
    /// 与已有记录ID相同，字段被覆盖更新
    Updated,
}

/// 题目存储句柄
pub struct TimuStore {
    conn: Connection,
}

impl TimuStore {
    /// 打开（或创建）数据库文件并初始化表结构
    pub fn open(db_path: &Path) -> AppResult<Self> {
        let conn = Connection::open(db_path)
            .map_err(|e| AppError::storage_open_failed(db_path.display().to_string(), e))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// 打开内存数据库（测试用）
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::storage_open_failed(":memory:", e))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> AppResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS timu (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                option TEXT,
                answer TEXT,
                analysis TEXT,
                source TEXT,
                create_time TEXT
            )",
            [],
        )?;
        Ok(())
    }

    // ========== 写入 ==========

    /// 解析路径入库：为题目生成ID并插入
    ///
    /// ID冲突（主键约束）时重新生成并重试，重试次数耗尽则
    /// 返回 `StorageError::IdConflict`。
    ///
    /// # 返回
    /// 返回最终写入的题目ID
    pub fn insert_parsed(&self, question: &ParsedQuestion) -> AppResult<String> {
        self.insert_parsed_with(question, timu_id::generate)
    }

    fn insert_parsed_with(
        &self,
        question: &ParsedQuestion,
        mut next_id: impl FnMut() -> String,
    ) -> AppResult<String> {
        let option_json = serde_json::to_string(&question.options)?;
        let create_time = now_text();

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = next_id();
            let result = self.conn.execute(
                "INSERT INTO timu (id, title, option, answer, analysis, source, create_time)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    id,
                    question.title,
                    option_json,
                    question.answer,
                    question.analysis,
                    question.source,
                    create_time
                ],
            );
            match result {
                Ok(_) => return Ok(id),
                Err(e) if is_constraint_violation(&e) => {
                    debug!("题目ID {} 已存在，重新生成", id);
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Storage(StorageError::IdConflict {
            attempts: MAX_ID_ATTEMPTS,
        }))
    }

    /// 结构化(JSON)导入路径入库
    ///
    /// 未提供ID时生成新ID插入；提供的ID与已有记录冲突时
    /// 覆盖更新该记录的全部字段（upsert 语义），不拒绝。
    pub fn upsert(&self, question: &JsonQuestion, source: &str) -> AppResult<UpsertOutcome> {
        let id = question
            .id
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(timu_id::generate);

        let result = self.conn.execute(
            "INSERT INTO timu (id, title, option, answer, analysis, source, create_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                question.title,
                question.option,
                question.answer,
                question.analysis,
                source,
                now_text()
            ],
        );

        match result {
            Ok(_) => Ok(UpsertOutcome::Inserted),
            Err(e) if is_constraint_violation(&e) => {
                self.conn.execute(
                    "UPDATE timu SET title=?1, option=?2, answer=?3, analysis=?4, source=?5
                     WHERE id=?6",
                    params![
                        question.title,
                        question.option,
                        question.answer,
                        question.analysis,
                        source,
                        id
                    ],
                )?;
                Ok(UpsertOutcome::Updated)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 更新单条记录的答案与解析（详情编辑路径）
    pub fn update_answer_analysis(&self, id: &str, answer: &str, analysis: &str) -> AppResult<bool> {
        let changed = self.conn.execute(
            "UPDATE timu SET answer=?1, analysis=?2 WHERE id=?3",
            params![answer, analysis, id],
        )?;
        Ok(changed > 0)
    }

    /// 删除单条记录
    pub fn delete(&self, id: &str) -> AppResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM timu WHERE id=?1", params![id])?;
        Ok(changed > 0)
    }

    // ========== 查询 ==========

    /// 记录总数
    pub fn count(&self) -> AppResult<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM timu", [], |row| row.get(0))?;
        Ok(count)
    }

    /// 按入库时间倒序取出全部记录
    pub fn fetch_all(&self) -> AppResult<Vec<TimuRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, option, answer, analysis, source, create_time
             FROM timu ORDER BY create_time DESC, id",
        )?;
        let rows = stmt.query_map([], row_to_record)?;
        collect_records(rows)
    }

    /// 按来源标签过滤取出记录
    pub fn fetch_by_sources(&self, sources: &[String]) -> AppResult<Vec<TimuRecord>> {
        if sources.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; sources.len()].join(",");
        let sql = format!(
            "SELECT id, title, option, answer, analysis, source, create_time
             FROM timu WHERE source IN ({}) ORDER BY create_time DESC, id",
            placeholders
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(sources.iter()), row_to_record)?;
        collect_records(rows)
    }

    /// 所有出现过的来源标签
    pub fn distinct_sources(&self) -> AppResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT source FROM timu ORDER BY source")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut sources = Vec::new();
        for row in rows {
            sources.push(row?);
        }
        Ok(sources)
    }

    /// 关键字检索：题干/答案/来源任一字段的模糊匹配
    pub fn search(&self, keyword: &str) -> AppResult<Vec<TimuRecord>> {
        let pattern = format!("%{}%", keyword);
        let mut stmt = self.conn.prepare(
            "SELECT id, title, option, answer, analysis, source, create_time
             FROM timu WHERE title LIKE ?1 OR answer LIKE ?1 OR source LIKE ?1
             ORDER BY create_time DESC, id",
        )?;
        let rows = stmt.query_map(params![pattern], row_to_record)?;
        collect_records(rows)
    }
}

fn now_text() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<TimuRecord> {
    Ok(TimuRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        option: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        answer: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        analysis: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        source: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        create_time: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
    })
}

fn collect_records(
    rows: impl Iterator<Item = rusqlite::Result<TimuRecord>>,
) -> AppResult<Vec<TimuRecord>> {
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// 判断 SQLite 错误是否为约束冲突（主键重复）
fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}
