//! # Timu Manager
//!
//! 一个用于管理个人题库的 Rust 应用程序：从自由文本或结构化 JSON
//! 导入试题，持久化到 SQLite，并按来源过滤重新导出。
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 核心算法层（Parser）
//! - `parser/` - 自由文本题目解析：归一化 → 分割 → 提取
//! - 纯计算、无 I/O；畸形输入只产生空字段，绝不中断导入
//!
//! ### ② 存储层（Storage）
//! - `storage/` - 持久化网关，持有 SQLite 连接句柄
//! - ID 生成与冲突重试、upsert 合并语义都收敛在本层
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 导出能力：全量导出 / 按来源过滤导出
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量导入，隔离文件级失败
//! - `orchestrator/file_processor` - 单个文件的导入流程
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod storage;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::question::{ExportQuestion, JsonQuestion, ParsedQuestion, TimuRecord};
pub use orchestrator::{App, BatchStats};
pub use parser::{AnswerLayout, QuestionParser};
pub use storage::{TimuStore, UpsertOutcome};
