//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量导入和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量导入处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 扫描导入目录，顺序处理文件
//! - 隔离单个文件的失败
//! - 持有存储句柄（TimuStore）
//!
//! ### `file_processor` - 单个文件处理器
//! - 按扩展名选择文本/结构化导入路径
//! - 逐题入库，隔离单道题目的失败
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PathBuf>)
//!     ↓
//! file_processor (处理单个文件)
//!     ↓
//! parser (纯计算：归一化 → 分割 → 提取)
//!     ↓
//! storage (持久化网关：插入 / upsert)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，file_processor 管单个
//! 2. **失败分级**：题目级失败跳过，文件级失败记录，批次永不中断
//! 3. **顺序稳定**：文件按名称排序处理，文件内题目顺序保持不变

pub mod batch_processor;
pub mod file_processor;

// 重新导出主要类型
pub use batch_processor::{App, BatchStats, FileFailure};
pub use file_processor::process_file;
