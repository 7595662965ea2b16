//! 题目文本解析模块（核心算法层）
//!
//! ## 职责
//!
//! 将任意排版的试题文本分解为结构化题目，流程固定为三步：
//!
//! 1. `normalize` - 归一化：统一全角/半角句点
//! 2. `segment` - 分割：按题号标记切分为题目块
//! 3. `extract` - 提取：将单个块分解为题干/选项/答案/解析
//!
//! ## 设计原则
//!
//! 1. **尽力而为，绝不中断**：畸形块只产生空字段，
//!    单个块的缺陷不影响同一文档中其余块的解析
//! 2. **纯计算**：不做任何 I/O，不持有跨调用的可变状态，
//!    对同一文本的每次调用彼此独立
//! 3. **来源由调用方提供**：`source` 标签统一附加到一次
//!    解析产出的每道题目上，解析器自身不推导来源

pub mod extract;
pub mod normalize;
pub mod segment;

pub use extract::{AnswerLayout, FieldExtractor};
pub use normalize::normalize;
pub use segment::Segmenter;

use crate::models::question::ParsedQuestion;
use anyhow::Result;

/// 题目解析器
///
/// 正则表达式在构造时编译一次，之后的解析接口不再返回错误。
pub struct QuestionParser {
    segmenter: Segmenter,
    extractor: FieldExtractor,
}

impl QuestionParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::new()?,
            extractor: FieldExtractor::new()?,
        })
    }

    /// 惰性解析已归一化的文本
    ///
    /// # 参数
    /// - `normalized`: 已经过 [`normalize`] 处理的文本
    /// - `source`: 来源标签
    ///
    /// # 返回
    /// 按文档顺序逐块产出 ParsedQuestion 的迭代器
    pub fn parse_normalized<'a>(
        &'a self,
        normalized: &'a str,
        source: &'a str,
    ) -> impl Iterator<Item = ParsedQuestion> + 'a {
        self.segmenter
            .split(normalized)
            .into_iter()
            .map(move |block| self.extractor.extract(block, source))
    }

    /// 解析一篇完整文档
    ///
    /// # 参数
    /// - `text`: 文档原始文本（已解码为字符串）
    /// - `source`: 来源标签（通常为文件名）
    ///
    /// # 返回
    /// 按文档顺序排列的题目列表；每个题目块无论多么畸形
    /// 都恰好产出一个 ParsedQuestion
    pub fn parse_document(&self, text: &str, source: &str) -> Vec<ParsedQuestion> {
        let normalized = normalize(text);
        self.parse_normalized(&normalized, source).collect()
    }
}
