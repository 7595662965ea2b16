use anyhow::Result;
use regex::Regex;

/// 题目分割器
///
/// 将归一化后的整篇文本按题号标记切分为若干题目块。
/// 题目边界为"文本开头或换行（可带前导空白）后紧跟的整数加句点"，
/// 如 `12. ` 或 `3。`。这是文本启发式而非严格文法：
/// 解析正文中恰好形如题号的数字（如解析里的 "2017." ）同样会
/// 触发切分。源格式没有转义机制，该行为属于既有输入的一部分，
/// 这里保持原样而不做"更聪明"的切分。
pub struct Segmenter {
    boundary: Regex,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            boundary: Regex::new(r"(?:^|\n\s*)\d+?[.。]")?,
        })
    }

    /// 按题号标记切分文本
    ///
    /// # 参数
    /// - `text`: 已归一化的整篇文本
    ///
    /// # 返回
    /// 按文档顺序排列的题目块；第一个标记之前的内容视为
    /// 文档前言被丢弃；没有任何标记时返回空列表
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // split 的第一段是首个题号之前的前言，恒丢弃
        self.boundary.split(text).skip(1).collect()
    }
}
