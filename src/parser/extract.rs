use crate::models::question::ParsedQuestion;
use anyhow::Result;
use regex::Regex;

/// 答案/解析的三级回退判定结果
///
/// 判定按此处变体声明的顺序自上而下进行，首个命中即生效。
/// 用显式的标签化决策代替嵌套条件，便于单独审计和测试回退顺序。
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerLayout {
    /// 答案标记后紧跟一串选项字母（如 "AC"）：按选择题处理，
    /// 解析取解析标记之后的文本（无解析标记时为空）
    LetterKey { answer: String, analysis: String },
    /// 答案标记之后还出现了解析标记：两个标记之间为答案正文，
    /// 解析标记之后到块尾为解析正文
    BeforeAnalysis { answer: String, analysis: String },
    /// 块内没有解析标记：答案标记之后到块尾全部为答案正文
    TailOnly { answer: String },
    /// 未找到答案标记（合法结果，不是错误）
    Missing,
}

impl AnswerLayout {
    /// 将判定结果展开为 (答案, 解析) 二元组
    pub fn into_fields(self) -> (String, String) {
        match self {
            AnswerLayout::LetterKey { answer, analysis } => (answer, analysis),
            AnswerLayout::BeforeAnalysis { answer, analysis } => (answer, analysis),
            AnswerLayout::TailOnly { answer } => (answer, String::new()),
            AnswerLayout::Missing => (String::new(), String::new()),
        }
    }
}

/// 字段提取器
///
/// 将一个题目块分解为题干/选项/答案/解析。各步骤都在原始块文本上
/// 做匹配，互不消费；任何一步匹配失败只产生空字段，绝不抛出错误，
/// 因此单个畸形块不会影响同一文档中其余块的解析。
pub struct FieldExtractor {
    /// 行首的选项字母标记（A-E，后可跟半角或全角句点）
    option_marker: Regex,
    /// 选项正文的终止位置：下一个行首选项标记、答案标记或解析标记
    option_stop: Regex,
    /// 第一级：答案正文恰为选项字母串
    letter_key: Regex,
    /// 第二级：答案标记与解析标记之间的正文（非贪婪，可跨行）
    answer_before_analysis: Regex,
    /// 第三级：答案标记之后到块尾
    answer_tail: Regex,
    /// 解析标记之后到块尾
    analysis_tail: Regex,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            option_marker: Regex::new(r"(?m)^[A-E][.。]?")?,
            option_stop: Regex::new(r"(?m)^(?:[A-E]|答案|解析)")?,
            letter_key: Regex::new(r"答案[:：]([A-E]+)")?,
            answer_before_analysis: Regex::new(r"(?s)答案[:：](.+?)\n解析")?,
            answer_tail: Regex::new(r"(?s)答案[:：](.+)")?,
            analysis_tail: Regex::new(r"(?s)解析[:：](.+)")?,
        })
    }

    /// 提取单个题目块的所有字段
    ///
    /// # 参数
    /// - `block`: 一个题目块的原始文本
    /// - `source`: 来源标签（统一附加到本文档的每道题目上）
    ///
    /// # 返回
    /// 必定返回一个 ParsedQuestion，字段可能为空但不会失败
    pub fn extract(&self, block: &str, source: &str) -> ParsedQuestion {
        let title = self.extract_title(block);
        let options = self.extract_options(block);
        let (answer, analysis) = self.classify_answer(block).into_fields();

        ParsedQuestion {
            title,
            options,
            answer,
            analysis,
            source: source.to_string(),
        }
    }

    /// 题干：块开头到第一个行首选项标记之前的最长前缀；
    /// 没有选项标记时整块都是题干
    fn extract_title(&self, block: &str) -> String {
        match self.option_marker.find(block) {
            Some(m) => block[..m.start()].trim().to_string(),
            None => block.trim().to_string(),
        }
    }

    /// 选项：每个行首选项标记到下一个终止位置之间的正文。
    /// 按出现顺序输出，不校验字母连续性（只有 B、D 两项也是合法的）
    fn extract_options(&self, block: &str) -> Vec<String> {
        let stops: Vec<usize> = self.option_stop.find_iter(block).map(|m| m.start()).collect();

        let mut options = Vec::new();
        for marker in self.option_marker.find_iter(block) {
            let end = stops
                .iter()
                .copied()
                .find(|&p| p > marker.start())
                .unwrap_or(block.len());
            let body = &block[marker.end()..end.max(marker.end())];
            // 标记后完全没有正文（如块尾孤立的 "E."）不产生选项
            if body.is_empty() {
                continue;
            }
            options.push(body.trim().to_string());
        }
        options
    }

    /// 答案/解析判定：三级回退，首个命中即生效
    pub fn classify_answer(&self, block: &str) -> AnswerLayout {
        // 第一级：答案标记后紧跟选项字母串
        if let Some(caps) = self.letter_key.captures(block) {
            return AnswerLayout::LetterKey {
                answer: caps[1].trim().to_string(),
                analysis: self.extract_analysis_tail(block),
            };
        }

        // 第二级：答案标记与解析标记之间
        if let Some(caps) = self.answer_before_analysis.captures(block) {
            return AnswerLayout::BeforeAnalysis {
                answer: caps[1].trim().to_string(),
                analysis: self.extract_analysis_tail(block),
            };
        }

        // 第三级：答案标记之后到块尾
        if let Some(caps) = self.answer_tail.captures(block) {
            return AnswerLayout::TailOnly {
                answer: caps[1].trim().to_string(),
            };
        }

        AnswerLayout::Missing
    }

    fn extract_analysis_tail(&self, block: &str) -> String {
        self.analysis_tail
            .captures(block)
            .map(|caps| caps[1].trim().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new().unwrap()
    }

    #[test]
    fn test_letter_key_with_analysis() {
        let q = extractor().extract("Question?\nA.foo\nB.bar\n答案：AB\n解析：because", "s");
        assert_eq!(q.title, "Question?");
        assert_eq!(q.options, vec!["foo".to_string(), "bar".to_string()]);
        assert_eq!(q.answer, "AB");
        assert_eq!(q.analysis, "because");
    }

    #[test]
    fn test_free_text_answer_before_analysis() {
        let q = extractor().extract("Q?\nA.x\n答案：it is complicated\n解析：details here", "s");
        assert_eq!(q.answer, "it is complicated");
        assert_eq!(q.analysis, "details here");
    }

    #[test]
    fn test_free_text_answer_without_analysis() {
        let q = extractor().extract("Q?\nA.x\n答案：just text, no explanation marker", "s");
        assert_eq!(q.answer, "just text, no explanation marker");
        assert_eq!(q.analysis, "");
    }

    #[test]
    fn test_missing_answer_marker_is_not_an_error() {
        let q = extractor().extract("Q?\nA.x\nB.y", "s");
        assert_eq!(q.title, "Q?");
        assert_eq!(q.options, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(q.answer, "");
        assert_eq!(q.analysis, "");
    }

    #[test]
    fn test_option_order_preserved_not_sorted() {
        let q = extractor().extract("题干\nB.乙\nD.丁\nA.甲", "s");
        assert_eq!(
            q.options,
            vec!["乙".to_string(), "丁".to_string(), "甲".to_string()]
        );
    }

    #[test]
    fn test_noncontiguous_letters_are_valid() {
        let q = extractor().extract("题干\nB.乙\nD.丁\n答案：BD", "s");
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.answer, "BD");
    }

    #[test]
    fn test_no_options_title_is_whole_block() {
        let q = extractor().extract("本题为简答题，请作答。\n答案：言之有理即可", "s");
        assert_eq!(q.title, "本题为简答题，请作答。\n答案：言之有理即可");
        assert!(q.options.is_empty());
        assert_eq!(q.answer, "言之有理即可");
    }

    #[test]
    fn test_block_starting_with_option_has_empty_title() {
        let q = extractor().extract("A.甲\nB.乙\n答案：A", "s");
        assert_eq!(q.title, "");
        assert_eq!(q.options, vec!["甲".to_string(), "乙".to_string()]);
    }

    #[test]
    fn test_multiline_answer_before_analysis() {
        let q = extractor().extract("Q?\n答案：第一行\n第二行\n解析：后续", "s");
        assert_eq!(q.answer, "第一行\n第二行");
        assert_eq!(q.analysis, "后续");
    }

    #[test]
    fn test_trailing_bare_marker_skipped() {
        let q = extractor().extract("题干\nA.甲\nE.", "s");
        // "E." 之后没有任何正文，不产生选项
        assert_eq!(q.options, vec!["甲".to_string()]);
    }

    #[test]
    fn test_fullwidth_option_punctuation() {
        let q = extractor().extract("题干\nA。甲\nB。乙\n答案：A", "s");
        assert_eq!(q.options, vec!["甲".to_string(), "乙".to_string()]);
    }

    #[test]
    fn test_classify_order_is_letter_key_first() {
        let layout = extractor().classify_answer("题干\n答案：AC\n解析：略");
        assert_eq!(
            layout,
            AnswerLayout::LetterKey {
                answer: "AC".to_string(),
                analysis: "略".to_string()
            }
        );
    }

    #[test]
    fn test_classify_missing() {
        assert_eq!(extractor().classify_answer("题干\nA.甲"), AnswerLayout::Missing);
    }

    #[test]
    fn test_into_fields_mapping() {
        assert_eq!(
            AnswerLayout::TailOnly {
                answer: "文字".to_string()
            }
            .into_fields(),
            ("文字".to_string(), String::new())
        );
        assert_eq!(
            AnswerLayout::Missing.into_fields(),
            (String::new(), String::new())
        );
    }
}
