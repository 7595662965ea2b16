use serde::{Deserialize, Serialize};

/// 从自由文本解析出的单道题目
///
/// 所有字段均已去除首尾空白；任何字段都可能为空，
/// 解析失败只会产生空字段，不会产生错误。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuestion {
    /// 题干
    pub title: String,
    /// 选项正文，按出现顺序排列（可为空，如判断题/简答题）
    pub options: Vec<String>,
    /// 答案：选择题为字母串（如 "AC"），主观题为任意文本
    pub answer: String,
    /// 解析文本，缺失时为空字符串
    pub analysis: String,
    /// 来源标签（由调用方提供，通常为文件名）
    pub source: String,
}

/// 数据库中的一行题目记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimuRecord {
    pub id: String,
    pub title: String,
    /// 选项列表的 JSON 序列化文本（与 SQLite 中的存储格式一致）
    pub option: String,
    pub answer: String,
    pub analysis: String,
    pub source: String,
    pub create_time: String,
}

impl TimuRecord {
    /// 将存储的选项 JSON 文本还原为列表，解析失败时降级为空列表
    pub fn options(&self) -> Vec<String> {
        serde_json::from_str(&self.option).unwrap_or_default()
    }
}

/// JSON 导入文件中的题目对象
///
/// 所有字段均可缺省；`option` 字段兼容两种写法：
/// 字符串列表，或已序列化好的 JSON 字符串。
#[derive(Debug, Clone, Deserialize)]
pub struct JsonQuestion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(
        default = "default_option_json",
        deserialize_with = "deserialize_option"
    )]
    pub option: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub analysis: String,
}

fn default_option_json() -> String {
    "[]".to_string()
}

// Helper function to deserialize option as either a list or a pre-serialized string
fn deserialize_option<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{SeqAccess, Visitor};
    use std::fmt;

    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of strings or a pre-serialized JSON string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut items: Vec<String> = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                items.push(item);
            }
            serde_json::to_string(&items).map_err(serde::de::Error::custom)
        }
    }

    deserializer.deserialize_any(OptionVisitor)
}

/// 导出文件中的题目对象（选项已还原为列表）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportQuestion {
    pub id: String,
    pub title: String,
    pub option: Vec<String>,
    pub answer: String,
    pub analysis: String,
}

impl From<&TimuRecord> for ExportQuestion {
    fn from(record: &TimuRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            option: record.options(),
            answer: record.answer.clone(),
            analysis: record.analysis.clone(),
        }
    }
}
