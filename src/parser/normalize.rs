/// 归一化原始文本
///
/// 将全角句点 `．` 统一替换为半角 `.`，使两种标点风格的
/// 题号（如 `12．` 与 `12.`）在下游被同一套规则识别。
/// 纯函数，无失败分支；对已归一化的文本再次调用结果不变。
pub fn normalize(text: &str) -> String {
    text.replace('．', ".")
}
