use rand::Rng;

/// 生成候选题目ID
///
/// 格式为"分钟级时间戳 + 随机后缀"，如 `2026082913051234`。
/// 唯一性不由生成器保证，由存储层在主键冲突时重新生成并重试。
pub fn generate() -> String {
    let prefix = chrono::Local::now().format("%Y%m%d%H%M");
    let suffix: u32 = rand::thread_rng().gen_range(0..=1_000_000);
    format!("{}{}", prefix, suffix)
}
