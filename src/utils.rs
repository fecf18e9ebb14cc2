use anyhow::Result;
use bigdecimal::BigDecimal;
use num_traits::Zero;
use rand;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::types::TransferRecord;

/// 将字符串转换为 BigDecimal
pub fn str_to_bigdecimal(s: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(s.trim())
        .map_err(|e| anyhow::anyhow!("Failed to parse BigDecimal: {}", e))
}

/// 账本的总转账金额
pub fn total_volume(records: &[TransferRecord]) -> BigDecimal {
    records
        .iter()
        .map(|record| &record.amount)
        .fold(BigDecimal::zero(), |acc, amount| acc + amount)
}

/// 生成唯一 ID
pub fn generate_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis();
    let random_suffix: u32 = rand::random();
    format!("{}-{}", timestamp, random_suffix)
}

/// 格式化大数字为可读字符串
pub fn format_big_number(number: &BigDecimal, decimals: usize) -> String {
    let rounded = number.with_scale(decimals as i64);
    rounded.to_string()
}
