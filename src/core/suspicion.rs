use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::core::types::WalletId;

/// 默认的扇出/扇入判定阈值（比较为严格大于）
pub const DEFAULT_FAN_THRESHOLD: usize = 3;

/// 可疑钱包判定结果；两个集合都可能为空，同一钱包可同时出现在两边
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspicionVerdict {
    pub suspicious_senders: HashSet<WalletId>,   // 高扇出钱包（潜在拆分方）
    pub suspicious_receivers: HashSet<WalletId>, // 高扇入钱包（归集方）
}

/// 可疑钱包分类器
pub struct SuspicionClassifier {
    fan_threshold: usize, // 计数严格大于该值才标记
}

impl SuspicionClassifier {
    pub fn new(fan_threshold: usize) -> Self {
        Self { fan_threshold }
    }

    pub fn fan_threshold(&self) -> usize {
        self.fan_threshold
    }

    /// 根据扇出/扇入计数标记可疑钱包
    ///
    /// 恰好等于阈值的去重对手方数量不触发标记。
    pub fn classify(
        &self,
        fan_out_count: &HashMap<WalletId, usize>,
        fan_in_count: &HashMap<WalletId, usize>,
    ) -> SuspicionVerdict {
        let suspicious_senders = Self::over_threshold(fan_out_count, self.fan_threshold);
        let suspicious_receivers = Self::over_threshold(fan_in_count, self.fan_threshold);

        info!(
            "可疑钱包判定完成，发送方 {} 个，接收方 {} 个 (阈值 {})",
            suspicious_senders.len(),
            suspicious_receivers.len(),
            self.fan_threshold
        );

        SuspicionVerdict {
            suspicious_senders,
            suspicious_receivers,
        }
    }

    fn over_threshold(
        counts: &HashMap<WalletId, usize>,
        threshold: usize,
    ) -> HashSet<WalletId> {
        counts
            .iter()
            .filter(|(_, &count)| count > threshold)
            .map(|(wallet, _)| wallet.clone())
            .collect()
    }
}
