use log::debug;
use std::collections::{HashMap, HashSet};

use crate::core::types::{TransferRecord, WalletId};

/// 扇出/扇入度数聚合结果
///
/// 对每条记录：目标钱包加入来源钱包的扇出集合，来源钱包加入
/// 目标钱包的扇入集合。集合自动去重，重复转账只计一次。
/// 没有对应方向转账的钱包不会出现条目（缺席即计数 0）。
#[derive(Debug, Clone, Default)]
pub struct DegreeProfile {
    pub fan_out: HashMap<WalletId, HashSet<WalletId>>, // 来源钱包 -> 去重后的目标钱包集合
    pub fan_in: HashMap<WalletId, HashSet<WalletId>>,  // 目标钱包 -> 去重后的来源钱包集合
}

impl DegreeProfile {
    /// 从转账记录聚合度数信息；结果与记录顺序无关
    pub fn from_records(records: &[TransferRecord]) -> Self {
        let mut fan_out: HashMap<WalletId, HashSet<WalletId>> = HashMap::new();
        let mut fan_in: HashMap<WalletId, HashSet<WalletId>> = HashMap::new();

        for record in records {
            fan_out
                .entry(record.source_wallet.clone())
                .or_insert_with(HashSet::new)
                .insert(record.dest_wallet.clone());
            fan_in
                .entry(record.dest_wallet.clone())
                .or_insert_with(HashSet::new)
                .insert(record.source_wallet.clone());
        }

        debug!(
            "度数聚合完成，来源钱包 {} 个，目标钱包 {} 个",
            fan_out.len(),
            fan_in.len()
        );

        Self { fan_out, fan_in }
    }

    /// 每个来源钱包的去重扇出计数
    pub fn fan_out_count(&self) -> HashMap<WalletId, usize> {
        self.fan_out
            .iter()
            .map(|(wallet, peers)| (wallet.clone(), peers.len()))
            .collect()
    }

    /// 每个目标钱包的去重扇入计数
    pub fn fan_in_count(&self) -> HashMap<WalletId, usize> {
        self.fan_in
            .iter()
            .map(|(wallet, peers)| (wallet.clone(), peers.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn record(source: &str, dest: &str) -> TransferRecord {
        TransferRecord::new(source.to_string(), dest.to_string(), BigDecimal::from(1))
    }

    #[test]
    fn test_distinct_counterparts_counted_once() {
        // A 给 B 转了三次，给 C 转了一次：扇出计数应为 2
        let records = vec![
            record("A", "B"),
            record("A", "B"),
            record("A", "B"),
            record("A", "C"),
        ];

        let profile = DegreeProfile::from_records(&records);
        let fan_out = profile.fan_out_count();
        let fan_in = profile.fan_in_count();

        assert_eq!(fan_out.get("A"), Some(&2), "重复转账只计一次去重对手方");
        assert_eq!(fan_in.get("B"), Some(&1));
        assert_eq!(fan_in.get("C"), Some(&1));
    }

    #[test]
    fn test_absent_wallet_has_no_entry() {
        // B 只收不发：扇出表中不应有 B 的条目
        let records = vec![record("A", "B")];

        let profile = DegreeProfile::from_records(&records);

        assert!(profile.fan_out_count().get("B").is_none());
        assert!(profile.fan_in_count().get("A").is_none());
    }

    #[test]
    fn test_order_independence() {
        let forward = vec![record("A", "B"), record("C", "B"), record("A", "D")];
        let reversed: Vec<TransferRecord> = forward.iter().rev().cloned().collect();

        let a = DegreeProfile::from_records(&forward);
        let b = DegreeProfile::from_records(&reversed);

        assert_eq!(a.fan_out_count(), b.fan_out_count(), "聚合结果不应依赖记录顺序");
        assert_eq!(a.fan_in_count(), b.fan_in_count());
    }

    #[test]
    fn test_self_transfer_counts_self_as_counterpart() {
        let records = vec![record("A", "A")];

        let profile = DegreeProfile::from_records(&records);

        assert_eq!(profile.fan_out_count().get("A"), Some(&1));
        assert_eq!(profile.fan_in_count().get("A"), Some(&1));
    }
}
