use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::core::types::{TransferRecord, WalletId};

/// 图中的边，表示一个有序钱包对之间的转账关系
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEdge {
    pub from_wallet: WalletId, // 来源钱包
    pub to_wallet: WalletId,   // 目标钱包
    pub amount: BigDecimal,    // 边上记录的金额（重复转账时保留最后一笔）
}

/// 交易图，保存所有钱包间的有向转账关系
///
/// 每个有序 (来源, 目标) 对最多保留一条边；重复出现时用后处理的
/// 记录覆盖边上的金额，不累加也不保留平行边。自环照常存储。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionGraph {
    /// 邻接表：wallet -> 出边列表
    pub adjacency_list: HashMap<WalletId, Vec<TransferEdge>>, // 转账关系的邻接表
    pub wallets: HashSet<WalletId>,                           // 所有出现过的钱包标识
    pub last_updated: DateTime<Utc>,                          // 最后构建时间
}

impl TransactionGraph {
    pub fn new() -> Self {
        Self {
            adjacency_list: HashMap::new(),
            wallets: HashSet::new(),
            last_updated: Utc::now(),
        }
    }

    /// 从转账记录构建交易图
    pub fn build_from_records(&mut self, records: &[TransferRecord]) -> Result<()> {
        info!("开始构建交易图，记录数量: {}", records.len());

        // 清空现有数据
        self.adjacency_list.clear();
        self.wallets.clear();

        for record in records {
            self.add_edge(TransferEdge {
                from_wallet: record.source_wallet.clone(),
                to_wallet: record.dest_wallet.clone(),
                amount: record.amount.clone(),
            });
        }

        self.last_updated = Utc::now();
        let (wallet_count, edge_count) = self.get_stats();
        info!("交易图构建完成，钱包数量: {}, 边数量: {}", wallet_count, edge_count);

        Ok(())
    }

    /// 添加一条边；同一有序钱包对再次出现时只覆盖金额
    pub fn add_edge(&mut self, edge: TransferEdge) {
        self.wallets.insert(edge.from_wallet.clone());
        self.wallets.insert(edge.to_wallet.clone());

        let edges = self
            .adjacency_list
            .entry(edge.from_wallet.clone())
            .or_insert_with(Vec::new);

        if let Some(existing) = edges.iter_mut().find(|e| e.to_wallet == edge.to_wallet) {
            debug!("覆盖已有边 {} -> {} 的金额", edge.from_wallet, edge.to_wallet);
            existing.amount = edge.amount;
        } else {
            edges.push(edge);
        }
    }

    pub fn contains_wallet(&self, wallet: &str) -> bool {
        self.wallets.contains(wallet)
    }

    /// 获取指定钱包的所有出边
    pub fn get_edges_from(&self, wallet: &str) -> Option<&Vec<TransferEdge>> {
        self.adjacency_list.get(wallet)
    }

    /// 检查两个钱包之间是否存在直接转账边
    pub fn has_direct_edge(&self, from_wallet: &str, to_wallet: &str) -> bool {
        if let Some(edges) = self.adjacency_list.get(from_wallet) {
            edges.iter().any(|edge| edge.to_wallet == to_wallet)
        } else {
            false
        }
    }

    /// 查询某条边上记录的金额
    pub fn edge_amount(&self, from_wallet: &str, to_wallet: &str) -> Option<&BigDecimal> {
        self.adjacency_list
            .get(from_wallet)?
            .iter()
            .find(|edge| edge.to_wallet == to_wallet)
            .map(|edge| &edge.amount)
    }

    /// 获取图的统计信息 (钱包数, 边数)
    pub fn get_stats(&self) -> (usize, usize) {
        let wallet_count = self.wallets.len();
        let edge_count = self.adjacency_list.values().map(|edges| edges.len()).sum();
        (wallet_count, edge_count)
    }

    /// 清空图数据
    pub fn clear(&mut self) {
        self.adjacency_list.clear();
        self.wallets.clear();
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, dest: &str, amount: i64) -> TransferRecord {
        TransferRecord::new(source.to_string(), dest.to_string(), BigDecimal::from(amount))
    }

    #[test]
    fn test_transaction_graph_creation() {
        let graph = TransactionGraph::new();
        assert_eq!(graph.wallets.len(), 0);
        assert_eq!(graph.adjacency_list.len(), 0);
    }

    #[test]
    fn test_build_from_records() {
        let records = vec![record("A", "B", 100), record("B", "C", 50)];

        let mut graph = TransactionGraph::new();
        graph.build_from_records(&records).unwrap();

        assert_eq!(graph.get_stats(), (3, 2), "应该有3个钱包和2条边");
        assert!(graph.has_direct_edge("A", "B"));
        assert!(graph.has_direct_edge("B", "C"));
        assert!(!graph.has_direct_edge("A", "C"));
    }

    #[test]
    fn test_duplicate_edge_overwrites_amount() {
        // 同一有序对出现两次：后处理的金额覆盖先处理的，边数不变
        let records = vec![record("A", "B", 10), record("A", "B", 20)];

        let mut graph = TransactionGraph::new();
        graph.build_from_records(&records).unwrap();

        assert_eq!(graph.get_stats(), (2, 1), "重复转账不应产生平行边");
        assert_eq!(graph.edge_amount("A", "B"), Some(&BigDecimal::from(20)));
    }

    #[test]
    fn test_self_loop_is_stored() {
        let records = vec![record("A", "A", 5)];

        let mut graph = TransactionGraph::new();
        graph.build_from_records(&records).unwrap();

        assert_eq!(graph.get_stats(), (1, 1));
        assert!(graph.has_direct_edge("A", "A"));
        assert_eq!(graph.edge_amount("A", "A"), Some(&BigDecimal::from(5)));
    }

    #[test]
    fn test_rebuild_clears_previous_data() {
        let mut graph = TransactionGraph::new();
        graph.build_from_records(&[record("A", "B", 1)]).unwrap();
        graph.build_from_records(&[record("X", "Y", 2)]).unwrap();

        assert!(!graph.contains_wallet("A"));
        assert!(graph.contains_wallet("X"));
        assert_eq!(graph.get_stats(), (2, 1));
    }
}
