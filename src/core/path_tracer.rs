use log::{debug, info};
use std::collections::HashSet;

use crate::core::suspicion::SuspicionVerdict;
use crate::core::transaction_graph::TransactionGraph;
use crate::core::types::{LaunderingPath, PairTrace, TraceOutcome, WalletId};

/// 默认的路径跳数上限（边数，4 跳即最多 5 个节点）
pub const DEFAULT_MAX_HOPS: usize = 4;

/// 路径追踪器：枚举可疑发送方到可疑接收方之间的有界简单路径
///
/// 搜索在最坏情况下随图的分支因子指数增长，由跳数上限封顶。
/// 稠密图上可以额外设置每个组合的路径数上限来约束开销。
pub struct PathTracer {
    max_hops: usize,                   // 单条路径允许的最大边数
    max_paths_per_pair: Option<usize>, // 每个组合最多保留的路径数，None 表示全部枚举
}

impl PathTracer {
    pub fn new(max_hops: usize) -> Self {
        Self {
            max_hops,
            max_paths_per_pair: None,
        }
    }

    /// 创建带路径数上限的追踪器
    pub fn with_path_limit(max_hops: usize, max_paths_per_pair: usize) -> Self {
        Self {
            max_hops,
            max_paths_per_pair: Some(max_paths_per_pair),
        }
    }

    /// 获取最大跳数
    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// 对所有 (可疑发送方, 可疑接收方) 有序组合执行路径搜索
    ///
    /// 组合按字典序遍历，保证输出顺序稳定。端点缺失或不连通的
    /// 组合不会中断整体流程，只在结果中标记对应状态。
    pub fn trace_all(
        &self,
        graph: &TransactionGraph,
        verdict: &SuspicionVerdict,
    ) -> Vec<PairTrace> {
        let mut senders: Vec<WalletId> = verdict.suspicious_senders.iter().cloned().collect();
        senders.sort();
        let mut receivers: Vec<WalletId> = verdict.suspicious_receivers.iter().cloned().collect();
        receivers.sort();

        info!(
            "开始路径追踪，发送方 {} 个，接收方 {} 个，跳数上限 {}",
            senders.len(),
            receivers.len(),
            self.max_hops
        );

        let mut traces = Vec::new();
        for sender in &senders {
            for receiver in &receivers {
                traces.push(self.trace_pair(graph, sender, receiver));
            }
        }

        let found: usize = traces.iter().map(|trace| trace.paths().len()).sum();
        info!("路径追踪完成，共找到 {} 条路径", found);

        traces
    }

    /// 搜索单个组合在跳数上限内的全部简单路径
    pub fn trace_pair(
        &self,
        graph: &TransactionGraph,
        sender: &str,
        receiver: &str,
    ) -> PairTrace {
        if !graph.contains_wallet(sender) || !graph.contains_wallet(receiver) {
            debug!("端点缺失，组合 {} -> {} 记零条路径", sender, receiver);
            return PairTrace {
                sender: sender.to_string(),
                receiver: receiver.to_string(),
                outcome: TraceOutcome::EndpointMissing,
            };
        }

        let mut found = Vec::new();
        let mut visited = HashSet::new();
        let mut current_path = vec![sender.to_string()];
        visited.insert(sender.to_string());

        self.dfs_search(
            graph,
            sender,
            receiver,
            &mut visited,
            &mut current_path,
            &mut found,
            0,
        );

        let outcome = if found.is_empty() {
            TraceOutcome::NotConnected
        } else {
            TraceOutcome::Found(found)
        };

        PairTrace {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            outcome,
        }
    }

    fn dfs_search(
        &self,
        graph: &TransactionGraph,
        current: &str,
        receiver: &str,
        visited: &mut HashSet<WalletId>,
        current_path: &mut Vec<WalletId>,
        found: &mut Vec<LaunderingPath>,
        depth: usize,
    ) {
        // 达到跳数上限或路径数上限时停止延伸
        if depth >= self.max_hops || self.path_limit_reached(found) {
            return;
        }

        if let Some(edges) = graph.get_edges_from(current) {
            for edge in edges {
                if self.path_limit_reached(found) {
                    return;
                }

                // 终点命中：记录路径，不再向后延伸。起点即终点的环
                // ([s, …, s]) 会重复起点节点，不是简单路径，跳过
                if edge.to_wallet == receiver {
                    if !visited.contains(receiver) {
                        let mut route = current_path.clone();
                        route.push(edge.to_wallet.clone());
                        found.push(LaunderingPath::new(route));
                    }
                    continue;
                }

                if visited.contains(&edge.to_wallet) {
                    continue;
                }

                visited.insert(edge.to_wallet.clone());
                current_path.push(edge.to_wallet.clone());

                self.dfs_search(
                    graph,
                    &edge.to_wallet,
                    receiver,
                    visited,
                    current_path,
                    found,
                    depth + 1,
                );

                // 回溯
                current_path.pop();
                visited.remove(&edge.to_wallet);
            }
        }
    }

    fn path_limit_reached(&self, found: &[LaunderingPath]) -> bool {
        self.max_paths_per_pair
            .map(|limit| found.len() >= limit)
            .unwrap_or(false)
    }
}
