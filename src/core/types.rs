use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use tabled::Tabled;

use crate::core::transaction_graph::TransactionGraph;

/// 钱包标识符：不透明字符串，除了非空不做任何格式校验
pub type WalletId = String;

fn display_amount(amount: &BigDecimal) -> String {
    format!("{:.2}", amount)
}

/// 单笔转账记录，对应账本中的一行，加载后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct TransferRecord {
    #[tabled(rename = "来源钱包")]
    #[serde(alias = "Source_Wallet")]
    pub source_wallet: WalletId,
    #[tabled(rename = "目标钱包")]
    #[serde(alias = "Dest_Wallet")]
    pub dest_wallet: WalletId,
    #[tabled(rename = "金额", display_with = "display_amount")]
    #[serde(alias = "Amount")]
    pub amount: BigDecimal,
}

impl TransferRecord {
    pub fn new(source_wallet: String, dest_wallet: String, amount: BigDecimal) -> Self {
        Self {
            source_wallet,
            dest_wallet,
            amount,
        }
    }
}

/// 一条从可疑发送方到可疑接收方的洗钱路径
///
/// 路径是简单路径：节点不重复，至少包含两个节点（一条边）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunderingPath {
    pub route: Vec<WalletId>, // 路径经过的钱包序列
}

impl LaunderingPath {
    pub fn new(route: Vec<WalletId>) -> Self {
        Self { route }
    }

    /// 路径的边数（跳数）
    pub fn hop_count(&self) -> usize {
        self.route.len().saturating_sub(1)
    }

    pub fn sender(&self) -> Option<&WalletId> {
        self.route.first()
    }

    pub fn receiver(&self) -> Option<&WalletId> {
        self.route.last()
    }

    /// 按 "A → B → C" 的形式拼接路径
    pub fn format_route(&self) -> String {
        self.route.join(" → ")
    }
}

/// 单个 (发送方, 接收方) 组合的路径搜索结果
///
/// 路径搜索从不报错：端点缺失或不连通都只是对应组合没有路径。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceOutcome {
    /// 找到至少一条限定跳数内的简单路径
    Found(Vec<LaunderingPath>),
    /// 两个端点都在图中，但限定跳数内不连通
    NotConnected,
    /// 至少一个端点不在图中
    EndpointMissing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairTrace {
    pub sender: WalletId,     // 可疑发送方
    pub receiver: WalletId,   // 可疑接收方
    pub outcome: TraceOutcome,
}

impl PairTrace {
    /// 展示层视角：未找到路径的组合折叠为空列表
    pub fn paths(&self) -> &[LaunderingPath] {
        match &self.outcome {
            TraceOutcome::Found(paths) => paths,
            _ => &[],
        }
    }

    pub fn has_paths(&self) -> bool {
        !self.paths().is_empty()
    }
}

/// 一次完整分析产出的全部工件
///
/// 每次上传的账本都重新构建整份报告，不保留任何跨次状态。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: String,                              // 本次分析的运行ID
    pub fan_out_count: HashMap<WalletId, usize>, // 每个来源钱包的去重扇出计数
    pub fan_in_count: HashMap<WalletId, usize>,  // 每个目标钱包的去重扇入计数
    pub suspicious_senders: HashSet<WalletId>,   // 高扇出钱包（潜在拆分方）
    pub suspicious_receivers: HashSet<WalletId>, // 高扇入钱包（归集方）
    pub pair_traces: Vec<PairTrace>,             // 每个可疑组合的路径搜索结果
    pub graph: TransactionGraph,                 // 交易图，供外部可视化使用
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// 拍平所有组合里找到的路径
    pub fn all_paths(&self) -> Vec<&LaunderingPath> {
        self.pair_traces
            .iter()
            .flat_map(|trace| trace.paths())
            .collect()
    }

    pub fn total_path_count(&self) -> usize {
        self.pair_traces.iter().map(|trace| trace.paths().len()).sum()
    }

    /// 将报告保存为 JSON 文件
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 从 JSON 文件读回报告
    pub fn load_from_file(path: &str) -> Result<AnalysisReport> {
        let content = fs::read_to_string(path)?;
        let report: AnalysisReport = serde_json::from_str(&content)?;
        Ok(report)
    }
}
