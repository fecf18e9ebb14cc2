use anyhow::Result;
use chrono::Utc;
use log::info;

use crate::config::AnalysisConfig;
use crate::core::degree_profile::DegreeProfile;
use crate::core::path_tracer::PathTracer;
use crate::core::suspicion::SuspicionClassifier;
use crate::core::transaction_graph::TransactionGraph;
use crate::core::types::{AnalysisReport, TransferRecord};
use crate::utils;

/// 分析流水线：把一批转账记录变成一份完整报告
///
/// 纯函数式执行：每次调用从零构建全部数据结构，不保留任何
/// 跨次状态，也没有全局单例。相同输入得到相同的计数、相同的
/// 可疑集合和相同的路径集合。
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// 执行一次完整分析：聚合度数 -> 判定可疑钱包 -> 构图 -> 路径追踪
    pub fn run(&self, records: &[TransferRecord]) -> Result<AnalysisReport> {
        info!("开始分析，共 {} 条转账记录", records.len());

        let profile = DegreeProfile::from_records(records);
        let fan_out_count = profile.fan_out_count();
        let fan_in_count = profile.fan_in_count();

        let classifier = SuspicionClassifier::new(self.config.fan_threshold);
        let verdict = classifier.classify(&fan_out_count, &fan_in_count);

        let mut graph = TransactionGraph::new();
        graph.build_from_records(records)?;

        let tracer = match self.config.max_paths_per_pair {
            Some(limit) => PathTracer::with_path_limit(self.config.max_path_hops, limit),
            None => PathTracer::new(self.config.max_path_hops),
        };
        let pair_traces = tracer.trace_all(&graph, &verdict);

        let report = AnalysisReport {
            id: utils::generate_id(),
            fan_out_count,
            fan_in_count,
            suspicious_senders: verdict.suspicious_senders,
            suspicious_receivers: verdict.suspicious_receivers,
            pair_traces,
            graph,
            analyzed_at: Utc::now(),
        };

        info!(
            "分析完成，报告ID: {}，路径总数: {}",
            report.id,
            report.total_path_count()
        );

        Ok(report)
    }
}
