use tabled::{Table, Tabled};

use crate::core::types::{AnalysisReport, TransferRecord, WalletId};

/// 度数统计表的一行
#[derive(Tabled)]
struct DegreeRow {
    #[tabled(rename = "钱包")]
    wallet: WalletId,
    #[tabled(rename = "扇出")]
    fan_out: usize,
    #[tabled(rename = "扇入")]
    fan_in: usize,
}

/// 可疑钱包表的一行
#[derive(Tabled)]
struct SuspiciousRow {
    #[tabled(rename = "钱包")]
    wallet: WalletId,
    #[tabled(rename = "类型")]
    kind: String,
    #[tabled(rename = "计数")]
    count: usize,
}

/// 终端表格展示器：单次渲染分析结果，不做实时刷新
pub struct TableDisplay;

impl TableDisplay {
    /// 展示账本样本（前 N 条记录）
    pub fn render_sample(records: &[TransferRecord], sample_rows: usize) -> String {
        let sample: Vec<TransferRecord> =
            records.iter().take(sample_rows).cloned().collect();

        if sample.is_empty() {
            return "暂无数据...".to_string();
        }

        Table::new(sample).to_string()
    }

    /// 展示每个钱包的扇出/扇入计数，按钱包名排序
    pub fn render_degree_table(report: &AnalysisReport) -> String {
        let mut wallets: Vec<&WalletId> = report.graph.wallets.iter().collect();
        wallets.sort();

        if wallets.is_empty() {
            return "暂无数据...".to_string();
        }

        let rows: Vec<DegreeRow> = wallets
            .into_iter()
            .map(|wallet| DegreeRow {
                wallet: wallet.clone(),
                fan_out: report.fan_out_count.get(wallet).copied().unwrap_or(0),
                fan_in: report.fan_in_count.get(wallet).copied().unwrap_or(0),
            })
            .collect();

        Table::new(rows).to_string()
    }

    /// 展示可疑钱包列表
    pub fn render_suspicious_table(report: &AnalysisReport) -> String {
        let mut rows = Vec::new();

        let mut senders: Vec<&WalletId> = report.suspicious_senders.iter().collect();
        senders.sort();
        for wallet in senders {
            rows.push(SuspiciousRow {
                wallet: wallet.clone(),
                kind: "高扇出 (潜在拆分方)".to_string(),
                count: report.fan_out_count.get(wallet).copied().unwrap_or(0),
            });
        }

        let mut receivers: Vec<&WalletId> = report.suspicious_receivers.iter().collect();
        receivers.sort();
        for wallet in receivers {
            rows.push(SuspiciousRow {
                wallet: wallet.clone(),
                kind: "高扇入 (归集方)".to_string(),
                count: report.fan_in_count.get(wallet).copied().unwrap_or(0),
            });
        }

        if rows.is_empty() {
            return "未发现可疑钱包".to_string();
        }

        Table::new(rows).to_string()
    }

    /// 逐行展示洗钱路径，按 (发送方, 接收方) 组合分组
    ///
    /// 未找到路径的组合折叠为空，不展示任何错误。
    pub fn render_paths(report: &AnalysisReport) -> String {
        let mut output = String::new();

        for trace in &report.pair_traces {
            let paths = trace.paths();
            if paths.is_empty() {
                continue;
            }

            output.push_str(&format!(
                "{} ⇒ {} ({} 条路径)\n",
                trace.sender,
                trace.receiver,
                paths.len()
            ));
            for path in paths {
                output.push_str(&format!("  {}\n", path.format_route()));
            }
        }

        if output.is_empty() {
            "未发现洗钱路径".to_string()
        } else {
            output
        }
    }

    /// 展示图的统计信息
    pub fn render_graph_stats(report: &AnalysisReport) -> String {
        let (wallet_count, edge_count) = report.graph.get_stats();
        format!("交易图: {} 个钱包, {} 条边", wallet_count, edge_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::core::pipeline::AnalysisPipeline;
    use bigdecimal::BigDecimal;

    fn record(source: &str, dest: &str) -> TransferRecord {
        TransferRecord::new(source.to_string(), dest.to_string(), BigDecimal::from(10))
    }

    fn sample_report() -> AnalysisReport {
        let records = vec![
            record("X", "B"),
            record("X", "C"),
            record("X", "D"),
            record("X", "E"),
            record("B", "R"),
            record("C", "R"),
            record("D", "R"),
            record("E", "R"),
        ];
        AnalysisPipeline::new(AnalysisConfig {
            fan_threshold: 3,
            max_path_hops: 4,
            max_paths_per_pair: None,
        })
        .run(&records)
        .unwrap()
    }

    #[test]
    fn test_render_sample_limits_rows() {
        let records = vec![record("A", "B"), record("B", "C"), record("C", "D")];

        let table = TableDisplay::render_sample(&records, 2);

        assert!(table.contains("A"));
        assert!(table.contains("来源钱包"));
        assert!(!table.contains("D"), "超过样本条数的记录不应出现");
    }

    #[test]
    fn test_render_sample_empty() {
        assert_eq!(TableDisplay::render_sample(&[], 5), "暂无数据...");
    }

    #[test]
    fn test_render_suspicious_table() {
        let report = sample_report();
        let table = TableDisplay::render_suspicious_table(&report);

        assert!(table.contains("X"));
        assert!(table.contains("R"));
        assert!(table.contains("高扇出"));
        assert!(table.contains("高扇入"));
    }

    #[test]
    fn test_render_paths_groups_by_pair() {
        let report = sample_report();
        let output = TableDisplay::render_paths(&report);

        assert!(output.contains("X ⇒ R"));
        assert!(output.contains("X → B → R"));
    }

    #[test]
    fn test_render_paths_without_findings() {
        let records = vec![record("A", "B")];
        let report = AnalysisPipeline::new(AnalysisConfig {
            fan_threshold: 3,
            max_path_hops: 4,
            max_paths_per_pair: None,
        })
        .run(&records)
        .unwrap();

        assert_eq!(TableDisplay::render_paths(&report), "未发现洗钱路径");
    }
}
