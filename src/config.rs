use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::path_tracer::DEFAULT_MAX_HOPS;
use crate::core::suspicion::DEFAULT_FAN_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub display: DisplayConfig,
}

/// 分析参数：核心算法仅依赖这两个常量，均可在命令行覆盖
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub fan_threshold: usize,              // 扇出/扇入判定阈值（严格大于）
    pub max_path_hops: usize,              // 路径枚举的跳数上限
    pub max_paths_per_pair: Option<usize>, // 每个组合的路径数上限，None 表示全部枚举
}

/// 展示参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub sample_rows: usize,     // 样本表展示的记录条数
    pub show_graph_stats: bool, // 是否输出图的统计信息
}

impl Config {
    pub fn load() -> Result<Self> {
        // 默认配置
        Ok(Config {
            analysis: AnalysisConfig {
                fan_threshold: DEFAULT_FAN_THRESHOLD,
                max_path_hops: DEFAULT_MAX_HOPS,
                max_paths_per_pair: None,
            },
            display: DisplayConfig {
                sample_rows: 5,
                show_graph_stats: true,
            },
        })
    }
}
