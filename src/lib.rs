//! Smurfing Hunter - 区块链反洗钱图分析工具
//!
//! 这个库提供了从转账账本中检测扇出/扇入拆分转账模式的功能，
//! 并在交易图上枚举可疑发送方到可疑接收方之间的有界简单路径。

pub mod cli;
pub mod config;
pub mod core;
pub mod loader;
pub mod table_display;
pub mod utils;

// 重新导出常用类型
pub use crate::config::{AnalysisConfig, Config, DisplayConfig};
pub use crate::core::degree_profile::DegreeProfile;
pub use crate::core::path_tracer::{PathTracer, DEFAULT_MAX_HOPS};
pub use crate::core::pipeline::AnalysisPipeline;
pub use crate::core::suspicion::{SuspicionClassifier, SuspicionVerdict, DEFAULT_FAN_THRESHOLD};
pub use crate::core::transaction_graph::{TransactionGraph, TransferEdge};
pub use crate::core::types::{
    AnalysisReport, LaunderingPath, PairTrace, TraceOutcome, TransferRecord, WalletId,
};
pub use crate::loader::{LedgerLoader, LoaderError};
