pub mod degree_profile;
pub mod path_tracer;
pub mod pipeline;
pub mod suspicion;
pub mod transaction_graph;
pub mod types;

// 重新导出核心类型，方便外部使用
pub use degree_profile::DegreeProfile;
pub use path_tracer::PathTracer;
pub use pipeline::AnalysisPipeline;
pub use suspicion::{SuspicionClassifier, SuspicionVerdict};
pub use transaction_graph::{TransactionGraph, TransferEdge};
pub use types::*;
