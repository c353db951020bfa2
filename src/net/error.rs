//! 拓扑构建错误

use thiserror::Error;

/// 构建拓扑时可能出现的错误。都不是致命错误：出错的链路只是不会被创建。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("could not connect nodes, one or both ids not found: {a}, {b}")]
    UnknownNodes { a: String, b: String },

    #[error("node {0} cannot be linked to itself")]
    SelfLoop(String),

    /// 时延必须是有限正数，否则奖励 `reward_scale / latency` 会发散
    #[error("link latency must be finite and strictly positive, got {0}")]
    InvalidLatency(f64),

    #[error("link bandwidth must be positive")]
    InvalidBandwidth,
}
