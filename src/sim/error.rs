//! 仿真错误类型

use std::path::PathBuf;

use thiserror::Error;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("trial count must be positive")]
    NoTrials,

    #[error("congestion probability must be within [0, 1], got {0}")]
    Probability(f64),

    #[error("congestion multiplier must be finite and >= 1, got {0}")]
    Multiplier(f64),

    #[error("reward scale must be finite and strictly positive, got {0}")]
    RewardScale(f64),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 运行级错误。单次试验的失败（死路、跳数耗尽）不属于错误，只计入统计。
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("node {0} not found in topology")]
    UnknownNode(String),

    #[error("topology does not match the one this simulation was built for: {0}")]
    TopologyMismatch(String),

    #[error("node {0} has no learning state; adaptive routing needs a learning topology")]
    NotLearning(String),
}

pub type SimResult<T> = Result<T, SimError>;
