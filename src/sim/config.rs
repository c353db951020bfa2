//! 仿真配置
//!
//! 所有参数都有固定默认值，可通过 JSON 文件或命令行逐项覆盖。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// 每种模式的试验（数据包）数
    pub trials: u64,
    /// 自适应模式下单个数据包的最大跳数，超出即判失败
    pub max_hops: u32,
    /// 会发生拥塞的链路两端（与方向无关）；None 表示不注入拥塞
    pub congested_link: Option<(String, String)>,
    pub congestion_probability: f64,
    pub congestion_multiplier: f64,
    /// 奖励 = reward_scale / 实际时延
    pub reward_scale: f64,
    pub seed: u64,
    pub source: String,
    pub destination: String,
    /// 选择下一跳时排除上一跳，防止立即折返
    pub forbid_backtrack: bool,
    /// 每隔多少个试验输出一次进度日志；0 表示不输出
    pub progress_every: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            max_hops: 25,
            congested_link: Some(("NODE_2".to_string(), "NODE_3".to_string())),
            congestion_probability: 0.4,
            congestion_multiplier: 10.0,
            reward_scale: 100.0,
            seed: 42,
            source: "GATEWAY_WEST".to_string(),
            destination: "GATEWAY_EAST".to_string(),
            forbid_backtrack: true,
            progress_every: 100,
        }
    }
}

impl SimConfig {
    /// 从 JSON 文件读取；文件中缺失的字段取默认值
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::NoTrials);
        }
        if !(0.0..=1.0).contains(&self.congestion_probability) {
            return Err(ConfigError::Probability(self.congestion_probability));
        }
        // 倍数 >= 1 保证实际时延始终为正，奖励不会发散
        if !self.congestion_multiplier.is_finite() || self.congestion_multiplier < 1.0 {
            return Err(ConfigError::Multiplier(self.congestion_multiplier));
        }
        if !self.reward_scale.is_finite() || self.reward_scale <= 0.0 {
            return Err(ConfigError::RewardScale(self.reward_scale));
        }
        Ok(())
    }
}
