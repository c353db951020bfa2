//! 拥塞模型
//!
//! 只有一条指定链路会被扰动：以固定概率把基础时延乘上固定倍数。
//! 其余链路永远返回基础时延。

use rand::Rng;

use super::config::SimConfig;
use super::error::{SimError, SimResult};
use crate::net::{Link, NodeId, Topology};

#[derive(Debug, Clone, PartialEq)]
pub struct CongestionModel {
    link: Option<(NodeId, NodeId)>,
    probability: f64,
    multiplier: f64,
}

impl CongestionModel {
    /// 不扰动任何链路
    pub fn none() -> Self {
        Self {
            link: None,
            probability: 0.0,
            multiplier: 1.0,
        }
    }

    pub fn new(a: NodeId, b: NodeId, probability: f64, multiplier: f64) -> Self {
        Self {
            link: Some((a, b)),
            probability,
            multiplier,
        }
    }

    /// 按配置中的节点名解析出拥塞链路
    pub fn from_config(topo: &Topology, cfg: &SimConfig) -> SimResult<Self> {
        let Some((a, b)) = &cfg.congested_link else {
            return Ok(Self::none());
        };
        let resolve = |name: &str| {
            topo.lookup(name)
                .ok_or_else(|| SimError::UnknownNode(name.to_string()))
        };
        Ok(Self::new(
            resolve(a)?,
            resolve(b)?,
            cfg.congestion_probability,
            cfg.congestion_multiplier,
        ))
    }

    /// 穿越 `from -> to` 时是否可能受拥塞影响（与方向无关）
    pub fn affects(&self, from: NodeId, to: NodeId) -> bool {
        self.link
            .is_some_and(|(a, b)| (a == from && b == to) || (a == to && b == from))
    }

    /// 纯函数：给定一次 [0, 1) 的随机抽样，返回该跳的实际时延
    pub fn effective_latency(&self, link: &Link, from: NodeId, to: NodeId, draw: f64) -> f64 {
        let base = link.latency_ms();
        if self.affects(from, to) && draw < self.probability {
            base * self.multiplier
        } else {
            base
        }
    }

    /// 从共享生成器抽样。只有指定链路才会消耗随机数，其余跳不影响随机序列。
    pub fn sample<R: Rng + ?Sized>(
        &self,
        link: &Link,
        from: NodeId,
        to: NodeId,
        rng: &mut R,
    ) -> f64 {
        if !self.affects(from, to) {
            return link.latency_ms();
        }
        let draw: f64 = rng.r#gen();
        self.effective_latency(link, from, to, draw)
    }
}
