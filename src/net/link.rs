//! 链路类型
//!
//! 一条无向边只存储一次，由拓扑持有；两个端点各自通过 `LinkId` 引用它，
//! 因此两个方向看到的时延/带宽永远一致。

use super::id::NodeId;

/// 无向网络链路
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    a: NodeId,
    b: NodeId,
    /// 单向传播时延（毫秒），恒为有限正数
    latency_ms: f64,
    /// 带宽（Mbps），恒为正
    bandwidth_mbps: u32,
}

impl Link {
    /// 创建新链路。取值合法性由 `Topology::connect` 负责检查。
    pub(crate) fn new(a: NodeId, b: NodeId, latency_ms: f64, bandwidth_mbps: u32) -> Self {
        Self {
            a,
            b,
            latency_ms,
            bandwidth_mbps,
        }
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.a, self.b)
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency_ms
    }

    pub fn bandwidth_mbps(&self) -> u32 {
        self.bandwidth_mbps
    }
}
