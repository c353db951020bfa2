//! 数据包类型
//!
//! 一次试验中的数据包旅程记录。只在单次试验内存活，不做持久化。

use std::time::Instant;

use super::id::NodeId;

/// 网络数据包
#[derive(Debug, Clone)]
pub struct Packet {
    pub id: u64,
    pub src: NodeId,
    pub dst: NodeId,
    pub created_at: Instant,
    /// 当前所在节点
    pub at: NodeId,
    /// 已经过的节点序列（含源节点）
    pub path: Vec<NodeId>,
    /// 累计时延（毫秒）
    pub latency_ms: f64,
}

impl Packet {
    pub fn new(id: u64, src: NodeId, dst: NodeId) -> Self {
        Self {
            id,
            src,
            dst,
            created_at: Instant::now(),
            at: src,
            path: vec![src],
            latency_ms: 0.0,
        }
    }

    /// 记录一跳：移动到 `next` 并累加该跳时延
    pub fn log_hop(&mut self, next: NodeId, latency_ms: f64) {
        self.at = next;
        self.path.push(next);
        self.latency_ms += latency_ms;
    }

    /// 已走过的跳数
    pub fn hops_taken(&self) -> usize {
        self.path.len() - 1
    }

    pub fn arrived(&self) -> bool {
        self.at == self.dst
    }
}
