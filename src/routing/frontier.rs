//! Dijkstra 前沿条目
//!
//! 主键为累计时延，次键为节点名（字典序），保证平局时的结果在
//! 任何平台、任何运行中都一致。

use std::cmp::Ordering;

use crate::net::NodeId;

pub(crate) struct FrontierEntry<'a> {
    pub(crate) cost: f64,
    pub(crate) name: &'a str,
    pub(crate) node: NodeId,
}

// BinaryHeap 是 max-heap；我们需要最小代价优先，因此反向比较。
impl Ord for FrontierEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.name.cmp(other.name))
            .then_with(|| self.node.cmp(&other.node))
            .reverse()
    }
}

impl PartialOrd for FrontierEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry<'_> {}
