//! 静态最短路（Dijkstra）
//!
//! 边代价只取链路时延，带宽不参与选路。结果只计算一次，之后原样重放。

use std::collections::BinaryHeap;

use super::frontier::FrontierEntry;
use crate::net::{NodeId, Topology};
use tracing::{debug, trace};

/// 一条静态路由
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// 从起点到终点（含两端）的节点序列；不可达时为空
    pub hops: Vec<NodeId>,
    /// 路径总时延；不可达时为 +inf
    pub total_latency_ms: f64,
}

impl Route {
    pub fn unreachable() -> Self {
        Self {
            hops: Vec::new(),
            total_latency_ms: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.hops.is_empty()
    }

    pub fn names<'a>(&self, topo: &'a Topology) -> Vec<&'a str> {
        self.hops.iter().map(|&id| topo.name(id)).collect()
    }

    /// 形如 `A -> B -> C` 的可读形式
    pub fn describe(&self, topo: &Topology) -> String {
        self.names(topo).join(" -> ")
    }
}

/// 按名称计算最短路。任一名称不存在或终点不可达时返回 [`Route::unreachable`]。
pub fn shortest_path(topo: &Topology, start: &str, end: &str) -> Route {
    match (topo.lookup(start), topo.lookup(end)) {
        (Some(s), Some(e)) => shortest_path_between(topo, s, e),
        _ => {
            debug!(start, end, "起点或终点不存在");
            Route::unreachable()
        }
    }
}

#[tracing::instrument(skip_all, fields(from = ?start, to = ?end))]
pub fn shortest_path_between(topo: &Topology, start: NodeId, end: NodeId) -> Route {
    if !topo.contains(start) || !topo.contains(end) {
        debug!(?start, ?end, "起点或终点不属于此拓扑");
        return Route::unreachable();
    }
    let n = topo.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut done = vec![false; n];
    let mut frontier = BinaryHeap::new();

    dist[start.0] = 0.0;
    frontier.push(FrontierEntry {
        cost: 0.0,
        name: topo.name(start),
        node: start,
    });

    while let Some(FrontierEntry { cost, node, .. }) = frontier.pop() {
        if done[node.0] {
            continue;
        }
        done[node.0] = true;
        trace!(node = topo.name(node), cost, "确定节点");

        if node == end {
            break;
        }

        for (nb, link) in topo.neighbors(node) {
            if done[nb.0] {
                continue;
            }
            let candidate = cost + link.latency_ms();
            if candidate < dist[nb.0] {
                dist[nb.0] = candidate;
                prev[nb.0] = Some(node);
                frontier.push(FrontierEntry {
                    cost: candidate,
                    name: topo.name(nb),
                    node: nb,
                });
            }
        }
    }

    if !done[end.0] {
        debug!("终点不可达");
        return Route::unreachable();
    }

    let mut hops = vec![end];
    let mut cur = end;
    while let Some(p) = prev[cur.0] {
        hops.push(p);
        cur = p;
    }
    hops.reverse();

    let route = Route {
        hops,
        total_latency_ms: dist[end.0],
    };
    debug!(
        route = %route.describe(topo),
        total_latency_ms = route.total_latency_ms,
        "找到最短路"
    );
    route
}
