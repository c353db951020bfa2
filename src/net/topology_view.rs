//! 拓扑的只读快照，供展示层渲染。
//!
//! 快照与拓扑完全脱钩，展示层拿到的是拷贝，无法反过来修改拓扑。

use std::fmt;

use serde::Serialize;

use super::topology::Topology;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborView {
    pub id: String,
    pub gateway: bool,
    pub latency_ms: f64,
    pub bandwidth_mbps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: String,
    pub gateway: bool,
    /// 按链路加入顺序
    pub neighbors: Vec<NeighborView>,
}

/// 按节点名排序的拓扑快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyView {
    pub nodes: Vec<NodeView>,
}

impl Topology {
    pub fn view(&self) -> TopologyView {
        let mut nodes = self
            .nodes()
            .iter()
            .map(|node| NodeView {
                id: node.name().to_string(),
                gateway: node.is_gateway(),
                neighbors: self
                    .neighbors(node.id())
                    .map(|(nb, link)| NeighborView {
                        id: self.name(nb).to_string(),
                        gateway: self.node(nb).is_gateway(),
                        latency_ms: link.latency_ms(),
                        bandwidth_mbps: link.bandwidth_mbps(),
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        TopologyView { nodes }
    }
}

fn label(id: &str, gateway: bool) -> String {
    if gateway {
        format!("Gateway(ID='{id}')")
    } else {
        format!("Node(ID='{id}')")
    }
}

impl fmt::Display for TopologyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(40);
        writeln!(f, "{rule}")?;
        writeln!(f, "      NETWORK TOPOLOGY VISUALIZATION")?;
        writeln!(f, "{rule}")?;
        for node in &self.nodes {
            writeln!(f, "-> {}:", label(&node.id, node.gateway))?;
            if node.neighbors.is_empty() {
                writeln!(f, "   [No Connections]")?;
                continue;
            }
            for nb in &node.neighbors {
                writeln!(
                    f,
                    "   -- (L: {:.2}ms, BW: {}Mbps) --> {}",
                    nb.latency_ms,
                    nb.bandwidth_mbps,
                    label(&nb.id, nb.gateway)
                )?;
            }
        }
        write!(f, "{rule}")
    }
}
