//! 网络拓扑管理
//!
//! 节点按名称寻址，内部使用稠密索引。每条无向链路只存一份，
//! 两个端点的邻接表各自保存指向它的 `LinkId`。

use std::collections::HashMap;

use super::error::TopologyError;
use super::id::{LinkId, NodeId};
use super::link::Link;
use super::node::{Node, NodeRole};
use tracing::{debug, trace};

/// 网络拓扑
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    links: Vec<Link>,
    by_name: HashMap<String, NodeId>,
    /// 无序端点对 (min, max) -> 链路
    edges: HashMap<(NodeId, NodeId), LinkId>,
    gateways: Vec<NodeId>,
    /// 新建节点是否自动带上在线学习状态
    learning: bool,
}

fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有节点都具备学习能力的拓扑（自适应路由使用）
    pub fn with_learning() -> Self {
        Self {
            learning: true,
            ..Self::default()
        }
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    /// 给所有节点挂上全新的学习状态（已有状态会被清零）。
    pub fn enable_learning(&mut self) {
        self.learning = true;
        for node in &mut self.nodes {
            node.attach_learner();
        }
        debug!(nodes = self.nodes.len(), "为全部节点启用在线学习状态");
    }

    /// 添加普通节点；名称已存在时直接返回已有节点
    pub fn create_node(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(name.into(), NodeRole::Relay)
    }

    /// 添加网关节点；名称已存在时直接返回已有节点（不修改其角色）
    pub fn create_gateway(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(name.into(), NodeRole::Gateway)
    }

    fn insert(&mut self, name: String, role: NodeRole) -> NodeId {
        if let Some(&id) = self.by_name.get(&name) {
            trace!(name = %name, ?id, "节点已存在");
            return id;
        }
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(id, name.clone(), role);
        if self.learning {
            node.attach_learner();
        }
        self.nodes.push(node);
        self.by_name.insert(name, id);
        if role == NodeRole::Gateway {
            self.gateways.push(id);
        }
        id
    }

    /// 用一条无向链路连接两个节点。
    ///
    /// 同一对节点重复连接是空操作，返回已有链路，不会覆盖其属性。
    /// 任一名称不存在时返回 [`TopologyError::UnknownNodes`]，链路不会被创建。
    pub fn connect(
        &mut self,
        a: &str,
        b: &str,
        latency_ms: f64,
        bandwidth_mbps: u32,
    ) -> Result<LinkId, TopologyError> {
        let (Some(ia), Some(ib)) = (self.lookup(a), self.lookup(b)) else {
            return Err(TopologyError::UnknownNodes {
                a: a.to_string(),
                b: b.to_string(),
            });
        };
        self.connect_ids(ia, ib, latency_ms, bandwidth_mbps)
    }

    /// 与 [`Topology::connect`] 相同，但直接使用索引
    pub fn connect_ids(
        &mut self,
        a: NodeId,
        b: NodeId,
        latency_ms: f64,
        bandwidth_mbps: u32,
    ) -> Result<LinkId, TopologyError> {
        if !self.contains(a) || !self.contains(b) {
            return Err(TopologyError::UnknownNodes {
                a: self.label(a),
                b: self.label(b),
            });
        }
        if a == b {
            return Err(TopologyError::SelfLoop(self.nodes[a.0].name().to_string()));
        }
        if !latency_ms.is_finite() || latency_ms <= 0.0 {
            return Err(TopologyError::InvalidLatency(latency_ms));
        }
        if bandwidth_mbps == 0 {
            return Err(TopologyError::InvalidBandwidth);
        }

        let key = edge_key(a, b);
        if let Some(&existing) = self.edges.get(&key) {
            trace!(?a, ?b, link = ?existing, "链路已存在，忽略重复连接");
            return Ok(existing);
        }

        let id = LinkId(self.links.len());
        self.links.push(Link::new(a, b, latency_ms, bandwidth_mbps));
        self.edges.insert(key, id);
        self.nodes[a.0].push_adjacency(b, id);
        self.nodes[b.0].push_adjacency(a, id);
        debug!(
            a = self.nodes[a.0].name(),
            b = self.nodes[b.0].name(),
            latency_ms,
            bandwidth_mbps,
            "创建链路"
        );
        Ok(id)
    }

    /// 索引是否属于本拓扑
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// 节点名；索引越界时返回 `#<index>`，用于错误信息
    fn label(&self, id: NodeId) -> String {
        self.nodes
            .get(id.0)
            .map_or_else(|| format!("#{}", id.0), |node| node.name().to_string())
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// 按名称查找节点
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.lookup(name).map(|id| &self.nodes[id.0])
    }

    /// 按索引获取节点。索引只能来自本拓扑。
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.nodes[id.0].name()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn link_between(&self, a: NodeId, b: NodeId) -> Option<&Link> {
        self.edges.get(&edge_key(a, b)).map(|id| &self.links[id.0])
    }

    /// 节点的邻居及链路，按链路加入顺序
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Link)> + '_ {
        self.nodes[id.0]
            .adjacency()
            .iter()
            .map(|adj| (adj.neighbor, &self.links[adj.link.0]))
    }

    /// 以 (邻居名, 时延, 带宽) 形式枚举邻居；节点不存在时返回 None
    pub fn neighbor_records(&self, name: &str) -> Option<Vec<(&str, f64, u32)>> {
        let id = self.lookup(name)?;
        Some(
            self.neighbors(id)
                .map(|(nb, link)| (self.name(nb), link.latency_ms(), link.bandwidth_mbps()))
                .collect(),
        )
    }

    pub fn gateways(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.gateways.iter().copied()
    }
}
