//! 节点类型
//!
//! 普通节点与网关共用一个 `Node` 结构：角色只是一个标记，
//! 在线学习状态是一个可选组件，而不是子类型。

use super::id::{LinkId, NodeId};
use crate::routing::BanditState;

/// 节点在网络中的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// 普通中继节点
    Relay,
    /// 网络出入口
    Gateway,
}

/// 邻接项：邻居节点以及通往它的链路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacency {
    pub neighbor: NodeId,
    pub link: LinkId,
}

/// 网络节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    name: String,
    role: NodeRole,
    /// 按链路加入顺序排列，决定了自适应路由中的平局处理顺序
    adjacency: Vec<Adjacency>,
    learner: Option<BanditState>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: impl Into<String>, role: NodeRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            adjacency: Vec::new(),
            learner: None,
        }
    }

    /// 获取节点标识符
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// 获取节点名称
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }

    pub fn is_gateway(&self) -> bool {
        self.role == NodeRole::Gateway
    }

    pub fn adjacency(&self) -> &[Adjacency] {
        &self.adjacency
    }

    /// 到 `neighbor` 的链路（如果相邻）
    pub fn link_to(&self, neighbor: NodeId) -> Option<LinkId> {
        self.adjacency
            .iter()
            .find(|adj| adj.neighbor == neighbor)
            .map(|adj| adj.link)
    }

    pub fn learner(&self) -> Option<&BanditState> {
        self.learner.as_ref()
    }

    pub(crate) fn learner_mut(&mut self) -> Option<&mut BanditState> {
        self.learner.as_mut()
    }

    /// 挂上一份全新的学习状态，每个已有邻居一个零初始化的臂。
    pub(crate) fn attach_learner(&mut self) {
        let mut state = BanditState::default();
        for adj in &self.adjacency {
            state.add_arm(adj.neighbor);
        }
        self.learner = Some(state);
    }

    pub(crate) fn push_adjacency(&mut self, neighbor: NodeId, link: LinkId) {
        self.adjacency.push(Adjacency { neighbor, link });
        if let Some(learner) = &mut self.learner {
            learner.add_arm(neighbor);
        }
    }
}
