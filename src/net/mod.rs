//! 网络模型模块
//!
//! 此模块包含拓扑模型的核心组件：节点、链路、拓扑和数据包。

// 子模块声明
mod error;
mod id;
mod link;
mod node;
mod packet;
mod topology;
mod topology_view;

// 重新导出公共接口
pub use error::TopologyError;
pub use id::{LinkId, NodeId};
pub use link::Link;
pub use node::{Adjacency, Node, NodeRole};
pub use packet::Packet;
pub use topology::Topology;
pub use topology_view::{NeighborView, NodeView, TopologyView};
