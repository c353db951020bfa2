//! 标识符类型
//!
//! 定义节点和链路在拓扑内部的索引。对外的节点标识是字符串名，
//! 内部统一使用稠密索引以避免到处克隆字符串。

/// 节点标识符（`Topology` 内部 `nodes` 的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// 链路标识符（`Topology` 内部 `links` 的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub usize);
