//! 每节点的在线学习状态（UCB1 多臂老虎机）
//!
//! 每个邻居是一个臂。选择时先强制探索未尝试过的臂（按邻居加入顺序），
//! 全部尝试过后按 UCB1 上置信界取最大者。没有衰减，计数只增不减。

use crate::net::{NodeId, Topology};
use tracing::{trace, warn};

/// 单个臂：拉动次数与平均奖励
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BanditArm {
    pulls: u64,
    mean_reward: f64,
}

impl BanditArm {
    pub fn pulls(&self) -> u64 {
        self.pulls
    }

    pub fn mean_reward(&self) -> f64 {
        self.mean_reward
    }

    /// 增量更新均值：`mean += (reward - mean) / n`
    pub fn record(&mut self, reward: f64) {
        self.pulls += 1;
        self.mean_reward += (reward - self.mean_reward) / self.pulls as f64;
    }

    /// UCB1 分数。调用方保证 `pulls > 0` 且 `total_pulls >= 1`。
    pub fn ucb_score(&self, total_pulls: u64) -> f64 {
        let exploration = (2.0 * (total_pulls as f64).ln() / self.pulls as f64).sqrt();
        self.mean_reward + exploration
    }
}

/// 一个节点的臂表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BanditState {
    /// 与节点邻接表同序
    arms: Vec<(NodeId, BanditArm)>,
    total_pulls: u64,
}

impl BanditState {
    /// 为新邻居加一个零初始化的臂；已存在则忽略
    pub(crate) fn add_arm(&mut self, neighbor: NodeId) {
        if self.arm(neighbor).is_none() {
            self.arms.push((neighbor, BanditArm::default()));
        }
    }

    pub fn arm(&self, neighbor: NodeId) -> Option<&BanditArm> {
        self.arms
            .iter()
            .find(|(id, _)| *id == neighbor)
            .map(|(_, arm)| arm)
    }

    pub fn arms(&self) -> impl Iterator<Item = (NodeId, &BanditArm)> + '_ {
        self.arms.iter().map(|(id, arm)| (*id, arm))
    }

    pub fn total_pulls(&self) -> u64 {
        self.total_pulls
    }

    /// 选择下一跳。排除 `forbidden` 后没有候选时返回 None（死路）。
    pub fn choose(&mut self, forbidden: Option<NodeId>) -> Option<NodeId> {
        let mut candidates = self
            .arms
            .iter()
            .filter(|(id, _)| Some(*id) != forbidden)
            .peekable();
        candidates.peek()?;

        self.total_pulls += 1;

        let mut best: Option<(NodeId, f64)> = None;
        for &(id, arm) in candidates {
            if arm.pulls == 0 {
                return Some(id);
            }
            let score = arm.ucb_score(self.total_pulls);
            // 严格大于：平局时先出现的候选胜出
            if best.is_none_or(|(_, max)| score > max) {
                best = Some((id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// 记录一次奖励。邻居未知时返回 false 且不做任何修改。
    pub fn update(&mut self, neighbor: NodeId, reward: f64) -> bool {
        match self.arms.iter_mut().find(|(id, _)| *id == neighbor) {
            Some((_, arm)) => {
                arm.record(reward);
                true
            }
            None => false,
        }
    }
}

impl Topology {
    /// 让 `node` 选择下一跳，不会返回 `forbidden`。
    ///
    /// 节点没有学习状态或没有可选邻居时返回 None。
    pub fn choose_next_hop(&mut self, node: NodeId, forbidden: Option<NodeId>) -> Option<NodeId> {
        if !self.contains(node) {
            warn!(?node, "节点不存在");
            return None;
        }
        if self.node(node).learner().is_none() {
            warn!(node = self.name(node), "节点没有在线学习状态");
            return None;
        }
        let choice = self
            .node_mut(node)
            .learner_mut()
            .and_then(|learner| learner.choose(forbidden));
        trace!(
            node = self.name(node),
            forbidden = ?forbidden.map(|f| self.name(f)),
            choice = ?choice.map(|c| self.name(c)),
            "选择下一跳"
        );
        choice
    }

    /// 把观测到的奖励反馈给 `node` 上对应 `neighbor` 的臂
    pub fn update_reward(&mut self, node: NodeId, neighbor: NodeId, reward: f64) {
        if !self.contains(node) {
            warn!(?node, "节点不存在，忽略奖励");
            return;
        }
        let updated = self
            .node_mut(node)
            .learner_mut()
            .is_some_and(|learner| learner.update(neighbor, reward));
        if !updated {
            warn!(
                node = self.name(node),
                neighbor = ?neighbor,
                "未知的臂，忽略奖励"
            );
        }
    }
}
