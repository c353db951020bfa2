//! 路由模块
//!
//! 静态最短路（Dijkstra）与每节点在线学习（UCB1）两种选路策略。

mod bandit;
mod dijkstra;
mod frontier;

pub use bandit::{BanditArm, BanditState};
pub use dijkstra::{Route, shortest_path, shortest_path_between};
