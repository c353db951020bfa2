//! 仿真驱动
//!
//! 在同一拓扑上运行两种模式：
//! - 静态模式：冷启动时算一次最短路，之后每个包原样重放；
//! - 自适应模式：每一跳向当前节点询问下一跳，并把观测时延换算成奖励反馈回去。
//!
//! 全程单线程顺序执行。随机数只来自调用方传入的生成器，试验顺序决定结果。

use rand::Rng;

use super::config::SimConfig;
use super::congestion::CongestionModel;
use super::error::{SimError, SimResult};
use super::stats::{AdaptiveStats, ComparisonReport, StaticStats};
use crate::net::{NodeId, Packet, Topology};
use crate::routing::shortest_path_between;
use tracing::{debug, info, trace, warn};

/// 单次自适应试验的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialOutcome {
    Delivered {
        latency_ms: f64,
        hops: usize,
        congested: bool,
    },
    /// 没有可选的下一跳
    DeadEnd { at: NodeId },
    /// 超出最大跳数仍未到达
    HopLimit,
}

/// 比较静态与自适应路由的仿真器
#[derive(Debug)]
pub struct Simulation {
    cfg: SimConfig,
    source: NodeId,
    destination: NodeId,
    congestion: CongestionModel,
    /// 构建时拓扑的节点数，运行时用于校验传入的是同一张图
    node_count: usize,
    next_pkt_id: u64,
}

impl Simulation {
    /// 校验配置并在拓扑中解析源/目的节点与拥塞链路
    pub fn new(topo: &Topology, cfg: SimConfig) -> SimResult<Self> {
        cfg.validate()?;
        let resolve = |name: &str| {
            topo.lookup(name)
                .ok_or_else(|| SimError::UnknownNode(name.to_string()))
        };
        let source = resolve(&cfg.source)?;
        let destination = resolve(&cfg.destination)?;
        let congestion = CongestionModel::from_config(topo, &cfg)?;
        Ok(Self {
            cfg,
            source,
            destination,
            congestion,
            node_count: topo.node_count(),
            next_pkt_id: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn congestion(&self) -> &CongestionModel {
        &self.congestion
    }

    /// 确认 `topo` 与构建时的拓扑一致：节点数相同，且各个名称解析到同样的索引
    fn check_topology(&self, topo: &Topology) -> SimResult<()> {
        if topo.node_count() != self.node_count {
            return Err(SimError::TopologyMismatch(format!(
                "expected {} nodes, found {}",
                self.node_count,
                topo.node_count()
            )));
        }
        for (name, id) in [
            (&self.cfg.source, self.source),
            (&self.cfg.destination, self.destination),
        ] {
            if topo.lookup(name) != Some(id) {
                return Err(SimError::TopologyMismatch(format!(
                    "node {name} is not at index {}",
                    id.0
                )));
            }
        }
        match CongestionModel::from_config(topo, &self.cfg) {
            Ok(model) if model == self.congestion => Ok(()),
            _ => Err(SimError::TopologyMismatch(
                "congested link endpoints moved".to_string(),
            )),
        }
    }

    fn make_packet(&mut self) -> Packet {
        let id = self.next_pkt_id;
        self.next_pkt_id = self.next_pkt_id.wrapping_add(1);
        Packet::new(id, self.source, self.destination)
    }

    /// 静态模式。终点不可达时返回 None（没有可用的基线）。
    #[tracing::instrument(skip_all, fields(trials = self.cfg.trials))]
    pub fn run_static<R: Rng + ?Sized>(
        &mut self,
        topo: &Topology,
        rng: &mut R,
    ) -> SimResult<Option<StaticStats>> {
        self.check_topology(topo)?;
        info!("▶️  开始静态路由仿真");
        let route = shortest_path_between(topo, self.source, self.destination);
        if !route.is_reachable() {
            warn!(
                source = %self.cfg.source,
                destination = %self.cfg.destination,
                "静态路由找不到可行路径"
            );
            return Ok(None);
        }
        info!(route = %route.describe(topo), "静态路由选定固定路径");

        let mut stats = StaticStats {
            path: route.names(topo).into_iter().map(String::from).collect(),
            path_latency_ms: route.total_latency_ms,
            ..StaticStats::default()
        };

        for trial in 0..self.cfg.trials {
            let mut pkt = self.make_packet();
            let mut congested = false;
            for pair in route.hops.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                // 最短路上的相邻节点必然有链路
                let Some(link) = topo.link_between(from, to) else {
                    continue;
                };
                let latency = self.congestion.sample(link, from, to, rng);
                if latency != link.latency_ms() {
                    congested = true;
                }
                pkt.log_hop(to, latency);
            }
            stats.packets += 1;
            stats.total_latency_ms += pkt.latency_ms;
            if congested {
                stats.congested_trips += 1;
            }
            debug!(
                trial,
                pkt_id = pkt.id,
                latency_ms = pkt.latency_ms,
                congested,
                elapsed_us = pkt.created_at.elapsed().as_micros() as u64,
                "静态试验完成"
            );
            self.log_progress(trial);
        }

        info!(
            packets = stats.packets,
            mean_latency_ms = stats.mean_latency_ms(),
            congested_trips = stats.congested_trips,
            "✅ 静态路由仿真完成"
        );
        Ok(Some(stats))
    }

    /// 自适应模式。学习状态在试验之间保留，拓扑必须带有学习状态。
    #[tracing::instrument(skip_all, fields(trials = self.cfg.trials))]
    pub fn run_adaptive<R: Rng + ?Sized>(
        &mut self,
        topo: &mut Topology,
        rng: &mut R,
    ) -> SimResult<AdaptiveStats> {
        self.check_topology(topo)?;
        if let Some(node) = topo.nodes().iter().find(|n| n.learner().is_none()) {
            return Err(SimError::NotLearning(node.name().to_string()));
        }
        info!("▶️  开始自适应路由仿真");

        let mut stats = AdaptiveStats::default();
        for trial in 0..self.cfg.trials {
            let outcome = self.trial(topo, rng);
            stats.packets += 1;
            match outcome {
                TrialOutcome::Delivered {
                    latency_ms,
                    congested,
                    ..
                } => {
                    stats.delivered += 1;
                    stats.total_latency_ms += latency_ms;
                    if congested {
                        stats.congested_trips += 1;
                    }
                }
                TrialOutcome::DeadEnd { .. } => {
                    stats.failed += 1;
                    stats.dead_ends += 1;
                }
                TrialOutcome::HopLimit => {
                    stats.failed += 1;
                    stats.hop_limit_exceeded += 1;
                }
            }
            debug!(trial, ?outcome, "自适应试验完成");
            self.log_progress(trial);
        }

        info!(
            packets = stats.packets,
            delivered = stats.delivered,
            failed = stats.failed,
            mean_latency_ms = stats.mean_latency_ms(),
            congested_trips = stats.congested_trips,
            "✅ 自适应路由仿真完成"
        );
        Ok(stats)
    }

    /// 运行一次自适应试验：逐跳选路、施加拥塞、反馈奖励
    pub fn run_trial<R: Rng + ?Sized>(
        &mut self,
        topo: &mut Topology,
        rng: &mut R,
    ) -> SimResult<TrialOutcome> {
        self.check_topology(topo)?;
        Ok(self.trial(topo, rng))
    }

    fn trial<R: Rng + ?Sized>(&mut self, topo: &mut Topology, rng: &mut R) -> TrialOutcome {
        let mut pkt = self.make_packet();
        let mut prev: Option<NodeId> = None;
        let mut congested = false;

        while !pkt.arrived() {
            let hops = pkt.hops_taken();
            if hops > self.cfg.max_hops as usize {
                debug!(pkt_id = pkt.id, hops, "超出最大跳数，判定失败");
                return TrialOutcome::HopLimit;
            }

            let current = pkt.at;
            let forbidden = if self.cfg.forbid_backtrack { prev } else { None };
            let Some(next) = topo.choose_next_hop(current, forbidden) else {
                debug!(pkt_id = pkt.id, at = topo.name(current), "死路，判定失败");
                return TrialOutcome::DeadEnd { at: current };
            };
            let Some(link) = topo.link_between(current, next) else {
                return TrialOutcome::DeadEnd { at: current };
            };

            let latency = self.congestion.sample(link, current, next, rng);
            if latency != link.latency_ms() {
                congested = true;
            }
            let reward = self.cfg.reward_scale / latency;
            trace!(
                pkt_id = pkt.id,
                from = topo.name(current),
                to = topo.name(next),
                latency_ms = latency,
                reward,
                "完成一跳"
            );
            topo.update_reward(current, next, reward);

            prev = Some(current);
            pkt.log_hop(next, latency);
        }

        trace!(
            pkt_id = pkt.id,
            elapsed_us = pkt.created_at.elapsed().as_micros() as u64,
            "数据包到达"
        );
        TrialOutcome::Delivered {
            latency_ms: pkt.latency_ms,
            hops: pkt.hops_taken(),
            congested,
        }
    }

    /// 先跑静态模式，再在拓扑的学习副本上跑自适应模式，共用同一个生成器
    pub fn compare<R: Rng + ?Sized>(
        &mut self,
        topo: &Topology,
        rng: &mut R,
    ) -> SimResult<ComparisonReport> {
        let baseline = self.run_static(topo, rng)?;
        let mut learning = topo.clone();
        learning.enable_learning();
        let adaptive = self.run_adaptive(&mut learning, rng)?;
        Ok(ComparisonReport { baseline, adaptive })
    }

    fn log_progress(&self, trial: u64) {
        let every = self.cfg.progress_every;
        if every > 0 && (trial + 1) % every == 0 {
            info!("  ... {}/{} packets routed.", trial + 1, self.cfg.trials);
        }
    }
}
