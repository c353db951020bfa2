//! 统计信息
//!
//! 两种模式的聚合统计，以及对比报告和供展示层使用的只读快照。

use std::fmt;

use serde::Serialize;

/// 静态路由（Dijkstra）模式统计。预先计算的路径总能走通，因此每个包都成功。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StaticStats {
    /// 固定路径上的节点名
    pub path: Vec<String>,
    /// 无拥塞时的路径时延
    pub path_latency_ms: f64,
    pub packets: u64,
    pub total_latency_ms: f64,
    pub congested_trips: u64,
}

impl StaticStats {
    pub fn success_rate(&self) -> f64 {
        if self.packets == 0 { 0.0 } else { 1.0 }
    }

    pub fn mean_latency_ms(&self) -> f64 {
        if self.packets == 0 {
            0.0
        } else {
            self.total_latency_ms / self.packets as f64
        }
    }
}

/// 自适应路由模式统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdaptiveStats {
    pub packets: u64,
    pub delivered: u64,
    pub failed: u64,
    /// 失败原因：没有可选的下一跳
    pub dead_ends: u64,
    /// 失败原因：超出最大跳数
    pub hop_limit_exceeded: u64,
    /// 只统计成功送达的包
    pub total_latency_ms: f64,
    /// 只统计成功送达的包
    pub congested_trips: u64,
}

impl AdaptiveStats {
    pub fn success_rate(&self) -> f64 {
        if self.packets == 0 {
            0.0
        } else {
            self.delivered as f64 / self.packets as f64
        }
    }

    /// 成功送达的包的平均时延
    pub fn mean_latency_ms(&self) -> f64 {
        if self.delivered == 0 {
            0.0
        } else {
            self.total_latency_ms / self.delivered as f64
        }
    }
}

/// 两种模式的对比结果
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    /// 终点不可达时没有可用的基线
    pub baseline: Option<StaticStats>,
    pub adaptive: AdaptiveStats,
}

impl ComparisonReport {
    /// 自适应相对静态的时延改善（百分比，正数表示更低的时延）。
    /// 任一方平均时延为 0 时无意义，返回 None。
    pub fn improvement_pct(&self) -> Option<f64> {
        let baseline = self.baseline.as_ref()?.mean_latency_ms();
        let adaptive = self.adaptive.mean_latency_ms();
        if baseline > 0.0 && adaptive > 0.0 {
            Some((baseline - adaptive) / baseline * 100.0)
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            static_path: self.baseline.as_ref().map(|b| b.path.clone()),
            baseline: self.baseline.as_ref().map(|b| ModeSummary {
                packets: b.packets,
                delivered: b.packets,
                success_rate: b.success_rate(),
                mean_latency_ms: b.mean_latency_ms(),
                congested_trips: b.congested_trips,
            }),
            adaptive: ModeSummary {
                packets: self.adaptive.packets,
                delivered: self.adaptive.delivered,
                success_rate: self.adaptive.success_rate(),
                mean_latency_ms: self.adaptive.mean_latency_ms(),
                congested_trips: self.adaptive.congested_trips,
            },
            improvement_pct: self.improvement_pct(),
        }
    }
}

/// 单个模式的汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeSummary {
    pub packets: u64,
    pub delivered: u64,
    pub success_rate: f64,
    pub mean_latency_ms: f64,
    pub congested_trips: u64,
}

/// 只读快照，供展示层或 JSON 输出使用
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSnapshot {
    pub static_path: Option<Vec<String>>,
    pub baseline: Option<ModeSummary>,
    pub adaptive: ModeSummary,
    pub improvement_pct: Option<f64>,
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "              COMPARATIVE ANALYSIS RESULTS")?;
        writeln!(f, "{rule}")?;

        writeln!(f, "--- STATIC ROUTER (BASELINE) ---")?;
        match &self.baseline {
            Some(b) => {
                writeln!(f, "  Path: {}", b.path.join(" -> "))?;
                writeln!(
                    f,
                    "  Success Rate: {:.2}% ({}/{})",
                    b.success_rate() * 100.0,
                    b.packets,
                    b.packets
                )?;
                writeln!(f, "  Average Packet Latency: {:.2}ms", b.mean_latency_ms())?;
                writeln!(
                    f,
                    "  Trips through Congested Link: {}/{}",
                    b.congested_trips, b.packets
                )?;
            }
            None => writeln!(f, "  No feasible path from source to destination")?,
        }

        let a = &self.adaptive;
        writeln!(f)?;
        writeln!(f, "--- ADAPTIVE ROUTER (UCB1) ---")?;
        writeln!(
            f,
            "  Success Rate: {:.2}% ({}/{})",
            a.success_rate() * 100.0,
            a.delivered,
            a.packets
        )?;
        if a.failed > 0 {
            writeln!(
                f,
                "  Failed: {} (dead ends: {}, hop limit: {})",
                a.failed, a.dead_ends, a.hop_limit_exceeded
            )?;
        }
        writeln!(
            f,
            "  Average Packet Latency (successful packets): {:.2}ms",
            a.mean_latency_ms()
        )?;
        writeln!(
            f,
            "  Trips through Congested Link: {}/{}",
            a.congested_trips, a.packets
        )?;

        let rule = "-".repeat(50);
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        if let Some(gain) = self.improvement_pct() {
            writeln!(f, "Performance Improvement (Lower Latency): {gain:.2}%")?;
        }
        write!(f, "{rule}")
    }
}
