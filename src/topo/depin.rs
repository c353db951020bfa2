//! 演示用 DePIN 拓扑
//!
//! 两个网关（西/东）与五个中继节点。每条链路的时延与带宽从各自的区间中
//! 均匀抽取，使用调用方传入的已播种生成器，因此同一种子总能得到同一张图。

use rand::Rng;

use crate::net::Topology;
use tracing::{error, info};

pub const GATEWAY_WEST: &str = "GATEWAY_WEST";
pub const GATEWAY_EAST: &str = "GATEWAY_EAST";

/// 链路模板：(a, b, 时延区间 ms, 带宽区间 Mbps)
type LinkSpec = (&'static str, &'static str, (f64, f64), (u32, u32));

const LINKS: [LinkSpec; 10] = [
    (GATEWAY_WEST, "NODE_1", (5.0, 10.0), (500, 1000)),
    (GATEWAY_WEST, "NODE_2", (10.0, 15.0), (200, 500)),
    (GATEWAY_EAST, "NODE_5", (5.0, 10.0), (500, 1000)),
    (GATEWAY_EAST, "NODE_4", (10.0, 15.0), (200, 500)),
    ("NODE_1", "NODE_2", (20.0, 30.0), (100, 200)),
    ("NODE_1", "NODE_3", (15.0, 25.0), (300, 600)),
    ("NODE_2", "NODE_3", (5.0, 10.0), (800, 1000)),
    ("NODE_3", "NODE_4", (15.0, 25.0), (300, 600)),
    ("NODE_4", "NODE_5", (20.0, 30.0), (100, 200)),
    ("NODE_2", "NODE_5", (40.0, 50.0), (50, 100)),
];

/// 构建演示网络
pub fn build_depin<R: Rng + ?Sized>(rng: &mut R) -> Topology {
    let mut topo = Topology::new();
    topo.create_gateway(GATEWAY_WEST);
    topo.create_gateway(GATEWAY_EAST);
    for i in 1..=5 {
        topo.create_node(format!("NODE_{i}"));
    }

    for (a, b, (lat_lo, lat_hi), (bw_lo, bw_hi)) in LINKS {
        let latency = rng.gen_range(lat_lo..=lat_hi);
        let bandwidth = rng.gen_range(bw_lo..=bw_hi);
        if let Err(err) = topo.connect(a, b, latency, bandwidth) {
            error!(%err, "创建链路失败");
        }
    }

    info!(
        nodes = topo.node_count(),
        links = topo.link_count(),
        "DePIN 拓扑构建完成"
    );
    topo
}
