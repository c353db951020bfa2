//! 线形拓扑：n0 <-> n1 <-> ... <-> nk
//!
//! 首尾两个节点是网关，中间是中继节点。

use crate::net::{TopologyError, Topology};

/// 按给定名称顺序搭一条线，相邻节点之间的时延依次取自 `latencies_ms`。
///
/// `latencies_ms` 的长度必须是 `names.len() - 1`，多余的名称不会被连上。
pub fn build_line(
    names: &[&str],
    latencies_ms: &[f64],
    bandwidth_mbps: u32,
) -> Result<Topology, TopologyError> {
    let mut topo = Topology::new();
    let last = names.len().saturating_sub(1);
    for (i, name) in names.iter().enumerate() {
        if i == 0 || i == last {
            topo.create_gateway(*name);
        } else {
            topo.create_node(*name);
        }
    }
    for (pair, &latency) in names.windows(2).zip(latencies_ms) {
        topo.connect(pair[0], pair[1], latency, bandwidth_mbps)?;
    }
    Ok(topo)
}
