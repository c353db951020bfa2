//! 基线路由示例
//!
//! 构建演示 DePIN 拓扑，打印拓扑并给出两网关之间的静态最短路。

use clap::Parser;
use crp_sim::routing::shortest_path;
use crp_sim::topo::depin::{GATEWAY_EAST, GATEWAY_WEST, build_depin};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Parser)]
#[command(name = "baseline", about = "构建 DePIN 拓扑并运行静态最短路（Dijkstra）")]
struct Args {
    /// 构建拓扑用的随机种子
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = GATEWAY_WEST)]
    from: String,
    #[arg(long, default_value = GATEWAY_EAST)]
    to: String,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let topo = build_depin(&mut rng);
    println!("{}", topo.view());

    println!(
        "Finding shortest path from {} to {} based on latency...",
        args.from, args.to
    );
    let route = shortest_path(&topo, &args.from, &args.to);
    if route.is_reachable() {
        println!("  -> Route: {}", route.describe(&topo));
        println!("  -> Total Latency: {:.2}ms", route.total_latency_ms);
    } else {
        println!("No path could be found from {} to {}.", args.from, args.to);
    }
}
