//! 静态路由与自适应路由的对比仿真
//!
//! 用同一个种子构建拓扑并驱动拥塞模型，先跑 Dijkstra 基线，再跑 UCB1 自适应路由。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crp_sim::sim::{SimConfig, SimError, Simulation};
use crp_sim::topo::depin::build_depin;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Parser)]
#[command(name = "compare", about = "对比静态最短路与 UCB1 自适应路由")]
struct Args {
    /// JSON 配置文件；命令行参数会覆盖其中的对应字段
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    trials: Option<u64>,
    #[arg(long)]
    max_hops: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    congestion_prob: Option<f64>,
    #[arg(long)]
    congestion_mult: Option<f64>,
    #[arg(long)]
    reward_scale: Option<f64>,
    /// 允许立即折返到上一跳
    #[arg(long)]
    allow_backtrack: bool,
    /// 运行前打印拓扑
    #[arg(long)]
    show_topology: bool,
    /// 以 JSON 输出报告快照
    #[arg(long)]
    json: bool,
}

impl Args {
    fn to_config(&self) -> Result<SimConfig, SimError> {
        let mut cfg = match &self.config {
            Some(path) => SimConfig::from_json_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(v) = self.trials {
            cfg.trials = v;
        }
        if let Some(v) = self.max_hops {
            cfg.max_hops = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        if let Some(v) = self.congestion_prob {
            cfg.congestion_probability = v;
        }
        if let Some(v) = self.congestion_mult {
            cfg.congestion_multiplier = v;
        }
        if let Some(v) = self.reward_scale {
            cfg.reward_scale = v;
        }
        if self.allow_backtrack {
            cfg.forbid_backtrack = false;
        }
        Ok(cfg)
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let cfg = args.to_config()?;

    // 只播种一次：拓扑构建与拥塞抽样共用同一个生成器
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
    let topo = build_depin(&mut rng);
    if args.show_topology && !args.json {
        println!("{}", topo.view());
    }

    let mut sim = Simulation::new(&topo, cfg)?;
    let report = sim.compare(&topo, &mut rng)?;

    if args.json {
        match serde_json::to_string_pretty(&report.snapshot()) {
            Ok(s) => println!("{s}"),
            Err(err) => eprintln!("failed to serialize report: {err}"),
        }
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing（输出到 stderr，stdout 只留报告）
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
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
