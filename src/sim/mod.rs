//! 仿真核心模块
//!
//! 配置、拥塞模型、两种路由模式的仿真驱动以及统计报告。

// 子模块声明
mod config;
mod congestion;
mod driver;
mod error;
mod stats;

// 重新导出公共接口
pub use config::SimConfig;
pub use congestion::CongestionModel;
pub use driver::{Simulation, TrialOutcome};
pub use error::{ConfigError, SimError, SimResult};
pub use stats::{AdaptiveStats, ComparisonReport, ModeSummary, ReportSnapshot, StaticStats};
