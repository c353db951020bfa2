//! 拓扑构建
//!
//! 核心库之外的薄胶水层：按固定参数搭建演示网络。

pub mod depin;
pub mod line;
