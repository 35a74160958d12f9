//! 共享库
//!
//! 包含配置加载与可观测性初始化等基础设施代码。

pub mod config;
pub mod observability;
