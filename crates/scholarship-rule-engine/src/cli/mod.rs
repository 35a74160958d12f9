//! CLI 模块
//!
//! 提供命令行接口，支持以下功能：
//!
//! - `evaluate` - 评估一位申请人的奖学金资格
//! - `rules` - 按评估顺序列出规则
//! - `check` - 校验规则文件
//!
//! # 使用示例
//!
//! ```bash
//! # 使用申请表字段评估
//! scholarship-advisor evaluate --cgpa 3.8 --co-curricular-score 85 --explain
//!
//! # 使用 JSON 记录评估（可缺省字段）
//! scholarship-advisor evaluate --record '{"cgpa": 1.9}' --json
//!
//! # 使用自定义规则文件
//! scholarship-advisor --rules rules/custom.json rules
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, ProfileArgs};
pub use runner::CommandRunner;
