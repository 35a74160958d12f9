//! 奖学金评审规则引擎
//!
//! 提供基于声明式规则的奖学金资格评估：
//! - JSON 规则定义的加载与校验
//! - 按优先级排序的只读规则存储
//! - first-match-wins 决策与逐条规则追踪

pub mod cli;
pub mod compiler;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod operators;
pub mod store;

pub use compiler::RuleCompiler;
pub use engine::RuleEngine;
pub use error::{Result, RuleError};
pub use evaluator::ConditionEvaluator;
pub use models::{
    Action, ApplicantProfile, AttributeRecord, Condition, Decision, EvaluationResult,
    NO_MATCH_REASON, NO_MATCH_RULE_NAME, RECOGNIZED_ATTRIBUTES, Rule, RuleDefinition, RuleTrace,
};
pub use operators::Operator;
pub use store::{RuleStore, RuleStoreStats, load_rules};
