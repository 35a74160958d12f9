//! 规则引擎
//!
//! 按优先级降序遍历规则，返回第一条全部条件满足的规则动作（first-match-wins）。
//! 没有规则匹配时返回固定的兜底拒绝结果，不会报错。

use crate::evaluator::ConditionEvaluator;
use crate::models::{AttributeRecord, EvaluationResult, RuleTrace};
use crate::store::RuleStore;
use scholarship_shared::observability::metrics::record_rule_evaluation;
use std::time::Instant;
use tracing::{debug, instrument};

/// 规则引擎
#[derive(Debug, Clone)]
pub struct RuleEngine {
    store: RuleStore,
    /// 是否在决策结果中附带完整的规则追踪
    trace_enabled: bool,
}

impl RuleEngine {
    pub fn new(store: RuleStore) -> Self {
        Self {
            store,
            trace_enabled: false,
        }
    }

    /// 启用评估追踪
    pub fn with_trace(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// 做出决策
    ///
    /// 只返回第一条匹配规则，低优先级规则即使也匹配也不会被考虑。
    #[instrument(skip_all, fields(attributes = record.len()))]
    pub fn decide(&self, record: &AttributeRecord) -> EvaluationResult {
        let start = Instant::now();

        let mut result = self
            .store
            .iter()
            .find(|rule| ConditionEvaluator::evaluate_rule(record, rule))
            .map(EvaluationResult::matched)
            .unwrap_or_else(EvaluationResult::no_match);

        if self.trace_enabled {
            result.trace = Some(self.explain(record));
        }

        debug!(
            rule = %result.rule_name,
            decision = %result.decision(),
            fallback = result.fallback,
            "决策完成"
        );

        record_rule_evaluation(
            result.decision().as_str(),
            result.fallback,
            start.elapsed().as_secs_f64(),
        );

        result
    }

    /// 逐条评估所有规则并报告各自是否匹配
    ///
    /// 顺序与 [`decide`](Self::decide) 一致，仅用于展示。
    pub fn explain(&self, record: &AttributeRecord) -> Vec<RuleTrace> {
        self.store
            .iter()
            .map(|rule| RuleTrace {
                rule_name: rule.name.clone(),
                priority: rule.priority,
                matched: ConditionEvaluator::evaluate_rule(record, rule),
            })
            .collect()
    }
}
