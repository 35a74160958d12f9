//! 条件评估器
//!
//! 条件和规则的评估都是纯函数：不修改输入，不产生错误。
//! 记录中缺失的属性一律视为条件不满足。

use crate::models::{AttributeRecord, Condition, Rule};

/// 条件评估器
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// 评估单个条件
    ///
    /// 属性不存在时返回 false，不会报错。
    pub fn evaluate_condition(record: &AttributeRecord, condition: &Condition) -> bool {
        match record.get(&condition.attribute) {
            Some(actual) => condition.operator.apply(actual, condition.threshold),
            None => false,
        }
    }

    /// 评估规则：所有条件都满足才匹配，空条件集恒为 true
    pub fn evaluate_rule(record: &AttributeRecord, rule: &Rule) -> bool {
        rule.conditions
            .iter()
            .all(|cond| Self::evaluate_condition(record, cond))
    }
}
