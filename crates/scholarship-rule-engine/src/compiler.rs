//! 规则编译器
//!
//! 将规则文件中的原始定义校验并编译为强类型的 [`Rule`]。
//! 所有配置错误都在这里暴露，评估阶段不会再遇到字符串操作符。

use crate::error::{Result, RuleError};
use crate::models::{Action, Condition, Decision, RECOGNIZED_ATTRIBUTES, Rule, RuleDefinition};
use crate::operators::Operator;
use serde_json::Value;
use tracing::warn;

/// 规则编译器
#[derive(Debug, Default)]
pub struct RuleCompiler;

impl RuleCompiler {
    pub fn new() -> Self {
        Self
    }

    /// 从 JSON 字符串编译整个规则列表
    pub fn compile_from_json(&self, json: &str) -> Result<Vec<Rule>> {
        let definitions: Vec<RuleDefinition> = serde_json::from_str(json)
            .map_err(|e| RuleError::Configuration(format!("规则定义解析失败: {}", e)))?;
        self.compile_all(definitions)
    }

    /// 编译规则列表，任意一条失败则整体失败
    pub fn compile_all(&self, definitions: Vec<RuleDefinition>) -> Result<Vec<Rule>> {
        definitions
            .into_iter()
            .map(|def| self.compile(def))
            .collect()
    }

    /// 编译单条规则
    pub fn compile(&self, def: RuleDefinition) -> Result<Rule> {
        if def.name.trim().is_empty() {
            return Err(RuleError::Configuration("规则名称不能为空".to_string()));
        }

        let conditions = def
            .conditions
            .iter()
            .enumerate()
            .map(|(i, (attr, op, value))| self.compile_condition(&def.name, i, attr, op, value))
            .collect::<Result<Vec<_>>>()?;

        let decision = def
            .action
            .decision
            .parse::<Decision>()
            .map_err(|decision| RuleError::UnknownDecision {
                rule: def.name.clone(),
                decision,
            })?;

        Ok(Rule::new(
            def.name,
            def.priority,
            conditions,
            Action::new(decision, def.action.reason),
        ))
    }

    fn compile_condition(
        &self,
        rule: &str,
        index: usize,
        attribute: &str,
        operator: &str,
        threshold: &Value,
    ) -> Result<Condition> {
        if attribute.trim().is_empty() {
            return Err(RuleError::Configuration(format!(
                "规则 '{}' 的条件 [{}] 属性名不能为空",
                rule, index
            )));
        }

        let operator = operator
            .parse::<Operator>()
            .map_err(|e| RuleError::UnknownOperator {
                rule: rule.to_string(),
                operator: e.0,
            })?;

        let threshold = threshold
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                RuleError::Configuration(format!(
                    "规则 '{}' 的条件 [{}] 阈值必须是数值，实际为 {}",
                    rule, index, threshold
                ))
            })?;

        if !RECOGNIZED_ATTRIBUTES.contains(&attribute) {
            // 未知属性不会报错，但该条件永远不会满足
            warn!(rule = %rule, attribute = %attribute, "条件引用了申请表之外的属性");
        }

        Ok(Condition::new(attribute, operator, threshold))
    }
}
