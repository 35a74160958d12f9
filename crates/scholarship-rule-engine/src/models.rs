//! 规则引擎领域模型

use crate::error::{Result, RuleError};
use crate::operators::Operator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// 无规则匹配时的兜底规则名
pub const NO_MATCH_RULE_NAME: &str = "No Match";

/// 无规则匹配时的兜底原因
pub const NO_MATCH_REASON: &str = "No matching rule found";

/// 申请表中可识别的属性名
pub const RECOGNIZED_ATTRIBUTES: [&str; 6] = [
    "cgpa",
    "co_curricular_score",
    "family_income",
    "community_service_hours",
    "current_semester",
    "disciplinary_actions",
];

/// 奖学金决策
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    AwardFull,
    AwardPartial,
    Review,
    Reject,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwardFull => "AWARD_FULL",
            Self::AwardPartial => "AWARD_PARTIAL",
            Self::Review => "REVIEW",
            Self::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "AWARD_FULL" => Ok(Self::AwardFull),
            "AWARD_PARTIAL" => Ok(Self::AwardPartial),
            "REVIEW" => Ok(Self::Review),
            "REJECT" => Ok(Self::Reject),
            other => Err(other.to_string()),
        }
    }
}

/// 规则动作：决策 + 说明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub decision: Decision,
    pub reason: String,
}

impl Action {
    pub fn new(decision: Decision, reason: impl Into<String>) -> Self {
        Self {
            decision,
            reason: reason.into(),
        }
    }

    /// 兜底动作
    pub fn no_match() -> Self {
        Self::new(Decision::Reject, NO_MATCH_REASON)
    }
}

/// 条件：属性 / 操作符 / 阈值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub attribute: String,
    pub operator: Operator,
    pub threshold: f64,
}

impl Condition {
    pub fn new(attribute: impl Into<String>, operator: Operator, threshold: f64) -> Self {
        Self {
            attribute: attribute.into(),
            operator,
            threshold,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.operator, self.threshold)
    }
}

/// 编译后的规则
///
/// 条件之间是 AND 关系；条件为空的规则无条件匹配。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub name: String,
    pub priority: i64,
    pub conditions: Vec<Condition>,
    pub action: Action,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        priority: i64,
        conditions: Vec<Condition>,
        action: Action,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            conditions,
            action,
        }
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// 规则文件中的原始规则定义
///
/// 条件写作 `[attr, op, value]` 三元组，操作符和决策保持字符串形式，
/// 由 [`RuleCompiler`](crate::compiler::RuleCompiler) 统一校验。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    pub priority: i64,
    #[serde(default)]
    pub conditions: Vec<(String, String, Value)>,
    pub action: ActionDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub decision: String,
    pub reason: String,
}

/// 申请人属性记录
///
/// 属性名到数值的映射，构造完成后只读。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttributeRecord {
    values: BTreeMap<String, f64>,
}

impl AttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加属性
    ///
    /// 非有限数值（NaN / 无穷大）视为调用方违约。
    pub fn with(mut self, name: impl Into<String>, value: impl Into<f64>) -> Result<Self> {
        let name = name.into();
        let value = value.into();
        if !value.is_finite() {
            return Err(RuleError::invalid_input(name, "值必须是有限数值"));
        }
        self.values.insert(name, value);
        Ok(self)
    }

    /// 从 JSON 对象创建，所有值都必须是数值
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| RuleError::invalid_input("record", "必须是 JSON 对象"))?;

        let mut record = Self::new();
        for (name, v) in map {
            let number = v.as_f64().ok_or_else(|| {
                RuleError::invalid_input(name.as_str(), format!("期望数值，实际为 {}", v))
            })?;
            record = record.with(name.as_str(), number)?;
        }
        Ok(record)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| RuleError::invalid_input("record", e.to_string()))?;
        Self::from_json(&value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// 申请表输入
///
/// 字段约束与申请表一致，校验通过后转换为 [`AttributeRecord`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ApplicantProfile {
    #[validate(range(min = 0.0, max = 4.0, message = "CGPA 必须在 0.0-4.0 之间"))]
    pub cgpa: f64,
    #[validate(range(min = 0, max = 100, message = "课外活动得分必须在 0-100 之间"))]
    pub co_curricular_score: i64,
    #[validate(range(min = 0, message = "家庭收入不能为负数"))]
    pub family_income: i64,
    #[validate(range(min = 0, message = "社区服务时长不能为负数"))]
    pub community_service_hours: i64,
    #[validate(range(min = 1, message = "当前学期至少为 1"))]
    pub current_semester: i64,
    #[validate(range(min = 0, message = "违纪次数不能为负数"))]
    pub disciplinary_actions: i64,
}

impl Default for ApplicantProfile {
    fn default() -> Self {
        Self {
            cgpa: 3.5,
            co_curricular_score: 70,
            family_income: 9000,
            community_service_hours: 30,
            current_semester: 4,
            disciplinary_actions: 0,
        }
    }
}

impl ApplicantProfile {
    /// 校验并转换为属性记录
    pub fn into_record(self) -> Result<AttributeRecord> {
        self.validate()?;

        AttributeRecord::new()
            .with("cgpa", self.cgpa)?
            .with("co_curricular_score", self.co_curricular_score as f64)?
            .with("family_income", self.family_income as f64)?
            .with("community_service_hours", self.community_service_hours as f64)?
            .with("current_semester", self.current_semester as f64)?
            .with("disciplinary_actions", self.disciplinary_actions as f64)
    }
}

/// 单条规则的匹配追踪
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleTrace {
    pub rule_name: String,
    pub priority: i64,
    pub matched: bool,
}

/// 评估结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub rule_name: String,
    pub action: Action,
    /// 未命中任何规则时为 true
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<RuleTrace>>,
}

impl EvaluationResult {
    pub fn matched(rule: &Rule) -> Self {
        Self {
            rule_name: rule.name.clone(),
            action: rule.action.clone(),
            fallback: false,
            trace: None,
        }
    }

    pub fn no_match() -> Self {
        Self {
            rule_name: NO_MATCH_RULE_NAME.to_string(),
            action: Action::no_match(),
            fallback: true,
            trace: None,
        }
    }

    pub fn decision(&self) -> Decision {
        self.action.decision
    }
}
