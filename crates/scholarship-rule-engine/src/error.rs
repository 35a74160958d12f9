//! 规则引擎错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("规则配置错误: {0}")]
    Configuration(String),

    #[error("规则 '{rule}' 使用了未知的比较操作符: {operator}")]
    UnknownOperator { rule: String, operator: String },

    #[error("规则 '{rule}' 使用了未知的决策类型: {decision}")]
    UnknownDecision { rule: String, decision: String },

    #[error("无效的输入: {field} - {message}")]
    InvalidInput { field: String, message: String },
}

impl RuleError {
    /// 是否为加载期的配置错误
    ///
    /// 配置错误意味着规则库不可用，调用方不应继续评估。
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::UnknownOperator { .. }
                | Self::UnknownDecision { .. }
        )
    }

    pub(crate) fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for RuleError {
    /// 多个字段校验失败时按字段名排序后合并，保证同一输入得到同一错误
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        if fields.is_empty() {
            return Self::invalid_input("profile", errors.to_string());
        }

        let field = fields
            .iter()
            .map(|(name, _)| name.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        let message = fields
            .iter()
            .flat_map(|(name, errs)| {
                errs.iter().map(move |e| {
                    let detail = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", name, detail)
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::InvalidInput { field, message }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;
