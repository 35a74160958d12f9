//! 比较操作符定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 条件比较操作符
///
/// 规则文件中既可以写符号形式（`>=`），也可以写名称形式（`gte`）。
/// 字符串只在加载时解析一次，评估阶段通过 `match` 分发。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Self::Eq,
        Self::Neq,
        Self::Gt,
        Self::Lt,
        Self::Gte,
        Self::Lte,
    ];

    /// 符号形式
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }

    /// 对 (实际值, 阈值) 应用比较
    pub fn apply(self, actual: f64, threshold: f64) -> bool {
        match self {
            Self::Eq => actual == threshold,
            Self::Neq => actual != threshold,
            Self::Gt => actual > threshold,
            Self::Lt => actual < threshold,
            Self::Gte => actual >= threshold,
            Self::Lte => actual <= threshold,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 无法识别的操作符字符串
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operator '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" | "eq" => Ok(Self::Eq),
            "!=" | "neq" => Ok(Self::Neq),
            ">" | "gt" => Ok(Self::Gt),
            "<" | "lt" => Ok(Self::Lt),
            ">=" | "gte" => Ok(Self::Gte),
            "<=" | "lte" => Ok(Self::Lte),
            other => Err(UnknownOperator(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols_and_names() {
        for op in Operator::ALL {
            assert_eq!(op.symbol().parse::<Operator>().unwrap(), op);
        }
        assert_eq!("gte".parse::<Operator>().unwrap(), Operator::Gte);
    }

    #[test]
    fn test_padded_operator_is_rejected() {
        assert_eq!(
            " <= ".parse::<Operator>().unwrap_err(),
            UnknownOperator(" <= ".to_string())
        );
        assert!(">= ".parse::<Operator>().is_err());
        assert!("GTE".parse::<Operator>().is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = "=>".parse::<Operator>().unwrap_err();
        assert_eq!(err, UnknownOperator("=>".to_string()));
        assert!("between".parse::<Operator>().is_err());
    }

    #[test]
    fn test_apply() {
        assert!(Operator::Eq.apply(0.0, 0.0));
        assert!(!Operator::Neq.apply(1.0, 1.0));
        assert!(Operator::Gt.apply(3.8, 3.7));
        assert!(!Operator::Gt.apply(3.7, 3.7));
        assert!(Operator::Gte.apply(3.7, 3.7));
        assert!(Operator::Lt.apply(1.9, 2.5));
        assert!(!Operator::Lt.apply(2.5, 2.5));
        assert!(Operator::Lte.apply(8000.0, 8000.0));
    }

    #[test]
    fn test_display_uses_symbol() {
        assert_eq!(Operator::Gte.to_string(), ">=");
        assert_eq!(Operator::Neq.to_string(), "!=");
    }
}
