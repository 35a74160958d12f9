//! 规则存储
//!
//! 规则在构造时编译并按优先级降序排序一次，之后只读。
//! 内部使用 `Arc<[Rule]>` 共享，克隆开销很小，可跨线程使用。

use crate::compiler::RuleCompiler;
use crate::error::{Result, RuleError};
use crate::models::{Rule, RuleDefinition};
use std::cmp::Reverse;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{info, instrument};

/// 内置奖学金规则
pub const BUILTIN_RULES_JSON: &str = include_str!("../rules/scholarship_rules.json");

static BUILTIN_STORE: OnceLock<RuleStore> = OnceLock::new();

/// 规则存储
#[derive(Debug, Clone)]
pub struct RuleStore {
    /// 按优先级降序排列，同优先级保持声明顺序
    rules: Arc<[Rule]>,
}

impl RuleStore {
    /// 加载内置规则
    pub fn load() -> Result<Self> {
        Self::from_json(BUILTIN_RULES_JSON)
    }

    /// 从 JSON 字符串加载规则
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self> {
        let rules = RuleCompiler::new().compile_from_json(json)?;
        Ok(Self::from_rules(rules))
    }

    /// 从规则文件加载
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "从文件加载规则");
        let json = std::fs::read_to_string(path).map_err(|e| {
            RuleError::Configuration(format!("无法读取规则文件 {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// 从原始定义加载
    pub fn from_definitions(definitions: Vec<RuleDefinition>) -> Result<Self> {
        let rules = RuleCompiler::new().compile_all(definitions)?;
        Ok(Self::from_rules(rules))
    }

    /// 从已编译的规则构建
    ///
    /// 排序是稳定的，同优先级规则保持传入顺序。
    pub fn from_rules(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(|r| Reverse(r.priority));

        info!(rules_count = rules.len(), "规则已加载");

        Self {
            rules: rules.into(),
        }
    }

    /// 规则数量
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 按评估顺序返回所有规则
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// 按名称查找规则
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// 获取规则统计信息
    pub fn stats(&self) -> RuleStoreStats {
        RuleStoreStats {
            rules_count: self.rules.len(),
            total_conditions: self.rules.iter().map(|r| r.conditions.len()).sum(),
            unconditional_rules: self.rules.iter().filter(|r| r.is_unconditional()).count(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleStore {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// 规则存储统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleStoreStats {
    pub rules_count: usize,
    pub total_conditions: usize,
    /// 无条件规则会匹配任意记录
    pub unconditional_rules: usize,
}

/// 获取进程级内置规则存储
///
/// 首次调用时编译内置规则，之后返回同一份只读实例。
pub fn load_rules() -> Result<&'static RuleStore> {
    if let Some(store) = BUILTIN_STORE.get() {
        return Ok(store);
    }

    let store = RuleStore::load()?;
    Ok(BUILTIN_STORE.get_or_init(|| store))
}
