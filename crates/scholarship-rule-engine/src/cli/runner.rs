//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑，输出写入调用方提供的 writer。

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::engine::RuleEngine;
use crate::models::{ApplicantProfile, AttributeRecord, Decision, EvaluationResult, RuleTrace};
use crate::store::RuleStore;

/// 命令执行器
pub struct CommandRunner {
    engine: RuleEngine,
}

impl CommandRunner {
    pub fn new(engine: RuleEngine) -> Self {
        Self { engine }
    }

    /// 执行 evaluate 命令
    pub fn run_evaluate<W: Write>(
        &self,
        out: &mut W,
        profile: ApplicantProfile,
        record: Option<&str>,
        explain: bool,
        json: bool,
    ) -> Result<EvaluationResult> {
        let record = match record {
            Some(raw) => AttributeRecord::from_json_str(raw).context("无效的属性记录")?,
            None => profile.into_record().context("申请表字段校验失败")?,
        };

        let mut result = self.engine.decide(&record);
        if explain && result.trace.is_none() {
            result.trace = Some(self.engine.explain(&record));
        }

        info!(rule = %result.rule_name, decision = %result.decision(), "评估完成");

        if json {
            serde_json::to_writer_pretty(&mut *out, &result)?;
            writeln!(out)?;
        } else {
            render_result(out, &result)?;
        }

        Ok(result)
    }

    /// 执行 rules 命令
    pub fn run_rules<W: Write>(&self, out: &mut W) -> Result<()> {
        let store = self.engine.store();
        for rule in store {
            writeln!(
                out,
                "[{:>4}] {} => {}",
                rule.priority, rule.name, rule.action.decision
            )?;
            if rule.is_unconditional() {
                writeln!(out, "       (无条件)")?;
            }
            for cond in &rule.conditions {
                writeln!(out, "       - {}", cond)?;
            }
        }

        let stats = store.stats();
        writeln!(
            out,
            "共 {} 条规则，{} 个条件，{} 条无条件规则",
            stats.rules_count, stats.total_conditions, stats.unconditional_rules
        )?;
        Ok(())
    }

    /// 执行 check 命令
    pub fn run_check<W: Write>(out: &mut W, path: &Path) -> Result<()> {
        let store = RuleStore::from_path(path)
            .with_context(|| format!("规则文件校验失败: {}", path.display()))?;
        writeln!(out, "{}: {} 条规则有效", path.display(), store.len())?;
        Ok(())
    }
}

fn decision_marker(decision: Decision) -> &'static str {
    match decision {
        Decision::AwardFull => "🏆",
        Decision::AwardPartial => "🎖️",
        Decision::Review => "⚠️",
        Decision::Reject => "❌",
    }
}

/// 渲染评估结果
pub fn render_result<W: Write>(out: &mut W, result: &EvaluationResult) -> std::io::Result<()> {
    let decision = result.decision();
    writeln!(out, "{} {}", decision_marker(decision), decision)?;
    writeln!(out, "Reason: {}", result.action.reason)?;
    writeln!(out, "Rule Matched: {}", result.rule_name)?;

    if let Some(trace) = &result.trace {
        writeln!(out)?;
        writeln!(out, "All rules evaluated:")?;
        render_trace(out, trace)?;
    }
    Ok(())
}

/// 渲染逐条规则追踪
pub fn render_trace<W: Write>(out: &mut W, trace: &[RuleTrace]) -> std::io::Result<()> {
    for t in trace {
        let mark = if t.matched { "✅" } else { "❌" };
        writeln!(out, "{} {} (Priority: {})", mark, t.rule_name, t.priority)?;
    }
    Ok(())
}
