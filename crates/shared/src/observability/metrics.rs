//! Prometheus 指标模块
//!
//! 基于 metrics crate 记录指标，metrics-exporter-prometheus 负责渲染。
//! 命令行进程生命周期很短，这里只安装 recorder，不启动 HTTP 端点，
//! 需要时通过 [`render`] 获取文本快照。

use anyhow::{Result, anyhow};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, OnceLock};

use super::ObservabilityConfig;

/// 全局 Prometheus handle，用于渲染指标
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// 串行化 recorder 安装，检查与安装必须在同一临界区内完成
static INSTALL_LOCK: Mutex<()> = Mutex::new(());

/// 安装 Prometheus recorder 并注册指标描述
///
/// 可重复、可并发调用，只有第一次调用会安装 recorder。
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    let _lock = INSTALL_LOCK
        .lock()
        .map_err(|_| anyhow!("metrics recorder install lock poisoned"))?;

    if PROMETHEUS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROMETHEUS_HANDLE.set(handle);

    register_common_metrics(&config.service_name);
    Ok(())
}

/// 注册预定义的业务指标
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!(
        "scholarship_decisions_total",
        "Total number of scholarship decisions"
    );
    metrics::describe_histogram!(
        "scholarship_decision_duration_seconds",
        "Scholarship decision duration in seconds"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 渲染当前指标快照，未安装 recorder 时返回 None
pub fn render() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|h| h.render())
}

/// 记录一次规则决策
#[inline]
pub fn record_rule_evaluation(decision: &str, fallback: bool, duration_secs: f64) {
    metrics::counter!(
        "scholarship_decisions_total",
        "decision" => decision.to_string(),
        "fallback" => fallback.to_string()
    )
    .increment(1);

    metrics::histogram!("scholarship_decision_duration_seconds").record(duration_secs);
}
