//! 奖学金评审命令行入口
//!
//! 加载配置与规则后执行子命令。

use anyhow::{Context, Result};
use clap::Parser;
use rule_engine::cli::{Cli, CommandRunner, Commands};
use rule_engine::{RuleEngine, RuleStore, load_rules};
use scholarship_shared::config::AppConfig;
use scholarship_shared::observability;
use std::path::PathBuf;
use tracing::info;

const SERVICE_NAME: &str = "scholarship-advisor";

fn main() -> Result<()> {
    let Cli {
        log_level,
        rules,
        command,
    } = Cli::parse();

    let config = AppConfig::load(SERVICE_NAME).unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let mut obs_config = config
        .observability
        .clone()
        .with_service_name(&config.service_name);
    if let Some(level) = log_level {
        obs_config = obs_config.with_log_level(level);
    }
    observability::init(&obs_config)?;

    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Evaluate {
            profile,
            record,
            explain,
            json,
        } => {
            build_runner(rules, &config)?.run_evaluate(
                &mut stdout,
                profile.into(),
                record.as_deref(),
                explain,
                json,
            )?;
        }
        Commands::Rules => build_runner(rules, &config)?.run_rules(&mut stdout)?,
        Commands::Check { path } => CommandRunner::run_check(&mut stdout, &path)?,
    }

    if let Some(snapshot) = observability::metrics::render() {
        eprintln!("{}", snapshot);
    }

    Ok(())
}

/// 加载规则库并构建命令执行器
///
/// 命令行 `--rules` 优先于配置文件，都未指定时使用内置规则。
fn build_runner(rules: Option<PathBuf>, config: &AppConfig) -> Result<CommandRunner> {
    let store = match rules.or_else(|| config.rules.path()) {
        Some(path) => RuleStore::from_path(&path)
            .with_context(|| format!("加载规则文件失败: {}", path.display()))?,
        None => load_rules().context("加载内置规则失败")?.clone(),
    };
    info!(rules_count = store.len(), "Rule store initialized");

    let mut engine = RuleEngine::new(store);
    if config.rules.trace {
        engine = engine.with_trace();
    }
    Ok(CommandRunner::new(engine))
}
