//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use crate::models::ApplicantProfile;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 奖学金评审命令行工具
#[derive(Parser, Debug)]
#[command(name = "scholarship-advisor")]
#[command(version, about = "基于规则的奖学金资格评审工具")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// 规则文件路径，覆盖配置文件；缺省使用内置规则
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 评估一位申请人
    ///
    /// 默认使用申请表字段构造记录；指定 --record 时直接使用 JSON 记录，
    /// 缺失的属性不会满足任何引用它的条件。
    Evaluate {
        #[command(flatten)]
        profile: ProfileArgs,

        /// JSON 格式的属性记录，如 '{"cgpa": 3.2, "family_income": 3000}'
        #[arg(long)]
        record: Option<String>,

        /// 显示每条规则的匹配情况
        #[arg(long)]
        explain: bool,

        /// 以 JSON 输出结果
        #[arg(long)]
        json: bool,
    },

    /// 按评估顺序列出所有规则
    Rules,

    /// 校验规则文件
    Check {
        /// 规则文件路径
        path: PathBuf,
    },
}

/// 申请表字段，默认值与申请表一致
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// 累计绩点 (0.0-4.0)
    #[arg(long, default_value_t = 3.5)]
    pub cgpa: f64,

    /// 课外活动得分 (0-100)
    #[arg(long, default_value_t = 70)]
    pub co_curricular_score: i64,

    /// 家庭月收入
    #[arg(long, default_value_t = 9000)]
    pub family_income: i64,

    /// 社区服务时长
    #[arg(long, default_value_t = 30)]
    pub community_service_hours: i64,

    /// 当前学期
    #[arg(long, default_value_t = 4)]
    pub current_semester: i64,

    /// 违纪次数
    #[arg(long, default_value_t = 0)]
    pub disciplinary_actions: i64,
}

impl From<ProfileArgs> for ApplicantProfile {
    fn from(args: ProfileArgs) -> Self {
        Self {
            cgpa: args.cgpa,
            co_curricular_score: args.co_curricular_score,
            family_income: args.family_income,
            community_service_hours: args.community_service_hours,
            current_semester: args.current_semester,
            disciplinary_actions: args.disciplinary_actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_evaluate_defaults_match_form() {
        let cli = Cli::parse_from(["scholarship-advisor", "evaluate"]);
        match cli.command {
            Commands::Evaluate {
                profile,
                record,
                explain,
                json,
            } => {
                assert_eq!(ApplicantProfile::from(profile), ApplicantProfile::default());
                assert!(record.is_none());
                assert!(!explain);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_rules_flag() {
        let cli = Cli::parse_from(["scholarship-advisor", "rules", "--rules", "custom.json"]);
        assert_eq!(cli.rules, Some(PathBuf::from("custom.json")));
        assert!(matches!(cli.command, Commands::Rules));
    }

    #[test]
    fn test_evaluate_with_fields() {
        let cli = Cli::parse_from([
            "scholarship-advisor",
            "evaluate",
            "--cgpa",
            "3.8",
            "--disciplinary-actions",
            "2",
            "--explain",
        ]);
        let Commands::Evaluate { profile, explain, .. } = cli.command else {
            panic!("expected evaluate");
        };
        assert_eq!(profile.cgpa, 3.8);
        assert_eq!(profile.disciplinary_actions, 2);
        assert!(explain);
    }
}
