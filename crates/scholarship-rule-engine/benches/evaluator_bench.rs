//! 规则引擎性能基准测试
//!
//! 覆盖单条件评估、整条规则评估以及 decide / explain 的完整路径。

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rule_engine::{
    Action, AttributeRecord, Condition, ConditionEvaluator, Decision, Operator, Rule, RuleEngine,
    RuleStore,
};
use serde_json::json;
use std::hint::black_box;

fn top_merit_record() -> AttributeRecord {
    AttributeRecord::from_json(&json!({
        "cgpa": 3.8,
        "co_curricular_score": 85,
        "family_income": 5000,
        "disciplinary_actions": 0,
        "community_service_hours": 25,
        "current_semester": 4
    }))
    .unwrap()
}

fn no_match_record() -> AttributeRecord {
    AttributeRecord::from_json(&json!({
        "cgpa": 3.0,
        "co_curricular_score": 10,
        "family_income": 20000,
        "disciplinary_actions": 0,
        "community_service_hours": 0
    }))
    .unwrap()
}

/// 单条件评估基准
fn bench_condition(c: &mut Criterion) {
    let mut group = c.benchmark_group("condition");
    let record = top_merit_record();

    for op in Operator::ALL {
        let cond = Condition::new("cgpa", op, 3.7);
        group.bench_function(op.symbol(), |b| {
            b.iter(|| ConditionEvaluator::evaluate_condition(black_box(&record), black_box(&cond)))
        });
    }

    let missing = Condition::new("scholarship_years", Operator::Gte, 1.0);
    group.bench_function("missing_attribute", |b| {
        b.iter(|| ConditionEvaluator::evaluate_condition(black_box(&record), black_box(&missing)))
    });

    group.finish();
}

/// decide / explain 基准
fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide");
    let engine = RuleEngine::new(RuleStore::load().unwrap());
    let traced = engine.clone().with_trace();

    let matched = top_merit_record();
    let fallback = no_match_record();

    group.bench_function("first_rule_matches", |b| {
        b.iter(|| engine.decide(black_box(&matched)))
    });

    group.bench_function("no_match", |b| b.iter(|| engine.decide(black_box(&fallback))));

    group.bench_function("with_trace", |b| b.iter(|| traced.decide(black_box(&matched))));

    group.bench_function("explain", |b| b.iter(|| engine.explain(black_box(&matched))));

    group.finish();
}

/// 规则数量扩展性基准（最坏情况：全部不匹配）
fn bench_store_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_scaling");
    let record = no_match_record();

    for size in [10usize, 100, 1000] {
        let rules = (0..size)
            .map(|i| {
                Rule::new(
                    format!("rule-{}", i),
                    i as i64,
                    vec![
                        Condition::new("cgpa", Operator::Gte, 3.5),
                        Condition::new("family_income", Operator::Lte, 1000.0),
                    ],
                    Action::new(Decision::Review, "bench"),
                )
            })
            .collect();
        let engine = RuleEngine::new(RuleStore::from_rules(rules));

        group.bench_with_input(BenchmarkId::from_parameter(size), &record, |b, r| {
            b.iter(|| engine.decide(black_box(r)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_condition, bench_decide, bench_store_scaling);

criterion_main!(benches);
