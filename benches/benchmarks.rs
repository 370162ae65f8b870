use criterion::{criterion_group, criterion_main, Criterion};
use erules::{builtins, Environment, Evaluator, RuleEngine, VariableDefinition};
use itertools::Itertools;
use serde::Deserialize;
use std::collections::HashMap;

const AN_EXPRESSION: &str = r#"exchange_id = 1 and country in ("US", "CA") and segment_ids_count in 1..10 and city = 'QC' or country = 'US' and not private"#;

const EXPRESSIONS_FILE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/benches/data/expressions.json"
));

pub fn tokenize(c: &mut Criterion) {
    let engine = RuleEngine::new();
    c.bench_function("tokenize", |b| {
        b.iter(|| {
            let _ = std::hint::black_box(engine.tokenize(AN_EXPRESSION));
        })
    });
}

pub fn parse(c: &mut Criterion) {
    let engine = RuleEngine::new();
    c.bench_function("parse", |b| {
        b.iter(|| {
            let _ = std::hint::black_box(engine.run(AN_EXPRESSION));
        })
    });
}

pub fn evaluate(c: &mut Criterion) {
    let engine = RuleEngine::new();
    let operations = builtins::operations();
    let mut environment = Environment::new(&[
        VariableDefinition::integer("exchange_id"),
        VariableDefinition::integer("segment_ids_count"),
        VariableDefinition::string("country"),
        VariableDefinition::string("city"),
        VariableDefinition::boolean("private"),
    ])
    .unwrap();
    environment.with_integer("exchange_id", 1).unwrap();
    environment.with_integer("segment_ids_count", 3).unwrap();
    environment.with_string("country", "CA").unwrap();
    environment.with_string("city", "QC").unwrap();
    environment.with_boolean("private", false).unwrap();
    c.bench_function("evaluate", |b| {
        b.iter(|| {
            let _ = std::hint::black_box(engine.evaluate(
                AN_EXPRESSION,
                &operations,
                &environment,
            ));
        })
    });
}

#[derive(Deserialize)]
struct ExpressionsContent {
    variables: HashMap<String, VariableType>,
    contexts: Vec<HashMap<String, ContextValue>>,
    expressions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum VariableType {
    Boolean,
    Integer,
    Float,
    String,
    IntegerList,
    StringList,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContextValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    IntegerList(Vec<i64>),
    StringList(Vec<String>),
}

pub fn evaluate_with_files(c: &mut Criterion) {
    let content: ExpressionsContent = serde_json::from_str(EXPRESSIONS_FILE).unwrap();
    let definitions = content
        .variables
        .iter()
        .map(|(name, kind)| match kind {
            VariableType::Boolean => VariableDefinition::boolean(name),
            VariableType::Integer => VariableDefinition::integer(name),
            VariableType::Float => VariableDefinition::float(name),
            VariableType::String => VariableDefinition::string(name),
            VariableType::IntegerList => VariableDefinition::integer_list(name),
            VariableType::StringList => VariableDefinition::string_list(name),
        })
        .collect_vec();
    let environments = content
        .contexts
        .iter()
        .map(|context| {
            let mut environment = Environment::new(&definitions).unwrap();
            context.iter().for_each(|(name, value)| match value {
                ContextValue::Boolean(value) => {
                    environment.with_boolean(name, *value).unwrap();
                }
                ContextValue::Integer(value) => {
                    environment.with_integer(name, *value).unwrap();
                }
                ContextValue::Float(value) => {
                    environment.with_float(name, *value).unwrap();
                }
                ContextValue::String(value) => {
                    environment.with_string(name, value).unwrap();
                }
                ContextValue::IntegerList(value) => {
                    environment.with_integer_list(name, value).unwrap();
                }
                ContextValue::StringList(value) => {
                    environment
                        .with_string_list(
                            name,
                            value.iter().map(|x| x.as_str()).collect_vec().as_slice(),
                        )
                        .unwrap();
                }
            });
            environment
        })
        .collect_vec();

    let engine = RuleEngine::new();
    let operations = builtins::operations();
    let trees = content
        .expressions
        .iter()
        .map(|expression| engine.run(expression).unwrap())
        .collect_vec();
    c.bench_function("evaluate_with_files", |b| {
        b.iter(|| {
            for environment in &environments {
                let evaluator = Evaluator::new(&operations, environment);
                for tree in &trees {
                    let _ = std::hint::black_box(evaluator.evaluate(tree));
                }
            }
        })
    });
}

criterion_group!(benches, tokenize, parse, evaluate, evaluate_with_files);
criterion_main!(benches);
