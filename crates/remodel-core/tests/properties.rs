use std::borrow::Cow;
use std::collections::BTreeSet;

use proptest::prelude::*;
use remodel_core::{Record, RemodelOptions, Rule, TransformRegistry};
use serde_json::{Value, json};

// -- Strategy helpers --

fn arb_key() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn arb_record() -> impl Strategy<Value = Record> {
    prop::collection::btree_map(arb_key(), any::<i64>(), 0..8).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| (key, json!(value)))
            .collect()
    })
}

#[derive(Debug, Clone)]
enum Step {
    Copy(String),
    Exclude(String),
    Rename(String, String),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        arb_key().prop_map(Step::Copy),
        arb_key().prop_map(Step::Exclude),
        (arb_key(), arb_key()).prop_map(|(out, src)| Step::Rename(out, src)),
    ]
}

fn build(options: RemodelOptions, steps: &[Step]) -> TransformRegistry {
    let mut registry = TransformRegistry::new(options);
    for step in steps {
        match step {
            Step::Copy(key) => {
                registry.copy_keys(key.as_str());
            }
            Step::Exclude(key) => {
                registry.exclude_keys(key.as_str());
            }
            Step::Rename(out, src) => {
                registry.add_transformation(out.as_str(), src.as_str());
            }
        }
    }
    registry
}

/// Output keys whose last step registered a rule.
fn expected_keys(steps: &[Step]) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for step in steps {
        match step {
            Step::Copy(key) | Step::Rename(key, _) => {
                keys.insert(key.clone());
            }
            Step::Exclude(key) => {
                keys.remove(key);
            }
        }
    }
    keys
}

proptest! {
    #[test]
    fn pass_through_is_identity(
        source in arb_record(),
        steps in prop::collection::vec(arb_step(), 0..10),
    ) {
        let registry = build(RemodelOptions::default().with_pass_through(true), &steps);
        let out = registry.apply(&source).unwrap();
        prop_assert!(matches!(out, Cow::Borrowed(out) if std::ptr::eq(out, &source)));
    }

    #[test]
    fn result_keys_are_exactly_the_resolved_rules(
        source in arb_record(),
        steps in prop::collection::vec(arb_step(), 0..10),
    ) {
        let registry = build(RemodelOptions::default(), &steps);
        let out = registry.apply(&source).unwrap();
        let keys: BTreeSet<String> = out.keys().cloned().collect();
        prop_assert_eq!(keys, expected_keys(&steps));
    }

    #[test]
    fn default_transformation_fills_every_registered_key(
        source in arb_record(),
        steps in prop::collection::vec(arb_step(), 0..10),
    ) {
        let options = RemodelOptions::default().with_default_transformation(Rule::constant(Value::Bool(true)));
        let registry = build(options, &steps);
        let out = registry.apply(&source).unwrap();
        let keys: BTreeSet<&str> = out.keys().map(String::as_str).collect();
        let registered: BTreeSet<&str> = registry.output_keys().collect();
        prop_assert_eq!(keys, registered);
    }

    #[test]
    fn copied_values_match_source(
        source in arb_record(),
        keys in prop::collection::vec(arb_key(), 0..6),
    ) {
        let mut registry = TransformRegistry::default();
        registry.copy_keys(keys.clone());
        let out = registry.apply(&source).unwrap();
        for key in &keys {
            let expected = source.get(key).cloned().unwrap_or(Value::Null);
            prop_assert_eq!(out.get(key), Some(&expected));
        }
    }
}
