//! End-to-end tests for the settings engine
//!
//! - Alias resolution with type coercion
//! - Bulk verification of a malformed bundle
//! - Staleness of dependents after a write
//! - CSV audit trail on disk
//! - Overrides file applied to the default bundle

use boxcar_common::{SettingsError, TypeConstraint, Value};
use boxcar_settings::{
    apply_overrides, default_store, load_overrides, CsvAuditSink, Resolver, SettingStore,
    AUDIT_HEADER, GA_CONTROLLER,
};

fn aliased_store() -> SettingStore {
    let mut store = SettingStore::new();
    store
        .declare("test", "a", 5, TypeConstraint::float())
        .declare("test", "b", "a", TypeConstraint::float())
        .declare("test", "c", "b", TypeConstraint::float());
    store
}

#[test]
fn test_alias_chain_resolves_to_coerced_float() {
    let mut resolver = Resolver::new(aliased_store());

    assert_eq!(resolver.resolve("test", "b").unwrap(), Value::Float(5.0));
    assert_eq!(resolver.resolve("test", "c").unwrap(), Value::Float(5.0));
    assert_eq!(resolver.traversal_count(), 3);

    // Served from the cache, no new hops
    assert_eq!(resolver.resolve("test", "c").unwrap(), Value::Float(5.0));
    assert_eq!(resolver.traversal_count(), 3);
}

#[test]
fn test_verify_all_lists_every_failure() {
    let mut store = SettingStore::new();
    store
        .declare("test", "ok", 1.5, TypeConstraint::float())
        .declare("test", "flag", "yes", TypeConstraint::bool())
        .declare("test", "loop_a", "loop_b", TypeConstraint::str())
        .declare("test", "loop_b", "loop_a", TypeConstraint::str())
        .declare("other", "count", 2.5, TypeConstraint::int());
    let mut resolver = Resolver::new(store);

    let err = resolver.verify_all().unwrap_err();
    match err.as_settings() {
        Some(SettingsError::InvalidConfiguration { failures }) => {
            let names: Vec<String> = failures.iter().map(ToString::to_string).collect();
            assert_eq!(
                names,
                vec!["other: count", "test: flag", "test: loop_a", "test: loop_b"]
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let message = err.to_string();
    assert!(message.contains("The following constants have invalid values for their types:"));
    assert!(message.contains("other: count"));
}

#[test]
fn test_dependents_stay_cached_after_update() {
    let mut resolver = Resolver::new(aliased_store());
    assert_eq!(resolver.resolve("test", "b").unwrap(), Value::Float(5.0));

    resolver.update("test", "a", Value::Int(7)).unwrap();

    assert_eq!(resolver.resolve("test", "a").unwrap(), Value::Float(7.0));
    assert_eq!(resolver.resolve("test", "b").unwrap(), Value::Float(5.0));

    assert!(resolver.invalidate("test", "b"));
    assert_eq!(resolver.resolve("test", "b").unwrap(), Value::Float(7.0));
}

#[test]
fn test_audit_log_written_before_each_mutation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = CsvAuditSink::new(dir.path(), "settings_updates.csv");
    let mut resolver = Resolver::new(default_store());

    resolver
        .update_audited(GA_CONTROLLER, "mutation_rate", Value::Float(0.3), 120, &sink)
        .unwrap();
    resolver
        .update_audited(GA_CONTROLLER, "selection_type", Value::from("comma"), 240, &sink)
        .unwrap();

    let contents = std::fs::read_to_string(sink.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            AUDIT_HEADER,
            "120,ga,mutation_rate,0.5,0.3",
            "240,ga,selection_type,plus,comma",
        ]
    );
    assert_eq!(resolver.ga_constant("mutation_rate").unwrap(), Value::Float(0.3));
}

#[test]
fn test_failed_audit_leaves_value_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = CsvAuditSink::new(dir.path().join("missing"), "settings_updates.csv");
    let mut resolver = Resolver::new(default_store());

    assert!(resolver
        .update_audited(GA_CONTROLLER, "mutation_rate", Value::Float(0.3), 0, &sink)
        .is_err());
    assert_eq!(resolver.ga_constant("mutation_rate").unwrap(), Value::Float(0.5));
}

#[test]
fn test_overrides_file_applied_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("overrides.json");
    std::fs::write(
        &path,
        r#"{"ga": {"num_offspring": 80, "elitism": 0.1}, "window": {"width": 1280}}"#,
    )
    .unwrap();

    let mut resolver = Resolver::new(default_store());
    let applied = apply_overrides(&mut resolver, load_overrides(&path).unwrap(), None).unwrap();

    assert_eq!(applied, 3);
    assert_eq!(resolver.ga_constant("num_offspring").unwrap(), Value::Int(80));
    assert_eq!(resolver.ga_constant("elitism").unwrap(), Value::Float(0.1));
    assert_eq!(resolver.window_constant("width").unwrap(), Value::Int(1280));
    resolver.verify_all().unwrap();
}

#[test]
fn test_verify_all_names_the_single_bad_setting() {
    let mut resolver = Resolver::new(default_store());
    resolver.verify_all().unwrap();

    resolver
        .update(GA_CONTROLLER, "tournament_size", Value::from("five"))
        .unwrap();

    match resolver.verify_all().unwrap_err().as_settings() {
        Some(SettingsError::InvalidConfiguration { failures }) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].to_string(), "ga: tournament_size");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}
