use super::*;

use crate::foundation::error::ReelError;

#[test]
fn same_seed_and_mode_give_identical_scripts() {
    let pool = TemplatePool::default();
    let seed = Seed::new("2026-10-18-09-30");
    for mode in [ScriptMode::Short, ScriptMode::Long] {
        let a = generate(&pool, mode, &seed).unwrap();
        let b = generate(&pool, mode, &seed).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn short_script_uses_pool_entries() {
    let pool = TemplatePool::default();
    let script = generate(&pool, ScriptMode::Short, &Seed::new("abc")).unwrap();

    assert_eq!(script.tags, pool.short_tags);
    assert!(!script.title.contains(':'));
    assert!(pool.topics.iter().any(|t| t.replace(':', " —").trim() == script.title));

    let first = script.lines().next().unwrap();
    assert!(pool.hooks.iter().any(|h| first.starts_with(h.as_str())));
    assert!(first.ends_with('.'));

    let last = script.lines().last().unwrap();
    assert!(pool.ctas.iter().any(|c| c == last));
    assert!(script.body.contains("Systems don’t."));
}

#[test]
fn title_replaces_colon_with_dash() {
    let pool = TemplatePool {
        topics: vec!["Cash flow: the quiet engine".to_string()],
        ..TemplatePool::default()
    };
    let script = generate(&pool, ScriptMode::Short, &Seed::new("s")).unwrap();
    assert_eq!(script.title, "Cash flow — the quiet engine");
    assert!(script.body.contains("Cash flow: the quiet engine."));
}

#[test]
fn long_script_concatenates_reproducible_parts() {
    let pool = TemplatePool::default();
    let seed = Seed::new("run-7");
    let script = generate(&pool, ScriptMode::Long, &seed).unwrap();

    assert_eq!(script.title, pool.long_title);
    assert_eq!(script.tags, pool.long_tags);

    let parts: Vec<&str> = script.body.split(pool.part_separator.as_str()).collect();
    assert_eq!(parts.len(), pool.long_parts);

    // Part i is exactly the short body drawn from seed.derive(i).
    for (i, part) in parts.iter().enumerate() {
        let short = generate(&pool, ScriptMode::Short, &seed.derive(i)).unwrap();
        assert_eq!(*part, short.body);
    }

    let distinct: std::collections::BTreeSet<&str> = parts.iter().copied().collect();
    assert!(distinct.len() > 1, "all six parts were identical");
}

#[test]
fn empty_pools_are_configuration_faults() {
    let pool = TemplatePool {
        hooks: Vec::new(),
        ..TemplatePool::default()
    };
    let err = generate(&pool, ScriptMode::Short, &Seed::new("s")).unwrap_err();
    assert!(matches!(err, ReelError::Configuration(_)));
}

#[test]
fn description_joins_tagline_and_tags() {
    let script = Script {
        title: "t".to_string(),
        body: "b".to_string(),
        tags: "#a #b".to_string(),
    };
    assert_eq!(script.description("Tagline."), "Tagline.\n\n#a #b");
}

#[test]
fn blank_pool_entries_are_rejected() {
    let pool = TemplatePool {
        topics: vec![String::new(), "Cash flow beats hustle".to_string()],
        ..TemplatePool::default()
    };
    let err = pool.validate().unwrap_err();
    assert!(matches!(err, ReelError::Configuration(_)));
    assert!(err.to_string().contains("topic pool entry 0 is blank"));

    let pool = TemplatePool {
        ctas: vec!["Save this.".to_string(), "   ".to_string()],
        ..TemplatePool::default()
    };
    for seed in ["a", "b", "c", "d"] {
        assert!(generate(&pool, ScriptMode::Short, &Seed::new(seed)).is_err());
    }
}
