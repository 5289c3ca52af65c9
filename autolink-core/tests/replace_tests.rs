// autolink-core/tests/replace_tests.rs
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use autolink_core::{
    compile_rule, Autolink, AutolinkError, Config, LinkEngine, LookupFailurePolicy, LookupSettings,
    MatchOutcome, RegexEngine, TitleResolver,
};
use test_log::test; // For integrating with `env_logger` in tests

fn task_title(_url: &str) -> Result<String, AutolinkError> {
    Ok("Task 1".to_string())
}

fn unreachable_host(url: &str) -> Result<String, AutolinkError> {
    Err(AutolinkError::HttpStatus(url.to_string(), 503))
}

fn phabricator(word_match: bool) -> Autolink {
    Autolink {
        name: "Phabricator".to_string(),
        pattern: r"(?P<task>T\d+)".to_string(),
        template: "$task".to_string(),
        lookup_url_template: "https://example.test/$task".to_string(),
        word_match,
        ..Default::default()
    }
}

#[test]
fn test_word_match_link_keeps_surrounding_text() {
    let rule = compile_rule(&Autolink {
        pattern: r"T\d+".to_string(),
        template: "$0".to_string(),
        lookup_url_template: "https://example.test/$0".to_string(),
        word_match: true,
        ..Default::default()
    })
    .unwrap();

    let out = rule.replace("I found T298595 today", &task_title, &LookupSettings::default());
    assert_eq!(out.text, "I found [Task 1](https://example.test/T298595) today");
    assert_eq!(out.matches.len(), 1);
    assert_eq!(out.matches[0].outcome, MatchOutcome::Linked);
    assert_eq!(out.matches[0].lookup_url.as_deref(), Some("https://example.test/T298595"));
}

#[test]
fn test_batch_mode_links_each_match_independently() {
    let rule = compile_rule(&phabricator(true)).unwrap();
    let resolver = |url: &str| Ok::<_, AutolinkError>(format!("title of {}", url.rsplit('/').next().unwrap_or("")));

    let out = rule.replace("T1 blocks T2", &resolver, &LookupSettings::default());
    assert_eq!(
        out.text,
        "[title of T1](https://example.test/T1) blocks [title of T2](https://example.test/T2)"
    );
}

#[test]
fn test_collapsed_batch_mode_turns_message_into_one_link() {
    let rule = compile_rule(&phabricator(true)).unwrap();
    let settings = LookupSettings {
        collapse_batch_matches: true,
        ..Default::default()
    };

    let out = rule.replace("T1 blocks T2", &task_title, &settings);
    assert_eq!(
        out.text,
        "[Task 1](https://example.test/T1 blocks https://example.test/T2)"
    );
    assert_eq!(out.matches.len(), 1);

    let untouched = rule.replace("nothing here", &task_title, &settings);
    assert_eq!(untouched.text, "nothing here");
    assert!(untouched.matches.is_empty());
}

#[test]
fn test_sequential_mode_preserves_text_between_matches() {
    let rule = compile_rule(&phabricator(false)).unwrap();
    assert!(!rule.matcher.as_ref().unwrap().can_replace_all);

    let out = rule.replace("see T1 T2 now", &task_title, &LookupSettings::default());
    assert_eq!(
        out.text,
        "see [Task 1](https://example.test/T1) [Task 1](https://example.test/T2) now"
    );
    assert_eq!(out.matches.len(), 2);
}

#[test]
fn test_sequential_mode_anchors_at_message_start_and_end() {
    let rule = compile_rule(&phabricator(false)).unwrap();
    let out = rule.replace("T7", &task_title, &LookupSettings::default());
    assert_eq!(out.text, "[Task 1](https://example.test/T7)");
}

#[test]
fn test_captured_punctuation_is_re_emitted() {
    let rule = compile_rule(&Autolink {
        disable_non_word_prefix: true,
        ..phabricator(false)
    })
    .unwrap();

    let out = rule.replace("(T123)", &task_title, &LookupSettings::default());
    assert_eq!(out.text, "([Task 1](https://example.test/T123))");

    let out = rule.replace("done: T5, T6.", &task_title, &LookupSettings::default());
    assert_eq!(
        out.text,
        "done: [Task 1](https://example.test/T5), [Task 1](https://example.test/T6)."
    );
}

#[test]
fn test_opening_parenthesis_is_not_a_prefix_boundary() {
    let rule = compile_rule(&phabricator(false)).unwrap();
    let out = rule.replace("(T123)", &task_title, &LookupSettings::default());
    assert_eq!(out.text, "(T123)");
    assert!(out.matches.is_empty());

    let out = rule.replace("see T123)", &task_title, &LookupSettings::default());
    assert_eq!(out.text, "see [Task 1](https://example.test/T123))");
}

#[test]
fn test_non_word_rule_requires_boundaries() {
    let rule = compile_rule(&phabricator(false)).unwrap();
    let out = rule.replace("xT1 and T2y", &task_title, &LookupSettings::default());
    assert_eq!(out.text, "xT1 and T2y");
    assert!(out.matches.is_empty());
}

#[test]
fn test_failed_lookup_leaves_only_that_match_unchanged() {
    let rule = compile_rule(&phabricator(false)).unwrap();
    let resolver = |url: &str| {
        if url.ends_with("T2") {
            unreachable_host(url)
        } else {
            task_title(url)
        }
    };

    let out = rule.replace("T1 T2 T3", &resolver, &LookupSettings::default());
    assert_eq!(
        out.text,
        "[Task 1](https://example.test/T1) T2 [Task 1](https://example.test/T3)"
    );
    assert!(matches!(out.matches[1].outcome, MatchOutcome::LookupFailed(_)));
}

#[test]
fn test_failed_lookup_placeholder_policy() {
    let rule = compile_rule(&phabricator(true)).unwrap();
    let settings = LookupSettings {
        on_failure: LookupFailurePolicy::Placeholder,
        ..Default::default()
    };

    let out = rule.replace("fix T9 soon", &unreachable_host, &settings);
    assert_eq!(out.text, "fix [lookup failed](https://example.test/T9) soon");
}

#[test]
fn test_replace_does_not_mutate_rule() {
    let rule = compile_rule(&phabricator(false)).unwrap();
    let before = format!("{:?}", rule);
    let _ = rule.replace("T1 T2", &task_title, &LookupSettings::default());
    let _ = rule.replace("T1 T2", &task_title, &LookupSettings::default());
    assert_eq!(format!("{:?}", rule), before);
}

#[test]
fn test_inert_rules_return_message_unchanged() {
    for link in [
        Autolink { disabled: true, ..phabricator(true) },
        Autolink { pattern: String::new(), ..phabricator(true) },
        Autolink { template: String::new(), ..phabricator(false) },
    ] {
        let rule = compile_rule(&link).unwrap();
        let out = rule.replace("T1 T2", &task_title, &LookupSettings::default());
        assert_eq!(out.text, "T1 T2");
        assert!(out.matches.is_empty());
    }
}

#[test]
fn test_engine_resolves_each_url_once_per_message_through_cache() {
    use autolink_core::CachingResolver;
    use std::time::Duration;

    let calls = Arc::new(AtomicUsize::new(0));
    let counted = {
        let calls = Arc::clone(&calls);
        move |_: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, AutolinkError>("Task 1".to_string())
        }
    };
    let resolver: Arc<dyn TitleResolver> = Arc::new(CachingResolver::new(counted, 16, Duration::from_secs(60)));
    let engine = RegexEngine::with_resolver(
        Config {
            links: vec![phabricator(true)],
            ..Default::default()
        },
        resolver,
    );

    let (first, summary) = engine.link("T1 and T1 again", None);
    let (second, _) = engine.link("T1", None);
    assert_eq!(first, "[Task 1](https://example.test/T1) and [Task 1](https://example.test/T1) again");
    assert_eq!(second, "[Task 1](https://example.test/T1)");
    assert_eq!(summary[0].occurrences, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
