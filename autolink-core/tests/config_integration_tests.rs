// autolink-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use autolink_core::{
    compile_rules, Autolink, Config, ConfigStore, LookupFailurePolicy, LookupSettings,
};

const SAMPLE_CONFIG: &str = r#"
EnableVisaCard: true
Links:
  - Name: jira
    Pattern: '(?P<key>MM-\d+)'
    Template: '[$key](https://jira.example.test/browse/$key)'
    Scope: [engineering/town-square]
  - Name: phabricator
    Pattern: 'T\d+'
    Template: '$0'
    LookupUrlTemplate: 'https://phabricator.example.test/$0'
    WordMatch: true
Lookup:
  TimeoutSecs: 3
  OnFailure: placeholder
"#;

#[test]
fn test_load_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(SAMPLE_CONFIG.as_bytes())?;

    let config = Config::load_from_file(file.path())?;
    assert_eq!(config.links.len(), 2);
    assert_eq!(config.links[0].scope, vec!["engineering/town-square".to_string()]);
    assert!(config.links[1].word_match);
    assert!(config.enable_visa_card);
    assert!(!config.enable_ssn);
    assert_eq!(config.lookup.timeout_secs, 3);
    assert_eq!(config.lookup.on_failure, LookupFailurePolicy::Placeholder);
    // Unspecified lookup settings keep their defaults.
    assert_eq!(config.lookup.max_body_bytes, LookupSettings::default().max_body_bytes);
    Ok(())
}

#[test]
fn test_load_from_missing_file_reports_path() {
    let err = Config::load_from_file("/definitely/not/here/autolink.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("/definitely/not/here/autolink.yaml"));
}

#[test]
fn test_malformed_yaml_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"Links: [ { Name: broken").unwrap();
    assert!(Config::load_from_file(file.path()).is_err());
}

#[test]
fn test_invalid_pattern_in_file_does_not_stop_the_rest() -> Result<()> {
    let yaml = r#"
Links:
  - Name: good
    Pattern: 'T\d+'
    Template: 'x'
  - Name: bad
    Pattern: '(T\d+'
    Template: 'x'
  - Name: also-good
    Pattern: 'MM-\d+'
    Template: 'y'
"#;
    let config = Config::from_yaml_str(yaml)?;
    let compiled = compile_rules(&config.links);
    assert_eq!(compiled.functional().count(), 2);
    assert_eq!(compiled.errors.len(), 1);
    assert!(compiled.errors[0].to_string().contains("bad"));
    Ok(())
}

#[test]
fn test_rule_map_round_trip() {
    let link = Autolink {
        name: "phabricator".to_string(),
        pattern: r"T\d+".to_string(),
        template: "$0".to_string(),
        lookup_url_template: "https://phabricator.example.test/$0".to_string(),
        scope: vec!["engineering".to_string(), "ops/alerts".to_string()],
        word_match: true,
        disable_non_word_suffix: true,
        ..Default::default()
    };
    let restored = Autolink::from_config(&link.to_config()).unwrap();
    assert_eq!(restored, link);
}

#[test]
fn test_config_export_is_plain_data() -> Result<()> {
    let config = Config::from_yaml_str(SAMPLE_CONFIG)?;
    let exported = config.to_config();

    let links = exported["Links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[1]["LookupUrlTemplate"], "https://phabricator.example.test/$0");
    assert_eq!(exported["EnableVisaCard"], true);
    assert_eq!(exported["Lookup"]["OnFailure"], "placeholder");

    // The exported tree parses back into the same configuration.
    let reparsed: Config = serde_json::from_value(serde_json::Value::Object(exported))?;
    assert_eq!(reparsed, config);
    Ok(())
}

#[test]
fn test_store_compiles_configured_and_builtin_rules() -> Result<()> {
    let store = ConfigStore::default();
    let snapshot = store.apply(Config::from_yaml_str(SAMPLE_CONFIG)?);

    // Two configured links plus the three built-ins.
    assert_eq!(snapshot.compiled.rules.len(), 5);
    // The Visa rule is switched on; MasterCard and SSN stay inert.
    assert_eq!(snapshot.compiled.functional().count(), 3);
    assert!(snapshot.compiled.find("VisaCard").unwrap().is_functional());
    assert!(!snapshot.compiled.find("SSN").unwrap().is_functional());
    Ok(())
}
