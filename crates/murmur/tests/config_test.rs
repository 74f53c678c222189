use murmur::{AgentConfig, LogBackend, ProviderKind, PublisherKind};
use murmur_error::{ContentErrorKind, MurmurErrorKind};
use std::collections::HashMap;
use std::io::Write;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_bundled_defaults_parse() {
    let config = AgentConfig::bundled().expect("Bundled config should parse");

    assert_eq!(config.content().topics().len(), 21);
    assert_eq!(config.content().styles().len(), 7);
    assert!(!config.content().fallback_templates().is_empty());
    assert_eq!(*config.sanitizer().max_length(), 280);
    assert_eq!(*config.generation().retry_budget(), 3);
    assert_eq!(*config.selection().recency_window_days(), 2);
    assert!(!config.selection().seed_seen_from_log());
    assert_eq!(config.schedule().times().len(), 3);
    assert_eq!(*config.publisher().kind(), PublisherKind::Twitter);
    assert_eq!(*config.log().backend(), LogBackend::Jsonl);

    let kinds: Vec<ProviderKind> = config.providers().iter().map(|p| *p.kind()).collect();
    assert_eq!(
        kinds,
        vec![ProviderKind::OpenAI, ProviderKind::Anthropic, ProviderKind::Groq]
    );
    config.validate().expect("Bundled config should validate");
}

#[test]
fn test_partial_document_keeps_defaults() {
    let config = AgentConfig::from_toml_str(
        r#"
        seed = 9

        [selection]
        recency_window_days = 4
        seed_seen_from_log = true

        [log]
        backend = "none"
        "#,
    )
    .unwrap();

    assert_eq!(*config.selection().recency_window_days(), 4);
    assert!(*config.selection().seed_seen_from_log());
    assert_eq!(*config.log().backend(), LogBackend::Disabled);
    assert_eq!(*config.seed(), Some(9));
    assert_eq!(
        config.content().topics().len(),
        murmur_content::DEFAULT_TOPICS.len()
    );
    assert_eq!(config.schedule().times(), &vec!["07:00", "13:00", "19:00"]);
    assert!(config.providers().is_empty());
}

#[test]
fn test_provider_entries() {
    let config = AgentConfig::from_toml_str(
        r#"
        [[providers]]
        kind = "openai_compatible"
        model = "local-model"
        endpoint = "http://localhost:8080/v1/chat/completions"
        api_key_env = "LOCAL_KEY"
        timeout_secs = 5

        [[providers]]
        kind = "ollama"
        model = "llama3.2"
        "#,
    )
    .unwrap();

    let providers = config.providers();
    assert_eq!(providers.len(), 2);
    assert_eq!(*providers[0].kind(), ProviderKind::OpenAICompatible);
    assert_eq!(providers[0].key_variable(), Some("LOCAL_KEY"));
    assert_eq!(*providers[0].timeout_secs(), 5);
    assert_eq!(providers[1].key_variable(), None);
    assert_eq!(*providers[1].timeout_secs(), 60);
}

#[test]
fn test_unknown_provider_kind_is_rejected() {
    let result = AgentConfig::from_toml_str(
        r#"
        [[providers]]
        kind = "carrier-pigeon"
        model = "coo"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_env_overrides() {
    let config = AgentConfig::bundled()
        .unwrap()
        .apply_env_overrides(lookup(&[
            ("TOPICS", r#"["Graph Databases", "Data Contracts"]"#),
            ("TWEET_STYLES", r#"["One line on {topic}."]"#),
            ("SCHEDULE_TIMES", r#"["08:15"]"#),
            ("MAX_TWEET_GENERATION_RETRIES", "5"),
            ("MAX_TWEET_LENGTH", "200"),
            ("RUN_DURATION_HOURS", "2.5"),
            ("POST_IMMEDIATELY", "true"),
            ("RECENCY_WINDOW_DAYS", "4"),
        ]))
        .unwrap();

    assert_eq!(
        config.content().topics(),
        &vec!["Graph Databases", "Data Contracts"]
    );
    assert_eq!(config.content().styles(), &vec!["One line on {topic}."]);
    assert_eq!(config.schedule().times(), &vec!["08:15"]);
    assert_eq!(*config.generation().retry_budget(), 5);
    assert_eq!(*config.sanitizer().max_length(), 200);
    assert_eq!(*config.schedule().run_duration_hours(), 2.5);
    assert!(*config.schedule().run_immediately());
    assert_eq!(*config.selection().recency_window_days(), 4);
}

#[test]
fn test_blank_env_values_are_ignored() {
    let config = AgentConfig::bundled()
        .unwrap()
        .apply_env_overrides(lookup(&[("TOPICS", "  "), ("POST_IMMEDIATELY", "")]))
        .unwrap();

    assert_eq!(config.content().topics().len(), 21);
    assert!(!config.schedule().run_immediately());
}

#[test]
fn test_malformed_env_values_are_errors() {
    let bundled = AgentConfig::bundled().unwrap();

    for vars in [
        [("TOPICS", "Graph Databases, Data Contracts")],
        [("MAX_TWEET_LENGTH", "long")],
        [("POST_IMMEDIATELY", "sometimes")],
        [("RUN_DURATION_HOURS", "five")],
    ] {
        let err = bundled.clone().apply_env_overrides(lookup(&vars)).unwrap_err();
        match err.kind() {
            MurmurErrorKind::Config(e) => assert!(e.message.contains(vars[0].0)),
            other => panic!("Expected config error, got {}", other),
        }
    }
}

#[test]
fn test_validate_rejects_empty_topics() {
    let config = AgentConfig::default().with_content(
        Vec::new(),
        vec!["Tip about {topic}.".into()],
        vec!["More on {topic} soon.".into()],
    );

    let err = config.validate().unwrap_err();
    match err.kind() {
        MurmurErrorKind::Content(e) => assert!(matches!(e.kind(), ContentErrorKind::NoTopics)),
        other => panic!("Expected content error, got {}", other),
    }
}

#[test]
fn test_validate_rejects_inverted_length_bounds() {
    let config = AgentConfig::default()
        .apply_env_overrides(lookup(&[("MAX_TWEET_LENGTH", "10")]))
        .unwrap();

    let err = config.validate().unwrap_err();
    assert!(matches!(
        err.kind(),
        MurmurErrorKind::Content(e) if matches!(e.kind(), ContentErrorKind::InvalidBounds(_))
    ));
}

#[test]
fn test_explicit_file_layers_over_bundled() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(file, "[content]\ntopics = [\"Only Topic\"]\n\n[schedule]\ntimes = [\"06:30\"]").unwrap();

    let config = AgentConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.content().topics(), &vec!["Only Topic"]);
    assert_eq!(config.content().styles().len(), 7);
    assert_eq!(config.schedule().times(), &vec!["06:30"]);
    assert_eq!(*config.schedule().poll_interval_secs(), 30);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    assert!(AgentConfig::load(Some(&missing)).is_err());
}
