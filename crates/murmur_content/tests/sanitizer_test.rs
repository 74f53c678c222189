use murmur_content::{Sanitizer, SanitizerConfig, SanitizerConfigBuilder};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn untagged() -> Sanitizer {
    let config = SanitizerConfigBuilder::default()
        .hashtag_probability(0.0)
        .build()
        .expect("Valid config");
    Sanitizer::new(config).expect("Valid sanitizer")
}

fn always_tag(max_length: usize) -> Sanitizer {
    let config = SanitizerConfigBuilder::default()
        .max_length(max_length)
        .hashtag_probability(1.0)
        .hashtags(vec!["#SQL".to_string()])
        .build()
        .expect("Valid config");
    Sanitizer::new(config).expect("Valid sanitizer")
}

#[test]
fn test_preamble_stripped_case_insensitively() {
    let mut rng = StdRng::seed_from_u64(1);
    let text = untagged().sanitize("HERE'S A TWEET: Data beats opinions.", &mut rng);
    assert_eq!(text, "Data beats opinions.");
}

#[test]
fn test_whitespace_collapsed_and_quotes_trimmed() {
    let mut rng = StdRng::seed_from_u64(1);
    let text = untagged().sanitize("  \"Clean   data\n\nwins.\"  ", &mut rng);
    assert_eq!(text, "Clean data wins.");
}

#[test]
fn test_nested_quotes_and_preamble_are_peeled() {
    let mut rng = StdRng::seed_from_u64(1);
    let text = untagged().sanitize("\"Tweet: 'Use EXPLAIN.'\"", &mut rng);
    assert_eq!(text, "Use EXPLAIN.");
}

#[test]
fn test_curly_quotes_trimmed() {
    let mut rng = StdRng::seed_from_u64(1);
    let text = untagged().sanitize("\u{201C}Version your notebooks.\u{201D}", &mut rng);
    assert_eq!(text, "Version your notebooks.");
}

#[test]
fn test_hashtag_appended_when_absent() {
    let mut rng = StdRng::seed_from_u64(3);
    let text = always_tag(280).sanitize("Index your joins.", &mut rng);
    assert_eq!(text, "Index your joins. #SQL");
}

#[test]
fn test_hashtag_not_appended_when_text_already_tagged() {
    let mut rng = StdRng::seed_from_u64(3);
    let text = always_tag(280).sanitize("Index your joins. #Databases", &mut rng);
    assert_eq!(text, "Index your joins. #Databases");
}

#[test]
fn test_hashtag_not_appended_when_it_would_overflow() {
    let mut rng = StdRng::seed_from_u64(3);
    let text = always_tag(20).sanitize("Index your joins.", &mut rng);
    assert_eq!(text, "Index your joins.");
}

#[test]
fn test_truncates_at_word_boundary_past_retention() {
    let mut rng = StdRng::seed_from_u64(1);
    let raw = "word ".repeat(100);
    let text = untagged().sanitize(&raw, &mut rng);

    assert!(text.chars().count() <= 280);
    assert!(text.ends_with("word..."));
    assert_eq!(text.chars().count(), 274 + 3);
}

#[test]
fn test_hard_cut_without_boundary() {
    let mut rng = StdRng::seed_from_u64(1);
    let text = untagged().sanitize(&"a".repeat(300), &mut rng);
    assert_eq!(text, format!("{}...", "a".repeat(277)));
}

#[test]
fn test_boundary_before_retention_is_ignored() {
    let mut rng = StdRng::seed_from_u64(1);
    let raw = format!("{} {}", "x".repeat(150), "y".repeat(200));
    let text = untagged().sanitize(&raw, &mut rng);
    assert_eq!(text.chars().count(), 280);
    assert!(text.ends_with("yyy..."));
}

#[test]
fn test_multibyte_text_truncates_by_characters() {
    let mut rng = StdRng::seed_from_u64(1);
    let text = untagged().sanitize(&"é".repeat(400), &mut rng);
    assert_eq!(text.chars().count(), 280);
}

#[test]
fn test_blank_input_sanitizes_to_empty() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(untagged().sanitize("  \"  \" ", &mut rng), "");
}

#[test]
fn test_same_seed_same_output() {
    let sanitizer = Sanitizer::new(SanitizerConfig::default()).expect("Valid sanitizer");
    let inputs = ["Normalize early.", "Plot before you model.", "Log your experiments."];

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        inputs
            .iter()
            .map(|i| sanitizer.sanitize(i, &mut rng))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn test_invalid_configs_rejected() {
    let tiny = SanitizerConfigBuilder::default()
        .max_length(3usize)
        .build()
        .expect("Builder accepts any value");
    assert!(Sanitizer::new(tiny).is_err());

    let odd = SanitizerConfigBuilder::default()
        .hashtag_probability(1.5)
        .build()
        .expect("Builder accepts any value");
    assert!(Sanitizer::new(odd).is_err());
}

#[test]
fn test_lead_in_only_stripped_at_word_boundary() {
    let mut rng = StdRng::seed_from_u64(1);
    let sanitizer = untagged();

    assert_eq!(
        sanitizer.sanitize("Here isn't a silver bullet for data cleaning.", &mut rng),
        "Here isn't a silver bullet for data cleaning."
    );
    assert_eq!(
        sanitizer.sanitize("Heresy: skip the unit tests.", &mut rng),
        "Heresy: skip the unit tests."
    );
    assert_eq!(
        sanitizer.sanitize("Here is a reminder to vacuum your tables.", &mut rng),
        "a reminder to vacuum your tables."
    );
}

#[test]
fn test_truncated_text_is_not_tagged_on_a_second_pass() {
    let sanitizer = always_tag(280);
    let raw = format!("{} {}", "x".repeat(210), "y".repeat(100));

    let once = sanitizer.sanitize(&raw, &mut StdRng::seed_from_u64(1));
    let twice = sanitizer.sanitize(&once, &mut StdRng::seed_from_u64(1));

    assert_eq!(once, format!("{}...", "x".repeat(210)));
    assert_eq!(twice, once);
}

#[test]
fn test_sanitize_is_idempotent() {
    let long_words = "Partition pruning keeps scans small. ".repeat(12);
    let inputs = [
        long_words.as_str(),
        "Index your joins. #Databases",
        "Index your joins.",
        "\"'Version your notebooks.'\"",
        "Here's a tweet: Sample before you plot.",
        "Tweet:   Check   row counts after every load.",
        "Sure! Here is: document your assumptions.",
        "Here isn't a silver bullet for data cleaning.",
        "Wait for it...",
        "",
    ];

    for probability in [0.0, 1.0] {
        let config = SanitizerConfigBuilder::default()
            .hashtag_probability(probability)
            .build()
            .expect("Valid config");
        let sanitizer = Sanitizer::new(config).expect("Valid sanitizer");

        for (seed, input) in inputs.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(seed as u64);
            let once = sanitizer.sanitize(input, &mut rng);
            let twice = sanitizer.sanitize(&once, &mut rng);

            assert!(once.chars().count() <= 280);
            assert_eq!(twice, once, "input {:?} at p={}", input, probability);
        }
    }
}

#[test]
fn test_tagged_variants_skip_overflowing_tags() {
    let config = SanitizerConfigBuilder::default()
        .max_length(24usize)
        .hashtags(vec!["#SQL".to_string(), "#MachineLearning".to_string()])
        .build()
        .expect("Valid config");
    let sanitizer = Sanitizer::new(config).expect("Valid sanitizer");

    let variants: Vec<String> = sanitizer.tagged_variants("Index your joins.").collect();

    assert_eq!(variants, vec!["Index your joins. #SQL"]);
}
