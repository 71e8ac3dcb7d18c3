use crate::rules::health::rules::{self, FALLBACK_RESPONSES, GREETING_RESPONSES};
use crate::{Engine, Options, Outcome, classify, classify_verbose_with, classify_with};

fn topic_of(input: &str) -> Outcome {
    classify_verbose_with(input, &Options::default()).outcome
}

fn response_of(name: &str) -> &'static str {
    rules::get().into_iter().find(|r| r.name == name).map(|r| r.response).unwrap()
}

#[test]
fn builtin_catalog_is_valid() {
    let catalog = rules::catalog().unwrap();
    assert_eq!(catalog.rules().len(), 7);
    assert_eq!(catalog.greeting_responses().len(), 3);
    assert_eq!(catalog.fallback_responses().len(), 3);
    assert!(Engine::new(catalog).is_ok());
}

#[test]
fn topic_examples_matching() {
    // Array of (expected_rule, input_string)
    let cases: Vec<(&str, &str)> = vec![
        ("headache", "I have a bad headache"),
        ("headache", "my head hurts"),
        ("headache", "Migraine again"),
        ("headache", "back pain"),
        ("cold_flu", "I caught a cold"),
        ("cold_flu", "fever and cough"),
        ("cold_flu", "FEVER"),
        ("sleep", "I can't sleep at night"),
        ("sleep", "insomnia"),
        ("sleep", "always tired"),
        ("diet", "what should I eat"),
        ("diet", "best food for energy"),
        ("diet", "nutrition facts"),
        ("exercise", "workout plan"),
        ("exercise", "how to stay active"),
        ("stress", "I'm so stressed"),
        ("stress", "anxiety at work"),
        ("stress", "I am worried"),
        ("hydration", "how much water"),
        ("hydration", "what to drink"),
    ];

    for (expected, input) in cases {
        let res = classify_verbose_with(input, &Options::default());
        match res.outcome {
            Outcome::Topic { name, .. } => assert_eq!(name, expected, "input {input:?}"),
            other => panic!("input {input:?}: expected topic {expected}, got {other:?}"),
        }
        assert_eq!(res.response, response_of(expected), "input {input:?}");
    }
}

#[test]
fn earlier_rule_wins_when_several_match() {
    let cases: Vec<(&str, &str)> = vec![
        ("headache", "my head hurts and I have a fever"),
        ("sleep", "stress keeps me from sleep"),
        ("diet", "I want to eat healthy and drink water"),
        ("cold_flu", "cold water"),
    ];

    for (expected, input) in cases {
        assert_eq!(topic_of(input).label(), expected, "input {input:?}");
    }
}

#[test]
fn greeting_examples_matching() {
    let inputs = [
        "hi",
        "Hello!",
        "hey there",
        "howdy",
        "HOLA amigo",
        "greetings",
        // A greeting wins over a clear topic keyword.
        "hello, I have a headache",
        // Substring matching: "this", "thirsty" and "which" all contain "hi".
        "this food",
        "so thirsty",
        "which exercise",
    ];

    for input in inputs {
        assert!(matches!(topic_of(input), Outcome::Greeting { .. }), "input {input:?}");
        assert!(GREETING_RESPONSES.contains(&classify(input).as_str()), "input {input:?}");
    }
}

#[test]
fn fallback_examples_matching() {
    for input in ["xyzzy quantum", "what is the capital of peru", "???", ""] {
        assert!(matches!(topic_of(input), Outcome::Fallback { .. }), "input {input:?}");
        assert!(FALLBACK_RESPONSES.contains(&classify(input).as_str()), "input {input:?}");
    }
}

#[test]
fn keywords_match_inside_words() {
    // "flux" contains "flu".
    assert_eq!(classify("xyzzy quantum flux"), response_of("cold_flu"));
}

#[test]
fn repeated_input_stays_in_candidate_set() {
    for seed in 0..20 {
        let opts = Options { seed: Some(seed) };
        assert!(GREETING_RESPONSES.contains(&classify_with("hey", &opts).as_str()));
        assert!(FALLBACK_RESPONSES.contains(&classify_with("xyzzy", &opts).as_str()));
        assert_eq!(classify_with("headache", &opts), response_of("headache"));
    }
}
