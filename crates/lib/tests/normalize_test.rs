//! # Response Normalizer Tests
//!
//! Covers each normalization stage in isolation and the end-to-end
//! guarantees: at most five questions, options only when non-empty and never
//! more than ten, trimmed text throughout.

use reelquest::questions::{normalize_response, strip_fences, Question, MAX_OPTIONS, MAX_QUESTIONS};

fn plain(text: &str) -> Question {
    Question::Plain(text.to_string())
}

// --- Stage 1: fence stripping ---

#[test]
fn test_fenced_json_array_is_parsed() {
    let raw = "```json\n[\"Q1\",\"Q2\"]\n```";
    assert_eq!(normalize_response(raw), vec![plain("Q1"), plain("Q2")]);
}

#[test]
fn test_fence_stripping_is_idempotent() {
    let inputs = [
        "```json\n[\"Q1\"]\n```",
        "```\nplain text\n```",
        "   no fences at all   ",
        "```python\nprint('x')",
        "trailing only\n```",
        "```",
        "",
    ];
    for input in inputs {
        let once = strip_fences(input);
        assert_eq!(strip_fences(&once), once, "not idempotent for {input:?}");
    }
}

// --- Stage 2: strict JSON ---

#[test]
fn test_well_formed_string_array_is_trimmed_verbatim() {
    let raw = r#"["  첫 번째 질문은?  ", "두 번째 질문은?", "Q3"]"#;
    assert_eq!(
        normalize_response(raw),
        vec![plain("첫 번째 질문은?"), plain("두 번째 질문은?"), plain("Q3")]
    );
}

/// Blank strings are the one exception to "each string becomes its trimmed
/// self": they are dropped, and they do not count towards the cap of five.
#[test]
fn test_blank_string_elements_are_dropped_not_kept_empty() {
    assert_eq!(normalize_response(r#"[" ", "Q"]"#), vec![plain("Q")]);
    assert_eq!(normalize_response(r#"["", "\t\n"]"#), Vec::<Question>::new());
    assert_eq!(
        normalize_response(r#"[" ", "Q1", "Q2", "", "Q3", "Q4", "Q5", "Q6"]"#),
        vec![plain("Q1"), plain("Q2"), plain("Q3"), plain("Q4"), plain("Q5")]
    );
}

#[test]
fn test_string_array_is_capped_at_five() {
    let raw = r#"["1","2","3","4","5","6","7"]"#;
    let questions = normalize_response(raw);
    assert_eq!(questions.len(), MAX_QUESTIONS);
    assert_eq!(questions[4], plain("5"));
}

#[test]
fn test_mixed_array_with_options_keeps_duplicates() {
    let raw = r#"["Q1" , {"q":"Q2","options":["A","A","  B  "]}]"#;
    assert_eq!(
        normalize_response(raw),
        vec![
            plain("Q1"),
            Question::WithOptions {
                q: "Q2".to_string(),
                // Duplicates are preserved; only whitespace and emptiness are normalized.
                options: vec!["A".to_string(), "A".to_string(), "B".to_string()],
            },
        ]
    );
}

#[test]
fn test_options_are_collapsed_filtered_and_capped() {
    let raw = r#"[{"q":" Q ","options":["  a   b ", "", 3, null, "   ", "c","d","e","f","g","h","i","j","k","l"]}]"#;
    let questions = normalize_response(raw);
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].text(), "Q");
    let options = questions[0].options();
    assert_eq!(options.len(), MAX_OPTIONS);
    assert_eq!(options[0], "a b");
    assert_eq!(options[1], "c");
}

#[test]
fn test_empty_option_list_downgrades_to_plain() {
    let raw = r#"[{"q":"Q1","options":["", "   ", 1]}, {"q":"Q2","options":[]}, {"q":"Q3","options":"A"}]"#;
    assert_eq!(
        normalize_response(raw),
        vec![plain("Q1"), plain("Q2"), plain("Q3")]
    );
}

#[test]
fn test_invalid_elements_are_dropped_not_fatal() {
    let raw = r#"[42, {"question":"wrong key"}, {"q": 7}, null, ["nested"], "  ", "Valid?"]"#;
    assert_eq!(normalize_response(raw), vec![plain("Valid?")]);
}

#[test]
fn test_parsed_array_with_no_valid_elements_is_final() {
    assert!(normalize_response("[1, 2, 3]").is_empty());
    assert!(normalize_response("[]").is_empty());
}

// --- Stage 3: newline repair ---

#[test]
fn test_raw_newlines_inside_strings_are_repaired() {
    let raw = "[\"첫 줄\n이어지는 질문?\", {\"q\": \"Q2\r\n계속\", \"options\": [\"A\nB\"]}]";
    assert_eq!(
        normalize_response(raw),
        vec![
            plain("첫 줄 이어지는 질문?"),
            Question::WithOptions {
                q: "Q2 계속".to_string(),
                options: vec!["A B".to_string()],
            },
        ]
    );
}

// --- Stage 4: line splitting ---

#[test]
fn test_prose_falls_back_to_first_five_lines() {
    let raw = "\"첫 번째?\"\n\n“두 번째?”\n‘세 번째?’\n'네 번째?'\n다섯 번째?\n여섯 번째?\n일곱 번째?";
    assert_eq!(
        normalize_response(raw),
        vec![
            plain("첫 번째?"),
            plain("두 번째?"),
            plain("세 번째?"),
            plain("네 번째?"),
            plain("다섯 번째?"),
        ]
    );
}

#[test]
fn test_fence_lines_inside_prose_are_skipped() {
    let raw = "Here are your questions:\n```\nQ1?\n```text\nQ2?";
    assert_eq!(
        normalize_response(raw),
        vec![plain("Here are your questions:"), plain("Q1?"), plain("Q2?")]
    );
}

#[test]
fn test_non_array_json_falls_through_to_lines() {
    let raw = r#"{"questions": ["Q1"]}"#;
    assert_eq!(normalize_response(raw), vec![plain(raw)]);
}

#[test]
fn test_empty_input_yields_no_questions() {
    assert!(normalize_response("").is_empty());
    assert!(normalize_response("```json\n```").is_empty());
}

// --- Global bounds ---

#[test]
fn test_bounds_hold_for_assorted_inputs() {
    let inputs = [
        r#"["a","b","c","d","e","f"]"#.to_string(),
        (0..12).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n"),
        format!(
            "[{}]",
            (0..8)
                .map(|i| format!(r#"{{"q":"q{i}","options":[{}]}}"#, (0..15).map(|j| format!("\"o{j}\"")).collect::<Vec<_>>().join(",")))
                .collect::<Vec<_>>()
                .join(",")
        ),
    ];
    for input in &inputs {
        let questions = normalize_response(input);
        assert!(questions.len() <= MAX_QUESTIONS);
        for question in &questions {
            assert!(!question.text().is_empty());
            assert_eq!(question.text(), question.text().trim());
            match question {
                Question::Plain(_) => {}
                Question::WithOptions { options, .. } => {
                    assert!(!options.is_empty() && options.len() <= MAX_OPTIONS)
                }
            }
        }
    }
}
