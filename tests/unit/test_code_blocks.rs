use parley::analysis::{clarity_score, complexity_bucket, depth_level, extract_code_blocks};
use parley::models::{ComplexityBucket, DepthLevel};

#[test]
fn round_trip_recovers_exact_block_count() {
    for k in 0..6 {
        let mut text = String::from("Some prose first.\n\n");
        for i in 0..k {
            text.push_str(&format!("```python\nprint({i})\n```\n\n"));
        }
        assert_eq!(extract_code_blocks(&text, "backend").len(), k);
    }
}

#[test]
fn language_tag_defaults_to_plaintext() {
    let blocks = extract_code_blocks("```\nplain body\n```", "backend");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].language, "plaintext");
    assert_eq!(blocks[0].code, "plain body");
}

#[test]
fn language_tag_is_lowercased() {
    let blocks = extract_code_blocks("```Python\nprint()\n```", "backend");
    assert_eq!(blocks[0].language, "python");
}

#[test]
fn nested_backtick_runs_are_not_double_counted() {
    // The inner fence-looking line closes the first block; the rest opens and
    // closes the second. Four markers, two blocks.
    let text = "```\na\n```\n```\nb\n```";
    assert_eq!(extract_code_blocks(text, "backend").len(), 2);
}

#[test]
fn source_backend_is_recorded() {
    let blocks = extract_code_blocks("```rust\nfn x() {}\n```", "claude-haiku-4-5");
    assert_eq!(blocks[0].backend_id, "claude-haiku-4-5");
}

#[test]
fn complexity_scores_follow_keyword_weights() {
    // branch only: score 1 -> Low
    let low = extract_code_blocks("```\nif x { y } else { z }\n```", "b");
    assert_eq!(complexity_bucket(&low), ComplexityBucket::Low);

    // loop + branch + function: score 3 -> Medium
    let medium = extract_code_blocks(
        "```python\ndef f(xs):\n    for x in xs:\n        if x:\n            return x\n```",
        "b",
    );
    assert_eq!(complexity_bucket(&medium), ComplexityBucket::Medium);

    // exceptions (+2) + recursion (+3) + function (+1): score 6 -> High
    let high = extract_code_blocks(
        "```python\ndef g(n):\n    try:\n        return g(n - 1)  # recursive\n    except RecursionError:\n        return 0\n```",
        "b",
    );
    assert_eq!(complexity_bucket(&high), ComplexityBucket::High);
}

#[test]
fn response_without_code_is_always_low() {
    let blocks = extract_code_blocks("try for a while, if you can", "b");
    assert!(blocks.is_empty());
    assert_eq!(complexity_bucket(&blocks), ComplexityBucket::Low);
}

#[test]
fn clarity_rewards_each_structural_feature_once() {
    assert_eq!(clarity_score("Short."), 5);
    assert_eq!(clarity_score("Short. For example, this."), 6);
    assert_eq!(clarity_score("# Title\nShort. For example, this."), 7);
}

#[test]
fn depth_combines_vocabulary_and_volume() {
    assert_eq!(depth_level("hello world", 0, 0), DepthLevel::Basic);
    assert_eq!(
        depth_level("pick the right algorithm", 0, 0),
        DepthLevel::Intermediate
    );
    assert_eq!(
        depth_level("dynamic programming beats the naive algorithm", 11, 0),
        DepthLevel::Advanced
    );
}
