//! Fenced code region extraction and the keyword-based complexity heuristic.
//! Fences are matched by line scanning so nested backtick runs inside a body
//! are never double counted.

use crate::models::{CodeBlock, ComplexityBucket};
use regex::Regex;
use std::sync::LazyLock;

static LOOP_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(for|while|foreach)\b").unwrap());
static BRANCH_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(if|else|switch)\b").unwrap());
static CALLABLE_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(function|def|fn|class|async)\b").unwrap());
static EXCEPTION_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(try|catch|except|finally|throw|raise)\b").unwrap());
static RECURSION_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(recursion|recursive)\b").unwrap());

/// Extract every well-formed fenced region of `text`. The language tag is
/// whatever follows the opening marker, defaulting to "plaintext"; the body is
/// the trimmed interior. An unterminated fence is not a block.
pub fn extract_code_blocks(text: &str, backend_id: &str) -> Vec<CodeBlock> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim();
        if let Some(tag) = trimmed.strip_prefix("```") {
            let language = match tag.trim() {
                "" => "plaintext".to_string(),
                tag => tag.to_lowercase(),
            };

            let mut body = Vec::new();
            let mut j = i + 1;
            let mut closed = false;
            while j < lines.len() {
                if lines[j].trim().starts_with("```") {
                    closed = true;
                    break;
                }
                body.push(lines[j]);
                j += 1;
            }

            if closed {
                blocks.push(CodeBlock {
                    language,
                    code: body.join("\n").trim().to_string(),
                    backend_id: backend_id.to_string(),
                    explanation: trailing_prose(&lines, j + 1),
                });
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }

    blocks
}

/// Prose directly after a closing fence: consecutive non-blank lines up to the
/// next blank line or fence.
fn trailing_prose(lines: &[&str], start: usize) -> Option<String> {
    let mut prose = Vec::new();
    for line in lines.iter().skip(start) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("```") {
            break;
        }
        prose.push(trimmed);
    }
    if prose.is_empty() {
        None
    } else {
        Some(prose.join(" "))
    }
}

/// Keyword score over the extracted code bodies (prose never counts):
/// +1 loops, +1 branches, +1 function/class/async, +2 exception handling,
/// +3 recursion. A response without code is always Low.
pub fn complexity_bucket(blocks: &[CodeBlock]) -> ComplexityBucket {
    if blocks.is_empty() {
        return ComplexityBucket::Low;
    }

    let code = blocks
        .iter()
        .map(|b| b.code.to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");

    let mut score = 0;
    if LOOP_KEYWORDS.is_match(&code) {
        score += 1;
    }
    if BRANCH_KEYWORDS.is_match(&code) {
        score += 1;
    }
    if CALLABLE_KEYWORDS.is_match(&code) {
        score += 1;
    }
    if EXCEPTION_KEYWORDS.is_match(&code) {
        score += 2;
    }
    if RECURSION_KEYWORDS.is_match(&code) {
        score += 3;
    }

    ComplexityBucket::from_score(score)
}
