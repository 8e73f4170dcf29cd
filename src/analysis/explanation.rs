//! Explanatory-profile heuristics: introduction and key-point extraction,
//! clarity scoring, depth classification. All rule-based and deterministic.

use crate::models::{DepthLevel, ResponseExplanation};
use regex::Regex;
use std::sync::LazyLock;

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*\u{2022}]|\d+\.)\s+(.+)$").unwrap());
static SEQUENCING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(first|then|finally)\b").unwrap());

const EMPHASIS_KEYWORDS: &[&str] = &["important", "key", "note", "crucial", "essential"];
const EXEMPLAR_PHRASES: &[&str] = &["for example", "such as", "in other words"];
const ADVANCED_VOCABULARY: &[&str] = &["algorithm", "complexity", "optimization", "design pattern"];
const DEEPER_VOCABULARY: &[&str] = &["recursion", "dynamic programming", "big-o", "time complexity"];

/// Drop fenced regions (fence lines included) so prose heuristics never see
/// code.
pub fn strip_fences(text: &str) -> String {
    let mut kept = Vec::new();
    let mut in_fence = false;
    for line in text.lines() {
        if line.trim().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence {
            kept.push(line);
        }
    }
    kept.join("\n")
}

fn paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

fn sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// The first paragraph of the prose longer than 50 characters.
pub fn extract_introduction(text: &str) -> Option<String> {
    paragraphs(&strip_fences(text))
        .into_iter()
        .find(|p| p.chars().count() > 50)
}

/// Bullet and numbered list items, capped at five; when the text has no list
/// at all, fall back to up to three sentences carrying emphasis keywords.
pub fn extract_key_points(text: &str) -> Vec<String> {
    let prose = strip_fences(text);

    let mut points: Vec<String> = prose
        .lines()
        .filter_map(|line| {
            LIST_ITEM
                .captures(line.trim())
                .map(|c| c[1].trim().to_string())
        })
        .take(5)
        .collect();

    if points.is_empty() {
        points = sentences(&prose)
            .into_iter()
            .filter(|s| {
                let lower = s.to_lowercase();
                EMPHASIS_KEYWORDS.iter().any(|k| lower.contains(k))
            })
            .take(3)
            .collect();
    }

    points
}

/// Clarity score in [1,10]: base 5, one point each for a code fence, a
/// heading line, a list marker, an exemplar phrase and a sequencing phrase;
/// minus one when the mean sentence runs past 100 characters.
pub fn clarity_score(text: &str) -> u8 {
    let lower = text.to_lowercase();
    let prose = strip_fences(text);
    let mut score: i32 = 5;

    if text.contains("```") {
        score += 1;
    }
    if prose.lines().any(|l| l.trim_start().starts_with('#')) {
        score += 1;
    }
    if prose.lines().any(|l| LIST_ITEM.is_match(l.trim())) {
        score += 1;
    }
    if EXEMPLAR_PHRASES.iter().any(|p| lower.contains(p)) {
        score += 1;
    }
    if SEQUENCING.is_match(&lower) {
        score += 1;
    }

    let sentence_list = sentences(&prose);
    if !sentence_list.is_empty() {
        let total: usize = sentence_list.iter().map(|s| s.chars().count()).sum();
        if total / sentence_list.len() > 100 {
            score -= 1;
        }
    }

    score.clamp(1, 10) as u8
}

/// Depth classification: +2 advanced vocabulary, +2 deeper vocabulary, +1 for
/// more than ten significant terms, +1 for more than two code blocks.
pub fn depth_level(text: &str, significant_term_count: usize, code_block_count: usize) -> DepthLevel {
    let lower = text.to_lowercase();
    let mut score = 0;

    if ADVANCED_VOCABULARY.iter().any(|k| lower.contains(k)) {
        score += 2;
    }
    if DEEPER_VOCABULARY.iter().any(|k| lower.contains(k)) {
        score += 2;
    }
    if significant_term_count > 10 {
        score += 1;
    }
    if code_block_count > 2 {
        score += 1;
    }

    DepthLevel::from_score(score)
}

/// Full explanatory profile of one response text.
pub fn explanation_profile(
    text: &str,
    significant_term_count: usize,
    code_block_count: usize,
) -> ResponseExplanation {
    ResponseExplanation {
        introduction: extract_introduction(text),
        key_points: extract_key_points(text),
        clarity_score: clarity_score(text),
        depth: depth_level(text, significant_term_count, code_block_count),
    }
}
