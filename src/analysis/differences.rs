//! Keyword-driven difference detection: length disparity, complexity
//! disparity, approach disparity. Each check is independent and may or may
//! not fire.

use crate::models::{BackendResponse, ComplexityBucket, KeyDifference};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static OBJECT_ORIENTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(class|object[- ]oriented|inheritance|polymorphism|encapsulation)\b").unwrap()
});
static FUNCTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(functional|closure|lambda|immutable|pure function|higher[- ]order)\b").unwrap()
});
static PROCEDURAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(procedural|imperative|step[- ]by[- ]step|sequential)\b").unwrap()
});
static ASYNCHRONOUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(async|await|asynchronous|concurren\w+|parallel)\b").unwrap()
});

/// Fires when the longest response is more than 1.5x the shortest (strict;
/// exactly 1.5 does not fire). An empty success against a non-empty one
/// always fires.
pub fn length_disparity(responses: &[&BackendResponse]) -> Option<KeyDifference> {
    let longest = responses.iter().max_by_key(|r| r.char_count())?;
    let shortest = responses.iter().min_by_key(|r| r.char_count())?;

    let max = longest.char_count();
    let min = shortest.char_count();
    let fires = if min == 0 {
        max > 0
    } else {
        max as f64 / min as f64 > 1.5
    };
    if !fires {
        return None;
    }

    Some(KeyDifference::new(
        "response length",
        format!(
            "{} answered in much more detail ({} chars) than {} ({} chars)",
            longest.display_name, max, shortest.display_name, min
        ),
    ))
}

/// Fires when responses land in more than one complexity bucket.
pub fn complexity_disparity(
    buckets: &BTreeMap<String, (String, ComplexityBucket)>,
) -> Option<KeyDifference> {
    let distinct: BTreeSet<ComplexityBucket> =
        buckets.values().map(|(_, bucket)| *bucket).collect();
    if distinct.len() <= 1 {
        return None;
    }

    let listing = buckets
        .values()
        .map(|(name, bucket)| format!("{}: {}", name, bucket.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    Some(KeyDifference::new(
        "code complexity",
        format!("Code complexity varies across answers ({listing})"),
    ))
}

/// Keyword-derived approach tags of one response text.
pub fn approach_tags(text: &str) -> BTreeSet<&'static str> {
    let lower = text.to_lowercase();
    let mut tags = BTreeSet::new();
    if OBJECT_ORIENTED.is_match(&lower) {
        tags.insert("object-oriented");
    }
    if FUNCTIONAL.is_match(&lower) {
        tags.insert("functional");
    }
    if PROCEDURAL.is_match(&lower) {
        tags.insert("procedural");
    }
    if ASYNCHRONOUS.is_match(&lower) {
        tags.insert("asynchronous");
    }
    tags
}

/// Fires when more than one distinct approach tag appears across responses.
pub fn approach_disparity(responses: &[&BackendResponse]) -> Option<KeyDifference> {
    let mut all_tags: BTreeSet<&'static str> = BTreeSet::new();
    let mut per_backend = Vec::new();
    for response in responses {
        let tags = approach_tags(&response.text);
        if !tags.is_empty() {
            per_backend.push(format!(
                "{}: {}",
                response.display_name,
                tags.iter().copied().collect::<Vec<_>>().join("/")
            ));
        }
        all_tags.extend(tags);
    }
    if all_tags.len() <= 1 {
        return None;
    }

    Some(KeyDifference::new(
        "implementation approach",
        format!(
            "Answers lean on different approaches ({})",
            per_backend.join("; ")
        ),
    ))
}
