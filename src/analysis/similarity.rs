//! Pairwise Jaccard similarity over significant-term sets, and the shared
//! "common points" derivation.

use std::collections::{BTreeMap, BTreeSet};

/// Jaccard index of two term sets. Two empty sets are defined as disjoint (0).
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Arithmetic mean of the Jaccard index over every pair of term sets. With
/// exactly two sets this is a single pairwise value.
pub fn overall_similarity(term_sets: &[BTreeSet<String>]) -> f64 {
    let n = term_sets.len();
    if n < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    let mut pairs = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            total += jaccard(&term_sets[i], &term_sets[j]);
            pairs += 1;
        }
    }
    total / pairs as f64
}

/// Shared themes across responses, at most five, most frequent first.
///
/// A term qualifies when it appears in at least `ceil(0.7 * N)` of the N term
/// sets; a programming language qualifies when it tags code blocks in at
/// least two responses. Ties are broken by label for determinism.
pub fn common_points(
    term_sets: &[BTreeSet<String>],
    code_languages: &[BTreeSet<String>],
) -> Vec<String> {
    let n = term_sets.len();
    if n == 0 {
        return Vec::new();
    }
    let threshold = ((0.7 * n as f64).ceil() as usize).max(1);

    let mut candidates: Vec<(usize, String)> = Vec::new();

    let mut term_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for set in term_sets {
        for term in set {
            *term_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }
    for (term, frequency) in &term_frequency {
        if *frequency >= threshold && term.len() > 3 {
            candidates.push((*frequency, format!("Shared mention of \"{term}\"")));
        }
    }

    let mut language_frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for languages in code_languages {
        for language in languages {
            if language != "plaintext" {
                *language_frequency.entry(language.as_str()).or_insert(0) += 1;
            }
        }
    }
    for (language, frequency) in &language_frequency {
        if *frequency >= 2 {
            candidates.push((*frequency, format!("Multiple answers include {language} code")));
        }
    }

    candidates.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    candidates.truncate(5);
    candidates.into_iter().map(|(_, label)| label).collect()
}
