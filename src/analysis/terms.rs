//! Significant-term extraction. Deliberately simple and deterministic:
//! case-folded word tokens filtered through a stop-word list and two curated
//! vocabularies, no stemming, no learned weights.

use std::collections::BTreeSet;

const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "also", "another", "because", "been", "before", "being",
    "below", "between", "both", "cannot", "could", "does", "doing", "down", "during", "each",
    "even", "every", "from", "further", "have", "having", "here", "into", "itself", "just",
    "like", "made", "make", "many", "more", "most", "much", "need", "only", "other", "over",
    "same", "should", "since", "some", "something", "still", "such", "than", "that", "their",
    "them", "then", "there", "these", "they", "this", "those", "through", "under", "until",
    "very", "want", "well", "were", "what", "when", "where", "which", "while", "will", "with",
    "would", "your", "yours",
];

const PROGRAMMING_TERMS: &[&str] = &[
    "algorithm", "argument", "array", "async", "asynchronous", "await", "boolean", "buffer",
    "cache", "callback", "channel", "class", "closure", "compiler", "complexity", "concurrency",
    "constant", "constructor", "database", "debug", "dependency", "dictionary", "encapsulation",
    "enum", "exception", "framework", "function", "generic", "graph", "hash", "hashmap", "heap",
    "immutable", "inheritance", "integer", "interface", "iterator", "javascript", "kotlin",
    "lambda", "library", "linked", "loop", "memory", "method", "module", "mutable", "mutex",
    "object", "operator", "optimization", "parameter", "parser", "pointer", "polymorphism",
    "promise", "python", "query", "queue", "recursion", "recursive", "refactor", "reference",
    "runtime", "rust", "serialization", "stack", "string", "struct", "syntax", "thread", "trait",
    "tuple", "typescript", "variable", "vector",
];

const GENERAL_TECH_TERMS: &[&str] = &[
    "abstraction", "analysis", "approach", "architecture", "automation", "bandwidth", "benchmark",
    "cloud", "component", "configuration", "container", "design", "deployment", "efficiency",
    "encryption", "endpoint", "implementation", "input", "integration", "latency", "logic",
    "model", "monitoring", "network", "output", "pattern", "performance", "pipeline", "platform",
    "practice", "process", "protocol", "request", "resource", "response", "result", "scalability",
    "security", "server", "service", "solution", "structure", "system", "throughput", "token",
    "validation", "workflow",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

fn is_recognized(token: &str) -> bool {
    PROGRAMMING_TERMS.contains(&token) || GENERAL_TECH_TERMS.contains(&token)
}

/// Case-folded word tokens of a text, split on anything non-alphanumeric.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// The set of significant terms of a response: tokens longer than three
/// characters that survive the stop-word filter and appear in one of the
/// curated vocabularies.
pub fn significant_terms(text: &str) -> BTreeSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| t.len() > 3 && !is_stop_word(t) && is_recognized(t))
        .collect()
}
