use parley::analysis::{jaccard, overall_similarity, significant_terms};
use std::collections::BTreeSet;

#[test]
fn significant_terms_are_case_folded_and_filtered() {
    let terms = significant_terms(
        "The Algorithm uses RECURSION and a cache. Because recursion repeats \
         work, the cache matters.",
    );

    assert!(terms.contains("algorithm"));
    assert!(terms.contains("recursion"));
    assert!(terms.contains("cache"));
    // Stop words and unrecognized words never qualify.
    assert!(!terms.contains("because"));
    assert!(!terms.contains("matters"));
    assert!(!terms.contains("work"));
}

#[test]
fn terms_shorter_than_four_characters_never_qualify() {
    let terms = significant_terms("fn map set api sql");
    assert!(terms.is_empty());
}

#[test]
fn jaccard_against_identical_copy_is_one() {
    let a = significant_terms("recursion with a cache and an iterator");
    let b = a.clone();
    assert_eq!(jaccard(&a, &b), 1.0);
}

#[test]
fn jaccard_of_disjoint_sets_is_zero() {
    let a: BTreeSet<String> = ["recursion".to_string()].into_iter().collect();
    let b: BTreeSet<String> = ["iterator".to_string()].into_iter().collect();
    assert_eq!(jaccard(&a, &b), 0.0);
}

#[test]
fn empty_sets_are_defined_as_disjoint() {
    assert_eq!(jaccard(&BTreeSet::new(), &BTreeSet::new()), 0.0);
}

#[test]
fn overall_similarity_stays_in_unit_interval() {
    let sets = vec![
        significant_terms("recursion cache algorithm"),
        significant_terms("recursion iterator"),
        significant_terms("thread mutex channel"),
        BTreeSet::new(),
    ];
    let similarity = overall_similarity(&sets);
    assert!((0.0..=1.0).contains(&similarity));
}

#[test]
fn overall_similarity_of_two_sets_is_the_single_pair() {
    let a = significant_terms("recursion cache");
    let b = significant_terms("recursion iterator");
    let expected = jaccard(&a, &b);
    assert_eq!(overall_similarity(&[a, b]), expected);
}
