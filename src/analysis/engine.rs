//! Analysis entry points. Pure functions over a snapshot of responses; no
//! state survives between calls.

use crate::analysis::{codeblocks, differences, explanation, similarity, terms};
use crate::error::ParleyError;
use crate::models::{
    AnalysisResult, BackendResponse, CodeBlock, CodeReport, ResponseExplanation,
};
use std::collections::{BTreeMap, BTreeSet};

/// Some vendors wrap the answer in a one-object JSON envelope. Unwrap it when
/// recognizable; reject it when it claims to be JSON but cannot be parsed.
/// Plain prose (and prose that merely contains braces) passes through.
pub fn normalize_payload(text: &str) -> Result<String, ParleyError> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return Ok(text.to_string());
    }

    let value: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| {
        ParleyError::MalformedUpstreamPayload(format!("unparseable JSON envelope: {e}"))
    })?;

    for field in ["content", "text", "message", "answer"] {
        if let Some(inner) = value.get(field).and_then(|v| v.as_str()) {
            return Ok(inner.to_string());
        }
    }

    // Valid JSON without a recognizable envelope field: the model simply
    // answered in JSON. Analyze it as-is.
    Ok(text.to_string())
}

/// Compute a fresh analysis over the successful responses of a session.
///
/// Fewer than two successes is reported as `InsufficientDataForAnalysis` and
/// should be treated as "skip analysis", not as a failure of the comparison.
/// A malformed upstream payload degrades the result to
/// [`AnalysisResult::degraded`] instead of propagating.
pub fn compute_analysis(responses: &[&BackendResponse]) -> Result<AnalysisResult, ParleyError> {
    let successes: Vec<&BackendResponse> =
        responses.iter().copied().filter(|r| r.is_success()).collect();
    if successes.len() < 2 {
        return Err(ParleyError::InsufficientDataForAnalysis {
            successful: successes.len(),
        });
    }

    let mut texts = Vec::with_capacity(successes.len());
    for response in &successes {
        match normalize_payload(&response.text) {
            Ok(text) => texts.push(text),
            Err(ParleyError::MalformedUpstreamPayload(_)) => {
                return Ok(AnalysisResult::degraded());
            }
            Err(other) => return Err(other),
        }
    }

    let term_sets: Vec<BTreeSet<String>> =
        texts.iter().map(|t| terms::significant_terms(t)).collect();

    let mut code_analysis: BTreeMap<String, CodeReport> = BTreeMap::new();
    let mut code_languages: Vec<BTreeSet<String>> = Vec::with_capacity(successes.len());
    let mut complexity_by_backend = BTreeMap::new();
    for (response, text) in successes.iter().zip(&texts) {
        let blocks = codeblocks::extract_code_blocks(text, &response.backend_id);
        let languages: BTreeSet<String> = blocks.iter().map(|b| b.language.clone()).collect();
        let complexity = codeblocks::complexity_bucket(&blocks);

        code_languages.push(languages.clone());
        complexity_by_backend.insert(
            response.backend_id.clone(),
            (response.display_name.clone(), complexity),
        );
        code_analysis.insert(
            response.backend_id.clone(),
            CodeReport {
                block_count: blocks.len(),
                languages,
                complexity,
            },
        );
    }

    let overall_similarity = similarity::overall_similarity(&term_sets);
    let common_points = similarity::common_points(&term_sets, &code_languages);

    let mut key_differences = Vec::new();
    if let Some(difference) = differences::length_disparity(&successes) {
        key_differences.push(difference);
    }
    if let Some(difference) = differences::complexity_disparity(&complexity_by_backend) {
        key_differences.push(difference);
    }
    if let Some(difference) = differences::approach_disparity(&successes) {
        key_differences.push(difference);
    }

    Ok(AnalysisResult::new(
        overall_similarity,
        common_points,
        key_differences,
        code_analysis,
    ))
}

/// All code blocks of the successful responses, in response order.
pub fn extract_all_code_blocks(responses: &[&BackendResponse]) -> Vec<CodeBlock> {
    responses
        .iter()
        .filter(|r| r.is_success())
        .flat_map(|r| codeblocks::extract_code_blocks(&r.text, &r.backend_id))
        .collect()
}

/// Explanatory profiles keyed by backend id, for the explanatory comparison
/// mode. Errors never enter; failed responses are skipped.
pub fn compute_explanations(
    responses: &[&BackendResponse],
) -> BTreeMap<String, ResponseExplanation> {
    responses
        .iter()
        .filter(|r| r.is_success())
        .map(|response| {
            let text = normalize_payload(&response.text).unwrap_or_else(|_| response.text.clone());
            let term_count = terms::significant_terms(&text).len();
            let block_count = codeblocks::extract_code_blocks(&text, &response.backend_id).len();
            (
                response.backend_id.clone(),
                explanation::explanation_profile(&text, term_count, block_count),
            )
        })
        .collect()
}
