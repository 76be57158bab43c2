//! Similar-case retrieval for answer grounding.
//!
//! Term-frequency vectors over lowercase alphanumeric tokens, compared by
//! cosine similarity. Cases with no shared term score zero and are dropped.

use std::collections::HashMap;

use docket::Case;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCase<'a> {
    pub case: &'a Case,
    pub score: f64,
}

type TermCounts = HashMap<String, u32>;

fn term_counts(text: &str) -> TermCounts {
    let mut counts = TermCounts::new();
    for token in text.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
        *counts.entry(token.to_lowercase()).or_default() += 1;
    }
    counts
}

fn norm(v: &TermCounts) -> f64 {
    v.values().map(|&n| f64::from(n) * f64::from(n)).sum::<f64>().sqrt()
}

fn cosine(a: &TermCounts, b: &TermCounts) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, &n)| large.get(term).map(|&m| f64::from(n) * f64::from(m)))
        .sum();
    let denom = norm(a) * norm(b);
    if denom == 0.0 { 0.0 } else { dot / denom }
}

/// Up to `top_n` cases most similar to `query`, best first. Ties keep
/// catalog order.
#[must_use]
pub fn most_similar<'a>(query: &str, cases: &'a [Case], top_n: usize) -> Vec<ScoredCase<'a>> {
    let query_terms = term_counts(query);
    if query_terms.is_empty() || top_n == 0 {
        return Vec::new();
    }
    let mut scored: Vec<ScoredCase<'a>> = cases
        .iter()
        .map(|case| {
            let terms = term_counts(&format!("{} {}", case.title, case.description));
            ScoredCase { case, score: cosine(&query_terms, &terms) }
        })
        .filter(|s| s.score > 0.0)
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);
    scored
}

#[cfg(test)]
#[path = "similar_test.rs"]
mod tests;
