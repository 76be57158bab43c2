//! Plain-text and JSON output for command results.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use docket::Case;
use serde_json::{Value, json};

/// Numbered one-line-per-case listing; `cases show N` uses the same numbering.
#[must_use]
pub fn case_list(cases: &[Case]) -> String {
    if cases.is_empty() {
        return "No cases found.".to_owned();
    }
    cases
        .iter()
        .enumerate()
        .map(|(i, case)| format!("{:>3}. {}: {}", i + 1, case.title, case.description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn case_detail(case: &Case) -> String {
    let mut out = format!("{}\n\n{}\n\nImage: {}", case.title, case.description, case.image_url);
    if let Some(id) = &case.id {
        out.push_str(&format!("\nId: {id}"));
    }
    out
}

#[must_use]
pub fn added(count: Option<usize>) -> String {
    match count {
        Some(count) => format!("Case added successfully. {count} case(s) on file."),
        None => "Case added successfully. The case list could not be reloaded.".to_owned(),
    }
}

/// `count` is `null` when the list could not be reloaded.
#[must_use]
pub fn added_json(count: Option<usize>) -> Value {
    json!({ "message": "Case added successfully", "count": count })
}

#[must_use]
pub fn rag_json(summary: &str, answer: Option<&str>) -> Value {
    match answer {
        Some(answer) => json!({ "document_summary": summary, "ai_response": answer }),
        None => json!({ "document_summary": summary }),
    }
}
