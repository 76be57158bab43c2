use super::*;
use crate::state::test_helpers::pdf_fixture;

#[test]
fn kind_follows_extension_case_insensitively() {
    assert_eq!(document_kind("lease.txt").unwrap(), DocumentKind::PlainText);
    assert_eq!(document_kind("LEASE.TXT").unwrap(), DocumentKind::PlainText);
    assert_eq!(document_kind("notes.md").unwrap(), DocumentKind::Markdown);
    assert_eq!(document_kind("notes.Markdown").unwrap(), DocumentKind::Markdown);
    assert_eq!(document_kind("brief.PDF").unwrap(), DocumentKind::Pdf);
}

#[test]
fn office_and_extensionless_files_are_unsupported() {
    assert_eq!(document_kind("brief.docx"), Err(ExtractError::Unsupported("brief.docx".into())));
    assert!(document_kind("README").is_err());
    assert!(document_kind("archive.txt.gz").is_err());
}

#[test]
fn extract_trims_and_strips_bom() {
    let text = extract_text("a.txt", "\u{feff}  The tenant shall pay rent.\n\n".as_bytes()).unwrap();
    assert_eq!(text, "The tenant shall pay rent.");
}

#[test]
fn whitespace_only_document_is_empty() {
    assert_eq!(extract_text("a.txt", b" \n\t "), Err(ExtractError::Empty));
    assert_eq!(extract_text("a.txt", b""), Err(ExtractError::Empty));
}

#[test]
fn binary_payload_is_rejected_as_empty() {
    assert_eq!(extract_text("a.txt", b"PK\x03\x04\0\0"), Err(ExtractError::Empty));
}

#[test]
fn invalid_utf8_is_replaced_not_fatal() {
    let text = extract_text("a.md", b"clause \xff one").unwrap();
    assert!(text.starts_with("clause "));
    assert!(text.ends_with(" one"));
}

#[test]
fn unsupported_check_runs_before_decoding() {
    assert!(matches!(extract_text("a.docx", b"PK\x03\x04"), Err(ExtractError::Unsupported(_))));
}

#[test]
fn pdf_text_is_extracted() {
    let text = extract_text("lease.pdf", &pdf_fixture("The tenant shall pay rent.")).unwrap();
    assert!(text.contains("The tenant shall pay rent."));
}

#[test]
fn pdf_without_text_is_empty() {
    assert_eq!(extract_text("scan.pdf", &pdf_fixture("")), Err(ExtractError::Empty));
}

#[test]
fn truncated_pdf_is_empty() {
    assert_eq!(extract_text("brief.pdf", b"%PDF-1.7"), Err(ExtractError::Empty));
}
