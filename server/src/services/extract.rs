//! Text extraction for uploaded documents.
//!
//! The extension decides the kind. Text formats are decoded as UTF-8 with
//! lossy replacement so a stray byte does not sink an otherwise readable
//! brief. PDFs go through `lopdf` page by page; a page whose text cannot be
//! decoded is skipped rather than failing the whole document.

/// Extensions accepted by `/rag/process`, lowercase and without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["txt", "md", "markdown", "pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Markdown,
    Pdf,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported document type: {0:?}")]
    Unsupported(String),
    #[error("document contains no extractable text")]
    Empty,
}

/// Classify an upload by its file name.
///
/// # Errors
///
/// [`ExtractError::Unsupported`] for anything outside [`SUPPORTED_EXTENSIONS`].
pub fn document_kind(file_name: &str) -> Result<DocumentKind, ExtractError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => Ok(DocumentKind::PlainText),
        "md" | "markdown" => Ok(DocumentKind::Markdown),
        "pdf" => Ok(DocumentKind::Pdf),
        _ => Err(ExtractError::Unsupported(file_name.to_owned())),
    }
}

/// Pull the readable text out of an upload.
///
/// # Errors
///
/// [`ExtractError::Unsupported`] for unknown types, [`ExtractError::Empty`]
/// when the document cannot be read or nothing but whitespace remains.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let kind = document_kind(file_name)?;
    let decoded = match kind {
        DocumentKind::Pdf => pdf_text(bytes)?,
        DocumentKind::PlainText | DocumentKind::Markdown => String::from_utf8_lossy(bytes).into_owned(),
    };
    let text = decoded.trim_start_matches('\u{feff}').trim();
    if text.is_empty() || text.contains('\0') {
        return Err(ExtractError::Empty);
    }
    tracing::debug!(?kind, chars = text.chars().count(), "extract: text decoded");
    Ok(text.to_owned())
}

fn pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| {
        tracing::warn!(error = %e, "extract: unreadable pdf");
        ExtractError::Empty
    })?;
    let pages: Vec<String> = doc
        .get_pages()
        .into_keys()
        .filter_map(|page| match doc.extract_text(&[page]) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(page, error = %e, "extract: pdf page skipped");
                None
            }
        })
        .collect();
    Ok(pages.join("\n"))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
