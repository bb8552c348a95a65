use std::{io::ErrorKind, panic, path::Path};

pub const PDF_READ_ERROR_PREFIX: &str = "Error reading PDF: ";
pub const PDF_NOT_FOUND_ERROR: &str = "Error: PDF file not found";
pub const PDF_PERMISSION_ERROR: &str = "Error: Permission denied to access PDF file";

/// Turns document bytes into plain text.
///
/// Failures are reported in-band: the returned text is one of the error
/// sentinels above, detectable with [`is_extraction_error`].
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> String;
}

pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> String {
        extract_text_from_bytes(bytes)
    }
}

/// Extracts the text of every page, each followed by a newline.
pub fn extract_text_from_bytes(bytes: &[u8]) -> String {
    // pdf-extract panics on some malformed documents instead of returning an error
    let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes));

    match outcome {
        Ok(Ok(pages)) => join_pages(pages),
        Ok(Err(e)) => format!("{}{}", PDF_READ_ERROR_PREFIX, e),
        Err(_) => format!("{}document could not be decoded", PDF_READ_ERROR_PREFIX),
    }
}

pub fn extract_text_from_path(path: impl AsRef<Path>) -> String {
    match std::fs::read(path.as_ref()) {
        Ok(bytes) => extract_text_from_bytes(&bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => PDF_NOT_FOUND_ERROR.to_string(),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => PDF_PERMISSION_ERROR.to_string(),
        Err(e) => format!("{}{}", PDF_READ_ERROR_PREFIX, e),
    }
}

pub fn is_extraction_error(text: &str) -> bool {
    text.starts_with(PDF_READ_ERROR_PREFIX)
        || text == PDF_NOT_FOUND_ERROR
        || text == PDF_PERMISSION_ERROR
}

fn join_pages(pages: Vec<String>) -> String {
    pages.into_iter().fold(String::new(), |mut text, page| {
        text.push_str(&page);
        text.push('\n');
        text
    })
}
