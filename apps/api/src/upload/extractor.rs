//! Text extraction — pluggable, trait-based conversion of document bytes to text.
//!
//! Default: `MockExtractor` (fixed strings, no parsing).
//! A real backend implements `TextExtractor` and is swapped in at startup;
//! the upload handler only sees `Arc<dyn TextExtractor>` in `AppState`.

use anyhow::Result;
use async_trait::async_trait;

pub const PDF_MIME: &str = "application/pdf";
pub const WORD_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document formats the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
}

impl DocumentKind {
    /// Maps a declared content type to a kind. Parameters after `;` are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Some(DocumentKind::Pdf),
            WORD_MIME => Some(DocumentKind::Word),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            DocumentKind::Pdf => PDF_MIME,
            DocumentKind::Word => WORD_MIME,
        }
    }
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_pdf(&self, bytes: &[u8]) -> Result<String>;
    async fn extract_word(&self, bytes: &[u8]) -> Result<String>;
}

/// Routes bytes to the extractor capability for their kind.
pub async fn extract_text(
    extractor: &dyn TextExtractor,
    kind: DocumentKind,
    bytes: &[u8],
) -> Result<String> {
    match kind {
        DocumentKind::Pdf => extractor.extract_pdf(bytes).await,
        DocumentKind::Word => extractor.extract_word(bytes).await,
    }
}

pub const MOCK_PDF_TEXT: &str = "Mock PDF text content extracted...";
pub const MOCK_WORD_TEXT: &str = "Mock Word document text content extracted...";

/// Stand-in extractor returning a fixed string per format.
pub struct MockExtractor;

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract_pdf(&self, _bytes: &[u8]) -> Result<String> {
        Ok(MOCK_PDF_TEXT.to_string())
    }

    async fn extract_word(&self, _bytes: &[u8]) -> Result<String> {
        Ok(MOCK_WORD_TEXT.to_string())
    }
}
