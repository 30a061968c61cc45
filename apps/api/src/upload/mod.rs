// Proposal upload: validation, fingerprinting, text extraction.

pub mod extractor;
pub mod handlers;

/// Largest document accepted, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Body limit for the upload route. Leaves room for multipart framing so an
/// oversized file reaches the explicit size check.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Hard cap on returned text, in characters.
pub const MAX_TEXT_CHARS: usize = 2000;

pub const TOO_LARGE_MESSAGE: &str = "File too large. Maximum size is 10MB.";
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Only PDF and Word documents are allowed.";
