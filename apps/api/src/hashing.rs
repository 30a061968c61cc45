//! SHA-256 fingerprints for proposals.
//!
//! Two identifiers exist and are never reconciled: the upload fingerprint is the
//! full digest of the raw document bytes, the audit fingerprint is a 16-char
//! prefix of the digest of the extracted proposal text.

use sha2::{Digest, Sha256};

/// Hex chars kept for the audit fingerprint.
pub const AUDIT_FINGERPRINT_LEN: usize = 16;

/// Full 64-char SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Short identifier used to correlate audit records with a proposal text.
pub fn audit_fingerprint(proposal_text: &str) -> String {
    let mut digest = sha256_hex(proposal_text.as_bytes());
    digest.truncate(AUDIT_FINGERPRINT_LEN);
    digest
}
