//! File acceptance policy, checked before anything touches the network.

use crate::errors::ValidationError;
use crate::models::ResumeFile;

/// MIME types the intake service can extract text from.
pub const ACCEPTED_MIME: &[&str] = &["application/pdf", "image/jpeg", "image/png"];

/// 5 MiB upload cap.
pub const MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Validates a selected file against the acceptance policy.
///
/// Pure and synchronous: no side effects, no network. Type is checked
/// before size, so an oversized file of an unsupported type reports
/// `UnsupportedType`.
pub fn validate(file: &ResumeFile) -> Result<(), ValidationError> {
    if !ACCEPTED_MIME.contains(&file.mime.as_str()) {
        return Err(ValidationError::UnsupportedType {
            mime: file.mime.clone(),
        });
    }
    if file.size() > MAX_BYTES {
        return Err(ValidationError::TooLarge {
            size: file.size(),
            limit: MAX_BYTES,
        });
    }
    Ok(())
}
