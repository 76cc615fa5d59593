//! Utility functions for the document store repository.

use crate::errors::DocumentStoreError;

/// Longest index name the service accepts, in bytes.
pub const MAX_INDEX_NAME_BYTES: usize = 255;

/// Longest document id the service accepts, in bytes.
pub const MAX_DOCUMENT_ID_BYTES: usize = 512;

const FORBIDDEN_INDEX_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ',', '#'];

/// Validate an index name against the service's naming rules.
///
/// # Returns
///
/// * `Ok(())` - If the name is acceptable
/// * `Err(DocumentStoreError::ValidationError)` - Otherwise
///
/// # Example
///
/// ```
/// use docstore_repository::validate_index_name;
///
/// assert!(validate_index_name("courses").is_ok());
/// assert!(validate_index_name("Courses").is_err());
/// ```
pub fn validate_index_name(name: &str) -> Result<(), DocumentStoreError> {
    if name.is_empty() {
        return Err(DocumentStoreError::validation("index name is required"));
    }
    if name.len() > MAX_INDEX_NAME_BYTES {
        return Err(DocumentStoreError::validation(format!(
            "index name exceeds {} bytes",
            MAX_INDEX_NAME_BYTES
        )));
    }
    if name == "." || name == ".." {
        return Err(DocumentStoreError::validation(format!(
            "index name '{}' is reserved",
            name
        )));
    }
    if name.starts_with(['-', '_', '+']) {
        return Err(DocumentStoreError::validation(format!(
            "index name '{}' must not start with '-', '_' or '+'",
            name
        )));
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err(DocumentStoreError::validation(format!(
            "index name '{}' must be lowercase",
            name
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| c.is_whitespace() || FORBIDDEN_INDEX_CHARS.contains(c))
    {
        return Err(DocumentStoreError::validation(format!(
            "index name '{}' contains invalid character {:?}",
            name, c
        )));
    }
    Ok(())
}

/// Validate an explicit document id.
pub fn validate_document_id(id: &str) -> Result<(), DocumentStoreError> {
    if id.is_empty() {
        return Err(DocumentStoreError::validation("document id is required"));
    }
    if id.len() > MAX_DOCUMENT_ID_BYTES {
        return Err(DocumentStoreError::validation(format!(
            "document id exceeds {} bytes",
            MAX_DOCUMENT_ID_BYTES
        )));
    }
    Ok(())
}
