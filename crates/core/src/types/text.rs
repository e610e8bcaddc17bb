//! Free-text field rules for the flat-file format.
//!
//! Records are stored one per line with comma-separated fields and no quoting,
//! so a value may never contain a comma or a line break.

/// Characters that cannot appear inside a stored field.
pub const RESERVED: [char; 3] = [',', '\r', '\n'];

/// Errors that can occur when checking a free-text field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The value contains a field or record separator.
    #[error("value cannot contain {found:?}")]
    Reserved {
        /// The offending character.
        found: char,
    },
}

/// Check that `value` can be written as a single field.
///
/// # Errors
///
/// Returns `FieldError::Reserved` for the first comma, carriage return or
/// newline found in `value`.
pub fn check_field(value: &str) -> Result<(), FieldError> {
    match value.chars().find(|c| RESERVED.contains(c)) {
        Some(found) => Err(FieldError::Reserved { found }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_accepted() {
        assert!(check_field("Mechanical keyboard (87 keys)").is_ok());
        assert!(check_field("").is_ok());
    }

    #[test]
    fn test_separators_are_rejected() {
        assert_eq!(
            check_field("red, large"),
            Err(FieldError::Reserved { found: ',' })
        );
        assert_eq!(
            check_field("two\nlines"),
            Err(FieldError::Reserved { found: '\n' })
        );
        assert_eq!(
            check_field("cr\r"),
            Err(FieldError::Reserved { found: '\r' })
        );
    }
}
