//! Shared display-name validation for folders and images.

use vault_core::error::AppError;

/// Maximum length of a folder or image name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Trim and validate a user-supplied entity name.
///
/// Names are required, trimmed of surrounding whitespace, and bounded at
/// [`MAX_NAME_LEN`] characters. Returns the trimmed name on success.
pub fn validate_entity_name(name: &str, what: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("Please enter {what} name")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!(
            "{what} name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(validate_entity_name("  Trips  ", "Folder").unwrap(), "Trips");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(validate_entity_name("", "Folder").is_err());
        assert!(validate_entity_name("   ", "Folder").is_err());
    }

    #[test]
    fn rejects_over_100_chars() {
        let long = "x".repeat(101);
        assert!(validate_entity_name(&long, "Image").is_err());
    }

    #[test]
    fn accepts_exactly_100_chars() {
        let exact = "x".repeat(100);
        assert_eq!(validate_entity_name(&exact, "Image").unwrap(), exact);
    }
}
