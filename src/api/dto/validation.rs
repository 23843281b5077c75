//! Shared field validators for request DTOs.

use validator::ValidationError;

/// Rejects empty and whitespace-only strings.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert!(non_blank("NUL").is_ok());
        assert!(non_blank("").is_err());
        assert!(non_blank("   ").is_err());
    }
}
