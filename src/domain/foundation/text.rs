//! Normalization of caller-supplied text fields.

use super::ValidationError;

/// Trims `value` and rejects it when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Like [`require_text`], but an absent value stays absent.
pub fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, ValidationError> {
    value.map(|v| require_text(field, v)).transpose()
}

/// Trims `value`, mapping an absent value to the empty string.
pub fn text_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("title", "  intro ").unwrap(), "intro");
    }

    #[test]
    fn require_text_rejects_blank() {
        assert_eq!(
            require_text("title", "   ").unwrap_err(),
            ValidationError::empty_field("title")
        );
    }

    #[test]
    fn optional_text_keeps_absent_and_rejects_blank() {
        assert_eq!(optional_text("name", None).unwrap(), None);
        assert_eq!(optional_text("name", Some(" a ")).unwrap(), Some("a".to_string()));
        assert!(optional_text("name", Some("")).is_err());
    }

    #[test]
    fn text_or_empty_defaults() {
        assert_eq!(text_or_empty(None), "");
        assert_eq!(text_or_empty(Some(" x ")), "x");
    }
}
