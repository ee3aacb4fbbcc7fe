//! Field checks shared by the CRUD use cases.

use bizdesk_shared::{AppError, AppResult};

/// Fails with `AppError::Validation` when a required text field is blank.
pub fn require_non_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required!")));
    }
    Ok(())
}

/// Like [`require_non_blank`] for fields that are only checked when present.
pub fn require_non_blank_opt(field: &str, value: Option<&str>) -> AppResult<()> {
    value.map_or(Ok(()), |v| require_non_blank(field, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_rejected() {
        for value in ["", " ", "\t\n"] {
            let err = require_non_blank("Name", value).unwrap_err();
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.message(), "Name is required!");
        }
    }

    #[test]
    fn test_present_values_accepted() {
        assert!(require_non_blank("Name", "Ada").is_ok());
        assert!(require_non_blank_opt("Name", None).is_ok());
        assert!(require_non_blank_opt("Name", Some("x")).is_ok());
        assert!(require_non_blank_opt("Name", Some(" ")).is_err());
    }
}
