use crate::error::AppError;

/// Longest accepted student or faculty name, in characters.
pub const MAX_NAME_LENGTH: usize = 256;
/// Longest accepted faculty color, in characters.
pub const MAX_COLOR_LENGTH: usize = 64;

/// Trim `value` and require 1..=`max` Unicode characters.
pub fn validate_text(value: &str, field: &str, max: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(value.to_string())
}

pub fn validate_age(age: i32) -> Result<i32, AppError> {
    if age < 0 {
        return Err(AppError::Validation("Age must be >= 0".into()));
    }
    Ok(age)
}
