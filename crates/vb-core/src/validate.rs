//! Field-level validation applied before a record reaches the store.

use chrono::NaiveDate;

use crate::errors::CoreError;

/// Storage date format for every date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shape checks an entity must pass before insert or update.
pub trait Validate {
    /// Return the first failing field, if any.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the offending field.
    fn validate(&self) -> Result<(), CoreError>;
}

/// Reject empty or whitespace-only text.
///
/// # Errors
///
/// Returns `CoreError::Validation` when `value` is blank.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "must not be blank"));
    }
    Ok(())
}

/// Require a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `CoreError::Validation` when `value` is not a valid date.
pub fn require_date(field: &str, value: &str) -> Result<(), CoreError> {
    let parsed = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| CoreError::validation(field, format!("'{value}' is not a YYYY-MM-DD date")))?;
    // chrono accepts unpadded components; storage ordering relies on the padded form.
    if parsed.format(DATE_FORMAT).to_string() != value {
        return Err(CoreError::validation(
            field,
            format!("'{value}' is not a YYYY-MM-DD date"),
        ));
    }
    Ok(())
}

/// Like [`require_date`] but accepts `None`.
///
/// # Errors
///
/// Returns `CoreError::Validation` when a present value is not a valid date.
pub fn optional_date(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    value.map_or(Ok(()), |v| require_date(field, v))
}

/// Require a finite amount strictly greater than zero.
///
/// # Errors
///
/// Returns `CoreError::Validation` for non-finite or non-positive amounts.
pub fn positive_amount(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::validation(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CoreError::validation(field, "must be greater than zero"));
    }
    Ok(())
}

/// Require a finite amount that is zero or greater.
///
/// # Errors
///
/// Returns `CoreError::Validation` for non-finite or negative amounts.
pub fn non_negative_amount(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CoreError::validation(field, "must not be negative"));
    }
    Ok(())
}
