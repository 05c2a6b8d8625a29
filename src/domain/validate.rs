//! Field validators.
//!
//! Every validator is a pure function returning `Ok(())` or a
//! [`ValidationError`] whose `Display` is the message shown to the user.
//! Submission handlers collect all failures into [`ValidationErrors`].

use std::{fmt, sync::LazyLock};

use chrono::{NaiveDate, NaiveTime, Timelike};
use nonempty::NonEmpty;
use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9+()\- ]{6,}$").expect("valid phone pattern"));

/// First hour of the day appointments may start.
pub const OPENING_HOUR: u32 = 8;

/// Last hour of the day appointments may start; only the top of the hour.
pub const CLOSING_HOUR: u32 = 18;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was missing or blank.
    #[error("{0} is required")]
    Required(String),

    /// The email address is not of the form `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// The phone number has fewer than six characters or contains letters.
    #[error("Please enter a valid phone number")]
    InvalidPhone,

    /// The date could not be read as a calendar date.
    #[error("Please enter a valid date")]
    InvalidDate,

    /// The date is before today.
    #[error("Date cannot be in the past")]
    PastDate,

    /// The time is missing or cannot be read.
    #[error("Please choose a time")]
    InvalidTime,

    /// The time is outside opening hours.
    #[error("Time must be between 08:00 and 18:00")]
    OutsideHours,

    /// A value was present but not one of the allowed choices.
    #[error("{field}: {reason}")]
    Invalid {
        /// Label of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// One or more validation failures for a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(NonEmpty<ValidationError>);

impl ValidationErrors {
    /// Collects failures, returning `Ok(())` when there are none.
    ///
    /// # Errors
    ///
    /// Returns the collected failures if at least one check failed.
    pub fn check(
        results: impl IntoIterator<Item = Result<(), ValidationError>>,
    ) -> Result<(), Self> {
        let failures: Vec<_> = results.into_iter().filter_map(Result::err).collect();
        NonEmpty::from_vec(failures).map_or(Ok(()), |failures| Err(Self(failures)))
    }

    /// Iterates over the individual failures.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// The number of failures; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(NonEmpty::new(error))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Fails if the value is absent or blank.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] naming `label`.
pub fn not_empty(value: Option<&str>, label: &str) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::Required(label.to_string())),
    }
}

/// Loose email check: something, `@`, something, `.`, something.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`].
pub fn valid_email(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(value) if EMAIL.is_match(value.trim()) => Ok(()),
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// At least six digits, `+`, parentheses, hyphens or spaces.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPhone`].
pub fn valid_phone(value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(value) if PHONE.is_match(value.trim()) => Ok(()),
        _ => Err(ValidationError::InvalidPhone),
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] if the value is absent or not a
/// calendar date.
pub fn parse_date(value: Option<&str>) -> Result<NaiveDate, ValidationError> {
    value
        .and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
        .ok_or(ValidationError::InvalidDate)
}

/// Fails if the date is unreadable or strictly before `today`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] or [`ValidationError::PastDate`].
pub fn future_date(value: Option<&str>, today: NaiveDate) -> Result<(), ValidationError> {
    if parse_date(value)? < today {
        return Err(ValidationError::PastDate);
    }
    Ok(())
}

/// Parses an `HH:MM` (or `HH:MM:SS`) time of day.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTime`] if the value is absent or
/// unreadable.
pub fn parse_time(value: Option<&str>) -> Result<NaiveTime, ValidationError> {
    let value = value.map(str::trim).ok_or(ValidationError::InvalidTime)?;
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTime)
}

/// Fails unless the time is between 08:00 and 18:00 inclusive.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTime`] or
/// [`ValidationError::OutsideHours`].
pub fn time_range(value: Option<&str>) -> Result<(), ValidationError> {
    let time = parse_time(value)?;
    let hour = time.hour();
    let past_closing = hour == CLOSING_HOUR && (time.minute() > 0 || time.second() > 0);
    if !(OPENING_HOUR..=CLOSING_HOUR).contains(&hour) || past_closing {
        return Err(ValidationError::OutsideHours);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn not_empty_rejects_blank_and_missing() {
        assert!(not_empty(Some("Ada"), "Name").is_ok());
        assert_eq!(
            not_empty(Some("   "), "Name"),
            Err(ValidationError::Required("Name".to_string()))
        );
        assert!(not_empty(None, "Name").is_err());
    }

    #[test]
    fn email_is_loosely_checked() {
        assert!(valid_email(Some("ada@example.com")).is_ok());
        assert!(valid_email(Some("a@b.c")).is_ok());
        assert!(valid_email(Some("ada@example")).is_err());
        assert!(valid_email(Some("ada.example.com")).is_err());
        assert!(valid_email(Some("ada @example.com")).is_err());
        assert!(valid_email(None).is_err());
    }

    #[test]
    fn phone_accepts_common_punctuation() {
        assert!(valid_phone(Some("+1 (555) 123-4567")).is_ok());
        assert!(valid_phone(Some("123456")).is_ok());
        assert!(valid_phone(Some("12345")).is_err());
        assert!(valid_phone(Some("555-CALL-NOW")).is_err());
        assert!(valid_phone(None).is_err());
    }

    #[test]
    fn future_date_allows_today_and_later() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();

        assert_eq!(
            future_date(Some(&yesterday.to_string()), today()),
            Err(ValidationError::PastDate)
        );
        assert!(future_date(Some(&today().to_string()), today()).is_ok());
        assert!(future_date(Some(&tomorrow.to_string()), today()).is_ok());
    }

    #[test]
    fn future_date_rejects_garbage() {
        assert_eq!(
            future_date(Some("not a date"), today()),
            Err(ValidationError::InvalidDate)
        );
        assert_eq!(
            future_date(Some("2026-02-30"), today()),
            Err(ValidationError::InvalidDate)
        );
        assert_eq!(future_date(None, today()), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn time_range_is_inclusive_of_six_pm_only() {
        assert!(time_range(Some("08:00")).is_ok());
        assert!(time_range(Some("12:45")).is_ok());
        assert!(time_range(Some("18:00")).is_ok());
        assert_eq!(time_range(Some("18:30")), Err(ValidationError::OutsideHours));
        assert_eq!(time_range(Some("18:01")), Err(ValidationError::OutsideHours));
        assert_eq!(time_range(Some("07:59")), Err(ValidationError::OutsideHours));
        assert_eq!(time_range(None), Err(ValidationError::InvalidTime));
        assert_eq!(time_range(Some("noon")), Err(ValidationError::InvalidTime));
    }

    #[test]
    fn errors_join_with_line_breaks() {
        let errors = ValidationErrors::check([
            not_empty(None, "Name"),
            valid_email(Some("ada@example.com")),
            valid_phone(Some("1")),
        ])
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "Name is required\nPlease enter a valid phone number"
        );
    }

    #[test]
    fn check_passes_when_nothing_fails() {
        assert!(
            ValidationErrors::check([not_empty(Some("x"), "X"), time_range(Some("09:00"))]).is_ok()
        );
    }
}
