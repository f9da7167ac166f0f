//! Achievement validation.
//!
//! An achievement is a student's record of an award, publication, placement
//! or similar milestone. Its `title` doubles as the dedup key.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::submission::{
    validate_required, MAX_BODY_LENGTH, MAX_LABEL_LENGTH, MAX_TITLE_LENGTH,
};

/// Earliest date an achievement may carry.
pub const MIN_ACHIEVEMENT_YEAR: i32 = 1950;

/// Validate the content fields of an achievement submission.
pub fn validate_achievement(
    title: &str,
    description: &str,
    category: &str,
    achieved_on: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), CoreError> {
    validate_required("title", title, MAX_TITLE_LENGTH)?;
    validate_required("description", description, MAX_BODY_LENGTH)?;
    validate_required("category", category, MAX_LABEL_LENGTH)?;
    if let Some(date) = achieved_on {
        validate_achieved_on(date, today)?;
    }
    Ok(())
}

/// The achievement date may not lie in the future or before 1950.
pub fn validate_achieved_on(date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    use chrono::Datelike;

    if date > today {
        return Err(CoreError::Validation(format!(
            "achieved_on must not be in the future (got {date})"
        )));
    }
    if date.year() < MIN_ACHIEVEMENT_YEAR {
        return Err(CoreError::Validation(format!(
            "achieved_on must not be before {MIN_ACHIEVEMENT_YEAR} (got {date})"
        )));
    }
    Ok(())
}
