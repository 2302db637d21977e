// 📏 Field Validation - Constraints as plain data, checked in constructors
//
// Each entity field that carries a constraint names a FieldRule.
// Constructors run the rules before building anything, so an invalid
// entity can never exist and there is nothing to validate afterwards.

use crate::error::{RecordsError, RecordsResult};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ============================================================================
// DOMAIN CONSTANTS
// ============================================================================

pub const GRADE_MIN: f64 = 0.0;
pub const GRADE_MAX: f64 = 10.0;

/// Average at or above this passes a course
pub const PASSING_GRADE: f64 = 7.0;

pub const CREDITS_MIN: u8 = 1;
pub const CREDITS_MAX: u8 = 6;

pub const SALARY_MIN: f64 = 500.0;
pub const SALARY_MAX: f64 = 10_000.0;

pub const STUDENT_MIN_AGE: u32 = 15;
pub const TEACHER_MIN_AGE: u32 = 25;

/// `X` = one ASCII alphanumeric, anything else must match literally
pub const ENROLLMENT_NUMBER_PATTERN: &str = "XXX-XXXXX";

// ============================================================================
// FIELD RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum FieldRule {
    /// Text must contain something other than whitespace
    Required,

    /// Number must lie in the closed interval [min, max]
    Range { min: f64, max: f64 },

    /// Text must match a fixed-length placeholder pattern
    Pattern(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

pub const GRADE_RULE: FieldRule = FieldRule::Range {
    min: GRADE_MIN,
    max: GRADE_MAX,
};

pub const CREDITS_RULE: FieldRule = FieldRule::Range {
    min: CREDITS_MIN as f64,
    max: CREDITS_MAX as f64,
};

pub const SALARY_RULE: FieldRule = FieldRule::Range {
    min: SALARY_MIN,
    max: SALARY_MAX,
};

pub const ENROLLMENT_NUMBER_RULE: FieldRule = FieldRule::Pattern(ENROLLMENT_NUMBER_PATTERN);

impl FieldRule {
    pub fn check(&self, field: &str, value: FieldValue<'_>) -> RecordsResult<()> {
        match (self, value) {
            (FieldRule::Required, FieldValue::Text(text)) => require_non_blank(field, text),
            (FieldRule::Range { min, max }, FieldValue::Number(n)) => {
                require_range(field, n, *min, *max)
            }
            (FieldRule::Pattern(pattern), FieldValue::Text(text)) => {
                require_pattern(field, text, pattern)
            }
            (rule, value) => Err(RecordsError::invalid_argument(format!(
                "rule {:?} cannot be applied to {} value {:?}",
                rule, field, value
            ))),
        }
    }
}

// ============================================================================
// CHECKS
// ============================================================================

pub fn require_non_blank(field: &str, value: &str) -> RecordsResult<()> {
    if value.trim().is_empty() {
        return Err(RecordsError::BlankField(field.to_string()));
    }
    Ok(())
}

/// NaN never satisfies a range
pub fn require_range(field: &str, value: f64, min: f64, max: f64) -> RecordsResult<()> {
    if !(min..=max).contains(&value) {
        return Err(RecordsError::out_of_range(field, value, min, max));
    }
    Ok(())
}

pub fn require_pattern(field: &str, value: &str, pattern: &str) -> RecordsResult<()> {
    let matches = value.chars().count() == pattern.chars().count()
        && value.chars().zip(pattern.chars()).all(|(v, p)| match p {
            'X' => v.is_ascii_alphanumeric(),
            literal => v == literal,
        });

    if !matches {
        return Err(RecordsError::InvalidFormat {
            field: field.to_string(),
            value: value.to_string(),
            pattern: pattern.to_string(),
        });
    }
    Ok(())
}

pub fn require_not_future(field: &str, date: NaiveDate, today: NaiveDate) -> RecordsResult<()> {
    if date > today {
        return Err(RecordsError::invalid_argument(format!(
            "{} {} is in the future",
            field, date
        )));
    }
    Ok(())
}

pub fn require_min_age(
    role: &'static str,
    min_age: u32,
    birth_date: NaiveDate,
    today: NaiveDate,
) -> RecordsResult<()> {
    let age = age_on(birth_date, today);
    if age < i64::from(min_age) {
        return Err(RecordsError::AgeConstraintViolation { role, min_age, age });
    }
    Ok(())
}

/// Full years elapsed between `birth_date` and `today`
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year() - birth_date.year());
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Parse a grade typed by a caller ("8.5" or "8,5") and check its range
pub fn parse_grade(text: &str) -> RecordsResult<f64> {
    let normalized = text.trim().replace(',', ".");
    let grade: f64 = normalized
        .parse()
        .map_err(|_| RecordsError::invalid_argument(format!("'{}' is not a number", text.trim())))?;

    GRADE_RULE.check("grade", FieldValue::Number(grade))?;
    Ok(grade + 0.0)
}

// ============================================================================
// TESTS
// ============================================================================
