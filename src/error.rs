// 🚫 Records Errors - One taxonomy for every store and engine failure
//
// Every validation failure is raised at the point of construction or mutation.
// Nothing here is ever downgraded to a default value by the library itself.

use thiserror::Error;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordsError {
    /// A required reference is missing (blank id, unknown student/course)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An entity with this identifier is already stored
    #[error("duplicate key: an entity with id '{0}' already exists")]
    DuplicateKey(String),

    /// The (student, course) pair is already enrolled
    #[error("duplicate enrollment: student '{student_id}' is already enrolled in '{course_code}'")]
    DuplicateEnrollment {
        student_id: String,
        course_code: String,
    },

    /// Numeric field outside its allowed bounds
    #[error("{field} out of range: {value} is not within [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Lookup by id or pair failed where existence is required
    #[error("not found: {0}")]
    NotFound(String),

    /// Person too young for the role at creation time
    #[error("{role} must be at least {min_age} years old (got {age})")]
    AgeConstraintViolation {
        role: &'static str,
        min_age: u32,
        age: i64,
    },

    /// Required text field empty or whitespace-only
    #[error("{0} must not be blank")]
    BlankField(String),

    /// Text field does not match its fixed pattern
    #[error("{field} '{value}' does not match the expected format {pattern}")]
    InvalidFormat {
        field: String,
        value: String,
        pattern: String,
    },
}

pub type RecordsResult<T> = Result<T, RecordsError>;

impl RecordsError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        RecordsError::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        RecordsError::NotFound(msg.into())
    }

    pub fn out_of_range(field: &str, value: f64, min: f64, max: f64) -> Self {
        RecordsError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        }
    }

    /// Stable short name of the variant, used in logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            RecordsError::InvalidArgument(_) => "InvalidArgument",
            RecordsError::DuplicateKey(_) => "DuplicateKey",
            RecordsError::DuplicateEnrollment { .. } => "DuplicateEnrollment",
            RecordsError::OutOfRange { .. } => "OutOfRange",
            RecordsError::NotFound(_) => "NotFound",
            RecordsError::AgeConstraintViolation { .. } => "AgeConstraintViolation",
            RecordsError::BlankField(_) => "BlankField",
            RecordsError::InvalidFormat { .. } => "InvalidFormat",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = RecordsError::out_of_range("grade", 11.0, 0.0, 10.0);
        assert_eq!(err.to_string(), "grade out of range: 11 is not within [0, 10]");
        assert_eq!(err.kind(), "OutOfRange");
    }

    #[test]
    fn test_duplicate_enrollment_message() {
        let err = RecordsError::DuplicateEnrollment {
            student_id: "E001".to_string(),
            course_code: "CS101".to_string(),
        };
        assert!(err.to_string().contains("E001"));
        assert!(err.to_string().contains("CS101"));
    }
}
