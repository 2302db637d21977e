// 📝 Enrollment - Student ↔ Course relationship with an append-only grade history
//
// Keyed by (student id, course code). Grades are only ever appended, through
// EnrollmentEngine::add_grade; callers get a read-only view of them.

use super::course::Course;
use super::student::Student;
use super::Identifiable;
use crate::error::RecordsResult;
use crate::validation::{FieldValue, GRADE_RULE, PASSING_GRADE};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// ENROLLMENT STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnrollmentStatus {
    /// No grades recorded yet
    InProgress,

    /// Average ≥ 7.0
    Passed,

    /// Average < 7.0
    Failed,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::InProgress => "In progress",
            EnrollmentStatus::Passed => "Passed",
            EnrollmentStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ENROLLMENT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Enrollment {
    id: String,
    student: Arc<Student>,
    course: Arc<Course>,
    enrolled_at: DateTime<Utc>,
    grades: Vec<f64>,
}

impl Enrollment {
    pub fn new(student: Arc<Student>, course: Arc<Course>) -> Self {
        Enrollment {
            id: uuid::Uuid::new_v4().to_string(),
            student,
            course,
            enrolled_at: Utc::now(),
            grades: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn student(&self) -> &Arc<Student> {
        &self.student
    }

    pub fn course(&self) -> &Arc<Course> {
        &self.course
    }

    pub fn student_id(&self) -> &str {
        self.student.id()
    }

    pub fn course_code(&self) -> &str {
        self.course.code()
    }

    pub fn enrolled_at(&self) -> DateTime<Utc> {
        self.enrolled_at
    }

    pub fn matches(&self, student_id: &str, course_code: &str) -> bool {
        self.student_id() == student_id && self.course_code() == course_code
    }

    /// Recorded grades, oldest first
    pub fn grades(&self) -> &[f64] {
        &self.grades
    }

    pub fn is_graded(&self) -> bool {
        !self.grades.is_empty()
    }

    /// Arithmetic mean of the grades, 0.0 when there are none
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        self.grades.iter().sum::<f64>() / self.grades.len() as f64
    }

    pub fn has_passed(&self) -> bool {
        self.average() >= PASSING_GRADE
    }

    pub fn status(&self) -> EnrollmentStatus {
        if self.grades.is_empty() {
            EnrollmentStatus::InProgress
        } else if self.has_passed() {
            EnrollmentStatus::Passed
        } else {
            EnrollmentStatus::Failed
        }
    }

    pub(crate) fn record_grade(&mut self, grade: f64) -> RecordsResult<()> {
        GRADE_RULE.check("grade", FieldValue::Number(grade))?;
        // -0.0 is stored as 0.0
        self.grades.push(grade + 0.0);
        Ok(())
    }
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - Average: {:.2} - Status: {}",
            self.student.full_name(),
            self.course.name(),
            self.average(),
            self.status()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Person;
    use chrono::NaiveDate;

    fn enrollment() -> Enrollment {
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let person = Person::new_on("E001", "Andrea", "Ruiz", NaiveDate::from_ymd_opt(2002, 4, 9).unwrap(), today).unwrap();
        let student = Student::new_on(person, "Accounting", "100-20000", today).unwrap();
        let course = Course::new("CS101", "Programming I", 4, None).unwrap();
        Enrollment::new(Arc::new(student), Arc::new(course))
    }

    #[test]
    fn test_new_enrollment_is_in_progress() {
        let e = enrollment();

        assert!(!e.id().is_empty());
        assert!(e.matches("E001", "CS101"));
        assert!(!e.is_graded());
        assert_eq!(e.average(), 0.0);
        assert_eq!(e.status(), EnrollmentStatus::InProgress);
    }

    #[test]
    fn test_average_and_passed_status() {
        let mut e = enrollment();
        for g in [8.0, 6.0, 9.0] {
            e.record_grade(g).unwrap();
        }

        assert!((e.average() - 23.0 / 3.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", e.average()), "7.67");
        assert_eq!(e.status(), EnrollmentStatus::Passed);
        assert_eq!(e.grades(), &[8.0, 6.0, 9.0]);
    }

    #[test]
    fn test_failed_status() {
        let mut e = enrollment();
        e.record_grade(5.0).unwrap();
        assert_eq!(e.status(), EnrollmentStatus::Failed);
    }

    #[test]
    fn test_exactly_seven_passes() {
        let mut e = enrollment();
        e.record_grade(7.0).unwrap();
        assert_eq!(e.status(), EnrollmentStatus::Passed);
    }

    #[test]
    fn test_out_of_range_grade_not_recorded() {
        let mut e = enrollment();
        assert!(e.record_grade(10.5).is_err());
        assert!(e.record_grade(-1.0).is_err());
        assert!(e.grades().is_empty());
        assert_eq!(e.status(), EnrollmentStatus::InProgress);
    }

    #[test]
    fn test_enrollment_display() {
        let mut e = enrollment();
        e.record_grade(9.0).unwrap();
        assert_eq!(e.to_string(), "Andrea Ruiz - Programming I - Average: 9.00 - Status: Passed");
    }

    #[test]
    fn test_negative_zero_grade_stored_as_zero() {
        let mut e = enrollment();
        e.record_grade(-0.0).unwrap();

        assert!(e.grades()[0].is_sign_positive());
        assert_eq!(format!("{:.2}", e.average()), "0.00");
        assert_eq!(e.status(), EnrollmentStatus::Failed);
    }
}
