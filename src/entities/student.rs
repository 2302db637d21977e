// 🎓 Student Entity - Person + program + enrollment number
//
// A student is identified by the embedded person id.
// Age floor: 15 years at creation.

use super::person::{today, Person};
use super::Identifiable;
use crate::error::RecordsResult;
use crate::validation::{
    require_min_age, require_non_blank, FieldValue, ENROLLMENT_NUMBER_RULE, STUDENT_MIN_AGE,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    #[serde(flatten)]
    person: Person,

    /// Field of study, e.g. "Industrial Engineering"
    program: String,

    /// Registrar number in `XXX-XXXXX` form
    enrollment_number: String,
}

impl Student {
    pub fn new(
        person: Person,
        program: impl Into<String>,
        enrollment_number: impl Into<String>,
    ) -> RecordsResult<Self> {
        Self::new_on(person, program, enrollment_number, today())
    }

    pub fn new_on(
        person: Person,
        program: impl Into<String>,
        enrollment_number: impl Into<String>,
        today: NaiveDate,
    ) -> RecordsResult<Self> {
        let program = program.into();
        let enrollment_number = enrollment_number.into();

        require_min_age("student", STUDENT_MIN_AGE, person.birth_date(), today)?;
        require_non_blank("program", &program)?;
        require_non_blank("enrollment_number", &enrollment_number)?;
        ENROLLMENT_NUMBER_RULE.check("enrollment_number", FieldValue::Text(&enrollment_number))?;

        Ok(Student {
            person,
            program,
            enrollment_number,
        })
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn full_name(&self) -> String {
        self.person.full_name()
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn enrollment_number(&self) -> &str {
        &self.enrollment_number
    }
}

impl Identifiable for Student {
    fn id(&self) -> &str {
        self.person.id()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Role: Student - Program: {}", self.person, self.program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordsError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn person(birth: NaiveDate) -> Person {
        Person::new_on("E001", "Luis", "Garcia", birth, date(2025, 3, 1)).unwrap()
    }

    #[test]
    fn test_student_creation() {
        let today = date(2025, 3, 1);
        let student = Student::new_on(person(date(2003, 5, 4)), "Software Engineering", "123-45678", today).unwrap();

        assert_eq!(student.id(), "E001");
        assert_eq!(student.program(), "Software Engineering");
        assert_eq!(student.enrollment_number(), "123-45678");
        assert!(student.to_string().contains("Role: Student"));
    }

    #[test]
    fn test_underage_student_rejected() {
        let today = date(2025, 3, 1);
        let err = Student::new_on(person(date(2010, 3, 2)), "Accounting", "123-45678", today).unwrap_err();

        assert_eq!(
            err,
            RecordsError::AgeConstraintViolation {
                role: "student",
                min_age: 15,
                age: 14
            }
        );
    }

    #[test]
    fn test_student_exactly_fifteen() {
        let today = date(2025, 3, 1);
        assert!(Student::new_on(person(date(2010, 3, 1)), "Accounting", "123-45678", today).is_ok());
    }

    #[test]
    fn test_student_blank_program() {
        let today = date(2025, 3, 1);
        let err = Student::new_on(person(date(2003, 1, 1)), "  ", "123-45678", today).unwrap_err();
        assert_eq!(err, RecordsError::BlankField("program".to_string()));
    }

    #[test]
    fn test_student_enrollment_number_format() {
        let today = date(2025, 3, 1);

        let blank = Student::new_on(person(date(2003, 1, 1)), "Accounting", "", today).unwrap_err();
        assert_eq!(blank, RecordsError::BlankField("enrollment_number".to_string()));

        let malformed = Student::new_on(person(date(2003, 1, 1)), "Accounting", "1234", today).unwrap_err();
        assert_eq!(malformed.kind(), "InvalidFormat");
    }
}
