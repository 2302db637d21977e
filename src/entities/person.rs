// 🧑 Person - Identity + name + birth date shared by students and teachers
//
// Students and teachers both embed a Person. The role-specific age floor is
// enforced by the embedding type, the universal rules are enforced here.

use crate::error::RecordsResult;
use crate::validation::{age_on, require_non_blank, require_not_future};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    id: String,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
}

impl Person {
    /// Validate and build a person as of today
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> RecordsResult<Self> {
        Self::new_on(id, first_name, last_name, birth_date, today())
    }

    /// Same as `new`, with an explicit reference date
    pub fn new_on(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
        today: NaiveDate,
    ) -> RecordsResult<Self> {
        let id = id.into();
        let first_name = first_name.into();
        let last_name = last_name.into();

        require_non_blank("id", &id)?;
        require_non_blank("first_name", &first_name)?;
        require_non_blank("last_name", &last_name)?;
        require_not_future("birth_date", birth_date, today)?;

        Ok(Person {
            id,
            first_name,
            last_name,
            birth_date,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn age(&self) -> i64 {
        self.age_on(today())
    }

    pub fn age_on(&self, date: NaiveDate) -> i64 {
        age_on(self.birth_date, date)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - ID: {} - Age: {} years",
            self.full_name(),
            self.id,
            self.age()
        )
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordsError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_person_creation() {
        let person = Person::new_on("P1", "Ada", "Lovelace", date(1990, 12, 10), date(2025, 1, 1)).unwrap();

        assert_eq!(person.id(), "P1");
        assert_eq!(person.full_name(), "Ada Lovelace");
        assert_eq!(person.age_on(date(2025, 1, 1)), 34);
    }

    #[test]
    fn test_person_blank_fields() {
        let today = date(2025, 1, 1);
        let birth = date(1990, 1, 1);

        assert_eq!(
            Person::new_on(" ", "Ada", "Lovelace", birth, today).unwrap_err(),
            RecordsError::BlankField("id".to_string())
        );
        assert_eq!(
            Person::new_on("P1", "", "Lovelace", birth, today).unwrap_err(),
            RecordsError::BlankField("first_name".to_string())
        );
        assert_eq!(
            Person::new_on("P1", "Ada", "\t", birth, today).unwrap_err(),
            RecordsError::BlankField("last_name".to_string())
        );
    }

    #[test]
    fn test_person_future_birth_date() {
        let err = Person::new_on("P1", "Ada", "Lovelace", date(2030, 1, 1), date(2025, 1, 1)).unwrap_err();
        assert_eq!(err.kind(), "InvalidArgument");
    }
}
