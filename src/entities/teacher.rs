// 👩‍🏫 Teacher Entity - Person + department + contract + salary
//
// Age floor: 25 years at creation. Base salary bounded to [500, 10000].

use super::person::{today, Person};
use super::Identifiable;
use crate::error::{RecordsError, RecordsResult};
use crate::validation::{require_min_age, require_non_blank, FieldValue, SALARY_RULE, TEACHER_MIN_AGE};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CONTRACT TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    FullTime,
    HalfTime,
    Hourly,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::FullTime => "full-time",
            ContractType::HalfTime => "half-time",
            ContractType::Hourly => "hourly",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "full-time" | "fulltime" => Ok(ContractType::FullTime),
            "half-time" | "halftime" | "part-time" => Ok(ContractType::HalfTime),
            "hourly" => Ok(ContractType::Hourly),
            other => Err(RecordsError::invalid_argument(format!(
                "unknown contract type '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// TEACHER ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Teacher {
    #[serde(flatten)]
    person: Person,
    department: String,
    contract: ContractType,
    base_salary: f64,
}

impl Teacher {
    pub fn new(
        person: Person,
        department: impl Into<String>,
        contract: ContractType,
        base_salary: f64,
    ) -> RecordsResult<Self> {
        Self::new_on(person, department, contract, base_salary, today())
    }

    pub fn new_on(
        person: Person,
        department: impl Into<String>,
        contract: ContractType,
        base_salary: f64,
        today: NaiveDate,
    ) -> RecordsResult<Self> {
        let department = department.into();

        require_min_age("teacher", TEACHER_MIN_AGE, person.birth_date(), today)?;
        require_non_blank("department", &department)?;
        SALARY_RULE.check("base_salary", FieldValue::Number(base_salary))?;

        Ok(Teacher {
            person,
            department,
            contract,
            base_salary,
        })
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn full_name(&self) -> String {
        self.person.full_name()
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn contract(&self) -> ContractType {
        self.contract
    }

    pub fn base_salary(&self) -> f64 {
        self.base_salary
    }
}

impl Identifiable for Teacher {
    fn id(&self) -> &str {
        self.person.id()
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Role: Teacher - {} ({})",
            self.person, self.department, self.contract
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn person(birth: NaiveDate) -> Person {
        Person::new_on("P001", "Ivan", "Zorrilla", birth, date(2025, 1, 1)).unwrap()
    }

    #[test]
    fn test_teacher_creation() {
        let teacher = Teacher::new_on(
            person(date(1980, 5, 15)),
            "Engineering",
            ContractType::FullTime,
            3500.0,
            date(2025, 1, 1),
        )
        .unwrap();

        assert_eq!(teacher.id(), "P001");
        assert_eq!(teacher.department(), "Engineering");
        assert_eq!(teacher.contract(), ContractType::FullTime);
        assert_eq!(teacher.base_salary(), 3500.0);
    }

    #[test]
    fn test_teacher_salary_bounds() {
        let today = date(2025, 1, 1);
        let p = person(date(1980, 5, 15));

        assert!(Teacher::new_on(p.clone(), "Science", ContractType::Hourly, 500.0, today).is_ok());
        assert!(Teacher::new_on(p.clone(), "Science", ContractType::Hourly, 10_000.0, today).is_ok());

        let low = Teacher::new_on(p.clone(), "Science", ContractType::Hourly, 499.99, today).unwrap_err();
        assert_eq!(low.kind(), "OutOfRange");

        let high = Teacher::new_on(p, "Science", ContractType::Hourly, 10_000.01, today).unwrap_err();
        assert_eq!(high.kind(), "OutOfRange");
    }

    #[test]
    fn test_underage_teacher_rejected() {
        let err = Teacher::new_on(
            person(date(2001, 1, 2)),
            "Science",
            ContractType::HalfTime,
            2000.0,
            date(2025, 1, 1),
        )
        .unwrap_err();

        assert_eq!(err.kind(), "AgeConstraintViolation");
    }

    #[test]
    fn test_teacher_blank_department() {
        let err = Teacher::new_on(person(date(1980, 1, 1)), "", ContractType::FullTime, 3000.0, date(2025, 1, 1))
            .unwrap_err();
        assert_eq!(err, RecordsError::BlankField("department".to_string()));
    }

    #[test]
    fn test_contract_type_parsing() {
        assert_eq!("full-time".parse::<ContractType>().unwrap(), ContractType::FullTime);
        assert_eq!("Half Time".parse::<ContractType>().unwrap(), ContractType::HalfTime);
        assert_eq!("HOURLY".parse::<ContractType>().unwrap(), ContractType::Hourly);
        assert!("weekly".parse::<ContractType>().is_err());
    }
}
