// 🎲 Sample Data - Seeded random roster for demos and tests
//
// Same seed, same roster: every random choice goes through the caller's Rng.

use crate::entities::{ContractType, Course, Person, Student, Teacher};
use crate::error::{RecordsError, RecordsResult};
use crate::registrar::Registrar;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

const FIRST_NAMES: &[&str] = &[
    "Laura", "Pedro", "Carmen", "Luis", "Sofia", "Miguel", "Elena", "Jorge", "Paula", "Andres",
];

const LAST_NAMES: &[&str] = &[
    "Castillo", "Santos", "Mejia", "Rijo", "Perez", "Gomez", "Rosario", "Nunez", "Diaz", "Vargas",
];

const PROGRAMS: &[&str] = &[
    "Software Engineering",
    "Systems Engineering",
    "Industrial Engineering",
    "Business Administration",
];

const DEPARTMENTS: &[&str] = &["Computing", "Mathematics", "Engineering", "Business"];

const CATALOG: &[(&str, &str, u8)] = &[
    ("CS101", "Introduction to Programming", 4),
    ("CS201", "Data Structures", 5),
    ("CS301", "Databases", 4),
    ("CS302", "Operating Systems", 4),
    ("CS401", "Software Engineering", 5),
    ("MA101", "Calculus I", 5),
    ("MA201", "Linear Algebra", 4),
    ("ST201", "Statistics", 3),
    ("AD101", "Principles of Management", 3),
    ("EC101", "Microeconomics", 3),
];

pub const TEACHER_COUNT: usize = 5;
pub const STUDENT_COUNT: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedSummary {
    pub teachers: usize,
    pub courses: usize,
    pub students: usize,
    pub enrollments: usize,
    pub grades: usize,
    pub skipped_duplicates: usize,
}

impl SeedSummary {
    pub fn summary(&self) -> String {
        format!(
            "Generated {} teachers, {} courses, {} students, {} enrollments, {} grades ({} duplicate picks skipped)",
            self.teachers,
            self.courses,
            self.students,
            self.enrollments,
            self.grades,
            self.skipped_duplicates
        )
    }
}

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn random_date<R: Rng>(rng: &mut R, from_year: i32, to_year: i32) -> RecordsResult<NaiveDate> {
    let year = rng.gen_range(from_year..=to_year);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| RecordsError::invalid_argument(format!("bad date {}-{}-{}", year, month, day)))
}

fn random_enrollment_number<R: Rng>(rng: &mut R) -> String {
    format!("{:03}-{:05}", rng.gen_range(0..1000), rng.gen_range(0..100_000))
}

/// One decimal place in [6.0, 10.0]
fn random_grade<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(60..=100)) / 10.0
}

/// Fill the registrar with 5 teachers, 10 courses and 15 graded students
///
/// Each student picks 2-4 courses at random; picking the same course twice
/// is skipped rather than treated as an error.
pub fn generate<R: Rng>(registrar: &mut Registrar, rng: &mut R) -> RecordsResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    // Teachers
    let mut teacher_ids = Vec::with_capacity(TEACHER_COUNT);
    for i in 1..=TEACHER_COUNT {
        let id = format!("P{:03}", i);
        let person = Person::new(
            id.clone(),
            pick(rng, FIRST_NAMES),
            pick(rng, LAST_NAMES),
            random_date(rng, 1960, 1990)?,
        )?;
        let contract = *[ContractType::FullTime, ContractType::HalfTime, ContractType::Hourly]
            .choose(rng)
            .unwrap_or(&ContractType::FullTime);
        let salary = f64::from(rng.gen_range(20..=80)) * 100.0;

        registrar.add_teacher(Teacher::new(person, pick(rng, DEPARTMENTS), contract, salary)?)?;
        teacher_ids.push(id);
        summary.teachers += 1;
    }

    // Courses, taught round-robin
    let mut course_codes = Vec::with_capacity(CATALOG.len());
    for (i, (code, name, credits)) in CATALOG.iter().enumerate() {
        let teacher = registrar.teachers().find_by_id(&teacher_ids[i % teacher_ids.len()]);
        registrar.add_course(Course::new(*code, *name, *credits, teacher)?)?;
        course_codes.push(*code);
        summary.courses += 1;
    }

    // Students with enrollments and grades
    for i in 1..=STUDENT_COUNT {
        let id = format!("E{:03}", i);
        let person = Person::new(
            id.clone(),
            pick(rng, FIRST_NAMES),
            pick(rng, LAST_NAMES),
            random_date(rng, 2000, 2004)?,
        )?;
        let student = Student::new(person, pick(rng, PROGRAMS), random_enrollment_number(rng))?;
        registrar.add_student(student)?;
        summary.students += 1;

        for _ in 0..rng.gen_range(2..=4) {
            let code = pick(rng, &course_codes);

            match registrar.enroll(&id, code) {
                Ok(_) => summary.enrollments += 1,
                Err(RecordsError::DuplicateEnrollment { .. }) => {
                    warn!(student_id = %id, course_code = code, "duplicate pick skipped");
                    summary.skipped_duplicates += 1;
                    continue;
                }
                Err(e) => return Err(e),
            }

            for _ in 0..rng.gen_range(3..=4) {
                registrar.record_grade(&id, code, random_grade(rng))?;
                summary.grades += 1;
            }
        }
    }

    info!("{}", summary.summary());
    Ok(summary)
}

// ============================================================================
// TESTS
// ============================================================================
