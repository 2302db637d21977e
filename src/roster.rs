// 📥 Roster Import - Bulk load students, teachers, courses and grades from CSV
//
// Each file has a header row. Rows go through the same validating
// constructors and registrar operations as any other caller, so an invalid
// row is rejected exactly like an invalid API call. The first failing row
// aborts the import; its row number (data rows, counted from 1) is in the
// error context.

use crate::entities::{ContractType, Course, Person, Student, Teacher};
use crate::error::RecordsError;
use crate::registrar::Registrar;
use crate::validation::parse_grade;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// ROW FORMATS
// ============================================================================

#[derive(Debug, Deserialize)]
struct StudentRow {
    id: String,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    program: String,
    enrollment_number: String,
}

#[derive(Debug, Deserialize)]
struct TeacherRow {
    id: String,
    first_name: String,
    last_name: String,
    birth_date: NaiveDate,
    department: String,
    contract: String,
    salary: f64,
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    code: String,
    name: String,
    credits: u8,
    teacher_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GradeRow {
    student_id: String,
    course_code: String,
    grade: Option<String>,
}

// ============================================================================
// IMPORT
// ============================================================================

/// Which files to load; teachers and grades are optional
#[derive(Debug, Clone, Default)]
pub struct RosterFiles {
    pub students: PathBuf,
    pub courses: PathBuf,
    pub teachers: Option<PathBuf>,
    pub grades: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub teachers: usize,
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
    pub grades: usize,
}

impl ImportSummary {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} teachers, {} students, {} courses, {} enrollments, {} grades",
            self.teachers, self.students, self.courses, self.enrollments, self.grades
        )
    }
}

/// Load a whole roster: teachers first, so courses can reference them
pub fn import_roster(registrar: &mut Registrar, files: &RosterFiles) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    if let Some(path) = &files.teachers {
        summary.teachers = load_teachers(registrar, path)?;
    }
    summary.students = load_students(registrar, &files.students)?;
    summary.courses = load_courses(registrar, &files.courses)?;

    if let Some(path) = &files.grades {
        let (enrollments, grades) = load_grades(registrar, path)?;
        summary.enrollments = enrollments;
        summary.grades = grades;
    }

    info!("{}", summary.summary());
    Ok(summary)
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path))
}

fn row_context(path: &Path, row: usize) -> String {
    format!("{:?}: row {}", path, row)
}

pub fn load_students(registrar: &mut Registrar, path: &Path) -> Result<usize> {
    let mut rdr = open(path)?;
    let mut loaded = 0;

    for (index, result) in rdr.deserialize::<StudentRow>().enumerate() {
        let row = index + 1;
        let record = result
            .context("Failed to deserialize student")
            .with_context(|| row_context(path, row))?;

        Person::new(record.id, record.first_name, record.last_name, record.birth_date)
            .and_then(|p| Student::new(p, record.program, record.enrollment_number))
            .and_then(|s| registrar.add_student(s))
            .with_context(|| row_context(path, row))?;

        loaded += 1;
    }

    info!(path = ?path, loaded, "students loaded");
    Ok(loaded)
}

pub fn load_teachers(registrar: &mut Registrar, path: &Path) -> Result<usize> {
    let mut rdr = open(path)?;
    let mut loaded = 0;

    for (index, result) in rdr.deserialize::<TeacherRow>().enumerate() {
        let row = index + 1;
        let record = result
            .context("Failed to deserialize teacher")
            .with_context(|| row_context(path, row))?;

        let contract: ContractType = record.contract.parse().with_context(|| row_context(path, row))?;

        Person::new(record.id, record.first_name, record.last_name, record.birth_date)
            .and_then(|p| Teacher::new(p, record.department, contract, record.salary))
            .and_then(|t| registrar.add_teacher(t))
            .with_context(|| row_context(path, row))?;

        loaded += 1;
    }

    info!(path = ?path, loaded, "teachers loaded");
    Ok(loaded)
}

pub fn load_courses(registrar: &mut Registrar, path: &Path) -> Result<usize> {
    let mut rdr = open(path)?;
    let mut loaded = 0;

    for (index, result) in rdr.deserialize::<CourseRow>().enumerate() {
        let row = index + 1;
        let record = result
            .context("Failed to deserialize course")
            .with_context(|| row_context(path, row))?;

        let teacher = match record.teacher_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Some(
                registrar
                    .teachers()
                    .find_by_id(id)
                    .ok_or_else(|| RecordsError::not_found(format!("teacher '{}'", id)))
                    .with_context(|| row_context(path, row))?,
            ),
            _ => None,
        };

        Course::new(record.code, record.name, record.credits, teacher)
            .and_then(|c| registrar.add_course(c))
            .with_context(|| row_context(path, row))?;

        loaded += 1;
    }

    info!(path = ?path, loaded, "courses loaded");
    Ok(loaded)
}

/// Returns (enrollments created, grades recorded)
///
/// A row for a pair that is already enrolled only appends its grade.
pub fn load_grades(registrar: &mut Registrar, path: &Path) -> Result<(usize, usize)> {
    let mut rdr = open(path)?;
    let mut enrolled = 0;
    let mut graded = 0;

    for (index, result) in rdr.deserialize::<GradeRow>().enumerate() {
        let row = index + 1;
        let record = result
            .context("Failed to deserialize grade")
            .with_context(|| row_context(path, row))?;

        let grade = match record.grade.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(parse_grade(text).with_context(|| row_context(path, row))?),
            _ => None,
        };

        if registrar
            .enrollments()
            .find(&record.student_id, &record.course_code)
            .is_none()
        {
            registrar
                .enroll(&record.student_id, &record.course_code)
                .with_context(|| row_context(path, row))?;
            enrolled += 1;
        }

        if let Some(grade) = grade {
            registrar
                .record_grade(&record.student_id, &record.course_code, grade)
                .with_context(|| row_context(path, row))?;
            graded += 1;
        }
    }

    info!(path = ?path, enrolled, graded, "grades loaded");
    Ok((enrolled, graded))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Identifiable;
    use std::fs;
    use tempfile::TempDir;

    const TEACHERS: &str = "\
id,first_name,last_name,birth_date,department,contract,salary
P1,Victor,Rijo,1980-04-12,Systems,full-time,3500
P2,Ana,Mejia,1975-09-30,Mathematics,Half Time,1800
";

    const STUDENTS: &str = "\
id,first_name,last_name,birth_date,program,enrollment_number
E1,Laura,Castillo,2002-05-20,Software Engineering,123-45678
E2,Pedro,Santos,2001-01-15,Systems Engineering,234-56789
";

    const COURSES: &str = "\
code,name,credits,teacher_id
CS101,Intro to Programming,4,P1
MA101,Calculus I,5,
";

    const GRADES: &str = "\
student_id,course_code,grade
E1,CS101,9.0
E1,CS101,\"8,5\"
E1,MA101,
E2,MA101,6.0
";

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn files(dir: &TempDir) -> RosterFiles {
        RosterFiles {
            students: write(dir, "students.csv", STUDENTS),
            courses: write(dir, "courses.csv", COURSES),
            teachers: Some(write(dir, "teachers.csv", TEACHERS)),
            grades: Some(write(dir, "grades.csv", GRADES)),
        }
    }

    #[test]
    fn test_import_full_roster() {
        let dir = TempDir::new().unwrap();
        let mut registrar = Registrar::default();

        let summary = import_roster(&mut registrar, &files(&dir)).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                teachers: 2,
                students: 2,
                courses: 2,
                enrollments: 3,
                grades: 3,
            }
        );

        let cs101 = registrar.courses().find_by_id("CS101").unwrap();
        assert_eq!(cs101.teacher().unwrap().id(), "P1");
        assert!(registrar.courses().find_by_id("MA101").unwrap().teacher().is_none());

        let e1 = registrar.enrollments().find("E1", "CS101").unwrap();
        assert_eq!(e1.grades(), &[9.0, 8.5]);
        assert!(!registrar.enrollments().find("E1", "MA101").unwrap().is_graded());

        let half = registrar.teachers().find_by_id("P2").unwrap();
        assert_eq!(half.contract(), ContractType::HalfTime);
    }

    #[test]
    fn test_transcript_for_imported_student() {
        let dir = TempDir::new().unwrap();
        let mut registrar = Registrar::default();
        import_roster(&mut registrar, &files(&dir)).unwrap();

        let report = registrar.enrollments().student_transcript("E1").unwrap();
        let codes: Vec<&str> = report.courses.iter().map(|c| c.course_code.as_str()).collect();
        assert_eq!(codes, vec!["CS101", "MA101"]);
        assert_eq!(report.overall_average, 8.75);

        let text = registrar.enrollments().student_report("E1");
        assert!(text.contains("Grades: 9, 8.5"), "{}", text);
        assert!(text.ends_with("Overall average: 8.75"));
    }

    #[test]
    fn test_students_and_courses_only() {
        let dir = TempDir::new().unwrap();
        let mut registrar = Registrar::default();
        let roster = RosterFiles {
            students: write(&dir, "students.csv", STUDENTS),
            courses: write(&dir, "courses.csv", "code,name,credits,teacher_id\nCS101,Intro,4,\n"),
            ..RosterFiles::default()
        };

        let summary = import_roster(&mut registrar, &roster).unwrap();
        assert_eq!(summary.students, 2);
        assert_eq!(summary.courses, 1);
        assert_eq!(summary.enrollments, 0);
    }

    #[test]
    fn test_invalid_row_reports_row_number() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "students.csv",
            "id,first_name,last_name,birth_date,program,enrollment_number\n\
             E1,Laura,Castillo,2002-05-20,Software,123-45678\n\
             E2,Pedro,Santos,2001-01-15,Software,12345\n",
        );
        let mut registrar = Registrar::default();

        let err = load_students(&mut registrar, &path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("row 2"), "{}", message);
        assert_eq!(registrar.students().count(), 1);
    }

    #[test]
    fn test_unknown_teacher_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "courses.csv", "code,name,credits,teacher_id\nCS101,Intro,4,P9\n");
        let mut registrar = Registrar::default();

        let err = load_courses(&mut registrar, &path).unwrap_err();
        assert!(format!("{:#}", err).contains("row 1"));
        assert!(registrar.courses().is_empty());
    }

    #[test]
    fn test_out_of_range_grade_rejected() {
        let dir = TempDir::new().unwrap();
        let mut registrar = Registrar::default();
        load_students(&mut registrar, &write(&dir, "s.csv", STUDENTS)).unwrap();
        load_courses(&mut registrar, &write(&dir, "c.csv", "code,name,credits,teacher_id\nCS101,Intro,4,\n")).unwrap();

        let grades = write(&dir, "g.csv", "student_id,course_code,grade\nE1,CS101,11\n");
        let err = load_grades(&mut registrar, &grades).unwrap_err();
        assert!(format!("{:#}", err).contains("row 1"));
        assert!(registrar.enrollments().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let mut registrar = Registrar::default();
        let err = load_students(&mut registrar, Path::new("/no/such/students.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV file"));
    }
}
