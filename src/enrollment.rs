// 📊 Enrollment Engine - Relationships, grades and academic analytics
//
// Owns the enrollment collection. Students and courses stay owned by their
// stores; an enrollment only holds shared references to them.
//
// Invariants enforced here:
// - At most one enrollment per (student id, course code)
// - Every recorded grade lies in [0, 10]
//
// Averages follow one rule everywhere: a student's (or program's, or the
// whole system's) average is the unweighted mean of per-enrollment averages,
// counting only enrollments that have at least one grade.

use crate::entities::{Course, Enrollment, EnrollmentStatus, Identifiable, Student};
use crate::error::{RecordsError, RecordsResult};
use crate::store::EntityStore;
use crate::validation::{FieldValue, GRADE_RULE};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type EnrollmentKey = (String, String);

fn key(student_id: &str, course_code: &str) -> EnrollmentKey {
    (student_id.to_string(), course_code.to_string())
}

fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

// ============================================================================
// REPORT TYPES
// ============================================================================

/// A student's standing across all of their enrollments
#[derive(Debug, Clone, Serialize)]
pub struct StudentStanding {
    pub student: Arc<Student>,
    /// Mean of per-course averages over graded courses (0.0 if none)
    pub average: f64,
    pub enrolled_courses: usize,
    pub graded_courses: usize,
}

impl StudentStanding {
    pub fn summary(&self) -> String {
        format!(
            "{} ({}) → Average: {:.2} over {}/{} graded courses",
            self.student.full_name(),
            self.student.id(),
            self.average,
            self.graded_courses,
            self.enrolled_courses
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoursePopularity {
    pub course: Arc<Course>,
    pub enrollment_count: usize,
}

/// Per-program aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramStats {
    pub program: String,
    /// Distinct students enrolled in at least one course
    pub student_count: usize,
    /// Mean of per-enrollment averages over graded enrollments (0.0 if none)
    pub average_grade: f64,
}

impl ProgramStats {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} students → Average: {:.2}",
            self.program, self.student_count, self.average_grade
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseLine {
    pub course_code: String,
    pub course_name: String,
    pub grades: Vec<f64>,
    pub average: f64,
    pub status: EnrollmentStatus,
}

/// Everything a transcript shows for one student
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub student: Arc<Student>,
    pub courses: Vec<CourseLine>,
    /// Over courses with at least one grade only
    pub overall_average: f64,
}

impl StudentReport {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} courses, overall average {:.2}",
            self.student.full_name(),
            self.courses.len(),
            self.overall_average
        )
    }
}

impl fmt::Display for StudentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== REPORT FOR {} =====", self.student.full_name())?;
        writeln!(f, "ID: {}", self.student.id())?;
        writeln!(f, "Program: {}", self.student.program())?;
        writeln!(f, "Enrollment number: {}", self.student.enrollment_number())?;
        writeln!(f)?;
        writeln!(f, "Enrolled courses: {}", self.courses.len())?;
        writeln!(f)?;
        writeln!(f, "Course detail:")?;

        for line in &self.courses {
            let grades = if line.grades.is_empty() {
                "—".to_string()
            } else {
                line.grades
                    .iter()
                    .map(|g| g.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            writeln!(f, "  - {} ({})", line.course_name, line.course_code)?;
            writeln!(f, "    Grades: {}", grades)?;
            writeln!(f, "    Average: {:.2}", line.average)?;
            writeln!(f, "    Status: {}", line.status)?;
        }

        writeln!(f)?;
        write!(f, "Overall average: {:.2}", self.overall_average)
    }
}

// ============================================================================
// ENROLLMENT ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct EnrollmentEngine {
    /// Creation order is preserved for every listing
    enrollments: IndexMap<EnrollmentKey, Enrollment>,
}

impl EnrollmentEngine {
    pub fn new() -> Self {
        EnrollmentEngine {
            enrollments: IndexMap::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Create the enrollment for (student, course) with no grades yet
    pub fn enroll(&mut self, student: Arc<Student>, course: Arc<Course>) -> RecordsResult<&Enrollment> {
        let k = key(student.id(), course.code());

        if self.enrollments.contains_key(&k) {
            debug!(student_id = %k.0, course_code = %k.1, "duplicate enrollment rejected");
            return Err(RecordsError::DuplicateEnrollment {
                student_id: k.0,
                course_code: k.1,
            });
        }

        let enrollment = Enrollment::new(student, course);
        debug!(
            enrollment_id = enrollment.id(),
            student_id = %k.0,
            course_code = %k.1,
            "enrollment created"
        );

        let (index, _) = self.enrollments.insert_full(k, enrollment);
        Ok(&self.enrollments[index])
    }

    /// Resolve both ids through their stores, then enroll
    ///
    /// A missing student or course is an absent required reference and
    /// fails with `InvalidArgument`.
    pub fn enroll_by_id(
        &mut self,
        students: &EntityStore<Student>,
        courses: &EntityStore<Course>,
        student_id: &str,
        course_code: &str,
    ) -> RecordsResult<&Enrollment> {
        let student = students
            .find_by_id(student_id)
            .ok_or_else(|| RecordsError::invalid_argument(format!("student '{}' does not exist", student_id)))?;
        let course = courses
            .find_by_id(course_code)
            .ok_or_else(|| RecordsError::invalid_argument(format!("course '{}' does not exist", course_code)))?;

        self.enroll(student, course)
    }

    /// Append a grade to an existing enrollment
    ///
    /// The range check runs first, so an invalid grade for a missing
    /// enrollment reports `OutOfRange`.
    pub fn add_grade(&mut self, student_id: &str, course_code: &str, grade: f64) -> RecordsResult<()> {
        GRADE_RULE.check("grade", FieldValue::Number(grade))?;

        let enrollment = self
            .enrollments
            .get_mut(&key(student_id, course_code))
            .ok_or_else(|| {
                RecordsError::not_found(format!(
                    "no enrollment for student '{}' in course '{}'",
                    student_id, course_code
                ))
            })?;

        enrollment.record_grade(grade)?;
        debug!(student_id, course_code, grade, "grade recorded");
        Ok(())
    }

    /// Drop every enrollment of a student; returns how many were dropped
    pub fn remove_student(&mut self, student_id: &str) -> usize {
        let before = self.enrollments.len();
        self.enrollments.retain(|(sid, _), _| sid != student_id);
        before - self.enrollments.len()
    }

    /// Drop every enrollment in a course; returns how many were dropped
    pub fn remove_course(&mut self, course_code: &str) -> usize {
        let before = self.enrollments.len();
        self.enrollments.retain(|(_, code), _| code != course_code);
        before - self.enrollments.len()
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    pub fn find(&self, student_id: &str, course_code: &str) -> Option<&Enrollment> {
        self.enrollments.get(&key(student_id, course_code))
    }

    pub fn enrollments_for_student(&self, student_id: &str) -> Vec<&Enrollment> {
        self.iter().filter(|e| e.student_id() == student_id).collect()
    }

    pub fn enrollments_for_course(&self, course_code: &str) -> Vec<&Enrollment> {
        self.iter().filter(|e| e.course_code() == course_code).collect()
    }

    /// Snapshot copy of every enrollment, in creation order
    pub fn all_enrollments(&self) -> Vec<Enrollment> {
        self.enrollments.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enrollment> {
        self.enrollments.values()
    }

    pub fn count(&self) -> usize {
        self.enrollments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enrollments.is_empty()
    }

    // ------------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------------

    pub fn student_transcript(&self, student_id: &str) -> Option<StudentReport> {
        let enrollments = self.enrollments_for_student(student_id);
        let student = Arc::clone(enrollments.first()?.student());

        let courses = enrollments
            .iter()
            .map(|e| CourseLine {
                course_code: e.course_code().to_string(),
                course_name: e.course().name().to_string(),
                grades: e.grades().to_vec(),
                average: e.average(),
                status: e.status(),
            })
            .collect();

        let overall_average = mean(enrollments.iter().filter(|e| e.is_graded()).map(|e| e.average()));

        Some(StudentReport {
            student,
            courses,
            overall_average,
        })
    }

    /// Printable transcript, or a "not found" line when the student has no enrollments
    pub fn student_report(&self, student_id: &str) -> String {
        match self.student_transcript(student_id) {
            Some(report) => report.to_string(),
            None => format!("No enrollments found for student {}", student_id),
        }
    }

    /// One standing per student, in order of each student's first enrollment
    pub fn student_standings(&self) -> Vec<StudentStanding> {
        let mut groups: IndexMap<&str, Vec<&Enrollment>> = IndexMap::new();
        for e in self.iter() {
            groups.entry(e.student_id()).or_default().push(e);
        }

        groups
            .into_values()
            .map(|group| {
                let graded: Vec<f64> = group.iter().filter(|e| e.is_graded()).map(|e| e.average()).collect();
                StudentStanding {
                    student: Arc::clone(group[0].student()),
                    average: mean(graded.iter().copied()),
                    enrolled_courses: group.len(),
                    graded_courses: graded.len(),
                }
            })
            .collect()
    }

    /// Highest averages first; equal averages keep first-enrollment order
    pub fn ranked_standings(&self) -> Vec<StudentStanding> {
        let mut standings = self.student_standings();
        standings.sort_by(|a, b| b.average.total_cmp(&a.average));
        standings
    }

    /// At most `n` students, best average first
    pub fn top_students(&self, n: usize) -> Vec<Arc<Student>> {
        self.ranked_standings()
            .into_iter()
            .take(n)
            .map(|s| s.student)
            .collect()
    }

    /// Students with at least one graded course and an average strictly below `threshold`
    pub fn at_risk_students(&self, threshold: f64) -> Vec<Arc<Student>> {
        self.student_standings()
            .into_iter()
            .filter(|s| s.graded_courses > 0 && s.average < threshold)
            .map(|s| s.student)
            .collect()
    }

    /// Courses with at least one enrollment, most enrolled first
    pub fn course_popularity(&self) -> Vec<CoursePopularity> {
        let mut groups: IndexMap<&str, CoursePopularity> = IndexMap::new();
        for e in self.iter() {
            groups
                .entry(e.course_code())
                .or_insert_with(|| CoursePopularity {
                    course: Arc::clone(e.course()),
                    enrollment_count: 0,
                })
                .enrollment_count += 1;
        }

        let mut ranked: Vec<CoursePopularity> = groups.into_values().collect();
        ranked.sort_by(|a, b| b.enrollment_count.cmp(&a.enrollment_count));
        ranked
    }

    pub fn most_popular_courses(&self) -> Vec<Arc<Course>> {
        self.course_popularity().into_iter().map(|p| p.course).collect()
    }

    /// Mean of per-enrollment averages over graded enrollments, 0.0 if none
    pub fn overall_average(&self) -> f64 {
        mean(self.iter().filter(|e| e.is_graded()).map(|e| e.average()))
    }

    pub fn stats_by_program(&self) -> BTreeMap<String, ProgramStats> {
        let mut groups: BTreeMap<&str, Vec<&Enrollment>> = BTreeMap::new();
        for e in self.iter() {
            groups.entry(e.student().program()).or_default().push(e);
        }

        groups
            .into_iter()
            .map(|(program, group)| {
                let mut student_ids: Vec<&str> = group.iter().map(|e| e.student_id()).collect();
                student_ids.sort_unstable();
                student_ids.dedup();

                let stats = ProgramStats {
                    program: program.to_string(),
                    student_count: student_ids.len(),
                    average_grade: mean(group.iter().filter(|e| e.is_graded()).map(|e| e.average())),
                };
                (program.to_string(), stats)
            })
            .collect()
    }

    /// Distinct enrolled students (by id) accepted by `predicate`
    pub fn search_students<P>(&self, predicate: P) -> Vec<Arc<Student>>
    where
        P: Fn(&Student) -> bool,
    {
        let mut distinct: IndexMap<&str, &Arc<Student>> = IndexMap::new();
        for e in self.iter() {
            distinct.entry(e.student_id()).or_insert(e.student());
        }

        distinct
            .into_values()
            .filter(|s| predicate(s))
            .cloned()
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
