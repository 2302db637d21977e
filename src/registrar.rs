// 🏛️ Registrar - Stores + enrollment engine behind one facade
//
// The registrar is what callers (CLI, CSV import, sample data) talk to.
// It owns one store per entity type and the enrollment engine, and applies
// the configured orphan policy when something is removed.

use crate::config::{OrphanPolicy, RecordsConfig};
use crate::enrollment::{CoursePopularity, EnrollmentEngine, ProgramStats, StudentStanding};
use crate::entities::{Course, Enrollment, Identifiable, Student, Teacher};
use crate::error::{RecordsError, RecordsResult};
use crate::store::EntityStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

// ============================================================================
// SUMMARY TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrarSummary {
    pub students: usize,
    pub teachers: usize,
    pub courses: usize,
    pub enrollments: usize,
    pub graded_enrollments: usize,
    pub overall_average: f64,
}

impl RegistrarSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} students, {} teachers, {} courses | {} enrollments ({} graded), overall average {:.2}",
            self.students,
            self.teachers,
            self.courses,
            self.enrollments,
            self.graded_enrollments,
            self.overall_average
        )
    }
}

/// Everything the analytics overview shows, in one serializable value
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub summary: RegistrarSummary,
    pub top_students: Vec<StudentStanding>,
    pub at_risk_threshold: f64,
    pub at_risk_students: Vec<StudentStanding>,
    pub popular_courses: Vec<CoursePopularity>,
    pub programs: BTreeMap<String, ProgramStats>,
}

// ============================================================================
// REGISTRAR
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Registrar {
    config: RecordsConfig,
    students: EntityStore<Student>,
    teachers: EntityStore<Teacher>,
    courses: EntityStore<Course>,
    enrollments: EnrollmentEngine,
}

impl Registrar {
    pub fn new(config: RecordsConfig) -> Self {
        Registrar {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &RecordsConfig {
        &self.config
    }

    pub fn students(&self) -> &EntityStore<Student> {
        &self.students
    }

    pub fn teachers(&self) -> &EntityStore<Teacher> {
        &self.teachers
    }

    pub fn courses(&self) -> &EntityStore<Course> {
        &self.courses
    }

    pub fn enrollments(&self) -> &EnrollmentEngine {
        &self.enrollments
    }

    // ------------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------------

    pub fn add_student(&mut self, student: Student) -> RecordsResult<Arc<Student>> {
        self.students.add(student)
    }

    pub fn add_teacher(&mut self, teacher: Teacher) -> RecordsResult<Arc<Teacher>> {
        self.teachers.add(teacher)
    }

    pub fn add_course(&mut self, course: Course) -> RecordsResult<Arc<Course>> {
        self.courses.add(course)
    }

    /// Point a stored course at a stored teacher
    ///
    /// Enrollments created before the change keep the course value they were
    /// created with.
    pub fn assign_teacher(&mut self, course_code: &str, teacher_id: &str) -> RecordsResult<Arc<Course>> {
        let course = self
            .courses
            .find_by_id(course_code)
            .ok_or_else(|| RecordsError::not_found(format!("course '{}'", course_code)))?;
        let teacher = self
            .teachers
            .find_by_id(teacher_id)
            .ok_or_else(|| RecordsError::not_found(format!("teacher '{}'", teacher_id)))?;

        debug!(course_code, teacher_id, "teacher assigned");
        self.courses.replace(course.with_teacher(Some(teacher)))
    }

    pub fn remove_student(&mut self, student_id: &str) -> bool {
        if !self.students.remove(student_id) {
            return false;
        }

        if self.config.orphan_policy == OrphanPolicy::Cascade {
            let dropped = self.enrollments.remove_student(student_id);
            info!(student_id, dropped, "student removed with its enrollments");
        } else {
            debug!(student_id, "student removed, enrollments retained");
        }
        true
    }

    pub fn remove_course(&mut self, course_code: &str) -> bool {
        if !self.courses.remove(course_code) {
            return false;
        }

        if self.config.orphan_policy == OrphanPolicy::Cascade {
            let dropped = self.enrollments.remove_course(course_code);
            info!(course_code, dropped, "course removed with its enrollments");
        } else {
            debug!(course_code, "course removed, enrollments retained");
        }
        true
    }

    /// Under `Cascade`, courses taught by the removed teacher become unassigned
    pub fn remove_teacher(&mut self, teacher_id: &str) -> bool {
        if !self.teachers.remove(teacher_id) {
            return false;
        }

        if self.config.orphan_policy == OrphanPolicy::Cascade {
            let unassigned = self.courses.update_where(
                |c| c.teacher().is_some_and(|t| t.id() == teacher_id),
                |c| c.with_teacher(None),
            );
            info!(teacher_id, unassigned, "teacher removed from courses");
        }
        true
    }

    // ------------------------------------------------------------------------
    // Enrollments
    // ------------------------------------------------------------------------

    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> RecordsResult<&Enrollment> {
        self.enrollments
            .enroll_by_id(&self.students, &self.courses, student_id, course_code)
    }

    pub fn record_grade(&mut self, student_id: &str, course_code: &str, grade: f64) -> RecordsResult<()> {
        self.enrollments.add_grade(student_id, course_code, grade)
    }

    // ------------------------------------------------------------------------
    // Reports with configured defaults
    // ------------------------------------------------------------------------

    pub fn top_students(&self) -> Vec<Arc<Student>> {
        self.enrollments.top_students(self.config.top_students)
    }

    pub fn at_risk_students(&self) -> Vec<Arc<Student>> {
        self.enrollments.at_risk_students(self.config.at_risk_threshold)
    }

    pub fn summary(&self) -> RegistrarSummary {
        RegistrarSummary {
            students: self.students.count(),
            teachers: self.teachers.count(),
            courses: self.courses.count(),
            enrollments: self.enrollments.count(),
            graded_enrollments: self.enrollments.iter().filter(|e| e.is_graded()).count(),
            overall_average: self.enrollments.overall_average(),
        }
    }

    pub fn overview(&self) -> Overview {
        let threshold = self.config.at_risk_threshold;
        let standings = self.enrollments.ranked_standings();

        let top_students = standings
            .iter()
            .take(self.config.top_students)
            .cloned()
            .collect();

        let mut at_risk_students: Vec<StudentStanding> = standings
            .into_iter()
            .filter(|s| s.graded_courses > 0 && s.average < threshold)
            .collect();
        at_risk_students.sort_by(|a, b| a.average.total_cmp(&b.average));

        Overview {
            summary: self.summary(),
            top_students,
            at_risk_threshold: threshold,
            at_risk_students,
            popular_courses: self.enrollments.course_popularity(),
            programs: self.enrollments.stats_by_program(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
