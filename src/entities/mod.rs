// Entity Models - people, courses and the enrollments linking them
//
// Each stored entity has:
// - A unique, non-empty string identity that never changes after creation
// - A validating constructor, so a partially built entity never exists
// - Read-only accessors (values change only by building a new entity)

pub mod person;
pub mod student;
pub mod teacher;
pub mod course;
pub mod enrollment;

pub use person::Person;
pub use student::Student;
pub use teacher::{ContractType, Teacher};
pub use course::Course;
pub use enrollment::{Enrollment, EnrollmentStatus};

/// Anything an EntityStore can hold: keyed by an exact-match string id
pub trait Identifiable {
    fn id(&self) -> &str;
}
