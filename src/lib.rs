// Academic Records - Core Library
// Exposes all modules for use in the CLI and tests

pub mod error;       // Error types shared by every layer
pub mod validation;  // Field rules checked by constructors
pub mod entities;    // Person, Student, Teacher, Course, Enrollment
pub mod store;       // Generic keyed entity store
pub mod enrollment;  // Enrollment engine + analytics
pub mod config;      // JSON settings
pub mod registrar;   // Facade over stores and engine
pub mod roster;      // CSV import
pub mod sample;      // Seeded sample data

// Re-export commonly used types
pub use error::{RecordsError, RecordsResult};
pub use validation::{FieldRule, FieldValue, PASSING_GRADE, parse_grade};
pub use entities::{
    ContractType, Course, Enrollment, EnrollmentStatus, Identifiable, Person, Student, Teacher,
};
pub use store::EntityStore;
pub use enrollment::{
    CourseLine, CoursePopularity, EnrollmentEngine, ProgramStats, StudentReport, StudentStanding,
};
pub use config::{OrphanPolicy, RecordsConfig};
pub use registrar::{Overview, Registrar, RegistrarSummary};
pub use roster::{import_roster, ImportSummary, RosterFiles};
pub use sample::{generate, SeedSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
