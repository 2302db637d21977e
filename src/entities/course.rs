// 📚 Course Entity - Code is identity, teacher is a shared reference
//
// The course never owns its teacher: the teacher lives in its own store and
// the course only holds an Arc to it for display.

use super::teacher::Teacher;
use super::Identifiable;
use crate::error::RecordsResult;
use crate::validation::{require_non_blank, FieldValue, CREDITS_RULE};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    code: String,
    name: String,
    credits: u8,
    teacher: Option<Arc<Teacher>>,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        credits: u8,
        teacher: Option<Arc<Teacher>>,
    ) -> RecordsResult<Self> {
        let code = code.into();
        let name = name.into();

        require_non_blank("code", &code)?;
        require_non_blank("name", &name)?;
        CREDITS_RULE.check("credits", FieldValue::Number(f64::from(credits)))?;

        Ok(Course {
            code,
            name,
            credits,
            teacher,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn credits(&self) -> u8 {
        self.credits
    }

    pub fn teacher(&self) -> Option<&Arc<Teacher>> {
        self.teacher.as_ref()
    }

    /// Copy of this course with a different assigned teacher
    pub fn with_teacher(&self, teacher: Option<Arc<Teacher>>) -> Course {
        Course {
            teacher,
            ..self.clone()
        }
    }
}

impl Identifiable for Course {
    fn id(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let teacher = self
            .teacher
            .as_ref()
            .map(|t| t.full_name())
            .unwrap_or_else(|| "Unassigned".to_string());

        write!(
            f,
            "{} - {} ({} credits) - Teacher: {}",
            self.code, self.name, self.credits, teacher
        )
    }
}
