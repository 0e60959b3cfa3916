// Record model: a `Person` (first/last name) and a `Student`, which is a
// `Person` plus the course they are enrolled in.
//
// Names are validated and title-cased when they are assigned, so two records
// typed with different casing compare equal.

use std::fmt;

use crate::error::{Field, ValidationError};

/// True when `value` is non-empty and every character is alphabetic.
pub fn is_alphabetic(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphabetic)
}

/// Capitalize the first letter of each whitespace-separated word and
/// lowercase the rest.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut word_start = true;
    for c in value.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Check `value` against the alphabetic rule for `field`.
pub fn validate(field: Field, value: &str) -> Result<(), ValidationError> {
    if is_alphabetic(value) {
        Ok(())
    } else {
        Err(ValidationError::new(field, value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    first_name: String,
    last_name: String,
}

impl Person {
    pub fn new(first_name: &str, last_name: &str) -> Result<Self, ValidationError> {
        validate(Field::FirstName, first_name)?;
        validate(Field::LastName, last_name)?;
        Ok(Self {
            first_name: title_case(first_name),
            last_name: title_case(last_name),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Replace the first name. On failure the previous value is kept.
    pub fn set_first_name(&mut self, value: &str) -> Result<(), ValidationError> {
        validate(Field::FirstName, value)?;
        self.first_name = title_case(value);
        Ok(())
    }

    /// Replace the last name. On failure the previous value is kept.
    pub fn set_last_name(&mut self, value: &str) -> Result<(), ValidationError> {
        validate(Field::LastName, value)?;
        self.last_name = title_case(value);
        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name(), self.last_name())
    }
}

/// A registered student. The course name carries no model-level rule; the
/// console checks it when it is typed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    person: Person,
    course_name: String,
}

impl Student {
    pub fn new(
        first_name: &str,
        last_name: &str,
        course_name: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            person: Person::new(first_name, last_name)?,
            course_name: course_name.to_string(),
        })
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn first_name(&self) -> &str {
        self.person.first_name()
    }

    pub fn last_name(&self) -> &str {
        self.person.last_name()
    }

    pub fn set_first_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.person.set_first_name(value)
    }

    pub fn set_last_name(&mut self, value: &str) -> Result<(), ValidationError> {
        self.person.set_last_name(value)
    }

    pub fn course_name(&self) -> &str {
        &self.course_name
    }

    pub fn set_course_name(&mut self, value: impl Into<String>) {
        self.course_name = value.into();
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.person, self.course_name)
    }
}
