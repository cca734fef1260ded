//! Identity details collected before the story starts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Name, age and background entered on the identity form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    name: String,
    age: u16,
    education: String,
}

impl Identity {
    pub const MIN_AGE: u16 = 1;
    pub const MAX_AGE: u16 = 150;
    pub const MAX_NAME_LEN: usize = 80;

    /// Validates and normalises the form.
    ///
    /// Name and age are required; background may be left blank.
    pub fn new(
        name: impl Into<String>,
        age: u16,
        education: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.chars().count() > Self::MAX_NAME_LEN {
            return Err(ValidationError::invalid_format(
                "name",
                format!("must be at most {} characters", Self::MAX_NAME_LEN),
            ));
        }
        if !(Self::MIN_AGE..=Self::MAX_AGE).contains(&age) {
            return Err(ValidationError::out_of_range(
                "age",
                i64::from(Self::MIN_AGE),
                i64::from(Self::MAX_AGE),
                i64::from(age),
            ));
        }

        Ok(Self {
            name,
            age,
            education: education.into().trim().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u16 {
        self.age
    }

    pub fn education(&self) -> &str {
        &self.education
    }
}
