use std::fmt;
use thiserror::Error;

/// A single rule a driver registration failed. The display text is the
/// message shown to the admin user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Driver must be at least 18 years old.")]
    UnderageDriver,

    #[error("Contact number must contain numbers only.")]
    ContactNotNumeric,

    #[error("Contact number must be exactly 11 digits.")]
    ContactWrongLength,

    #[error("License ID already exists.")]
    DuplicateLicense,

    #[error(
        "Driver name already exists. Please add an additional identifier (e.g. Jr., Sr., Middle Initial)."
    )]
    DuplicateDriverName,
}

/// Every issue collected for one request, in the order the rules were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self(issues)
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Messages are joined with newlines so the client can show them as a list.
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
