use crate::error::ValidationIssue;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Drivers younger than this cannot be registered.
pub const MINIMUM_DRIVER_AGE: i32 = 18;

/// Local mobile numbers are 11 digits long (e.g. 09171234567).
pub const CONTACT_NUMBER_LENGTH: usize = 11;

static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits-only pattern is valid"));

/// The admin form posts ages either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AgeInput {
    Number(f64),
    Text(String),
}

impl AgeInput {
    /// Returns the age as whole years, or `None` when the input is not a
    /// finite, non-negative integer.
    pub fn years(&self) -> Option<i32> {
        let value = match self {
            AgeInput::Number(n) => *n,
            AgeInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };

        let whole = value.is_finite() && value.fract() == 0.0;
        let in_range = value >= 0.0 && value <= f64::from(i32::MAX);
        (whole && in_range).then_some(value as i32)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VehicleIdInput {
    Number(i64),
    Text(String),
}

/// A vehicle id from the drivable-vehicles list. The form's multiselect
/// posts ids as strings, so numeric strings are accepted like numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "VehicleIdInput")]
pub struct VehicleId(pub i32);

impl TryFrom<VehicleIdInput> for VehicleId {
    type Error = String;

    fn try_from(input: VehicleIdInput) -> Result<Self, Self::Error> {
        match input {
            VehicleIdInput::Number(n) => i32::try_from(n)
                .map(VehicleId)
                .map_err(|_| format!("vehicle id {n} is out of range")),
            VehicleIdInput::Text(s) => s
                .trim()
                .parse::<i32>()
                .map(VehicleId)
                .map_err(|_| format!("vehicle id {s:?} is not an integer")),
        }
    }
}

/// Request body for creating a driver.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverRegistration {
    pub name: String,
    #[serde(default)]
    pub age: Option<AgeInput>,
    pub gender: String,
    /// A missing number is checked as an empty one so it is reported with
    /// the other field issues.
    #[serde(default)]
    pub contact_number: String,
    pub license_number: String,
    #[serde(default)]
    pub drivable_vehicles: Option<Vec<VehicleId>>,
}

/// Outcome of the rules that need no database access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    /// Set only when the age passed its rule.
    pub age: Option<i32>,
    pub issues: Vec<ValidationIssue>,
}

impl DriverRegistration {
    /// Runs the age and contact number rules, collecting every failure.
    pub fn check_fields(&self) -> FieldCheck {
        let mut issues = Vec::new();

        let age = self
            .age
            .as_ref()
            .and_then(AgeInput::years)
            .filter(|years| *years >= MINIMUM_DRIVER_AGE);
        if age.is_none() {
            issues.push(ValidationIssue::UnderageDriver);
        }

        issues.extend(check_contact_number(&self.contact_number));

        FieldCheck { age, issues }
    }

    pub fn vehicle_ids(&self) -> Vec<i32> {
        self.drivable_vehicles
            .iter()
            .flatten()
            .map(|VehicleId(id)| *id)
            .collect()
    }
}

/// The digits rule and the length rule are independent; a number can fail both.
/// Length counts UTF-16 code units, as browsers do for form input.
pub fn check_contact_number(contact_number: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if !DIGITS_ONLY.is_match(contact_number) {
        issues.push(ValidationIssue::ContactNotNumeric);
    }
    if contact_number.encode_utf16().count() != CONTACT_NUMBER_LENGTH {
        issues.push(ValidationIssue::ContactWrongLength);
    }
    issues
}
