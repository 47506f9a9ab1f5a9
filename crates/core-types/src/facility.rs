use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request body for creating a facility.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityRegistration {
    pub name: String,
    pub capacity: i32,
    pub location: String,
}

/// Represents a row from the `Facilities` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Facility {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub location: String,
    pub enabled: bool,
}
