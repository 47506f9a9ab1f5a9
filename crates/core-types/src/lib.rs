pub mod driver;
pub mod error;
pub mod facility;

// Re-export the core types to provide a clean public API.
pub use driver::{AgeInput, DriverRegistration, FieldCheck, VehicleId, check_contact_number};
pub use error::{ValidationErrors, ValidationIssue};
pub use facility::{Facility, FacilityRegistration};
