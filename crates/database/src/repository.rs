use crate::DbError;
use core_types::{
    DriverRegistration, Facility, FacilityRegistration, FieldCheck, ValidationErrors,
    ValidationIssue,
};
use sqlx::postgres::{PgConnection, PgPool, Postgres};
use sqlx::Transaction;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Result of a driver registration that reached the database without errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCreation {
    Created { driver_id: i32, vehicle_links: u64 },
    /// Nothing was written; the transaction was rolled back.
    Rejected(ValidationErrors),
}

/// Result of a facility registration that reached the database without errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacilityCreation {
    Created(Facility),
    DuplicateName,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Validates and inserts a driver plus its drivable vehicles in one transaction.
    ///
    /// Field rules and duplicate checks all run before deciding, so a rejected
    /// registration reports every problem at once. The transaction holds one
    /// pooled connection, which goes back to the pool on every exit path.
    pub async fn create_driver(
        &self,
        registration: &DriverRegistration,
    ) -> Result<DriverCreation, DbError> {
        let mut tx = self.pool.begin().await?;

        let outcome = register_driver(&mut tx, registration).await;
        match outcome {
            Ok(created @ DriverCreation::Created { .. }) => {
                tx.commit().await?;
                Ok(created)
            }
            Ok(rejected) => {
                tx.rollback().await?;
                Ok(rejected)
            }
            Err(e) => {
                // Dropping `tx` also rolls back, so a failed explicit rollback is only logged.
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Driver transaction rollback failed.");
                }
                Err(e)
            }
        }
    }

    /// Inserts a facility unless one with the same case-insensitive name exists.
    ///
    /// The check and the insert run as separate pool queries. A concurrent
    /// insert of the same name is caught by the unique index and surfaces as
    /// a `DbError` for which `is_unique_violation` is true.
    pub async fn create_facility(
        &self,
        registration: &FacilityRegistration,
    ) -> Result<FacilityCreation, DbError> {
        if self.facility_name_exists(&registration.name).await? {
            return Ok(FacilityCreation::DuplicateName);
        }

        let facility = sqlx::query_as::<_, Facility>(
            r#"
            INSERT INTO "Facilities" (name, capacity, location, enabled)
            VALUES ($1, $2, $3, true)
            RETURNING id, name, capacity, location, enabled
            "#,
        )
        .bind(&registration.name)
        .bind(registration.capacity)
        .bind(&registration.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(FacilityCreation::Created(facility))
    }

    /// Facility names are compared case-insensitively, enabled or not.
    pub async fn facility_name_exists(&self, name: &str) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM "Facilities" WHERE LOWER(name) = LOWER($1))"#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

async fn register_driver(
    tx: &mut Transaction<'_, Postgres>,
    registration: &DriverRegistration,
) -> Result<DriverCreation, DbError> {
    let FieldCheck { age, mut issues } = registration.check_fields();

    if license_in_use(&mut **tx, &registration.license_number).await? {
        issues.push(ValidationIssue::DuplicateLicense);
    }
    if driver_name_in_use(&mut **tx, &registration.name).await? {
        issues.push(ValidationIssue::DuplicateDriverName);
    }

    let age = match age {
        Some(age) if issues.is_empty() => age,
        _ => return Ok(DriverCreation::Rejected(ValidationErrors::new(issues))),
    };

    let driver_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO "Drivers"
            (name, age, gender, contact_number, liscence_id_number, enabled)
        VALUES ($1, $2, $3, $4, $5, true)
        RETURNING id
        "#,
    )
    .bind(&registration.name)
    .bind(age)
    .bind(&registration.gender)
    .bind(&registration.contact_number)
    .bind(&registration.license_number)
    .fetch_one(&mut **tx)
    .await?;

    let vehicle_links = link_vehicles(&mut **tx, driver_id, &registration.vehicle_ids()).await?;

    tracing::info!(driver_id, vehicle_links, "Driver registered.");
    Ok(DriverCreation::Created {
        driver_id,
        vehicle_links,
    })
}

/// License numbers match exactly; only enabled drivers count.
async fn license_in_use(conn: &mut PgConnection, license_number: &str) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM "Drivers"
            WHERE liscence_id_number = $1 AND enabled = true
        )
        "#,
    )
    .bind(license_number)
    .fetch_one(&mut *conn)
    .await?;
    Ok(exists)
}

/// Names match case-insensitively; only enabled drivers count.
async fn driver_name_in_use(conn: &mut PgConnection, name: &str) -> Result<bool, DbError> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM "Drivers"
            WHERE LOWER(name) = LOWER($1) AND enabled = true
        )
        "#,
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;
    Ok(exists)
}

/// Inserts one enabled `DriverVehicles` row per vehicle id in a single statement.
///
/// The ids travel as one array parameter, so the list length is not bounded
/// by the protocol's bind-parameter limit.
async fn link_vehicles(
    conn: &mut PgConnection,
    driver_id: i32,
    vehicle_ids: &[i32],
) -> Result<u64, DbError> {
    if vehicle_ids.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query(
        r#"
        INSERT INTO "DriverVehicles" (driver_id, vehicle_id, enabled)
        SELECT $1, vehicle_id, true
        FROM UNNEST($2::int4[]) AS vehicle_id
        "#,
    )
    .bind(driver_id)
    .bind(vehicle_ids)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}
