//! Directory queries
//!
//! Lookups over the six organizational tables plus the contact-card
//! resolver used to freeze address books into order metadata.

use super::RepoResult;
use shared::models::{Client, ContactCard, Contractor, Coordinator, Crew, Depot, Role, Site};
use sqlx::SqlitePool;

/// Find a coordinator by code
pub async fn find_coordinator(pool: &SqlitePool, code: &str) -> RepoResult<Option<Coordinator>> {
    let row = sqlx::query_as::<_, Coordinator>(
        "SELECT code, name, address, phone, email FROM coordinators WHERE code = ?1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Find a contractor by code
pub async fn find_contractor(pool: &SqlitePool, code: &str) -> RepoResult<Option<Contractor>> {
    let row = sqlx::query_as::<_, Contractor>(
        "SELECT code, name, coordinator_code, address, phone, email FROM contractors WHERE code = ?1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Find a client by code
pub async fn find_client(pool: &SqlitePool, code: &str) -> RepoResult<Option<Client>> {
    let row = sqlx::query_as::<_, Client>(
        "SELECT code, name, contractor_code, address, phone, email FROM clients WHERE code = ?1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Find a site by code
pub async fn find_site(pool: &SqlitePool, code: &str) -> RepoResult<Option<Site>> {
    let row = sqlx::query_as::<_, Site>(
        "SELECT code, name, client_code, contractor_code, coordinator_code, address, phone, email \
         FROM sites WHERE code = ?1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Find a field crew by code
pub async fn find_crew(pool: &SqlitePool, code: &str) -> RepoResult<Option<Crew>> {
    let row = sqlx::query_as::<_, Crew>(
        "SELECT code, name, site_code, address, phone, email FROM crews WHERE code = ?1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Find a depot by code
pub async fn find_depot(pool: &SqlitePool, code: &str) -> RepoResult<Option<Depot>> {
    let row = sqlx::query_as::<_, Depot>(
        "SELECT code, name, operator_code, is_active, address, phone, email FROM depots WHERE code = ?1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// List active depots, operated ones first, then by code.
///
/// Pool assignment (test vs production) is applied by the caller since it
/// depends on the creating party, not the depot row alone.
pub async fn find_active_depots(pool: &SqlitePool) -> RepoResult<Vec<Depot>> {
    let rows = sqlx::query_as::<_, Depot>(
        "SELECT code, name, operator_code, is_active, address, phone, email \
         FROM depots WHERE is_active = 1 \
         ORDER BY (operator_code IS NULL) ASC, code ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Resolve the contact card for any directory party.
///
/// Returns `None` when the code is not present in the table for that role.
pub async fn find_contact(
    pool: &SqlitePool,
    role: Role,
    code: &str,
) -> RepoResult<Option<ContactCard>> {
    let card = match role {
        Role::Coordinator => find_coordinator(pool, code).await?.map(|c| ContactCard {
            code: c.code,
            role,
            name: c.name,
            address: c.address,
            phone: c.phone,
            email: c.email,
        }),
        Role::Contractor => find_contractor(pool, code).await?.map(|c| ContactCard {
            code: c.code,
            role,
            name: c.name,
            address: c.address,
            phone: c.phone,
            email: c.email,
        }),
        Role::Client => find_client(pool, code).await?.map(|c| ContactCard {
            code: c.code,
            role,
            name: c.name,
            address: c.address,
            phone: c.phone,
            email: c.email,
        }),
        Role::Site => find_site(pool, code).await?.map(|s| ContactCard {
            code: s.code,
            role,
            name: s.name,
            address: s.address,
            phone: s.phone,
            email: s.email,
        }),
        Role::FieldCrew => find_crew(pool, code).await?.map(|c| ContactCard {
            code: c.code,
            role,
            name: c.name,
            address: c.address,
            phone: c.phone,
            email: c.email,
        }),
        Role::Depot => find_depot(pool, code).await?.map(|d| ContactCard {
            code: d.code,
            role,
            name: d.name,
            address: d.address,
            phone: d.phone,
            email: d.email,
        }),
    };
    Ok(card)
}
