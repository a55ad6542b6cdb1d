//! Shared test utilities for Pesso.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.
#![allow(clippy::unwrap_used)]

use crate::{entities, errors::Result};
use chrono::{DateTime, TimeZone, Utc};
use rand::{SeedableRng, rngs::StdRng};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A pinned point in time for operations that take an injected clock.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

/// A deterministic random source for roulette draws.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a test envelope with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `id` - Envelope id
/// * `name` - Envelope name
///
/// # Defaults
/// * `icon`: "cash"
/// * `amount`: 20.0
/// * `goal`: None
pub async fn create_test_envelope(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
) -> Result<entities::envelope::Model> {
    create_custom_envelope(db, id, name, 20.0, None).await
}

/// Creates a test envelope with custom balance and goal.
/// Use this when you need to test specific envelope configurations.
pub async fn create_custom_envelope(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    amount: f64,
    goal: Option<f64>,
) -> Result<entities::envelope::Model> {
    let model = entities::envelope::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        icon: Set("cash".to_string()),
        amount: Set(amount),
        goal: Set(goal),
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Creates a test savings goal.
pub async fn create_test_goal(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    target: f64,
    saved: f64,
) -> Result<entities::goal::Model> {
    let model = entities::goal::ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        target: Set(target),
        saved: Set(saved),
        emoji: Set("\u{1f3af}".to_string()),
        date: Set(None),
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Sets up a complete test environment with an envelope.
/// Returns (db, envelope) for common test scenarios.
pub async fn setup_with_envelope() -> Result<(DatabaseConnection, entities::envelope::Model)> {
    let db = setup_test_db().await?;
    let envelope = create_test_envelope(&db, "1", "Test Envelope").await?;
    Ok((db, envelope))
}
