//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. It provides functions for establishing database connections and
//! creating all necessary tables based on the entity definitions. The module
//! uses `SeaORM`'s `Schema::create_table_from_entity` method to automatically
//! generate SQL statements from the entity models, ensuring that the database
//! schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{Challenge, Contribution, Envelope, Goal, Notification};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns the default
/// `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back
/// to a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    // mode=rwc creates the database file on first run
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/pesso.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is
/// set. This function handles connection errors and provides a clean interface
/// for database access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate
/// proper SQL statements for table creation, ensuring the database schema
/// matches the Rust struct definitions. It creates tables for envelopes,
/// goals, challenges, contributions, and notifications.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    // Use SeaORM's proper table creation using Schema::create_table_from_entity
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Create tables using SeaORM's schema generation; IF NOT EXISTS keeps
    // startup idempotent across runs against the same database file
    let mut envelope_table = schema.create_table_from_entity(Envelope);
    let mut goal_table = schema.create_table_from_entity(Goal);
    let mut challenge_table = schema.create_table_from_entity(Challenge);
    let mut contribution_table = schema.create_table_from_entity(Contribution);
    let mut notification_table = schema.create_table_from_entity(Notification);

    db.execute(builder.build(envelope_table.if_not_exists())).await?;
    db.execute(builder.build(goal_table.if_not_exists())).await?;
    db.execute(builder.build(challenge_table.if_not_exists())).await?;
    db.execute(builder.build(contribution_table.if_not_exists())).await?;
    db.execute(builder.build(notification_table.if_not_exists())).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        challenge::Model as ChallengeModel, contribution::Model as ContributionModel,
        envelope::Model as EnvelopeModel, goal::Model as GoalModel,
        notification::Model as NotificationModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        // Use in-memory database for testing to avoid schema conflicts with an
        // existing database file
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that we can execute a query to verify the connection is working
        let _: Vec<EnvelopeModel> = Envelope::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<EnvelopeModel> = Envelope::find().limit(1).all(&db).await?;
        let _: Vec<GoalModel> = Goal::find().limit(1).all(&db).await?;
        let _: Vec<ChallengeModel> = Challenge::find().limit(1).all(&db).await?;
        let _: Vec<ContributionModel> = Contribution::find().limit(1).all(&db).await?;
        let _: Vec<NotificationModel> = Notification::find().limit(1).all(&db).await?;

        Ok(())
    }
}
