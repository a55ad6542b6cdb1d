//! Savings-goal logic - Handles the standalone goal collection.
//!
//! Goals accumulate progress independently of envelopes. There is no upper
//! bound on `saved` and no completion transition here; a goal that passes its
//! target simply keeps counting.

use crate::{
    core::{notification, validate_amount},
    entities::{Goal, goal},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all savings goals, in stable id order.
pub async fn get_all_goals(db: &DatabaseConnection) -> Result<Vec<goal::Model>> {
    Goal::find()
        .order_by_asc(goal::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a goal by its unique ID, returning None if not found.
pub async fn get_goal_by_id(db: &DatabaseConnection, goal_id: &str) -> Result<Option<goal::Model>> {
    Goal::find_by_id(goal_id).one(db).await.map_err(Into::into)
}

/// Adds progress to a savings goal.
///
/// # Arguments
/// * `goal_id` - The goal to credit
/// * `amount` - Amount to add; must be a positive finite number
/// * `now` - Event time used for the emitted notification
pub async fn add_to_goal(
    db: &DatabaseConnection,
    goal_id: &str,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<goal::Model> {
    validate_amount(amount)?;

    let existing = get_goal_by_id(db, goal_id)
        .await?
        .ok_or_else(|| Error::GoalNotFound {
            id: goal_id.to_string(),
        })?;

    let new_saved = existing.saved + amount;
    let mut active: goal::ActiveModel = existing.into();
    active.saved = Set(new_saved);
    let updated = active.update(db).await?;

    notification::record(
        db,
        "goal",
        "Goal Progress!",
        &format!(
            "Added ${amount:.2} to {}. Total: ${:.2}",
            updated.name, updated.saved
        ),
        Some(amount),
        now,
    )
    .await;

    Ok(updated)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{create_test_goal, fixed_now, setup_test_db};

    #[tokio::test]
    async fn test_add_to_goal_validation() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_goal(&db, "g1", "New Car", 15000.0, 3500.0).await?;

        let result = add_to_goal(&db, "g1", 0.0, fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: 0.0 }));

        let result = add_to_goal(&db, "g1", f64::NAN, fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { amount: _ }));

        // Declined operations leave the goal untouched
        let goal = get_goal_by_id(&db, "g1").await?.unwrap();
        assert_eq!(goal.saved, 3500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_goal_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        // Empty collection and unknown ids both decline the same way
        let result = add_to_goal(&db, "missing", 10.0, fixed_now()).await;
        assert!(matches!(result.unwrap_err(), Error::GoalNotFound { id: _ }));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_goal_accumulates() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_goal(&db, "g1", "New Car", 15000.0, 3500.0).await?;

        let updated = add_to_goal(&db, "g1", 250.0, fixed_now()).await?;
        assert_eq!(updated.saved, 3750.0);
        assert_eq!(updated.target, 15000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_saved_may_exceed_target() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_goal(&db, "g1", "Bicycle", 100.0, 90.0).await?;

        // No auto-completion and no cap at this layer
        let updated = add_to_goal(&db, "g1", 50.0, fixed_now()).await?;
        assert_eq!(updated.saved, 140.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_goal_emits_notification() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_goal(&db, "g1", "New Car", 15000.0, 0.0).await?;

        add_to_goal(&db, "g1", 100.0, fixed_now()).await?;

        let notifications = crate::core::notification::get_all_notifications(&db).await?;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, "goal");
        assert_eq!(notifications[0].amount, Some(100.0));

        Ok(())
    }
}
